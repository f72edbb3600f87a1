use pesto_util::errors::PestoError;
use pesto_util::process::CommandBuilder;

#[test]
fn test_builder_simple_command() {
    let output = CommandBuilder::new("echo").arg("hello").exec().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "hello");
}

#[test]
fn test_builder_multiple_args() {
    let output = CommandBuilder::new("echo")
        .args(["one", "two", "three"])
        .exec()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "one two three");
}

#[cfg(unix)]
#[test]
fn test_builder_with_env() {
    let output = CommandBuilder::new("sh")
        .arg("-c")
        .arg("echo $MY_TEST_VAR")
        .env("MY_TEST_VAR", "pesto_test_value")
        .exec()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "pesto_test_value");
}

#[cfg(unix)]
#[test]
fn test_builder_with_cwd() {
    let tmp = tempfile::TempDir::new().unwrap();
    let marker = tmp.path().join("pesto_cwd_test.marker");
    std::fs::write(&marker, "ok").unwrap();

    let output = CommandBuilder::new("ls")
        .arg("pesto_cwd_test.marker")
        .cwd(tmp.path().to_str().unwrap())
        .exec()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().contains("pesto_cwd_test.marker"));
}

#[test]
fn test_builder_nonexistent_program() {
    let result = CommandBuilder::new("nonexistent_program_xyz_123").exec();
    assert!(result.is_err());
}

#[test]
fn test_display_joins_args() {
    let cmd = CommandBuilder::new("git").args(["-C", "repo", "show-ref", "--tags"]);
    assert_eq!(cmd.display(), "git -C repo show-ref --tags");
}

#[cfg(unix)]
#[test]
fn test_exec_checked_maps_failure_to_source_error() {
    let err = CommandBuilder::new("sh")
        .args(["-c", "echo boom >&2; exit 3"])
        .exec_checked()
        .unwrap_err();
    match err {
        PestoError::SourceFetch { message } => {
            assert!(message.contains("boom"), "got: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_exec_checked_missing_program() {
    let err = CommandBuilder::new("nonexistent_program_xyz_123")
        .exec_checked()
        .unwrap_err();
    assert!(matches!(err, PestoError::SourceFetch { .. }));
}
