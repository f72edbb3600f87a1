//! Parsing of `git show-ref --tags -d` output into versioned revisions.

use std::collections::BTreeMap;

use pesto_core::version::Version;

/// Map every tag that parses as a [`Version`] to the commit it points at.
///
/// With `-d`, annotated tags appear twice: once with the tag object and once
/// as `refs/tags/<name>^{}` with the peeled commit. The peeled entry wins.
/// Tags whose names are not dotted versions (e.g. `v1.2`, `latest`) are
/// skipped.
pub fn parse_show_ref(output: &str) -> BTreeMap<Version, String> {
    let mut revisions = BTreeMap::new();
    let mut peeled = BTreeMap::new();

    for line in output.lines() {
        let Some((revision, reference)) = line.trim().split_once(' ') else {
            continue;
        };
        let Some(tag) = reference.strip_prefix("refs/tags/") else {
            continue;
        };
        let (tag, is_peeled) = match tag.strip_suffix("^{}") {
            Some(name) => (name, true),
            None => (tag, false),
        };
        let version = match Version::parse(tag) {
            Ok(v) => v,
            Err(_) => {
                tracing::debug!("Skipping non-version tag `{tag}`");
                continue;
            }
        };
        let target = if is_peeled { &mut peeled } else { &mut revisions };
        target.insert(version, revision.to_string());
    }

    revisions.extend(peeled);
    revisions
}
