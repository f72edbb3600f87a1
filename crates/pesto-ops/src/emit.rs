//! Rendering of the generated Starlark files.

use pesto_resolver::ResolvedDependency;

const HEADER: &str = "# This file is generated. Do not modify.";

fn body(statements: &[String]) -> String {
    if statements.is_empty() {
        "    pass".to_string()
    } else {
        statements.join("\n")
    }
}

fn version_comment(dep: &ResolvedDependency) -> String {
    match dep {
        ResolvedDependency::Local { name, path, .. } => format!("# {name}, path: {path}"),
        ResolvedDependency::Remote { name, version, .. } => format!("# {name}, version: {version}"),
    }
}

fn repository_rule(dep: &ResolvedDependency) -> String {
    match dep {
        ResolvedDependency::Local { name, path, .. } => {
            format!("    local_repository(name = \"{name}\", path = \"{path}\")")
        }
        ResolvedDependency::Remote {
            name,
            url,
            revision,
            ..
        } => format!(
            "    git_repository(name = \"{name}\", remote = \"{url}\", commit = \"{revision}\")"
        ),
    }
}

/// `load.bzl`: declares one repository rule per resolved dependency inside
/// `pesto_load()`.
pub fn render_load_file(deps: &[ResolvedDependency]) -> String {
    let versions: Vec<String> = deps.iter().map(version_comment).collect();
    let rules: Vec<String> = deps.iter().map(repository_rule).collect();
    format!(
        "{HEADER}\n\n\
         load(\"@bazel_tools//tools/build_defs/repo:git.bzl\", \"git_repository\")\n\n\
         {}\n\n\
         def pesto_load():\n\
         {}\n",
        versions.join("\n"),
        body(&rules)
    )
}

/// `init.bzl`: loads every declared initializer and calls it from
/// `pesto_init()`, in resolved order.
pub fn render_init_file(deps: &[ResolvedDependency]) -> String {
    let initializers: Vec<_> = deps.iter().filter_map(|d| d.initializer()).collect();
    let loads: Vec<String> = initializers
        .iter()
        .map(|i| format!("load(\"{}\", \"{}\")", i.path, i.method))
        .collect();
    let calls: Vec<String> = initializers
        .iter()
        .map(|i| format!("    {}()", i.method))
        .collect();
    format!(
        "{HEADER}\n\n{}\n\ndef pesto_init():\n{}\n",
        loads.join("\n"),
        body(&calls)
    )
}
