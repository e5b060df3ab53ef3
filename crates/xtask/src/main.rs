use std::collections::{BTreeMap, BTreeSet};

use anyhow::Context;
use serde::Deserialize;

/// Workspace crates and the internal crates each may depend on
const LAYERS: &[(&str, &[&str])] = &[
    ("tictac-domain", &[]),
    ("tictac-shared", &["tictac-domain"]),
    ("tictac-player", &["tictac-domain", "tictac-shared"]),
];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    /// `Some("dev")` / `Some("build")`; `None` for normal dependencies
    kind: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;
    let violations = layer_violations(&metadata);

    if violations.is_empty() {
        println!("arch-check: {} crates OK", LAYERS.len());
        return Ok(());
    }
    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("{} layering violation(s)", violations.len())
}

fn layer_violations(metadata: &Metadata) -> Vec<String> {
    let allowed: BTreeMap<&str, BTreeSet<&str>> = LAYERS
        .iter()
        .map(|(name, deps)| (*name, deps.iter().copied().collect()))
        .collect();

    let mut violations = Vec::new();
    for package in &metadata.packages {
        let Some(allowed_deps) = allowed.get(package.name.as_str()) else {
            continue;
        };
        for dep in &package.dependencies {
            if dep.kind.as_deref() == Some("dev") {
                continue;
            }
            if allowed.contains_key(dep.name.as_str()) && !allowed_deps.contains(dep.name.as_str())
            {
                violations.push(format!("{} must not depend on {}", package.name, dep.name));
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(json: &str) -> Metadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn allowed_edges_pass() {
        let metadata = metadata(
            r#"{"packages": [
                {"name": "tictac-domain", "dependencies": [{"name": "serde", "kind": null}]},
                {"name": "tictac-player", "dependencies": [
                    {"name": "tictac-domain", "kind": null},
                    {"name": "tictac-shared", "kind": null}
                ]}
            ]}"#,
        );
        assert!(layer_violations(&metadata).is_empty());
    }

    #[test]
    fn upward_edge_is_reported() {
        let metadata = metadata(
            r#"{"packages": [
                {"name": "tictac-shared", "dependencies": [{"name": "tictac-player", "kind": null}]}
            ]}"#,
        );
        assert_eq!(
            layer_violations(&metadata),
            vec!["tictac-shared must not depend on tictac-player".to_string()]
        );
    }

    #[test]
    fn dev_dependencies_are_exempt() {
        let metadata = metadata(
            r#"{"packages": [
                {"name": "tictac-domain", "dependencies": [{"name": "tictac-shared", "kind": "dev"}]}
            ]}"#,
        );
        assert!(layer_violations(&metadata).is_empty());
    }
}
