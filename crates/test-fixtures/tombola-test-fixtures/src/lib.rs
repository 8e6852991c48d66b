use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    catalogs: HashMap<String, String>,
    rosters: HashMap<String, String>,
    #[serde(rename = "node-graphs")]
    node_graphs: HashMap<String, NodeGraphEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeGraphEntry {
    spec: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

/// Raw JSON for a catalog fixture. Consumers decode with their own types.
pub fn catalog_json(name: &str) -> Result<String> {
    let rel = MANIFEST
        .catalogs
        .get(name)
        .ok_or_else(|| anyhow!("unknown catalog fixture {name:?}"))?;
    read_to_string(rel)
}

/// Raw JSON for a roster fixture.
pub fn roster_json(name: &str) -> Result<String> {
    let rel = MANIFEST
        .rosters
        .get(name)
        .ok_or_else(|| anyhow!("unknown roster fixture {name:?}"))?;
    read_to_string(rel)
}

/// Raw JSON for a graph spec fixture.
pub fn graph_spec_json(name: &str) -> Result<String> {
    let entry = MANIFEST
        .node_graphs
        .get(name)
        .ok_or_else(|| anyhow!("unknown node-graph fixture {name:?}"))?;
    read_to_string(&entry.spec)
}

pub fn graph_names() -> Vec<String> {
    let mut names: Vec<String> = MANIFEST.node_graphs.keys().cloned().collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves() {
        for name in MANIFEST.catalogs.keys() {
            catalog_json(name).expect("catalog fixture should load");
        }
        for name in MANIFEST.rosters.keys() {
            roster_json(name).expect("roster fixture should load");
        }
        for name in graph_names() {
            graph_spec_json(&name).expect("graph fixture should load");
        }
    }

    #[test]
    fn unknown_names_error() {
        assert!(catalog_json("nope").is_err());
        assert!(graph_spec_json("nope").is_err());
    }
}
