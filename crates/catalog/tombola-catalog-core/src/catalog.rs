//! JSON-persisted asset catalog: name → trigger text, weights, enabled flag.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Per-asset configuration as persisted on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub trigger_text: String,
    #[serde(default = "default_one")]
    pub model_weight: f32,
    #[serde(default = "default_one")]
    pub clip_weight: f32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Selection probability mass for weighted sampling.
    #[serde(default = "default_one")]
    pub weight: f32,
}

fn default_one() -> f32 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Default for CatalogEntry {
    fn default() -> Self {
        CatalogEntry {
            trigger_text: String::new(),
            model_weight: 1.0,
            clip_weight: 1.0,
            enabled: true,
            weight: 1.0,
        }
    }
}

/// The decoded catalog mapping. A `BTreeMap` keeps iteration order stable by
/// name, which sequential selection depends on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Example content written on first run so users have a template to edit.
    pub fn example() -> Self {
        let mut catalog = Catalog::new();
        catalog.update(
            "example_adapter_1.safetensors",
            CatalogEntry {
                trigger_text: "example trigger 1".to_string(),
                ..CatalogEntry::default()
            },
        );
        catalog.update(
            "example_adapter_2.safetensors",
            CatalogEntry {
                trigger_text: "example trigger 2".to_string(),
                model_weight: 0.8,
                clip_weight: 0.8,
                ..CatalogEntry::default()
            },
        );
        catalog
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }

    /// Load `path`, creating it with [`Catalog::example`] when absent. Any
    /// failure degrades to an empty catalog; the engine then sees an empty
    /// valid-name set rather than an error.
    pub fn load_or_create(path: &Path) -> Self {
        if !path.exists() {
            let catalog = Catalog::example();
            if let Err(err) = catalog.save(path) {
                log::warn!("could not write default catalog {}: {err}", path.display());
            }
            return catalog;
        }
        match Catalog::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                log::warn!("could not load catalog {}: {err}", path.display());
                Catalog::new()
            }
        }
    }

    /// Insert or replace one entry (the "update config" command).
    pub fn update(&mut self, name: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Delete one entry (the "remove from config" command). Returns whether
    /// the name was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Enabled entries in stable name order.
    pub fn enabled(&self) -> impl Iterator<Item = (&String, &CatalogEntry)> {
        self.entries.iter().filter(|(_, entry)| entry.enabled)
    }

    pub fn enabled_names(&self) -> Vec<String> {
        self.enabled().map(|(name, _)| name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_and_remove_round_trip() {
        let mut catalog = Catalog::new();
        catalog.update("a", CatalogEntry::default());
        assert!(catalog.get("a").is_some());
        assert!(catalog.remove("a"));
        assert!(!catalog.remove("a"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn enabled_filtering_keeps_name_order() {
        let mut catalog = Catalog::new();
        catalog.update("charlie", CatalogEntry::default());
        catalog.update(
            "bravo",
            CatalogEntry {
                enabled: false,
                ..CatalogEntry::default()
            },
        );
        catalog.update("alpha", CatalogEntry::default());
        assert_eq!(catalog.enabled_names(), vec!["alpha", "charlie"]);
    }

    #[test]
    fn first_run_creates_the_example_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");

        let created = Catalog::load_or_create(&path);
        assert!(path.exists());
        assert_eq!(created.len(), 2);

        // A second load reads the persisted file, not the example.
        let reloaded = Catalog::load_or_create(&path);
        assert_eq!(created, reloaded);
    }

    #[test]
    fn malformed_files_degrade_to_an_empty_catalog() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").expect("write");
        assert!(Catalog::load_or_create(&path).is_empty());
    }

    #[test]
    fn save_then_load_preserves_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");

        let mut catalog = Catalog::new();
        catalog.update(
            "hero.safetensors",
            CatalogEntry {
                trigger_text: "hero, cape".to_string(),
                model_weight: 0.7,
                clip_weight: 0.6,
                enabled: true,
                weight: 2.0,
            },
        );
        catalog.save(&path).expect("save");
        assert_eq!(Catalog::load(&path).expect("load"), catalog);
    }
}
