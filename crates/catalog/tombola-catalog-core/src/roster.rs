//! Character roster files: a base style plus a list of character records.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaseStyle {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub style_adapter: Option<String>,
    #[serde(default = "default_one")]
    pub style_strength: f32,
}

/// An additional adapter attached to a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraAdapter {
    pub name: String,
    #[serde(default = "default_one")]
    pub model_strength: f32,
    #[serde(default = "default_one")]
    pub clip_strength: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub name: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub adapter: Option<String>,
    #[serde(default = "default_one")]
    pub adapter_strength: f32,
    #[serde(default)]
    pub extras: Vec<ExtraAdapter>,
}

fn default_one() -> f32 {
    1.0
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub base_style: BaseStyle,
    #[serde(default)]
    pub characters: Vec<CharacterSheet>,
}

impl Roster {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Missing or malformed files degrade to an empty roster.
    pub fn load_or_empty(path: &Path) -> Self {
        match Roster::load(path) {
            Ok(roster) => roster,
            Err(err) => {
                log::warn!("could not load roster {}: {err}", path.display());
                Roster::default()
            }
        }
    }
}
