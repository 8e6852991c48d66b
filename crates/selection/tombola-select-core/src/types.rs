//! Core data model for one selection call. All numeric types use f32.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Slot value meaning "this slot is empty".
pub const NONE_SENTINEL: &str = "None";
/// Slot value meaning "leave this slot for auto-fill".
pub const AUTO_SENTINEL: &str = "Auto";

/// Inclusive strength interval a concrete value is drawn from.
///
/// Construction normalizes inverted bounds by swapping, so `min <= max`
/// holds for every value of this type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthRange {
    pub min: f32,
    pub max: f32,
}

impl StrengthRange {
    pub fn new(min: f32, max: f32) -> Self {
        if min <= max {
            StrengthRange { min, max }
        } else {
            StrengthRange { min: max, max: min }
        }
    }

    /// A degenerate range that always resolves to `value`.
    pub fn fixed(value: f32) -> Self {
        StrengthRange {
            min: value,
            max: value,
        }
    }

    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    pub fn contains(&self, value: f32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for StrengthRange {
    fn default() -> Self {
        StrengthRange { min: 1.0, max: 1.0 }
    }
}

fn default_weight() -> f32 {
    1.0
}

/// A single named, weighted, strength-ranged selectable item.
///
/// A `Candidate` whose name is absent from the caller-supplied valid-name set
/// is never constructed; filtering happens upstream in [`crate::build_pool`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub strength: StrengthRange,
    /// Present in the dual-strength variant: the clip value is drawn
    /// independently from this range instead of reusing the model draw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_strength: Option<StrengthRange>,
    #[serde(default)]
    pub trigger_words: Vec<String>,
    /// Selection probability mass for weighted sampling. Never negative.
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Provenance only: the slot this candidate came from.
    #[serde(default)]
    pub slot_index: usize,
}

/// One committed selection, serialized as the host's `(name, model, clip)`
/// triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f32, f32)", into = "(String, f32, f32)")]
pub struct StackEntry {
    pub name: String,
    pub model_strength: f32,
    pub clip_strength: f32,
}

impl StackEntry {
    pub fn new(name: impl Into<String>, model_strength: f32, clip_strength: f32) -> Self {
        StackEntry {
            name: name.into(),
            model_strength,
            clip_strength,
        }
    }
}

impl From<(String, f32, f32)> for StackEntry {
    fn from((name, model_strength, clip_strength): (String, f32, f32)) -> Self {
        StackEntry {
            name,
            model_strength,
            clip_strength,
        }
    }
}

impl From<StackEntry> for (String, f32, f32) {
    fn from(entry: StackEntry) -> Self {
        (entry.name, entry.model_strength, entry.clip_strength)
    }
}

/// Ordered list of committed selections passed between chained calls.
pub type Stack = Vec<StackEntry>;

/// How the sampler picks a sub-collection from the built pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The full pool, order preserved.
    All,
    /// A uniform k-subset without replacement.
    Random,
    /// Draws with replacement proportional to `weight`, deduplicated.
    Weighted,
    /// The first k candidates in pool order, seed-independent.
    Sequential,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectionMode::All => "all",
            SelectionMode::Random => "random",
            SelectionMode::Weighted => "weighted",
            SelectionMode::Sequential => "sequential",
        };
        f.write_str(name)
    }
}

/// Result of one selection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Incoming stack content followed by the newly resolved entries.
    pub stack: Stack,
    /// Union of the selected candidates' trigger words, sorted and
    /// comma-joined.
    pub trigger_text: String,
    /// `name:strength` pairs in selection order.
    pub chosen: String,
    /// Deterministic diagnostic line; consumers match on fields, not prose.
    pub summary: String,
}

impl Selection {
    /// An empty-safe result that passes `stack` through untouched.
    pub fn passthrough(stack: Stack, summary: impl Into<String>) -> Self {
        Selection {
            stack,
            trigger_text: String::new(),
            chosen: String::new(),
            summary: summary.into(),
        }
    }
}
