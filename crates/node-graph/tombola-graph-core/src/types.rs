use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tombola_select_core::{SelectionMode, Stack};

pub type NodeId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Pick exactly one item and expose it directly.
    RandomPick,
    /// Fixed slot list with simple/advanced strengths.
    PoolStack,
    /// Large slot list with an active-count bound and auto-fill.
    DynamicPoolStack,
    /// Pool sourced from a staged catalog instead of slots.
    CatalogStack,
    /// Pick N character records from a staged roster.
    CharacterCast,
    /// Positional selection over a staged media listing.
    MediaCycle,

    // Sink (for external binding in hosts)
    Output,
}

/// Values flowing between node ports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Value {
    Float(f32),
    Int(i64),
    Bool(bool),
    Text(String),
    Stack(Stack),
}

impl Default for Value {
    fn default() -> Self {
        Value::Text(String::new())
    }
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn as_stack(&self) -> Option<&Stack> {
        match self {
            Value::Stack(stack) => Some(stack),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// How a slot's strength fields are interpreted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrengthMode {
    /// One strength applied to model and clip alike.
    #[default]
    Simple,
    /// Independent fixed model/clip strengths.
    Advanced,
    /// A [min, max] interval resolved per selection.
    Range,
}

/// One caller-configured input slot. Every field is optional so hosts can
/// send only the widgets they actually show.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotParams {
    #[serde(default = "default_slot_name")]
    pub name: String,
    pub strength: Option<f32>,
    pub model_strength: Option<f32>,
    pub clip_strength: Option<f32>,
    pub min_strength: Option<f32>,
    pub max_strength: Option<f32>,
    #[serde(default)]
    pub trigger_words: String,
    #[serde(default = "default_one")]
    pub weight: f32,
}

fn default_slot_name() -> String {
    tombola_select_core::NONE_SENTINEL.to_string()
}

fn default_one() -> f32 {
    1.0
}

impl Default for SlotParams {
    fn default() -> Self {
        SlotParams {
            name: default_slot_name(),
            strength: None,
            model_strength: None,
            clip_strength: None,
            min_strength: None,
            max_strength: None,
            trigger_words: String::new(),
            weight: 1.0,
        }
    }
}

impl SlotParams {
    pub fn named(name: impl Into<String>) -> Self {
        SlotParams {
            name: name.into(),
            ..SlotParams::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeParams {
    #[serde(default = "default_true")]
    pub toggle: bool,
    #[serde(default)]
    pub strength_mode: StrengthMode,
    #[serde(default = "default_selection")]
    pub selection: SelectionMode,
    #[serde(default)]
    pub seed: u64,
    /// `true` re-seeds from system entropy instead of `seed`.
    #[serde(default)]
    pub randomize: bool,
    #[serde(default = "default_count")]
    pub min_count: usize,
    #[serde(default = "default_count")]
    pub max_count: usize,
    /// Slots beyond this bound are ignored; capped by the node's capacity.
    pub max_slots: Option<usize>,
    /// Convert empty slots into auto-fill placeholders.
    #[serde(default)]
    pub auto_populate: bool,
    /// Replay the previous result for this many calls before re-randomizing.
    #[serde(default = "default_stride")]
    pub stride: u32,
    /// Bias against repeating the previous pick when the window resets.
    #[serde(default)]
    pub force_randomize: bool,
    #[serde(default)]
    pub allow_duplicates: bool,
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Name of a catalog staged on the runtime.
    pub catalog: Option<String>,
    /// Name of a roster staged on the runtime.
    pub roster: Option<String>,
    /// Name of a media listing staged on the runtime.
    pub media: Option<String>,
    #[serde(default)]
    pub index: usize,
    #[serde(default = "default_true")]
    pub wrap: bool,
    #[serde(default)]
    pub slots: Vec<SlotParams>,
}

fn default_true() -> bool {
    true
}

fn default_selection() -> SelectionMode {
    SelectionMode::All
}

fn default_count() -> usize {
    1
}

fn default_stride() -> u32 {
    1
}

fn default_separator() -> String {
    ", ".to_string()
}

impl Default for NodeParams {
    fn default() -> Self {
        NodeParams {
            toggle: true,
            strength_mode: StrengthMode::Simple,
            selection: default_selection(),
            seed: 0,
            randomize: false,
            min_count: 1,
            max_count: 1,
            max_slots: None,
            auto_populate: false,
            stride: 1,
            force_randomize: false,
            allow_duplicates: false,
            separator: default_separator(),
            catalog: None,
            roster: None,
            media: None,
            index: 0,
            wrap: true,
            slots: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConnection {
    pub node_id: NodeId,
    #[serde(default = "default_output_key")]
    pub output_key: String,
}

fn default_output_key() -> String {
    "out".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub params: NodeParams,
    #[serde(default)]
    pub inputs: HashMap<String, InputConnection>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphSpec {
    pub nodes: Vec<NodeSpec>,
}
