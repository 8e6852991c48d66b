use crate::types::NodeType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    Stack,
    Text,
    Int,
    Float,
    Any,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Float,
    Int,
    Bool,
    Text,
    Enum,
    Slots,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortSpec {
    pub id: &'static str,
    pub ty: PortType,
    pub label: &'static str,
    #[serde(default)]
    pub doc: &'static str,
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub id: &'static str,
    pub ty: ParamType,
    pub label: &'static str,
    #[serde(default)]
    pub doc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_json: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSignature {
    pub type_id: NodeType,
    pub name: &'static str,
    pub category: &'static str,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
    pub params: Vec<ParamSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub version: &'static str,
    pub nodes: Vec<NodeSignature>,
}

// Helpers

fn p_stack_in() -> PortSpec {
    PortSpec {
        id: "stack",
        ty: PortType::Stack,
        label: "Stack",
        doc: "Previously committed selections from an upstream node",
        optional: true,
    }
}

fn p_stack_out() -> PortSpec {
    PortSpec {
        id: "stack",
        ty: PortType::Stack,
        label: "Stack",
        doc: "",
        optional: false,
    }
}

fn p_text_out(id: &'static str, label: &'static str) -> PortSpec {
    PortSpec {
        id,
        ty: PortType::Text,
        label,
        doc: "",
        optional: false,
    }
}

fn p_int_out(id: &'static str, label: &'static str) -> PortSpec {
    PortSpec {
        id,
        ty: PortType::Int,
        label,
        doc: "",
        optional: false,
    }
}

fn selector_outputs() -> Vec<PortSpec> {
    vec![
        p_stack_out(),
        p_text_out("trigger_words", "Trigger Words"),
        p_text_out("chosen", "Chosen"),
        p_text_out("summary", "Summary"),
    ]
}

fn param(id: &'static str, ty: ParamType, label: &'static str) -> ParamSpec {
    ParamSpec {
        id,
        ty,
        label,
        doc: "",
        default_json: None,
        min: None,
        max: None,
    }
}

fn seed_params() -> Vec<ParamSpec> {
    vec![
        ParamSpec {
            default_json: Some(serde_json::json!(0)),
            min: Some(0.0),
            ..param("seed", ParamType::Int, "Seed")
        },
        ParamSpec {
            default_json: Some(serde_json::json!(false)),
            doc: "Re-seed from system entropy instead of the fixed seed",
            ..param("randomize", ParamType::Bool, "Randomize")
        },
    ]
}

fn count_params(max: f64) -> Vec<ParamSpec> {
    vec![
        ParamSpec {
            default_json: Some(serde_json::json!(1)),
            min: Some(1.0),
            max: Some(max),
            ..param("min_count", ParamType::Int, "Min Count")
        },
        ParamSpec {
            default_json: Some(serde_json::json!(3)),
            min: Some(1.0),
            max: Some(max),
            ..param("max_count", ParamType::Int, "Max Count")
        },
    ]
}

pub fn registry() -> Registry {
    use NodeType::*;
    let mut nodes: Vec<NodeSignature> = Vec::new();

    nodes.push(NodeSignature {
        type_id: RandomPick,
        name: "Random Pick",
        category: "Selection",
        inputs: vec![p_stack_in()],
        outputs: {
            let mut outputs = selector_outputs();
            outputs.push(p_text_out("name", "Name"));
            outputs.push(PortSpec {
                id: "strength",
                ty: PortType::Float,
                label: "Strength",
                doc: "",
                optional: false,
            });
            outputs
        },
        params: {
            let mut params = seed_params();
            params.push(param("slots", ParamType::Slots, "Slots"));
            params
        },
    });

    nodes.push(NodeSignature {
        type_id: PoolStack,
        name: "Pool Stack",
        category: "Selection",
        inputs: vec![p_stack_in()],
        outputs: selector_outputs(),
        params: {
            let mut params = vec![
                ParamSpec {
                    default_json: Some(serde_json::json!(true)),
                    ..param("toggle", ParamType::Bool, "Enabled")
                },
                ParamSpec {
                    default_json: Some(serde_json::json!("simple")),
                    doc: "simple | advanced | range",
                    ..param("strength_mode", ParamType::Enum, "Strength Mode")
                },
                ParamSpec {
                    default_json: Some(serde_json::json!("all")),
                    doc: "all | random | weighted | sequential",
                    ..param("selection", ParamType::Enum, "Selection")
                },
            ];
            params.extend(seed_params());
            params.extend(count_params(10.0));
            params.push(param("slots", ParamType::Slots, "Slots"));
            params
        },
    });

    nodes.push(NodeSignature {
        type_id: DynamicPoolStack,
        name: "Dynamic Pool Stack",
        category: "Selection",
        inputs: vec![p_stack_in()],
        outputs: selector_outputs(),
        params: {
            let mut params = vec![
                ParamSpec {
                    default_json: Some(serde_json::json!(5)),
                    min: Some(1.0),
                    max: Some(50.0),
                    doc: "Slots beyond this bound are ignored",
                    ..param("max_slots", ParamType::Int, "Max Slots")
                },
                ParamSpec {
                    default_json: Some(serde_json::json!(false)),
                    doc: "Convert empty slots into auto-fill placeholders",
                    ..param("auto_populate", ParamType::Bool, "Auto Populate")
                },
                ParamSpec {
                    default_json: Some(serde_json::json!("random")),
                    ..param("selection", ParamType::Enum, "Selection")
                },
            ];
            params.extend(seed_params());
            params.extend(count_params(50.0));
            params.push(param("slots", ParamType::Slots, "Slots"));
            params
        },
    });

    nodes.push(NodeSignature {
        type_id: CatalogStack,
        name: "Catalog Stack",
        category: "Selection",
        inputs: vec![p_stack_in()],
        outputs: selector_outputs(),
        params: {
            let mut params = vec![
                param("catalog", ParamType::Text, "Catalog"),
                ParamSpec {
                    default_json: Some(serde_json::json!("random")),
                    doc: "random | weighted | sequential | all",
                    ..param("selection", ParamType::Enum, "Selection")
                },
                ParamSpec {
                    default_json: Some(serde_json::json!(1)),
                    min: Some(1.0),
                    doc: "Replay the previous result for this many calls",
                    ..param("stride", ParamType::Int, "Stride")
                },
                ParamSpec {
                    default_json: Some(serde_json::json!(false)),
                    doc: "Bias against repeating the previous pick",
                    ..param("force_randomize", ParamType::Bool, "Force Randomize")
                },
            ];
            params.extend(seed_params());
            params.extend(count_params(50.0));
            params
        },
    });

    nodes.push(NodeSignature {
        type_id: CharacterCast,
        name: "Character Cast",
        category: "Selection",
        inputs: vec![p_stack_in()],
        outputs: vec![
            p_text_out("base_prompt", "Base Prompt"),
            p_text_out("char1_prompt", "Character 1"),
            p_text_out("char2_prompt", "Character 2"),
            p_text_out("char3_prompt", "Character 3"),
            p_text_out("combined_prompt", "Combined Prompt"),
            p_stack_out(),
            p_text_out("selected", "Selected"),
            p_text_out("summary", "Summary"),
        ],
        params: {
            let mut params = vec![
                param("roster", ParamType::Text, "Roster"),
                ParamSpec {
                    default_json: Some(serde_json::json!(2)),
                    min: Some(1.0),
                    max: Some(10.0),
                    doc: "Number of characters to select",
                    ..param("max_count", ParamType::Int, "Characters")
                },
                ParamSpec {
                    default_json: Some(serde_json::json!(false)),
                    ..param("allow_duplicates", ParamType::Bool, "Allow Duplicates")
                },
                ParamSpec {
                    default_json: Some(serde_json::json!(", ")),
                    ..param("separator", ParamType::Text, "Separator")
                },
            ];
            params.extend(seed_params());
            params
        },
    });

    nodes.push(NodeSignature {
        type_id: MediaCycle,
        name: "Media Cycle",
        category: "Selection",
        inputs: vec![],
        outputs: vec![
            p_text_out("path", "Path"),
            p_text_out("file_name", "File Name"),
            p_int_out("index", "Index"),
            p_int_out("total", "Total"),
            p_text_out("summary", "Summary"),
        ],
        params: vec![
            param("media", ParamType::Text, "Media"),
            ParamSpec {
                default_json: Some(serde_json::json!(0)),
                min: Some(0.0),
                ..param("index", ParamType::Int, "Index")
            },
            ParamSpec {
                default_json: Some(serde_json::json!(true)),
                doc: "Fold the index modulo the listing length",
                ..param("wrap", ParamType::Bool, "Wrap")
            },
        ],
    });

    nodes.push(NodeSignature {
        type_id: Output,
        name: "Output",
        category: "Sinks",
        inputs: vec![PortSpec {
            id: "in",
            ty: PortType::Any,
            label: "In",
            doc: "",
            optional: false,
        }],
        outputs: vec![PortSpec {
            id: "out",
            ty: PortType::Any,
            label: "Out",
            doc: "",
            optional: false,
        }],
        params: vec![],
    });

    Registry {
        version: env!("CARGO_PKG_VERSION"),
        nodes,
    }
}
