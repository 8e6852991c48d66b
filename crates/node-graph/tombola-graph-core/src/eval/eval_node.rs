//! Per-node evaluation logic for the Tombola graph runtime.

use hashbrown::HashMap;
use tombola_select_core::{Selection, Stack};

use crate::eval::graph_runtime::GraphRuntime;
use crate::eval::{cast, media, selector};
use crate::types::{InputConnection, NodeSpec, NodeType, Value};

pub type OutputMap = HashMap<String, Value>;

/// Build an output map containing a single port.
pub(crate) fn keyed_output(key: &str, value: Value) -> OutputMap {
    let mut map = HashMap::with_capacity(1);
    map.insert(key.to_string(), value);
    map
}

/// The incoming accumulator for `key`, or an empty stack when the port is
/// unconnected or carries a non-stack value.
pub(crate) fn stack_input(inputs: &OutputMap, key: &str) -> Stack {
    inputs
        .get(key)
        .and_then(Value::as_stack)
        .cloned()
        .unwrap_or_default()
}

/// Render a [`Selection`] onto the standard selector ports.
pub(crate) fn selection_outputs(selection: Selection) -> OutputMap {
    let mut map = HashMap::with_capacity(4);
    map.insert("stack".to_string(), Value::Stack(selection.stack));
    map.insert("trigger_words".to_string(), Value::Text(selection.trigger_text));
    map.insert("chosen".to_string(), Value::Text(selection.chosen));
    map.insert("summary".to_string(), Value::Text(selection.summary));
    map
}

/// Evaluate a single node, storing its outputs on the runtime.
pub fn eval_node(rt: &mut GraphRuntime, spec: &NodeSpec) -> Result<(), String> {
    let inputs = read_inputs(rt, spec)?;
    let outputs = evaluate_kind(rt, spec, &inputs)?;
    rt.outputs.insert(spec.id.clone(), outputs);
    Ok(())
}

fn evaluate_kind(
    rt: &mut GraphRuntime,
    spec: &NodeSpec,
    inputs: &OutputMap,
) -> Result<OutputMap, String> {
    match &spec.kind {
        NodeType::RandomPick | NodeType::PoolStack | NodeType::DynamicPoolStack => {
            selector::eval_selector(rt, spec, inputs)
        }
        NodeType::CatalogStack => selector::eval_catalog_stack(rt, spec, inputs),
        NodeType::CharacterCast => cast::eval_character_cast(rt, spec, inputs),
        NodeType::MediaCycle => media::eval_media_cycle(rt, spec),
        NodeType::Output => Ok(eval_output(inputs)),
    }
}

/// Sink: republish the connected input so hosts can bind it by node id.
fn eval_output(inputs: &OutputMap) -> OutputMap {
    let value = inputs.get("in").cloned().unwrap_or_default();
    keyed_output("out", value)
}

fn read_inputs(rt: &GraphRuntime, spec: &NodeSpec) -> Result<OutputMap, String> {
    let mut resolved = HashMap::with_capacity(spec.inputs.len());
    for (key, connection) in &spec.inputs {
        resolved.insert(key.clone(), read_connection(rt, spec, key, connection)?);
    }
    Ok(resolved)
}

fn read_connection(
    rt: &GraphRuntime,
    spec: &NodeSpec,
    key: &str,
    connection: &InputConnection,
) -> Result<Value, String> {
    rt.outputs
        .get(&connection.node_id)
        .and_then(|ports| ports.get(&connection.output_key))
        .cloned()
        .ok_or_else(|| {
            format!(
                "node {}: input {} reads missing port {}.{}",
                spec.id, key, connection.node_id, connection.output_key
            )
        })
}
