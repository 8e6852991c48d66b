//! Character roster selection: pick N records, emit their prompts and merge
//! their adapters onto the stack.

use hashbrown::HashMap;
use rand::seq::SliceRandom;
use rand::Rng;
use tombola_catalog_core::CharacterSheet;
use tombola_select_core::{Stack, StackEntry, NONE_SENTINEL};

use crate::eval::eval_node::{stack_input, OutputMap};
use crate::eval::graph_runtime::GraphRuntime;
use crate::eval::selector::seed_mode;
use crate::types::{NodeSpec, Value};

/// Individual prompt ports exposed alongside the combined one.
const PROMPT_PORTS: usize = 3;

pub(crate) fn eval_character_cast(
    rt: &mut GraphRuntime,
    spec: &NodeSpec,
    inputs: &OutputMap,
) -> Result<OutputMap, String> {
    let params = &spec.params;
    let incoming = sanitized(stack_input(inputs, "stack"));

    let roster = params.roster.as_deref().and_then(|name| rt.rosters.get(name));
    let Some(roster) = roster else {
        log::warn!("node {}: no roster staged", spec.id);
        return Ok(empty_outputs(incoming, "no roster staged"));
    };
    if roster.characters.is_empty() {
        return Ok(empty_outputs(incoming, "roster has no characters"));
    }

    let mut rng = seed_mode(params).rng();
    let mut count = params.max_count.max(1);
    if !params.allow_duplicates {
        count = count.min(roster.characters.len());
    }

    let picked: Vec<&CharacterSheet> = if params.allow_duplicates {
        (0..count)
            .map(|_| &roster.characters[rng.gen_range(0..roster.characters.len())])
            .collect()
    } else {
        roster.characters.choose_multiple(&mut rng, count).collect()
    };

    // Prompts.
    let base_prompt = roster.base_style.prompt.trim().to_string();
    let char_prompts: Vec<String> = picked
        .iter()
        .map(|character| character.prompt.trim().to_string())
        .collect();
    let joined_characters = char_prompts
        .iter()
        .filter(|prompt| !prompt.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(&params.separator);
    let combined_prompt = [base_prompt.as_str(), joined_characters.as_str()]
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    // Stack merge: style adapter first, then each character's adapters,
    // first occurrence winning against the whole stack.
    let mut stack = incoming;
    if let Some(style) = &roster.base_style.style_adapter {
        push_unique(
            &mut stack,
            style,
            roster.base_style.style_strength,
            roster.base_style.style_strength,
        );
    }
    for character in &picked {
        if let Some(adapter) = &character.adapter {
            push_unique(
                &mut stack,
                adapter,
                character.adapter_strength,
                character.adapter_strength,
            );
        }
        for extra in &character.extras {
            push_unique(&mut stack, &extra.name, extra.model_strength, extra.clip_strength);
        }
    }

    let selected = picked
        .iter()
        .map(|character| character.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let summary = format!(
        "cast: {} of {} characters, stack: {}",
        picked.len(),
        roster.characters.len(),
        stack.len()
    );

    let mut outputs: OutputMap = HashMap::new();
    outputs.insert("base_prompt".to_string(), Value::Text(base_prompt));
    for port in 0..PROMPT_PORTS {
        outputs.insert(
            format!("char{}_prompt", port + 1),
            Value::Text(char_prompts.get(port).cloned().unwrap_or_default()),
        );
    }
    outputs.insert("combined_prompt".to_string(), Value::Text(combined_prompt));
    outputs.insert("stack".to_string(), Value::Stack(stack));
    outputs.insert("selected".to_string(), Value::Text(selected));
    outputs.insert("summary".to_string(), Value::Text(summary));
    Ok(outputs)
}

fn sanitized(stack: Stack) -> Stack {
    stack
        .into_iter()
        .filter(|entry| entry.name != NONE_SENTINEL)
        .collect()
}

fn push_unique(stack: &mut Stack, name: &str, model: f32, clip: f32) {
    if name.is_empty() || name == NONE_SENTINEL {
        return;
    }
    if stack.iter().any(|entry| entry.name == name) {
        return;
    }
    stack.push(StackEntry::new(name, model, clip));
}

fn empty_outputs(stack: Stack, summary: &str) -> OutputMap {
    let mut outputs: OutputMap = HashMap::new();
    outputs.insert("base_prompt".to_string(), Value::text(""));
    for port in 0..PROMPT_PORTS {
        outputs.insert(format!("char{}_prompt", port + 1), Value::text(""));
    }
    outputs.insert("combined_prompt".to_string(), Value::text(""));
    outputs.insert("stack".to_string(), Value::Stack(stack));
    outputs.insert("selected".to_string(), Value::text(""));
    outputs.insert("summary".to_string(), Value::text(summary));
    outputs
}
