//! The single parameterized selection path behind every stack-producing node.

use tombola_select_core::{
    config_key, run, RawSlot, SeedMode, Selection, SelectionMode, SelectionRequest,
    StrengthRange, AUTO_SENTINEL, NONE_SENTINEL,
};

use crate::eval::eval_node::{selection_outputs, stack_input, OutputMap};
use crate::eval::graph_runtime::GraphRuntime;
use crate::profile::{profile_for, SelectorProfile};
use crate::types::{NodeParams, NodeSpec, SlotParams, StrengthMode, Value};

pub(crate) fn seed_mode(params: &NodeParams) -> SeedMode {
    if params.randomize {
        SeedMode::Entropy
    } else {
        SeedMode::Fixed(params.seed)
    }
}

/// Run the engine behind the stride gate, replaying the previous result
/// while a configuration is inside its window.
pub(crate) fn run_gated(rt: &GraphRuntime, request: &SelectionRequest, stride: u32) -> Selection {
    let key = config_key(request);
    if let Some(replayed) = rt.stride.replay(key, stride) {
        return replayed;
    }
    let selection = run(request, rt.memo.as_ref());
    rt.stride.store(key, selection.clone());
    selection
}

/// Interpret one slot's strength widgets according to the node's mode.
fn slot_to_raw(
    slot: &SlotParams,
    index: usize,
    mode: StrengthMode,
    profile: &SelectorProfile,
) -> RawSlot {
    let (strength, clip_strength) = match mode {
        StrengthMode::Simple => (StrengthRange::fixed(slot.strength.unwrap_or(1.0)), None),
        StrengthMode::Advanced => (
            StrengthRange::fixed(slot.model_strength.unwrap_or(1.0)),
            Some(StrengthRange::fixed(slot.clip_strength.unwrap_or(1.0))),
        ),
        StrengthMode::Range => (
            StrengthRange::new(
                slot.min_strength.unwrap_or(profile.default_strength.min),
                slot.max_strength.unwrap_or(profile.default_strength.max),
            ),
            None,
        ),
    };
    RawSlot {
        name: slot.name.clone(),
        strength,
        clip_strength,
        trigger_text: slot.trigger_words.clone(),
        weight: slot.weight,
        index,
    }
}

/// Evaluate a slot-driven selector node (RandomPick, PoolStack,
/// DynamicPoolStack) through its [`SelectorProfile`].
pub(crate) fn eval_selector(
    rt: &mut GraphRuntime,
    spec: &NodeSpec,
    inputs: &OutputMap,
) -> Result<OutputMap, String> {
    let profile = profile_for(&spec.kind)
        .ok_or_else(|| format!("node {}: {:?} is not a selector", spec.id, spec.kind))?;
    let params = &spec.params;
    let incoming = stack_input(inputs, "stack");

    if !params.toggle {
        return Ok(selection_outputs(Selection::passthrough(incoming, "disabled")));
    }

    let mut slots: Vec<RawSlot> = Vec::new();
    let mut valid_names = rt.asset_names.clone();

    // Upstream entries double as candidates for the single-pick variant.
    if profile.stack_candidates {
        for entry in &incoming {
            if entry.name == NONE_SENTINEL {
                continue;
            }
            slots.push(RawSlot {
                name: entry.name.clone(),
                strength: StrengthRange::fixed(entry.model_strength),
                clip_strength: Some(StrengthRange::fixed(entry.clip_strength)),
                trigger_text: String::new(),
                weight: 1.0,
                index: 0,
            });
            if !valid_names.contains(&entry.name) {
                valid_names.push(entry.name.clone());
            }
        }
    }

    let active = params.max_slots.unwrap_or(profile.capacity).min(profile.capacity);
    for (offset, slot) in params.slots.iter().take(active).enumerate() {
        let mut raw = slot_to_raw(slot, offset + 1, params.strength_mode, &profile);
        if params.auto_populate && profile.auto_fill && raw.is_none() {
            raw.name = AUTO_SENTINEL.to_string();
        }
        if raw.is_auto() && !profile.auto_fill {
            continue;
        }
        slots.push(raw);
    }

    let (mode, min_count, max_count) = if profile.single {
        (SelectionMode::Random, 1, 1)
    } else {
        (params.selection, params.min_count, params.max_count)
    };

    let prefix_len = incoming
        .iter()
        .filter(|entry| entry.name != NONE_SENTINEL)
        .count();
    let request = SelectionRequest {
        slots,
        stack: incoming,
        valid_names,
        mode,
        min_count,
        max_count,
        seed: seed_mode(params),
        auto_fill_defaults: profile.default_strength,
        avoid_repeat: params.force_randomize,
    };

    let mut outputs = selection_outputs(run_gated(rt, &request, params.stride));
    if profile.single {
        augment_single(&mut outputs, prefix_len);
    }
    Ok(outputs)
}

/// Expose the single chosen entry directly on `name`/`strength` ports.
fn augment_single(outputs: &mut OutputMap, prefix_len: usize) {
    let (name, strength) = outputs
        .get("stack")
        .and_then(Value::as_stack)
        .and_then(|stack| stack.get(prefix_len))
        .map(|entry| (entry.name.clone(), entry.model_strength))
        .unwrap_or_default();
    outputs.insert("name".to_string(), Value::Text(name));
    outputs.insert("strength".to_string(), Value::Float(strength));
}

/// Evaluate a CatalogStack node: the pool is the enabled slice of a staged
/// catalog, not caller slots.
pub(crate) fn eval_catalog_stack(
    rt: &mut GraphRuntime,
    spec: &NodeSpec,
    inputs: &OutputMap,
) -> Result<OutputMap, String> {
    let params = &spec.params;
    let incoming = stack_input(inputs, "stack");

    if !params.toggle {
        return Ok(selection_outputs(Selection::passthrough(incoming, "disabled")));
    }

    let catalog = params
        .catalog
        .as_deref()
        .and_then(|name| rt.catalogs.get(name));
    let Some(catalog) = catalog else {
        log::warn!("node {}: no catalog staged", spec.id);
        return Ok(selection_outputs(Selection::passthrough(
            incoming,
            "no catalog staged",
        )));
    };

    let mut slots = Vec::new();
    let mut valid_names = Vec::new();
    for (index, (name, entry)) in catalog.enabled().enumerate() {
        valid_names.push(name.clone());
        slots.push(RawSlot {
            name: name.clone(),
            strength: StrengthRange::fixed(entry.model_weight),
            clip_strength: Some(StrengthRange::fixed(entry.clip_weight)),
            trigger_text: entry.trigger_text.clone(),
            weight: entry.weight,
            index: index + 1,
        });
    }

    let request = SelectionRequest {
        slots,
        stack: incoming,
        valid_names,
        mode: params.selection,
        min_count: params.min_count,
        max_count: params.max_count,
        seed: seed_mode(params),
        avoid_repeat: params.force_randomize,
        ..SelectionRequest::default()
    };

    Ok(selection_outputs(run_gated(rt, &request, params.stride)))
}
