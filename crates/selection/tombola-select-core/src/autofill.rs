//! Fills unresolved `"Auto"` slots from the remaining valid names.

use rand::Rng;

use crate::slots::{split_trigger_text, PoolDraft};
use crate::types::{Candidate, StrengthRange};

/// Fraction of the default span each bound may be perturbed by. The
/// perturbation always narrows toward the configured defaults.
const NARROWING: f32 = 0.2;

/// Resolve each placeholder by drawing a name uniformly, without replacement,
/// from `valid_names` minus the names already in use. An exhausted remainder
/// drops the placeholder rather than erroring.
///
/// Filled slots get a strength range narrowed at random around `defaults`;
/// their own trigger words and weight are kept.
pub fn auto_fill(
    draft: PoolDraft,
    valid_names: &[String],
    defaults: StrengthRange,
    rng: &mut impl Rng,
) -> Vec<Candidate> {
    let PoolDraft {
        mut candidates,
        placeholders,
        mut used_names,
        ..
    } = draft;

    if placeholders.is_empty() {
        return candidates;
    }

    let mut remaining: Vec<&String> = valid_names
        .iter()
        .filter(|name| !used_names.contains(name.as_str()))
        .collect();

    for slot in placeholders {
        if remaining.is_empty() {
            log::debug!("slot {}: auto-fill pool exhausted", slot.index);
            break;
        }
        let pick = rng.gen_range(0..remaining.len());
        let name = remaining.swap_remove(pick).clone();
        used_names.insert(name.clone());

        candidates.push(Candidate {
            name,
            strength: narrowed(defaults, rng),
            clip_strength: None,
            trigger_words: split_trigger_text(&slot.trigger_text),
            weight: slot.weight.max(0.0),
            slot_index: slot.index,
        });
    }

    candidates
}

/// `min' ∈ [min, min+δ]`, `max' ∈ [max−δ, max]`, clamped so `min' <= max'`.
fn narrowed(defaults: StrengthRange, rng: &mut impl Rng) -> StrengthRange {
    // Deserialized requests may carry inverted defaults.
    let defaults = StrengthRange::new(defaults.min, defaults.max);
    let delta = NARROWING * defaults.span();
    let min = defaults.min + rng.gen_range(0.0..=delta);
    let mut max = defaults.max - rng.gen_range(0.0..=delta);
    if max < min {
        max = min;
    }
    StrengthRange { min, max }
}
