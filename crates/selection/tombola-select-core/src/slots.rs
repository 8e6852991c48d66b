//! Slot parsing and pool building.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::types::{Candidate, StrengthRange, AUTO_SENTINEL, NONE_SENTINEL};

/// One caller-configured input position, as handed over by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSlot {
    pub name: String,
    #[serde(default)]
    pub strength: StrengthRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_strength: Option<StrengthRange>,
    #[serde(default)]
    pub trigger_text: String,
    #[serde(default = "default_slot_weight")]
    pub weight: f32,
    #[serde(default)]
    pub index: usize,
}

fn default_slot_weight() -> f32 {
    1.0
}

impl RawSlot {
    pub fn named(name: impl Into<String>, index: usize) -> Self {
        RawSlot {
            name: name.into(),
            strength: StrengthRange::default(),
            clip_strength: None,
            trigger_text: String::new(),
            weight: 1.0,
            index,
        }
    }

    pub fn is_none(&self) -> bool {
        self.name.is_empty() || self.name == NONE_SENTINEL
    }

    pub fn is_auto(&self) -> bool {
        self.name == AUTO_SENTINEL
    }
}

/// Split raw trigger text on commas, trim fragments, drop empties and
/// duplicates while preserving slot-local order.
pub fn split_trigger_text(raw: &str) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .filter(|fragment| seen.insert(*fragment))
        .map(str::to_string)
        .collect()
}

/// Pool under construction: resolved candidates plus the `"Auto"` slots that
/// still need a name from [`crate::auto_fill`].
#[derive(Debug, Clone, Default)]
pub struct PoolDraft {
    pub candidates: Vec<Candidate>,
    pub placeholders: Vec<RawSlot>,
    /// Names already claimed by resolved candidates.
    pub used_names: HashSet<String>,
    /// Count of slots dropped because their name was not currently valid.
    pub dropped_missing: usize,
}

/// Assemble candidates from `slots`, filtered against `valid_names` and
/// deduplicated by name with first-wins semantics.
///
/// `"None"` slots are skipped, unknown names are silently dropped (reported
/// through the draft's counter only), and `"Auto"` slots pass through
/// unresolved for auto-fill.
pub fn build_pool(slots: &[RawSlot], valid_names: &[String]) -> PoolDraft {
    let known: HashSet<&str> = valid_names.iter().map(String::as_str).collect();
    let mut draft = PoolDraft::default();

    for slot in slots {
        if slot.is_none() {
            continue;
        }
        if slot.is_auto() {
            draft.placeholders.push(slot.clone());
            continue;
        }
        if !known.contains(slot.name.as_str()) {
            log::debug!("slot {}: unknown name {:?} dropped", slot.index, slot.name);
            draft.dropped_missing += 1;
            continue;
        }
        if draft.used_names.contains(&slot.name) {
            // First occurrence wins; later duplicates drop entirely,
            // trigger words included.
            continue;
        }
        draft.used_names.insert(slot.name.clone());
        draft.candidates.push(Candidate {
            name: slot.name.clone(),
            strength: StrengthRange::new(slot.strength.min, slot.strength.max),
            clip_strength: slot
                .clip_strength
                .map(|range| StrengthRange::new(range.min, range.max)),
            trigger_words: split_trigger_text(&slot.trigger_text),
            weight: slot.weight.max(0.0),
            slot_index: slot.index,
        });
    }

    draft
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn none_and_unknown_slots_are_dropped() {
        let valid = names(&["alpha", "beta"]);
        let slots = vec![
            RawSlot::named("None", 1),
            RawSlot::named("alpha", 2),
            RawSlot::named("ghost", 3),
        ];
        let draft = build_pool(&slots, &valid);
        assert_eq!(draft.candidates.len(), 1);
        assert_eq!(draft.candidates[0].name, "alpha");
        assert_eq!(draft.dropped_missing, 1);
    }

    #[test]
    fn auto_slots_pass_through_unresolved() {
        let valid = names(&["alpha"]);
        let slots = vec![RawSlot::named("Auto", 1), RawSlot::named("alpha", 2)];
        let draft = build_pool(&slots, &valid);
        assert_eq!(draft.candidates.len(), 1);
        assert_eq!(draft.placeholders.len(), 1);
        assert_eq!(draft.placeholders[0].index, 1);
    }

    #[test]
    fn trigger_text_is_split_trimmed_and_deduplicated() {
        assert_eq!(
            split_trigger_text(" foo , bar,,foo ,  baz"),
            vec!["foo".to_string(), "bar".to_string(), "baz".to_string()]
        );
        assert!(split_trigger_text("  ,, ").is_empty());
    }

    #[test]
    fn inverted_strength_bounds_are_swapped() {
        let valid = names(&["alpha"]);
        let mut slot = RawSlot::named("alpha", 1);
        slot.strength = StrengthRange { min: 1.2, max: 0.4 };
        let draft = build_pool(&[slot], &valid);
        assert_eq!(draft.candidates[0].strength.min, 0.4);
        assert_eq!(draft.candidates[0].strength.max, 1.2);
    }

    #[test]
    fn negative_weight_is_clamped_to_zero() {
        let valid = names(&["alpha"]);
        let mut slot = RawSlot::named("alpha", 1);
        slot.weight = -2.5;
        let draft = build_pool(&[slot], &valid);
        assert_eq!(draft.candidates[0].weight, 0.0);
    }
}
