//! Per-variant configuration records for the collapsed selector.
//!
//! The host ships several near-identical selection nodes; they are all the
//! same parameterized implementation differing only in these records.

use tombola_select_core::StrengthRange;

use crate::types::NodeType;

#[derive(Debug, Clone, Copy)]
pub struct SelectorProfile {
    /// Hard upper bound on configurable slots.
    pub capacity: usize,
    /// Defaults auto-fill narrows toward, and the fallback slot range.
    pub default_strength: StrengthRange,
    /// Whether `"Auto"` placeholders and `auto_populate` are honored.
    pub auto_fill: bool,
    /// Pin the selection to exactly one item and expose it on extra ports.
    pub single: bool,
    /// Treat incoming stack entries as additional pool candidates.
    pub stack_candidates: bool,
}

/// The slot-driven selector kinds. Catalog, roster and media nodes source
/// their pools elsewhere and have no profile.
pub fn profile_for(kind: &NodeType) -> Option<SelectorProfile> {
    match kind {
        NodeType::RandomPick => Some(SelectorProfile {
            capacity: 5,
            default_strength: StrengthRange::fixed(1.0),
            auto_fill: false,
            single: true,
            stack_candidates: true,
        }),
        NodeType::PoolStack => Some(SelectorProfile {
            capacity: 10,
            default_strength: StrengthRange::fixed(1.0),
            auto_fill: false,
            single: false,
            stack_candidates: false,
        }),
        NodeType::DynamicPoolStack => Some(SelectorProfile {
            capacity: 50,
            default_strength: StrengthRange::new(0.5, 1.0),
            auto_fill: true,
            single: false,
            stack_candidates: false,
        }),
        _ => None,
    }
}
