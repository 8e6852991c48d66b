//! Merges resolved selections onto the incoming stack and renders the
//! derived strings.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::types::{Candidate, Selection, SelectionMode, Stack, StackEntry};

/// Context for the deterministic summary line.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInfo {
    pub pool_size: usize,
    pub configured: usize,
    pub mode: SelectionMode,
    /// Slots dropped because their name was not currently valid.
    pub missing: usize,
}

/// Append `(name, model, clip)` entries for each selected candidate, in
/// selection order, after the existing stack content; union trigger words
/// into a sorted, comma-joined string.
pub fn aggregate(stack: Stack, selected: &[(Candidate, f32, f32)], info: SummaryInfo) -> Selection {
    let mut stack = stack;
    let mut triggers: BTreeSet<&str> = BTreeSet::new();
    let mut chosen = String::new();

    for (candidate, model, clip) in selected {
        stack.push(StackEntry::new(candidate.name.clone(), *model, *clip));
        for word in &candidate.trigger_words {
            triggers.insert(word.as_str());
        }
        if !chosen.is_empty() {
            chosen.push_str(", ");
        }
        let _ = write!(chosen, "{}:{:.2}", candidate.name, model);
    }

    let trigger_text = triggers.into_iter().collect::<Vec<_>>().join(", ");
    let mut summary = format!(
        "pool: {}, configured: {}, selected: {} ({})",
        info.pool_size,
        info.configured,
        selected.len(),
        info.mode
    );
    if info.missing > 0 {
        let _ = write!(summary, ", missing: {}", info.missing);
    }

    Selection {
        stack,
        trigger_text,
        chosen,
        summary,
    }
}
