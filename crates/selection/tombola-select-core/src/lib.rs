//! tombola-select-core: the weighted pool selection engine behind every
//! Tombola node.
//!
//! One invocation flows strictly through
//! `build_pool` → `auto_fill` → `select` → `resolve` → `aggregate`; each stage
//! is a pure function of its explicit inputs plus the shared random source.
//! There are no fatal error conditions here: malformed caller input is
//! normalized to a valid, empty-safe [`Selection`] rather than propagated.

pub mod aggregate;
pub mod autofill;
pub mod engine;
pub mod memo;
pub mod rng;
pub mod sampler;
pub mod slots;
pub mod strength;
pub mod types;

pub use aggregate::{aggregate, SummaryInfo};
pub use autofill::auto_fill;
pub use engine::{run, SelectionRequest};
pub use memo::{config_key, InMemoryMemo, SelectionMemo};
pub use rng::SeedMode;
pub use sampler::select;
pub use slots::{build_pool, split_trigger_text, PoolDraft, RawSlot};
pub use strength::resolve;
pub use types::{
    Candidate, Selection, SelectionMode, Stack, StackEntry, StrengthRange, AUTO_SENTINEL,
    NONE_SENTINEL,
};

#[cfg(test)]
mod tests;
