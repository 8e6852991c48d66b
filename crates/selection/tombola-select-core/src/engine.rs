//! Entry point tying the pipeline together for one invocation.

use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, SummaryInfo};
use crate::autofill::auto_fill;
use crate::memo::{config_key, SelectionMemo};
use crate::rng::SeedMode;
use crate::sampler::select;
use crate::slots::{build_pool, RawSlot};
use crate::strength::resolve;
use crate::types::{Candidate, Selection, SelectionMode, Stack, StrengthRange, NONE_SENTINEL};

/// Bounded re-sample attempts when biasing against an immediate repeat.
const REPEAT_ATTEMPTS: usize = 10;

/// Everything one selection call needs, assembled by the caller from current
/// host parameter values. Consumed once; nothing persists across calls except
/// the injected memo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub slots: Vec<RawSlot>,
    /// Previously committed selections from an upstream node.
    #[serde(default)]
    pub stack: Stack,
    /// Currently valid asset identifiers, re-fetched by the caller per call.
    pub valid_names: Vec<String>,
    pub mode: SelectionMode,
    pub min_count: usize,
    pub max_count: usize,
    #[serde(default)]
    pub seed: SeedMode,
    /// Defaults the auto-fill perturbation narrows toward.
    #[serde(default)]
    pub auto_fill_defaults: StrengthRange,
    /// Bias against repeating the previous selection for this configuration.
    #[serde(default)]
    pub avoid_repeat: bool,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        SelectionRequest {
            slots: Vec::new(),
            stack: Vec::new(),
            valid_names: Vec::new(),
            mode: SelectionMode::All,
            min_count: 1,
            max_count: 1,
            seed: SeedMode::Entropy,
            auto_fill_defaults: StrengthRange::new(0.5, 1.0),
            avoid_repeat: false,
        }
    }
}

/// Run one selection: build the pool, fill auto slots, sample, resolve
/// strengths and merge onto the incoming stack.
///
/// Never fails: an empty or fully-filtered configuration produces an
/// empty-safe [`Selection`] whose stack is the (sanitized) input stack.
pub fn run(request: &SelectionRequest, memo: &dyn SelectionMemo) -> Selection {
    let stack: Stack = request
        .stack
        .iter()
        .filter(|entry| entry.name != NONE_SENTINEL)
        .cloned()
        .collect();

    let mut rng = request.seed.rng();
    let draft = build_pool(&request.slots, &request.valid_names);
    let configured = request.slots.iter().filter(|slot| !slot.is_none()).count();
    let missing = draft.dropped_missing;
    let pool = auto_fill(draft, &request.valid_names, request.auto_fill_defaults, &mut rng);

    let info = SummaryInfo {
        pool_size: pool.len(),
        configured,
        mode: request.mode,
        missing,
    };

    if pool.is_empty() {
        return aggregate(stack, &[], info);
    }

    let key = config_key(request);
    let mut selected = select(&pool, request.mode, request.min_count, request.max_count, &mut rng);

    if request.avoid_repeat && repeatable(request.mode) && pool.len() > selected.len() {
        if let Some(last) = memo.last(key) {
            let mut attempts = 0;
            while names_of(&selected) == last && attempts < REPEAT_ATTEMPTS {
                selected = select(
                    &pool,
                    request.mode,
                    request.min_count,
                    request.max_count,
                    &mut rng,
                );
                attempts += 1;
            }
        }
    }
    memo.remember(key, names_of(&selected));

    let resolved: Vec<(Candidate, f32, f32)> = selected
        .into_iter()
        .map(|candidate| {
            let (model, clip) = resolve(&candidate, &mut rng);
            (candidate, model, clip)
        })
        .collect();

    aggregate(stack, &resolved, info)
}

/// Re-sampling only changes anything for the seed-consuming modes.
fn repeatable(mode: SelectionMode) -> bool {
    matches!(mode, SelectionMode::Random | SelectionMode::Weighted)
}

fn names_of(selected: &[Candidate]) -> Vec<String> {
    selected.iter().map(|candidate| candidate.name.clone()).collect()
}
