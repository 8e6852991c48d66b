//! Sub-collection sampling over a built pool.

use hashbrown::HashSet;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Candidate, SelectionMode};

/// Draw budget multiplier for weighted sampling: after `RETRY_FACTOR * k`
/// draws the sampler returns whatever distinct names it has collected.
const RETRY_FACTOR: usize = 10;

/// Select a sub-sequence of `pool` according to `mode`.
///
/// The count bounds are clamped to the pool size, with the upper bound raised
/// to the lower when the caller's inputs are inconsistent. An empty pool
/// yields an empty selection for every mode.
pub fn select(
    pool: &[Candidate],
    mode: SelectionMode,
    min_count: usize,
    max_count: usize,
    rng: &mut impl Rng,
) -> Vec<Candidate> {
    if pool.is_empty() {
        return Vec::new();
    }
    if mode == SelectionMode::All {
        return pool.to_vec();
    }

    let lower = min_count.min(pool.len());
    let upper = max_count.min(pool.len()).max(lower);

    match mode {
        SelectionMode::All => unreachable!(),
        // Deterministic and seed-independent: the count must not consume
        // the rng stream.
        SelectionMode::Sequential => pool[..upper].to_vec(),
        SelectionMode::Random => {
            let k = rng.gen_range(lower..=upper);
            pool.choose_multiple(rng, k).cloned().collect()
        }
        SelectionMode::Weighted => {
            let k = rng.gen_range(lower..=upper);
            weighted(pool, k, rng)
        }
    }
}

/// Sampling with replacement proportional to `weight`, deduplicated by name
/// with first occurrence winning. Stops once `k` unique names are collected
/// or the draw budget runs out; may return fewer than `k`.
fn weighted(pool: &[Candidate], k: usize, rng: &mut impl Rng) -> Vec<Candidate> {
    let weights: Vec<f32> = pool.iter().map(|candidate| candidate.weight).collect();
    let distribution = match WeightedIndex::new(&weights) {
        Ok(distribution) => distribution,
        Err(err) => {
            log::debug!("weighted sampling degenerate ({err}), selecting nothing");
            return Vec::new();
        }
    };

    let mut picked: Vec<Candidate> = Vec::with_capacity(k);
    let mut seen: HashSet<&str> = HashSet::with_capacity(k);
    for _ in 0..k.saturating_mul(RETRY_FACTOR) {
        if picked.len() == k {
            break;
        }
        let candidate = &pool[distribution.sample(rng)];
        if seen.insert(candidate.name.as_str()) {
            picked.push(candidate.clone());
        }
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StrengthRange;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate(name: &str, weight: f32) -> Candidate {
        Candidate {
            name: name.to_string(),
            strength: StrengthRange::default(),
            clip_strength: None,
            trigger_words: vec![],
            weight,
            slot_index: 0,
        }
    }

    #[test]
    fn empty_pool_is_safe_for_every_mode() {
        let mut rng = StdRng::seed_from_u64(1);
        for mode in [
            SelectionMode::All,
            SelectionMode::Random,
            SelectionMode::Weighted,
            SelectionMode::Sequential,
        ] {
            assert!(select(&[], mode, 1, 3, &mut rng).is_empty());
        }
    }

    #[test]
    fn all_mode_preserves_pool_order() {
        let pool = vec![candidate("p", 1.0), candidate("q", 1.0), candidate("r", 1.0)];
        let mut rng = StdRng::seed_from_u64(9);
        let selected = select(&pool, SelectionMode::All, 1, 2, &mut rng);
        let names: Vec<&str> = selected.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["p", "q", "r"]);
    }

    #[test]
    fn sequential_ignores_the_seed() {
        let pool = vec![candidate("p", 1.0), candidate("q", 1.0), candidate("r", 1.0)];
        for seed in [0, 1, 99, 123_456] {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = select(&pool, SelectionMode::Sequential, 2, 2, &mut rng);
            let names: Vec<&str> = selected.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, vec!["p", "q"]);
        }
    }

    #[test]
    fn random_count_respects_clamped_bounds() {
        let pool = vec![candidate("a", 1.0), candidate("b", 1.0), candidate("c", 1.0)];
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            // Caller-inconsistent bounds: max below min gets raised.
            let selected = select(&pool, SelectionMode::Random, 2, 1, &mut rng);
            assert_eq!(selected.len(), 2);

            let mut rng = StdRng::seed_from_u64(seed);
            let selected = select(&pool, SelectionMode::Random, 1, 10, &mut rng);
            assert!((1..=3).contains(&selected.len()));
        }
    }

    #[test]
    fn random_selection_has_distinct_names() {
        let pool = vec![candidate("a", 1.0), candidate("b", 1.0), candidate("c", 1.0)];
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let selected = select(&pool, SelectionMode::Random, 3, 3, &mut rng);
            let names: HashSet<&str> = selected.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names.len(), selected.len());
        }
    }

    #[test]
    fn weighted_returns_fewer_when_mass_is_concentrated() {
        let pool = vec![
            candidate("heavy", 1.0),
            candidate("never", 0.0),
            candidate("also-never", 0.0),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let selected = select(&pool, SelectionMode::Weighted, 3, 3, &mut rng);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "heavy");
    }

    #[test]
    fn weighted_all_zero_mass_selects_nothing() {
        let pool = vec![candidate("a", 0.0), candidate("b", 0.0)];
        let mut rng = StdRng::seed_from_u64(5);
        assert!(select(&pool, SelectionMode::Weighted, 1, 2, &mut rng).is_empty());
    }
}
