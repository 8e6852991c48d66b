//! Concrete strength resolution for selected candidates.

use rand::Rng;

use crate::types::{Candidate, StrengthRange};

/// Draw `(model, clip)` strengths for one selected candidate.
///
/// The model value is drawn uniformly from the candidate's range. In the
/// dual-strength variant the clip value is drawn independently from
/// `clip_strength`; otherwise the model draw is reused. Values are drawn
/// fresh per candidate, consuming the shared rng stream in selection order,
/// so a fixed seed and pool reproduce exactly.
pub fn resolve(candidate: &Candidate, rng: &mut impl Rng) -> (f32, f32) {
    let model = draw(candidate.strength, rng);
    let clip = match candidate.clip_strength {
        Some(range) => draw(range, rng),
        None => model,
    };
    (model, clip)
}

fn draw(range: StrengthRange, rng: &mut impl Rng) -> f32 {
    rng.gen_range(range.min..=range.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn candidate(min: f32, max: f32, clip: Option<StrengthRange>) -> Candidate {
        Candidate {
            name: "x".to_string(),
            strength: StrengthRange::new(min, max),
            clip_strength: clip,
            trigger_words: vec![],
            weight: 1.0,
            slot_index: 0,
        }
    }

    #[test]
    fn resolved_values_stay_inside_the_range() {
        let item = candidate(0.25, 0.75, None);
        for seed in 0..128 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (model, clip) = resolve(&item, &mut rng);
            assert!(item.strength.contains(model));
            assert_eq!(model, clip);
        }
    }

    #[test]
    fn degenerate_range_is_a_constant() {
        let item = candidate(0.5, 0.5, None);
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(resolve(&item, &mut rng), (0.5, 0.5));
    }

    #[test]
    fn dual_variant_draws_clip_independently() {
        let item = candidate(0.0, 1.0, Some(StrengthRange::new(2.0, 3.0)));
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (model, clip) = resolve(&item, &mut rng);
            assert!(item.strength.contains(model));
            assert!((2.0..=3.0).contains(&clip));
        }
    }

    #[test]
    fn fixed_seed_reproduces_draws() {
        let item = candidate(0.1, 0.9, None);
        let draw_once = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            resolve(&item, &mut rng)
        };
        assert_eq!(draw_once(77), draw_once(77));
    }
}
