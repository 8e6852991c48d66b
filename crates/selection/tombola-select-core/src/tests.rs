//! Behavioural coverage for the full selection pipeline.

use crate::engine::{run, SelectionRequest};
use crate::memo::{InMemoryMemo, SelectionMemo};
use crate::rng::SeedMode;
use crate::slots::RawSlot;
use crate::types::{SelectionMode, StackEntry, StrengthRange};

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn slot(name: &str, index: usize, min: f32, max: f32, triggers: &str) -> RawSlot {
    RawSlot {
        name: name.to_string(),
        strength: StrengthRange::new(min, max),
        clip_strength: None,
        trigger_text: triggers.to_string(),
        weight: 1.0,
        index,
    }
}

// --- Spec scenarios ------------------------------------------------------

#[test]
fn all_mode_commits_every_candidate_in_order() {
    let request = SelectionRequest {
        slots: vec![
            slot("X", 1, 0.5, 0.5, "foo"),
            slot("Y", 2, 1.0, 1.0, "bar"),
        ],
        stack: vec![StackEntry::new("base", 0.9, 0.9)],
        valid_names: names(&["X", "Y"]),
        mode: SelectionMode::All,
        min_count: 1,
        max_count: 2,
        seed: SeedMode::Fixed(0),
        ..SelectionRequest::default()
    };
    let result = run(&request, &InMemoryMemo::default());

    assert_eq!(
        result.stack,
        vec![
            StackEntry::new("base", 0.9, 0.9),
            StackEntry::new("X", 0.5, 0.5),
            StackEntry::new("Y", 1.0, 1.0),
        ]
    );
    assert_eq!(result.trigger_text, "bar, foo");
    assert_eq!(result.chosen, "X:0.50, Y:1.00");
}

#[test]
fn zero_weight_candidates_are_never_drawn() {
    for seed in 0..1000u64 {
        let request = SelectionRequest {
            slots: vec![
                slot("A", 1, 1.0, 1.0, ""),
                slot("B", 2, 1.0, 1.0, ""),
                RawSlot {
                    weight: 0.0,
                    ..slot("Z", 3, 1.0, 1.0, "")
                },
            ],
            valid_names: names(&["A", "B", "Z"]),
            mode: SelectionMode::Weighted,
            min_count: 3,
            max_count: 3,
            seed: SeedMode::Fixed(seed),
            ..SelectionRequest::default()
        };
        let result = run(&request, &InMemoryMemo::default());
        assert!(
            !result.stack.iter().any(|entry| entry.name == "Z"),
            "seed {seed} selected the zero-weight candidate"
        );
    }
}

#[test]
fn repeated_names_keep_the_first_slot_and_its_triggers() {
    let request = SelectionRequest {
        slots: vec![
            slot("A", 1, 1.0, 1.0, "first"),
            slot("B", 2, 1.0, 1.0, "other"),
            slot("A", 3, 0.1, 0.1, "second"),
        ],
        valid_names: names(&["A", "B"]),
        mode: SelectionMode::All,
        min_count: 1,
        max_count: 3,
        seed: SeedMode::Fixed(5),
        ..SelectionRequest::default()
    };
    let result = run(&request, &InMemoryMemo::default());

    let occurrences = result.stack.iter().filter(|e| e.name == "A").count();
    assert_eq!(occurrences, 1);
    assert!(result.trigger_text.contains("first"));
    assert!(!result.trigger_text.contains("second"));
    // Slot 1's strength, not slot 3's.
    assert_eq!(result.stack[0], StackEntry::new("A", 1.0, 1.0));
}

// --- Determinism ---------------------------------------------------------

#[test]
fn fixed_seed_reproduces_the_whole_selection() {
    let request = SelectionRequest {
        slots: vec![
            slot("a", 1, 0.2, 0.9, "one"),
            slot("b", 2, 0.3, 1.1, "two"),
            slot("c", 3, 0.1, 0.5, "three"),
            RawSlot::named("Auto", 4),
        ],
        valid_names: names(&["a", "b", "c", "d", "e"]),
        mode: SelectionMode::Random,
        min_count: 1,
        max_count: 3,
        seed: SeedMode::Fixed(20240817),
        ..SelectionRequest::default()
    };
    let first = run(&request, &InMemoryMemo::default());
    let second = run(&request, &InMemoryMemo::default());
    assert_eq!(first, second);
}

#[test]
fn dual_strength_ranges_resolve_independently_but_reproducibly() {
    let request = SelectionRequest {
        slots: vec![RawSlot {
            clip_strength: Some(StrengthRange::new(0.2, 0.4)),
            ..slot("a", 1, 0.6, 0.9, "")
        }],
        valid_names: names(&["a"]),
        mode: SelectionMode::All,
        min_count: 1,
        max_count: 1,
        seed: SeedMode::Fixed(99),
        ..SelectionRequest::default()
    };
    let first = run(&request, &InMemoryMemo::default());
    let entry = &first.stack[0];
    assert!((0.6..=0.9).contains(&entry.model_strength));
    assert!((0.2..=0.4).contains(&entry.clip_strength));
    assert_eq!(first, run(&request, &InMemoryMemo::default()));
}

// --- Bounds and safety ---------------------------------------------------

#[test]
fn random_count_stays_inside_clamped_bounds() {
    for seed in 0..64u64 {
        let request = SelectionRequest {
            slots: vec![
                slot("a", 1, 0.5, 1.0, ""),
                slot("b", 2, 0.5, 1.0, ""),
                slot("c", 3, 0.5, 1.0, ""),
            ],
            valid_names: names(&["a", "b", "c"]),
            mode: SelectionMode::Random,
            min_count: 2,
            max_count: 9,
            seed: SeedMode::Fixed(seed),
            ..SelectionRequest::default()
        };
        let result = run(&request, &InMemoryMemo::default());
        assert!((2..=3).contains(&result.stack.len()));
    }
}

#[test]
fn strengths_respect_their_ranges() {
    for seed in 0..64u64 {
        let request = SelectionRequest {
            slots: vec![slot("a", 1, 0.25, 0.75, ""), slot("b", 2, -0.5, 0.5, "")],
            valid_names: names(&["a", "b"]),
            mode: SelectionMode::All,
            min_count: 1,
            max_count: 2,
            seed: SeedMode::Fixed(seed),
            ..SelectionRequest::default()
        };
        let result = run(&request, &InMemoryMemo::default());
        for entry in &result.stack {
            match entry.name.as_str() {
                "a" => assert!((0.25..=0.75).contains(&entry.model_strength)),
                "b" => assert!((-0.5..=0.5).contains(&entry.model_strength)),
                other => panic!("unexpected entry {other}"),
            }
        }
    }
}

#[test]
fn empty_configuration_passes_the_stack_through() {
    let incoming = vec![
        StackEntry::new("keep", 1.0, 1.0),
        StackEntry::new("None", 1.0, 1.0),
    ];
    let request = SelectionRequest {
        stack: incoming,
        valid_names: names(&["a"]),
        mode: SelectionMode::Random,
        min_count: 1,
        max_count: 3,
        seed: SeedMode::Fixed(1),
        ..SelectionRequest::default()
    };
    let result = run(&request, &InMemoryMemo::default());

    // "None" entries are never carried forward; nothing else changes.
    assert_eq!(result.stack, vec![StackEntry::new("keep", 1.0, 1.0)]);
    assert_eq!(result.trigger_text, "");
    assert_eq!(result.chosen, "");
    assert!(result.summary.contains("pool: 0"));
}

#[test]
fn unknown_names_surface_in_the_summary_only() {
    let request = SelectionRequest {
        slots: vec![slot("a", 1, 1.0, 1.0, ""), slot("ghost", 2, 1.0, 1.0, "")],
        valid_names: names(&["a"]),
        mode: SelectionMode::All,
        min_count: 1,
        max_count: 2,
        seed: SeedMode::Fixed(2),
        ..SelectionRequest::default()
    };
    let result = run(&request, &InMemoryMemo::default());
    assert_eq!(result.stack.len(), 1);
    assert!(result.summary.contains("missing: 1"));
}

#[test]
fn prior_entries_are_never_mutated_or_reordered() {
    let incoming: Vec<StackEntry> = (0..5)
        .map(|i| StackEntry::new(format!("up{i}"), 0.1 * i as f32, 0.1 * i as f32))
        .collect();
    for seed in 0..16u64 {
        let request = SelectionRequest {
            slots: vec![slot("a", 1, 0.5, 1.0, ""), slot("b", 2, 0.5, 1.0, "")],
            stack: incoming.clone(),
            valid_names: names(&["a", "b"]),
            mode: SelectionMode::Random,
            min_count: 1,
            max_count: 2,
            seed: SeedMode::Fixed(seed),
            ..SelectionRequest::default()
        };
        let result = run(&request, &InMemoryMemo::default());
        assert_eq!(&result.stack[..incoming.len()], &incoming[..]);
    }
}

// --- Repeat avoidance ----------------------------------------------------

#[test]
fn avoid_repeat_biases_away_from_the_previous_pick() {
    let pool: Vec<&str> = vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];
    let request = SelectionRequest {
        slots: pool
            .iter()
            .enumerate()
            .map(|(i, name)| slot(name, i + 1, 1.0, 1.0, ""))
            .collect::<Vec<_>>(),
        valid_names: names(&pool),
        mode: SelectionMode::Random,
        min_count: 1,
        max_count: 1,
        seed: SeedMode::Fixed(31),
        avoid_repeat: true,
        ..SelectionRequest::default()
    };

    let memo = InMemoryMemo::default();
    let first = run(&request, &memo);
    // Same seed, same configuration: without the memo the pick would repeat.
    let second = run(&request, &memo);
    assert_ne!(first.stack, second.stack);
}

#[test]
fn memo_is_scoped_to_the_configuration() {
    let memo = InMemoryMemo::default();
    let request_a = SelectionRequest {
        slots: vec![slot("a", 1, 1.0, 1.0, "")],
        valid_names: names(&["a"]),
        mode: SelectionMode::Random,
        min_count: 1,
        max_count: 1,
        seed: SeedMode::Fixed(7),
        avoid_repeat: true,
        ..SelectionRequest::default()
    };
    let request_b = SelectionRequest {
        valid_names: names(&["a", "b"]),
        ..request_a.clone()
    };

    run(&request_a, &memo);
    // A different valid-name set is a different configuration; its first run
    // must not see request_a's memo entry.
    assert_eq!(memo.last(crate::memo::config_key(&request_b)), None);
}
