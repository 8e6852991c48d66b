//! Last-selection memo used to bias against immediate repeats.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use hashbrown::HashMap;

use crate::engine::SelectionRequest;

/// Injectable store keyed by a stable configuration hash. Implementations
/// must tolerate concurrent callers; distinct configurations never share a
/// key, so collisions between unrelated graphs cannot occur.
pub trait SelectionMemo: Send + Sync {
    fn last(&self, key: u64) -> Option<Vec<String>>;
    fn remember(&self, key: u64, names: Vec<String>);
}

/// Process-lifetime in-memory store. Growth is bounded by the cardinality of
/// distinct caller configurations.
#[derive(Debug, Default)]
pub struct InMemoryMemo {
    entries: Mutex<HashMap<u64, Vec<String>>>,
}

impl SelectionMemo for InMemoryMemo {
    fn last(&self, key: u64) -> Option<Vec<String>> {
        self.entries
            .lock()
            .expect("memo mutex poisoned")
            .get(&key)
            .cloned()
    }

    fn remember(&self, key: u64, names: Vec<String>) {
        self.entries
            .lock()
            .expect("memo mutex poisoned")
            .insert(key, names);
    }
}

/// Stable hash over the parts of a request that identify its configuration:
/// slot names, valid names, mode, count bounds and seed policy.
pub fn config_key(request: &SelectionRequest) -> u64 {
    let mut hasher = DefaultHasher::new();
    for slot in &request.slots {
        slot.name.hash(&mut hasher);
        slot.index.hash(&mut hasher);
    }
    let mut names: Vec<&str> = request.valid_names.iter().map(String::as_str).collect();
    names.sort_unstable();
    names.hash(&mut hasher);
    request.mode.hash(&mut hasher);
    request.min_count.hash(&mut hasher);
    request.max_count.hash(&mut hasher);
    request.seed.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::RawSlot;
    use crate::types::SelectionMode;

    fn request(names: &[&str], min_count: usize) -> SelectionRequest {
        SelectionRequest {
            slots: names
                .iter()
                .enumerate()
                .map(|(i, name)| RawSlot::named(*name, i + 1))
                .collect(),
            valid_names: names.iter().map(|s| s.to_string()).collect(),
            mode: SelectionMode::Random,
            min_count,
            ..SelectionRequest::default()
        }
    }

    #[test]
    fn memo_round_trips_by_key() {
        let memo = InMemoryMemo::default();
        assert_eq!(memo.last(1), None);
        memo.remember(1, vec!["a".to_string()]);
        assert_eq!(memo.last(1), Some(vec!["a".to_string()]));
    }

    #[test]
    fn equal_configurations_share_a_key() {
        assert_eq!(
            config_key(&request(&["a", "b"], 1)),
            config_key(&request(&["a", "b"], 1))
        );
    }

    #[test]
    fn different_configurations_do_not_collide() {
        let base = config_key(&request(&["a", "b"], 1));
        assert_ne!(base, config_key(&request(&["a", "c"], 1)));
        assert_ne!(base, config_key(&request(&["a", "b"], 2)));
    }
}
