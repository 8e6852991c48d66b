//! Mutable runtime state shared by all node evaluations.

use std::sync::Mutex;

use hashbrown::HashMap;
use tombola_catalog_core::{Catalog, MediaLibrary, Roster};
use tombola_select_core::{InMemoryMemo, Selection, SelectionMemo};

use crate::types::NodeId;

/// Stride bookkeeping for one node configuration.
#[derive(Debug, Default, Clone)]
struct StrideState {
    calls: u32,
    last: Option<Selection>,
}

/// Replays the previous [`Selection`] while a configuration is inside its
/// stride window. Purely a caching policy layered over the pure engine;
/// guarded so concurrent embedders cannot corrupt the counters.
#[derive(Debug, Default)]
pub struct StrideGate {
    entries: Mutex<HashMap<u64, StrideState>>,
}

impl StrideGate {
    /// Count this call. Returns the memoized result while the window holds;
    /// otherwise resets the counter so the caller runs fresh.
    pub fn replay(&self, key: u64, stride: u32) -> Option<Selection> {
        let mut entries = self.entries.lock().expect("stride mutex poisoned");
        let state = entries.entry(key).or_default();
        state.calls += 1;
        if stride > 1 && state.calls < stride {
            if let Some(last) = &state.last {
                return Some(last.clone());
            }
        }
        state.calls = 0;
        None
    }

    /// Record the freshly computed result for later replays.
    pub fn store(&self, key: u64, selection: Selection) {
        let mut entries = self.entries.lock().expect("stride mutex poisoned");
        entries.entry(key).or_default().last = Some(selection);
    }
}

/// Runtime data shared by all node evaluations.
///
/// Host-supplied data (asset names, catalogs, rosters, media listings) is
/// staged before each evaluation and read but never refreshed by the nodes
/// themselves; hosts must re-stage per call since the underlying sets can
/// change between calls.
pub struct GraphRuntime {
    pub outputs: HashMap<NodeId, HashMap<String, crate::types::Value>>,
    /// Currently valid asset identifiers for slot-driven selectors.
    pub asset_names: Vec<String>,
    pub catalogs: HashMap<String, Catalog>,
    pub rosters: HashMap<String, Roster>,
    pub media: HashMap<String, MediaLibrary>,
    /// Injectable last-selection store; tests supply a fresh one per test.
    pub memo: Box<dyn SelectionMemo>,
    pub stride: StrideGate,
}

impl Default for GraphRuntime {
    fn default() -> Self {
        GraphRuntime {
            outputs: HashMap::new(),
            asset_names: Vec::new(),
            catalogs: HashMap::new(),
            rosters: HashMap::new(),
            media: HashMap::new(),
            memo: Box::<InMemoryMemo>::default(),
            stride: StrideGate::default(),
        }
    }
}

impl GraphRuntime {
    pub fn set_asset_names(&mut self, names: Vec<String>) {
        self.asset_names = names;
    }

    pub fn stage_catalog(&mut self, name: impl Into<String>, catalog: Catalog) {
        self.catalogs.insert(name.into(), catalog);
    }

    pub fn stage_roster(&mut self, name: impl Into<String>, roster: Roster) {
        self.rosters.insert(name.into(), roster);
    }

    pub fn stage_media(&mut self, name: impl Into<String>, library: MediaLibrary) {
        self.media.insert(name.into(), library);
    }
}
