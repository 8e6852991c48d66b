//! Evaluation pipeline for the Tombola node graph.
//!
//! The `eval` module turns a [`GraphSpec`](crate::types::GraphSpec) into
//! concrete port values by walking the graph in topological order. The
//! submodules keep domain concerns isolated:
//!
//! - [`graph_runtime`] holds per-evaluation outputs, staged host data and the
//!   stride gate.
//! - [`eval_node`] houses the dispatch logic for individual
//!   [`NodeType`](crate::types::NodeType)s.
//! - [`selector`] is the single parameterized selection path shared by the
//!   slot- and catalog-driven kinds.
//! - [`cast`] and [`media`] cover the roster and media-listing nodes.
//!
//! Integration code should primarily interact with [`GraphRuntime`] and
//! [`evaluate_all`].

use crate::types::GraphSpec;

mod cast;
pub mod eval_node;
mod graph_runtime;
mod media;
mod selector;

pub use eval_node::eval_node;
pub use graph_runtime::{GraphRuntime, StrideGate};


/// Evaluate every node in `spec`, updating `rt` in-place.
///
/// Per-evaluation outputs are cleared first; staged host data is left alone
/// (the host re-stages it each call). Any error propagated from an
/// individual node halts evaluation.
pub fn evaluate_all(rt: &mut GraphRuntime, spec: &GraphSpec) -> Result<(), String> {
    rt.outputs.clear();

    let order = crate::topo::topo_order(&spec.nodes)?;
    for id in order {
        if let Some(node) = spec.nodes.iter().find(|n| n.id == id) {
            eval_node::eval_node(rt, node)?;
        }
    }
    Ok(())
}
