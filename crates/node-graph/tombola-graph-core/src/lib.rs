pub mod eval;
pub mod profile;
pub mod schema;
pub mod topo;
pub mod types;

pub use eval::{evaluate_all, GraphRuntime};
pub use topo::topo_order;
pub use types::*;
