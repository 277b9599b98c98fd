//! Effect parameters
//!
//! - **Types** (`types.rs`): parameter ids, values and metadata the plugin
//!   registers with the host
//! - **Snapshot** (`snapshot.rs`): typed access through the host accessor and
//!   the per-frame [`ParameterSnapshot`]

mod snapshot;
mod types;

pub use snapshot::*;
pub use types::*;
