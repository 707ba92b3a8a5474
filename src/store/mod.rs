//! Resource store subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     dataset file (JSON)
//!     → snapshot.rs (deserialize Snapshot)
//!     → ResourceStore::from_snapshot (identity checks)
//!     → shared behind a single Mutex
//!
//! Per request:
//!     handler holds the store lock
//!     → store.rs (read / add / replace / remove)
//!     → model.rs entities handed to the codec
//! ```
//!
//! # Design Decisions
//! - One owner of all company and model state; no ambient globals
//! - Companies keyed by id, models keyed by id within their company
//! - Iteration follows insertion order
//! - Every operation is synchronous; callers serialize access with one lock

pub mod model;
pub mod snapshot;
#[allow(clippy::module_inception)]
pub mod store;

pub use model::{Company, CompanySummary, ComputerModel, NewCompany, ResolvedModel};
pub use snapshot::{load_snapshot, Snapshot, SnapshotError};
pub use store::{ResourceStore, SharedStore, StoreError};
