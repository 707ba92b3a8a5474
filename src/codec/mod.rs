//! Wire representation of companies and computer models.
//!
//! # Data Flow
//! ```text
//! Inbound:  request body (serde_json::Value)
//!     → parse.rs (required-field validation)
//!     → NewCompany / ComputerModel for the store
//!
//! Outbound: store entities
//!     → render.rs (Resource impl per entity, URIs from uri.rs)
//!     → tab-indented JSON text
//! ```
//!
//! # Design Decisions
//! - Related resources are rendered as URI references, never embedded
//! - Collections render element by element through the same `Resource` impl
//! - Invalid nested models are dropped; invalid top-level fields reject the body

pub mod parse;
pub mod render;
pub mod uri;

pub use parse::{parse_company, parse_computer_model, ValidationError};
pub use render::{render_collection, to_pretty_json, CompanyDocument, ComputerModelDocument, Resource};
pub use uri::ApiUrls;
