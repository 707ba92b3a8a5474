//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path relative to the API prefix, method)
//!     → router.rs (route lookup in declaration order)
//!     → matcher.rs (segment match, parameter capture)
//!     → Return: RouteMatch { route, handler, params } or RouteError
//!
//! Route Compilation (at startup):
//!     (template, [(method, handler)])[]
//!     → Compile templates into segment matchers
//!     → Reject templates that overlap an earlier one
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)
//! - Generic over the handler type; the HTTP layer binds its own handlers

pub mod matcher;
pub mod router;

pub use matcher::{PathTemplate, RouteParams, Segment, TemplateError};
pub use router::{Route, RouteError, RouteMatch, RouteTable, RouteTableBuilder};
