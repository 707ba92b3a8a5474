//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace span, timeout)
//!     → dispatcher.rs (strip prefix, resolve route, buffer + parse body)
//!     → handlers.rs (store call under the lock, render via codec)
//!     → response.rs (status, reason phrase, body)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - A single catch-all Axum route; resolution belongs to our own route table
//! - Unknown routes and undeclared methods both answer 404
//! - Handlers are plain synchronous functions over the store

pub mod dispatcher;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use handlers::{route_table, Handler, HandlerContext};
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
