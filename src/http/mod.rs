//! HTTP surface: router, handlers, and the mapping from errors to statuses.

pub mod error;
pub mod handlers;
pub mod server;

pub use server::{build_router, shutdown_signal, AppState, HttpServer};
