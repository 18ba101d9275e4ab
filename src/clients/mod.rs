//! Typed handles for talking to the store actors.

pub mod product_client;

pub use product_client::*;
