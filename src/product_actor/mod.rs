//! Product-specific store logic: validation rules and the error type
//! clients surface to callers.

pub mod entity;
pub mod error;

pub use error::*;
