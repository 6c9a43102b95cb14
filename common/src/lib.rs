//! Shared domain model for `sweepr`.
//!
//! Everything in here is free of I/O: target parsing, address ranges, the lazy host
//! sequence, probe outcomes and the error kinds the other crates speak.

pub mod config;
pub mod error;
pub mod macros;
pub mod network;
pub mod probe;

#[doc(hidden)]
pub use tracing;
