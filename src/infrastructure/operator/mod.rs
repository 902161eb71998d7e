//! Operator implementations for inbound adapters.

pub mod config;
pub mod entry;
pub mod runtime;
pub mod status;

mod shared;
