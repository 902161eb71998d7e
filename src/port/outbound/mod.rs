//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the bootstrap sequence depends
//! on: the remote data-store node and the passage of time.

pub mod clock;
pub mod service;
