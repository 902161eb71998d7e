//! Outbound adapters (driven side).

pub mod clock;
pub mod mongo;
