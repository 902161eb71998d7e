//! Application services (use cases).
//!
//! These services sequence the bootstrap steps against the outbound ports.

pub mod bootstrap;
pub mod readiness;
pub mod shutdown;
