//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound::cli`] drives the application from the command line.
//! - [`outbound::mongo`] speaks to the node being bootstrapped.
//! - [`outbound::clock`] supplies real time.

pub mod inbound;
pub mod outbound;
