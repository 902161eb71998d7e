//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`service`] - Scripted [`ServiceClient`](crate::port::outbound::service::ServiceClient)
//!   that records every remote call.
//! - [`clock`] - [`ManualClock`](clock::ManualClock) with virtual time.
//! - [`domain`] - Builders for replica-set and principal specs.
//! - [`config`] - Canonical poll policies and config documents.

pub mod clock;
pub mod config;
pub mod domain;
pub mod service;
