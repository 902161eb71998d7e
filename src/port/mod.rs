//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!          ┌──────────────┐
//!  CLI ───▶│   inbound    │  OperatorPort
//!          ├──────────────┤
//!          │ Application  │  orchestrator, poller
//!          ├──────────────┤
//!          │   outbound   │  ServiceClient, Clock
//!          └──────┬───────┘
//!                 ▼
//!            data store
//! ```
//!
//! # Available Ports
//!
//! - [`ServiceClient`] - Administrative commands against the data store
//! - [`Clock`] - Time source and sleeping, swappable in tests
//! - [`OperatorPort`] - Use-cases exposed to the CLI

pub mod inbound;
pub mod outbound;

pub use inbound::operator::port::OperatorPort;
pub use outbound::clock::Clock;
pub use outbound::service::ServiceClient;
