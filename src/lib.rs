//! rsinit - single-node replica-set bootstrap.
//!
//! Brings a freshly started MongoDB node from "standalone, unconfigured" to
//! "primary of a one-member replica set with an admin account":
//!
//! 1. request replica-set formation (`replSetInitiate`),
//! 2. poll at a fixed interval until the node reports itself writable primary,
//! 3. create the admin principal exactly once.
//!
//! Both remote writes tolerate having already been applied, so an interrupted
//! run can simply be started again.
//!
//! # Modules
//!
//! - [`domain`] - Validated replica-set and principal specs, typed outcomes
//! - [`port`] - Service client, clock and operator traits
//! - [`application`] - Readiness poller and bootstrap orchestrator
//! - [`adapter`] - MongoDB driver adapter, tokio clock and the CLI
//! - [`infrastructure`] - Configuration loading and operator wiring
//! - [`error`] - Error types and exit codes
//!
//! # Features
//!
//! - `testkit` - Scripted service client, manual clock and fixtures for tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rsinit::adapter::outbound::clock::TokioClock;
//! use rsinit::adapter::outbound::mongo::{MongoServiceClient, MongoSettings};
//! use rsinit::application::bootstrap::BootstrapOrchestrator;
//! use rsinit::application::readiness::PollPolicy;
//! use rsinit::domain::{MemberSpec, PrincipalSpec, ReplicaSetSpec, RoleGrant};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let set = ReplicaSetSpec::try_new("rs0", vec![MemberSpec::new("localhost:27017", 1.0)])?;
//! let principal = PrincipalSpec::try_new(
//!     "root",
//!     "change-me",
//!     "admin",
//!     vec![RoleGrant::new("root", "admin")],
//! )?;
//!
//! let client = MongoServiceClient::connect(&MongoSettings::default()).await?;
//! let orchestrator =
//!     BootstrapOrchestrator::new(Arc::new(client), Arc::new(TokioClock), PollPolicy::default());
//! orchestrator.run(&set, &principal).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
