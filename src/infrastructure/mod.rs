//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! bootstrap logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`operator`] - CLI operator interface and composition root

pub mod config;
pub mod operator;
