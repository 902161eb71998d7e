//! Readiness observations and remote reconciliation outcomes.

use std::fmt;

/// A single observation of whether the node is the elected primary.
///
/// Produced fresh by every status query and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessStatus {
    is_primary: bool,
}

impl ReadinessStatus {
    /// Observation that the node is primary.
    #[must_use]
    pub const fn primary() -> Self {
        Self { is_primary: true }
    }

    /// Observation that the node is not (yet) primary.
    #[must_use]
    pub const fn not_primary() -> Self {
        Self { is_primary: false }
    }

    /// Build from a raw boolean flag.
    #[must_use]
    pub const fn from_primary_flag(is_primary: bool) -> Self {
        Self { is_primary }
    }

    /// True once the node accepts writes.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.is_primary
    }
}

/// Result of a replica-set formation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationOutcome {
    /// The node accepted the configuration.
    Initiated,
    /// The node already has a replica-set configuration.
    AlreadyInitiated,
}

impl fmt::Display for FormationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initiated => write!(f, "initiated"),
            Self::AlreadyInitiated => write!(f, "already initiated"),
        }
    }
}

/// Result of a principal creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The account was created by this run.
    Created,
    /// An account with the same name already existed.
    AlreadyExists,
}

impl fmt::Display for ProvisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::AlreadyExists => write!(f, "already exists"),
        }
    }
}
