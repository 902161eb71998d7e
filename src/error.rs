use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures reported by the remote data-store service.
///
/// Transient failures (connection refused, election in progress, node still
/// starting) are retried while polling. Everything else is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{operation} hit a transient failure: {reason}")]
    Transient {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation} failed: {reason}")]
    NonTransient {
        operation: &'static str,
        reason: String,
    },
}

impl ServiceError {
    pub fn transient(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Transient {
            operation,
            reason: reason.into(),
        }
    }

    pub fn non_transient(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::NonTransient {
            operation,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient { .. })
    }
}

/// Why the readiness poller stopped without observing a primary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadinessError {
    #[error("status query rejected: {0}")]
    Rejected(#[source] ServiceError),

    #[error("node was not primary after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error("node was not primary after {elapsed:?} ({attempts} attempts)")]
    DeadlineExceeded { elapsed: Duration, attempts: u32 },

    #[error("cancelled while waiting for primary")]
    Cancelled,
}

/// Step of the bootstrap sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStage {
    Formation,
    Readiness,
    Provisioning,
}

impl fmt::Display for BootstrapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formation => write!(f, "formation"),
            Self::Readiness => write!(f, "readiness"),
            Self::Provisioning => write!(f, "provisioning"),
        }
    }
}

/// Fatal outcome of a bootstrap run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("formation failed: {0}")]
    Formation(#[source] ServiceError),

    #[error("readiness never reached: {0}")]
    Readiness(#[source] ReadinessError),

    #[error("provisioning failed: {0}")]
    Provisioning(#[source] ServiceError),

    #[error("bootstrap cancelled during {stage}")]
    Cancelled { stage: BootstrapStage },
}

impl BootstrapError {
    /// Step that produced the failure.
    #[must_use]
    pub const fn stage(&self) -> BootstrapStage {
        match self {
            Self::Formation(_) => BootstrapStage::Formation,
            Self::Readiness(_) => BootstrapStage::Readiness,
            Self::Provisioning(_) => BootstrapStage::Provisioning,
            Self::Cancelled { stage } => *stage,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid spec: {0}")]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this failure class.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Domain(_) => 2,
            Self::Service(_) | Self::Io(_) => 1,
            Self::Bootstrap(err) => match err {
                BootstrapError::Formation(_) => 3,
                BootstrapError::Readiness(_) => 4,
                BootstrapError::Provisioning(_) => 5,
                BootstrapError::Cancelled { .. } => 130,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
