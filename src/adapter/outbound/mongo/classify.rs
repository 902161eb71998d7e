//! Server error classification.
//!
//! Maps driver errors onto the transient / non-transient split used by the
//! poller, and picks out the two codes that mean "already done".

use mongodb::error::{Error as MongoError, ErrorKind};

use crate::error::ServiceError;

/// `replSetInitiate` on a node that already has a config.
pub const ALREADY_INITIALIZED: i32 = 23;
/// `createUser` for a name that exists (4.4+).
pub const USER_ALREADY_EXISTS: i32 = 51003;
/// `createUser` for a name that exists on older servers.
pub const DUPLICATE_KEY: i32 = 11000;
/// Command unknown to the server, e.g. `hello` before 4.4.2 / 4.2.10 / 4.0.21.
pub const COMMAND_NOT_FOUND: i32 = 59;

/// Server codes raised while a node is starting, electing or stepping down.
const RETRYABLE_CODES: &[i32] = &[
    6,     // HostUnreachable
    7,     // HostNotFound
    50,    // MaxTimeMSExpired
    89,    // NetworkTimeout
    91,    // ShutdownInProgress
    94,    // NotYetInitialized
    189,   // PrimarySteppedDown
    9001,  // SocketException
    10107, // NotWritablePrimary
    11600, // InterruptedAtShutdown
    11602, // InterruptedDueToReplStateChange
    13435, // NotPrimaryNoSecondaryOk
    13436, // NotPrimaryOrSecondary
];

/// Coarse meaning of a failed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The command's effect is already in place.
    AlreadyApplied,
    /// Worth retrying after a delay.
    Transient,
    /// The server predates the command; a legacy equivalent exists.
    Unsupported,
    /// Retrying will not help.
    Fatal,
}

/// Classify a server error code for the given command.
#[must_use]
pub fn classify_code(command: &str, code: i32) -> Failure {
    match (command, code) {
        ("replSetInitiate", ALREADY_INITIALIZED) => Failure::AlreadyApplied,
        ("createUser", USER_ALREADY_EXISTS | DUPLICATE_KEY) => Failure::AlreadyApplied,
        ("hello", COMMAND_NOT_FOUND) => Failure::Unsupported,
        (_, code) if RETRYABLE_CODES.contains(&code) => Failure::Transient,
        _ => Failure::Fatal,
    }
}

/// Classify a driver error for the given command.
#[must_use]
pub fn classify(command: &str, error: &MongoError) -> Failure {
    match error.kind.as_ref() {
        ErrorKind::Command(cmd) => classify_code(command, cmd.code),
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => Failure::Transient,
        _ => Failure::Fatal,
    }
}

/// Convert a driver error that was not tolerated into a [`ServiceError`].
#[must_use]
pub fn to_service_error(command: &'static str, error: &MongoError) -> ServiceError {
    let reason = describe(error);
    match classify(command, error) {
        Failure::Transient => ServiceError::transient(command, reason),
        Failure::AlreadyApplied | Failure::Unsupported | Failure::Fatal => {
            ServiceError::non_transient(command, reason)
        }
    }
}

fn describe(error: &MongoError) -> String {
    match error.kind.as_ref() {
        ErrorKind::Command(cmd) => format!("{} ({}): {}", cmd.code_name, cmd.code, cmd.message),
        _ => error.to_string(),
    }
}
