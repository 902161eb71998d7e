//! Canonical test configurations.
//!
//! Single source of truth for poll policies and config documents used
//! across tests.

use std::time::Duration;

use crate::application::readiness::PollPolicy;

/// One-second fixed interval, unbounded.
pub fn poll_policy() -> PollPolicy {
    PollPolicy::new(Duration::from_secs(1))
}

/// One-second interval with an attempt cap.
pub fn bounded_poll_policy(max_attempts: u32) -> PollPolicy {
    PollPolicy::new(Duration::from_secs(1)).with_max_attempts(max_attempts)
}

/// A complete, valid config document.
pub const VALID_TOML: &str = r#"
[connection]
uri = "mongodb://localhost:27017/?directConnection=true"

[replica_set]
name = "rs0"

[[replica_set.members]]
host = "localhost:27017"
priority = 1.0

[principal]
name = "root"
password = "s3cret"
database = "admin"

[[principal.roles]]
role = "root"
db = "admin"

[polling]
interval_ms = 1000

[logging]
level = "info"
format = "pretty"
"#;
