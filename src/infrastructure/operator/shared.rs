//! Shared helper routines for operator implementations.

use crate::application::readiness::PollPolicy;

/// Hide the password component of a connection string.
pub(super) fn mask_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://").map(|i| i + 3) else {
        return uri.to_string();
    };
    let rest = &uri[scheme_end..];
    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return uri.to_string();
    };
    let userinfo = &rest[..at];
    let user = userinfo.split(':').next().unwrap_or_default();
    format!("{}{}:***{}", &uri[..scheme_end], user, &rest[at..])
}

/// One-line description of a polling policy.
pub(super) fn describe_policy(policy: &PollPolicy) -> String {
    let mut parts = vec![format!("every {}ms", policy.interval.as_millis())];
    if let Some(max_attempts) = policy.max_attempts {
        parts.push(format!("at most {max_attempts} attempts"));
    }
    if let Some(max_wait) = policy.max_wait {
        parts.push(format!("at most {}s", max_wait.as_secs()));
    }
    if policy.max_attempts.is_none() && policy.max_wait.is_none() {
        parts.push("unbounded".to_string());
    }
    parts.join(", ")
}
