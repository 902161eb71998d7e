//! Replica-set configuration.

use serde::Deserialize;

use crate::domain::{DomainError, MemberSpec, ReplicaSetSpec};

/// `[replica_set]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplicaSetConfig {
    /// Replica-set `_id`.
    #[serde(default = "default_name")]
    pub name: String,
    /// Members, assigned `_id`s in order. Exactly one for single-node sets.
    #[serde(default = "default_members")]
    pub members: Vec<MemberConfig>,
}

/// `[[replica_set.members]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberConfig {
    pub host: String,
    #[serde(default = "default_priority")]
    pub priority: f64,
}

fn default_name() -> String {
    "rs0".to_string()
}

fn default_members() -> Vec<MemberConfig> {
    vec![MemberConfig {
        host: "localhost:27017".to_string(),
        priority: default_priority(),
    }]
}

const fn default_priority() -> f64 {
    1.0
}

impl ReplicaSetConfig {
    /// Build the validated domain spec.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the configured set violates its invariants.
    pub fn to_spec(&self) -> Result<ReplicaSetSpec, DomainError> {
        let members = self
            .members
            .iter()
            .map(|member| MemberSpec::new(member.host.clone(), member.priority))
            .collect();
        ReplicaSetSpec::try_new(self.name.clone(), members)
    }
}

impl Default for ReplicaSetConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            members: default_members(),
        }
    }
}
