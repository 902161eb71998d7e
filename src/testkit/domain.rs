//! Builders for bootstrap specs used across tests.

use crate::domain::{MemberSpec, PrincipalSpec, ReplicaSetSpec, RoleGrant};

/// `rs0` with a single `localhost:27017` member at priority 1.
pub fn replica_set() -> ReplicaSetSpec {
    ReplicaSetSpec::try_new("rs0", vec![MemberSpec::new("localhost:27017", 1.0)])
        .expect("valid replica set spec")
}

/// `root` account in `admin` with the `root@admin` role.
pub fn root_principal() -> PrincipalSpec {
    principal("root")
}

/// Account named `name` in `admin` with the `root@admin` role.
pub fn principal(name: &str) -> PrincipalSpec {
    PrincipalSpec::try_new(name, "root", "admin", vec![RoleGrant::new("root", "admin")])
        .expect("valid principal spec")
}
