//! MongoDB implementation of [`ServiceClient`].

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::Client;
use tracing::debug;

use super::classify::{self, Failure};
use super::settings::MongoSettings;
use crate::domain::{
    FormationOutcome, PrincipalSpec, ProvisionOutcome, ReadinessStatus, ReplicaSetSpec,
};
use crate::error::ServiceError;
use crate::port::outbound::service::ServiceClient;

const ADMIN_DB: &str = "admin";

/// Administrative client for a single `mongod`.
///
/// Holds one driver [`Client`] for the whole run. The driver connects lazily,
/// so a node that is still starting surfaces as a transient error on the
/// first command rather than at construction.
pub struct MongoServiceClient {
    client: Client,
}

impl MongoServiceClient {
    /// Build a client from settings.
    ///
    /// # Errors
    ///
    /// Returns a non-transient error if the connection string is invalid.
    pub async fn connect(settings: &MongoSettings) -> Result<Self, ServiceError> {
        let mut options = ClientOptions::parse(settings.uri.as_str())
            .await
            .map_err(|e| ServiceError::non_transient("connect", e.to_string()))?;
        options.direct_connection = Some(true);
        options.app_name = Some(settings.app_name.clone());
        options.connect_timeout = Some(settings.connect_timeout());
        options.server_selection_timeout = Some(settings.server_selection_timeout());

        let client = Client::with_options(options)
            .map_err(|e| ServiceError::non_transient("connect", e.to_string()))?;
        Ok(Self { client })
    }

    /// Run one command. `Ok(None)` means the server reported the command's
    /// effect as already in place.
    async fn run(
        &self,
        database: &str,
        command_name: &'static str,
        command: Document,
    ) -> Result<Option<Document>, ServiceError> {
        debug!(command = command_name, database, "Running admin command");
        let result = self.client.database(database).run_command(command).await;
        settle(command_name, result)
    }

    /// Issue `hello`, retrying once with `isMaster` on servers that do not
    /// know `hello` yet.
    async fn handshake(&self) -> Result<Document, ServiceError> {
        let admin = self.client.database(ADMIN_DB);
        debug!(command = "hello", database = ADMIN_DB, "Running admin command");
        match admin.run_command(doc! { "hello": 1 }).await {
            Ok(reply) => Ok(reply),
            Err(e) if classify::classify("hello", &e) == Failure::Unsupported => {
                debug!("Server does not support hello, falling back to isMaster");
                admin
                    .run_command(doc! { "isMaster": 1 })
                    .await
                    .map_err(|e| classify::to_service_error("isMaster", &e))
            }
            Err(e) => Err(classify::to_service_error("hello", &e)),
        }
    }
}

/// Fold a command result into "reply", "already applied" or an error.
fn settle(
    command_name: &'static str,
    result: mongodb::error::Result<Document>,
) -> Result<Option<Document>, ServiceError> {
    match result {
        Ok(reply) => Ok(Some(reply)),
        Err(e) => match classify::classify(command_name, &e) {
            Failure::AlreadyApplied => Ok(None),
            Failure::Transient | Failure::Unsupported | Failure::Fatal => {
                Err(classify::to_service_error(command_name, &e))
            }
        },
    }
}

/// Build the `replSetInitiate` document for `spec`.
#[must_use]
pub fn initiate_command(spec: &ReplicaSetSpec) -> Document {
    let members: Vec<Document> = spec
        .members()
        .iter()
        .zip(0_i32..)
        .map(|(member, id)| {
            doc! {
                "_id": id,
                "host": member.host(),
                "priority": member.priority(),
            }
        })
        .collect();

    doc! {
        "replSetInitiate": {
            "_id": spec.name(),
            "members": members,
        }
    }
}

/// Build the `createUser` document for `spec`.
#[must_use]
pub fn create_user_command(spec: &PrincipalSpec) -> Document {
    let roles: Vec<Document> = spec
        .roles()
        .iter()
        .map(|grant| doc! { "role": grant.role(), "db": grant.db() })
        .collect();

    doc! {
        "createUser": spec.name(),
        "pwd": spec.password(),
        "roles": roles,
    }
}

/// Read the primary flag from a `hello` or `isMaster` reply.
///
/// `hello` answers with `isWritablePrimary`; the legacy `isMaster` command
/// answers with `ismaster`.
///
/// # Errors
///
/// Returns a non-transient error if neither field is a boolean.
pub fn parse_hello(reply: &Document) -> Result<ReadinessStatus, ServiceError> {
    reply
        .get_bool("isWritablePrimary")
        .or_else(|_| reply.get_bool("ismaster"))
        .map(ReadinessStatus::from_primary_flag)
        .map_err(|_| {
            ServiceError::non_transient("hello", "reply has no isWritablePrimary/ismaster flag")
        })
}

#[async_trait]
impl ServiceClient for MongoServiceClient {
    async fn form_replica_set(
        &self,
        spec: &ReplicaSetSpec,
    ) -> Result<FormationOutcome, ServiceError> {
        match self
            .run(ADMIN_DB, "replSetInitiate", initiate_command(spec))
            .await?
        {
            Some(_) => Ok(FormationOutcome::Initiated),
            None => Ok(FormationOutcome::AlreadyInitiated),
        }
    }

    async fn query_readiness(&self) -> Result<ReadinessStatus, ServiceError> {
        let reply = self.handshake().await?;
        parse_hello(&reply)
    }

    async fn create_principal(
        &self,
        spec: &PrincipalSpec,
    ) -> Result<ProvisionOutcome, ServiceError> {
        match self
            .run(spec.database(), "createUser", create_user_command(spec))
            .await?
        {
            Some(_) => Ok(ProvisionOutcome::Created),
            None => Ok(ProvisionOutcome::AlreadyExists),
        }
    }

    fn service_name(&self) -> &'static str {
        "mongodb"
    }
}
