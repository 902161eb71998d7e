//! Status operator implementation.

use async_trait::async_trait;
use tracing::debug;

use crate::adapter::outbound::mongo::MongoServiceClient;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::status::{StatusOperator, StatusSnapshot};
use crate::port::outbound::service::ServiceClient;

use super::{entry::Operator, shared};

#[async_trait]
impl StatusOperator for Operator {
    async fn load_status(&self, config_toml: &str) -> Result<StatusSnapshot> {
        let config = Config::parse_toml(config_toml)?;
        let client = MongoServiceClient::connect(&config.connection).await?;
        let status = client.query_readiness().await?;
        debug!(primary = status.is_ready(), "Status query answered");

        Ok(StatusSnapshot {
            uri_display: shared::mask_uri(&config.connection.uri),
            primary: status.is_ready(),
        })
    }
}
