//! Runtime operator implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::adapter::outbound::clock::TokioClock;
use crate::adapter::outbound::mongo::MongoServiceClient;
use crate::application::bootstrap::BootstrapOrchestrator;
use crate::application::shutdown;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::runtime::{
    RunRequest, RunStartupSnapshot, RunSummary, RuntimeOperator,
};

use super::{entry::Operator, shared};

#[async_trait]
impl RuntimeOperator for Operator {
    fn prepare_run(&self, request: &RunRequest) -> Result<RunStartupSnapshot> {
        let config = Self::load_run_config(request)?;
        let replica_set = config.replica_set_spec()?;
        let principal = config.principal_spec()?;

        Ok(RunStartupSnapshot {
            uri_display: shared::mask_uri(&config.connection.uri),
            set_name: replica_set.name().to_string(),
            member: replica_set
                .members()
                .first()
                .map(|member| member.host().to_string())
                .unwrap_or_default(),
            principal: format!("{}@{}", principal.name(), principal.database()),
            polling: shared::describe_policy(&config.poll_policy()),
        })
    }

    async fn execute_run(&self, request: RunRequest) -> Result<RunSummary> {
        let config = Self::load_run_config(&request)?;
        config.init_logging();

        let replica_set = config.replica_set_spec()?;
        let principal = config.principal_spec()?;
        let policy = config.poll_policy();

        info!(
            uri = %shared::mask_uri(&config.connection.uri),
            set = replica_set.name(),
            "rsinit starting"
        );

        let client = MongoServiceClient::connect(&config.connection).await?;
        let orchestrator =
            BootstrapOrchestrator::new(Arc::new(client), Arc::new(TokioClock), policy);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let run = orchestrator.run_with_shutdown(&replica_set, &principal, shutdown_rx);
        tokio::pin!(run);

        let result = tokio::select! {
            result = &mut run => result,
            Ok(()) = signal::ctrl_c() => {
                info!("Shutdown signal received (Ctrl+C), press again to abort immediately");
                let _ = shutdown_tx.send(true);
                shutdown::finish_or_abort(&mut run, second_interrupt(), || {
                    orchestrator.current_stage()
                })
                .await
            }
        };

        match result {
            Ok(report) => {
                info!("rsinit finished");
                Ok(RunSummary {
                    formation: report.formation,
                    readiness_attempts: report.readiness.attempts,
                    readiness_elapsed: report.readiness.elapsed,
                    provision: report.provision,
                })
            }
            Err(e) => {
                error!(error = %e, stage = %e.stage(), "Bootstrap failed");
                Err(e.into())
            }
        }
    }
}

/// Resolve on the next Ctrl+C. Pends forever if the handler is unavailable.
async fn second_interrupt() {
    if signal::ctrl_c().await.is_ok() {
        warn!("Second shutdown signal received, aborting in-flight command");
    } else {
        std::future::pending::<()>().await;
    }
}

impl Operator {
    fn load_run_config(request: &RunRequest) -> Result<Config> {
        let mut config = Config::parse_toml(&request.config_toml)?;
        Self::apply_run_overrides(&mut config, request);
        Config::validate_uri(&config.connection.uri)?;
        Ok(config)
    }

    fn apply_run_overrides(config: &mut Config, request: &RunRequest) {
        if let Some(uri) = request.uri.as_ref().filter(|uri| !uri.is_empty()) {
            config.connection.uri = uri.clone();
        }

        if let Some(interval_ms) = request.interval_ms.filter(|ms| *ms > 0) {
            config.polling.interval_ms = interval_ms;
        }

        if let Some(max_attempts) = request.max_attempts.filter(|n| *n > 0) {
            config.polling.max_attempts = Some(max_attempts);
        }

        if let Some(max_wait_secs) = request.max_wait_secs.filter(|s| *s > 0) {
            config.polling.max_wait_secs = Some(max_wait_secs);
        }

        if let Some(ref log_level) = request.log_level {
            config.logging.level = log_level.clone();
        }

        if request.json_logs {
            config.logging.format = "json".to_string();
        }
    }
}
