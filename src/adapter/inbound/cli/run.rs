//! Handler for the `run` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{operator, output};
use crate::error::Result;
use crate::port::inbound::operator::runtime::{RunRequest, RunStartupSnapshot, RunSummary};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config_toml = operator::read_config_toml(&args.config)?;
    let machine_output = output::is_json();
    let request = build_run_request(args, config_toml, machine_output, output::verbosity());
    let service = operator::operator()?;

    let startup = service.prepare_run(&request)?;
    if !output::is_quiet() || machine_output {
        print_startup(&startup);
    }

    output::action("Bootstrapping", &startup.set_name);
    let summary = service.execute_run(request).await?;
    print_summary(&startup, &summary);
    Ok(())
}

fn build_run_request(
    args: &RunArgs,
    config_toml: String,
    force_json_logs: bool,
    verbosity: u8,
) -> RunRequest {
    let log_level = args
        .log_level
        .clone()
        .or_else(|| (verbosity > 0).then(|| "debug".to_string()));

    RunRequest {
        config_toml,
        uri: args.uri.clone(),
        interval_ms: args.interval_ms,
        max_attempts: args.max_attempts,
        max_wait_secs: args.max_wait_secs,
        log_level,
        json_logs: args.json_logs || force_json_logs,
    }
}

fn print_startup(snapshot: &RunStartupSnapshot) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Node", &snapshot.uri_display);
    output::field("Replica set", output::highlight(&snapshot.set_name));
    output::field("Member", &snapshot.member);
    output::field("Principal", &snapshot.principal);
    if output::verbosity() > 0 {
        output::field("Polling", &snapshot.polling);
    }
}

fn print_summary(startup: &RunStartupSnapshot, summary: &RunSummary) {
    if output::is_json() {
        output::json_output(&json!({
            "command": "run",
            "status": "ok",
            "replica_set": startup.set_name,
            "formation": summary.formation.to_string(),
            "readiness_attempts": summary.readiness_attempts,
            "readiness_elapsed_ms": u64::try_from(summary.readiness_elapsed.as_millis()).unwrap_or(u64::MAX),
            "provision": summary.provision.to_string(),
        }));
        return;
    }

    output::action_done("Bootstrapped", &startup.set_name);
    output::field("Formation", summary.formation);
    output::field(
        "Primary after",
        format!(
            "{} attempt(s), {:.1}s",
            summary.readiness_attempts,
            summary.readiness_elapsed.as_secs_f64()
        ),
    );
    output::field("Principal", summary.provision);
}
