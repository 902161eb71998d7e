//! Handler for the `status` command.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{operator, output};
use crate::error::Result;

/// Execute the status command.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config_toml = operator::read_config_toml(config_path)?;
    let snapshot = operator::operator()?.load_status(&config_toml).await?;

    if output::is_json() {
        output::json_output(&json!({
            "command": "status",
            "node": snapshot.uri_display,
            "primary": snapshot.primary,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Node", &snapshot.uri_display);
    if snapshot.primary {
        output::success("Node is writable primary");
    } else {
        output::warning("Node is not primary");
        output::hint(&format!(
            "run `rsinit run -c {}` to form the replica set",
            config_path.display()
        ));
    }
    Ok(())
}
