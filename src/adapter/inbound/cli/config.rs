//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use crate::adapter::inbound::cli::{operator, output};
use crate::error::{ConfigError, Result};

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Set RSINIT_ADMIN_PASSWORD to replace the template password");
    output::note(&format!("3. Run: rsinit config validate -c {}", path.display()));
    output::note(&format!("4. Run: rsinit run -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config_toml = operator::read_config_toml(path)?;
    let config = operator::operator()?.show_config(&config_toml)?;

    output::section("Connection");
    output::field("URI", config.uri);
    output::field("App name", config.app_name);
    output::field("Connect", format!("{}ms", config.connect_timeout_ms));
    output::field(
        "Selection",
        format!("{}ms", config.server_selection_timeout_ms),
    );

    output::section("Replica Set");
    output::field("Name", config.set_name);
    for member in &config.members {
        output::field("Member", format!("{} (priority {})", member.host, member.priority));
    }

    output::section("Principal");
    output::field("Name", config.principal_name);
    output::field("Database", config.principal_database);
    output::field("Roles", config.roles.join(", "));
    output::field("Password", format!("from {}", config.password_source));

    output::section("Polling");
    output::field("Interval", format!("{}ms", config.polling.interval_ms));
    output::field(
        "Max attempts",
        config
            .polling
            .max_attempts
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
    );
    output::field(
        "Max wait",
        config
            .polling
            .max_wait_secs
            .map_or_else(|| "unbounded".to_string(), |s| format!("{s}s")),
    );

    output::section("Logging");
    output::field("Level", config.log_level);
    output::field("Format", config.log_format);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config_toml = operator::read_config_toml(path)?;
    let validation = operator::operator()?.validate_config(&config_toml)?;
    output::success("Config file is valid");

    if !validation.warnings.is_empty() {
        output::section("Warnings");
        for warning in &validation.warnings {
            output::warning(warning);
        }
    }

    output::field("Next", format!("rsinit run -c {}", path.display()));

    Ok(())
}
