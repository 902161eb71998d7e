//! Default file locations.

use std::path::PathBuf;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "rsinit.toml";

/// Returns the default config file path (`./rsinit.toml`).
#[must_use]
pub fn default_config() -> PathBuf {
    PathBuf::from(CONFIG_FILE_NAME)
}
