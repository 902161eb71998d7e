//! Infrastructure configuration modules.

pub mod logging;
pub mod polling;
pub mod principal;
pub mod replica_set;
pub mod settings;

pub use settings::Config;
