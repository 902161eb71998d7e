//! CLI module graph.

pub mod command;
pub mod config;
pub mod operator;
pub mod output;
pub mod paths;
pub mod run;
pub mod status;
