//! Inbound ports: what driving adapters may call.

pub mod operator;
