//! MongoDB adapter for the [`ServiceClient`](crate::port::outbound::service::ServiceClient) port.

pub mod classify;
pub mod client;
pub mod settings;

pub use client::MongoServiceClient;
pub use settings::MongoSettings;
