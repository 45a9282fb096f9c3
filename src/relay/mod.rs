//! The relay service: accepts an order from the collector, adds the intake
//! API's credentials and mirrors back whatever the intake API answers.

pub mod config;
pub mod server;
pub mod upstream;

pub use config::{ConfigError, RelayConfig};
pub use server::{router, run, serve, RelayState, DEFAULT_PORT};
pub use upstream::{ForwardError, UpstreamBody, UpstreamClient, UpstreamResponse};
