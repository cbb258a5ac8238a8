//! Client library for the Vtiger CRM webservice API.
//!
//! The webservice exposes every CRM module through a single endpoint that
//! dispatches on an `operation` parameter. This crate covers the session
//! lifecycle (challenge/digest login, logout), the static module table, and
//! one method per remote operation.
//!
//! # Examples
//!
//! ```no_run
//! use vtiger_client::{ClientConfig, VtigerClient};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = ClientConfig::new("https://crm.example.com", "admin", "access-key");
//! let mut client = VtigerClient::new(config);
//!
//! client.login().await?;
//! let lead = client.retrieve("leads", "42").await?;
//! println!("{:?}", lead.result);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;

pub use api::VtigerClient;
pub use config::ClientConfig;
