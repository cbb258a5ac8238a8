//! Vtiger webservice API module
//!
//! Everything talks to a single `webservice.php` endpoint that multiplexes
//! behavior on an `operation` parameter: GET with query parameters for reads,
//! form-encoded POST for writes. [`VtigerClient`] owns the HTTP connection
//! pool and the session token; [`modules`] maps the closed set of module keys
//! to the numeric ids and display names the remote expects.

pub mod auth;
pub mod client;
pub mod constants;
pub mod models;
pub mod modules;

pub use client::VtigerClient;
pub use models::{RemoteError, Session, VtigerResponse, record_ref};
pub use modules::{Module, module_id, module_name};
