//! Shared data types for the Vtiger webservice API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::modules::Module;

/// State of an authenticated webservice session.
///
/// All three fields come out of a single login response and the struct only
/// exists as a whole, so a failed login can never leave partial session state
/// behind.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque token the remote expects as `sessionName` on every operation.
    pub session_name: String,
    /// Id of the authenticated user, used to default `assigned_user_id` on
    /// created records.
    pub user_id: String,
    /// The raw login `result` payload (user details, server time, ...),
    /// passed through undecoded.
    pub user_profile: Value,
}

/// Response envelope returned by every webservice operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VtigerResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RemoteError>,
}

/// Error block of a failed envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl VtigerResponse {
    /// Remote failure reason, if the envelope carries one.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }
}

/// Composite record id in the `{moduleId}x{recordNumber}` wire format.
///
/// The prefix tells the remote which module a raw record number belongs to;
/// the whole thing is a string on the wire, never a number.
pub fn record_ref(module: Module, record_number: &str) -> String {
    format!("{}x{}", module.id(), record_number)
}
