//! API constants for the Vtiger webservice endpoint

/// Path of the single webservice entry point, relative to the instance URL.
pub const WEBSERVICE_PATH: &str = "/webservice.php";

/// Failure reason used when a rejected envelope carries no message.
pub const GENERIC_REMOTE_ERROR: &str = "unknown webservice error";

/// Failure reason used when the challenge step is rejected without a message.
pub const GENERIC_CHALLENGE_ERROR: &str = "failed to get challenge token";

/// Operation names the webservice dispatches on.
pub mod operations {
    pub const GET_CHALLENGE: &str = "getchallenge";
    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const CREATE: &str = "create";
    pub const RETRIEVE: &str = "retrieve";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
    pub const QUERY: &str = "query";
    pub const LIST_TYPES: &str = "listtypes";
    pub const DESCRIBE: &str = "describe";
    pub const RETRIEVE_RELATED: &str = "retrieve_related";
    pub const RELATED_TYPES: &str = "relatedtypes";
    pub const QUERY_RELATED: &str = "query_related";
    pub const DELETE_RELATED: &str = "delete_related";
    pub const ADD_RELATED: &str = "add_related";
}

/// Build the full webservice endpoint URL for an instance base URL.
pub fn webservice_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), WEBSERVICE_PATH)
}
