use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use log::{debug, info};
use serde_json::Value;

use crate::config::ClientConfig;

use super::auth;
use super::constants::{self, operations};
use super::models::{Session, VtigerResponse, record_ref};
use super::modules::Module;

/// Vtiger webservice client with connection pooling and owned session state.
///
/// One instance holds at most one live session. `login` is the only writer of
/// the session fields and takes `&mut self`; every operation reads them
/// through `&self`, so overlapping in-flight calls never observe a torn
/// session.
pub struct VtigerClient {
    config: ClientConfig,
    http_client: reqwest::Client,
    endpoint: String,
    session: Option<Session>,
}

impl VtigerClient {
    pub fn new(config: ClientConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)           // Max idle connections per host
            .pool_idle_timeout(Duration::from_secs(90))  // Keep connections alive for 90s
            .timeout(Duration::from_secs(30))     // Request timeout
            .connect_timeout(Duration::from_secs(10))    // Connection timeout
            .user_agent("vtiger-client/0.1")      // Custom user agent
            .build()
            .expect("Failed to build HTTP client");

        let endpoint = constants::webservice_endpoint(&config.base_url);

        Self {
            config,
            http_client,
            endpoint,
            session: None,
        }
    }

    /// Create a client with custom HTTP client configuration.
    pub fn with_custom_client(config: ClientConfig, http_client: reqwest::Client) -> Self {
        let endpoint = constants::webservice_endpoint(&config.base_url);
        Self {
            config,
            http_client,
            endpoint,
            session: None,
        }
    }

    /// Currently held session, if a login has succeeded.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // --- Session lifecycle ---

    /// Authenticate against the webservice with the configured credentials.
    ///
    /// Two steps: fetch a one-time challenge token, then post the username
    /// with `md5(token + access key)` in place of the plaintext key. Session
    /// state is written only after the whole handshake succeeds; any earlier
    /// failure leaves it untouched.
    pub async fn login(&mut self) -> Result<VtigerResponse> {
        info!(
            "Logging in to {} as {}",
            self.endpoint, self.config.username
        );

        let token = self.request_challenge().await?;
        let hash = auth::access_key_hash(&token, &self.config.access_key);

        let response = self
            .send_post(&[
                ("operation", operations::LOGIN),
                ("username", self.config.username.as_str()),
                ("accessKey", hash.as_str()),
            ])
            .await?;
        let response = Self::ensure_success(response)?;

        let result = response
            .result
            .as_ref()
            .ok_or_else(|| anyhow!("login response carried no result payload"))?;
        let session_name = result
            .get("sessionName")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow!("login response carried no session name"))?;
        let user_id = result
            .get("userId")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        self.session = Some(Session {
            session_name: session_name.to_string(),
            user_id: user_id.to_string(),
            user_profile: result.clone(),
        });

        debug!("Session established: user {}", user_id);
        Ok(response)
    }

    /// End the remote session.
    ///
    /// The token is invalidated server-side only; the local session copy is
    /// left as-is, so later calls surface the remote's invalid-session error
    /// rather than failing locally.
    pub async fn logout(&mut self) -> Result<VtigerResponse> {
        info!("Logging out of {}", self.endpoint);

        let response = self
            .send_post(&[
                ("operation", operations::LOGOUT),
                ("sessionName", self.session_name()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// Fetch the one-time challenge token that keys the login digest.
    async fn request_challenge(&self) -> Result<String> {
        debug!("Requesting login challenge for {}", self.config.username);

        let response = self
            .send_get(&[
                ("operation", operations::GET_CHALLENGE),
                ("username", self.config.username.as_str()),
            ])
            .await?;

        if !response.success {
            bail!(
                "{}",
                response
                    .error_message()
                    .unwrap_or(constants::GENERIC_CHALLENGE_ERROR)
            );
        }

        response
            .result
            .as_ref()
            .and_then(|r| r.get("token"))
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("challenge response carried no token"))
    }

    // --- CRUD operations ---

    /// Create a record. Unless the element already assigns one, the record
    /// owner defaults to the logged-in user.
    pub async fn create(&self, module: &str, element: Value) -> Result<VtigerResponse> {
        let module = resolve(module)?;

        let mut element = element;
        let fields = element
            .as_object_mut()
            .ok_or_else(|| anyhow!("create element must be a JSON object"))?;
        if !fields.contains_key("assigned_user_id") {
            if let Some(session) = &self.session {
                fields.insert(
                    "assigned_user_id".to_string(),
                    Value::String(session.user_id.clone()),
                );
            }
        }

        let payload = serde_json::to_string(&element)?;

        debug!("create {}", module.name());
        let response = self
            .send_post(&[
                ("operation", operations::CREATE),
                ("sessionName", self.session_name()),
                ("element", payload.as_str()),
                ("elementType", module.name()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// Fetch a single record by module and record number.
    pub async fn retrieve(&self, module: &str, record: &str) -> Result<VtigerResponse> {
        let module = resolve(module)?;
        let id = record_ref(module, record);

        debug!("retrieve {}", id);
        let response = self
            .send_get(&[
                ("operation", operations::RETRIEVE),
                ("sessionName", self.session_name()),
                ("id", id.as_str()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// Update a record. The webservice replaces the record wholesale, so the
    /// element must restate every mandatory field, not just the changed ones.
    pub async fn update(&self, module: &str, record: &str, element: Value) -> Result<VtigerResponse> {
        let module = resolve(module)?;

        let mut element = element;
        let fields = element
            .as_object_mut()
            .ok_or_else(|| anyhow!("update element must be a JSON object"))?;
        // The record id travels inside the element, not as a parameter
        fields.insert(
            "id".to_string(),
            Value::String(record_ref(module, record)),
        );

        let payload = serde_json::to_string(&element)?;

        debug!("update {} ({})", module.name(), record);
        let response = self
            .send_post(&[
                ("operation", operations::UPDATE),
                ("sessionName", self.session_name()),
                ("element", payload.as_str()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// Delete a record by module and record number.
    pub async fn delete(&self, module: &str, record: &str) -> Result<VtigerResponse> {
        let module = resolve(module)?;
        let id = record_ref(module, record);

        debug!("delete {}", id);
        let response = self
            .send_post(&[
                ("operation", operations::DELETE),
                ("sessionName", self.session_name()),
                ("id", id.as_str()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    // --- Query and metadata operations ---

    /// Run a webservice query string (`SELECT ... FROM module ...`).
    ///
    /// The query grammar belongs to the remote; the string goes through
    /// verbatim with no local parsing or validation.
    pub async fn query(&self, query: &str) -> Result<VtigerResponse> {
        debug!("query: {}", query);
        let response = self
            .send_get(&[
                ("operation", operations::QUERY),
                ("sessionName", self.session_name()),
                ("query", query),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// List the module types available to the logged-in user.
    pub async fn list_types(&self) -> Result<VtigerResponse> {
        let response = self
            .send_get(&[
                ("operation", operations::LIST_TYPES),
                ("sessionName", self.session_name()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// Describe a module's fields and permissions.
    pub async fn describe(&self, module: &str) -> Result<VtigerResponse> {
        let module = resolve(module)?;
        let response = self
            .send_get(&[
                ("operation", operations::DESCRIBE),
                ("sessionName", self.session_name()),
                ("elementType", module.name()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    // --- Relation operations ---

    /// Fetch records of `related_module` related to one record under the
    /// given relation label.
    pub async fn retrieve_related(
        &self,
        module: &str,
        record: &str,
        related_module: &str,
        related_label: &str,
    ) -> Result<VtigerResponse> {
        let module = resolve(module)?;
        let related_module = resolve(related_module)?;
        let id = record_ref(module, record);

        debug!("retrieve_related {} -> {}", id, related_module.name());
        let response = self
            .send_get(&[
                ("operation", operations::RETRIEVE_RELATED),
                ("sessionName", self.session_name()),
                ("id", id.as_str()),
                ("relatedLabel", related_label),
                ("relatedType", related_module.name()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// List the relation types a module supports.
    pub async fn related_types(&self, module: &str) -> Result<VtigerResponse> {
        let module = resolve(module)?;
        let response = self
            .send_get(&[
                ("operation", operations::RELATED_TYPES),
                ("sessionName", self.session_name()),
                ("elementType", module.name()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// Query records related to one record under the given relation label.
    ///
    /// The embedded query is always `SELECT * FROM <module name>`; the remote
    /// only uses it to pick result columns, so it is not caller-supplied.
    pub async fn query_related(
        &self,
        module: &str,
        record: &str,
        related_label: &str,
    ) -> Result<VtigerResponse> {
        let module = resolve(module)?;
        let id = record_ref(module, record);
        let query = format!("SELECT * FROM {}", module.name());

        debug!("query_related {} ({})", id, related_label);
        let response = self
            .send_get(&[
                ("operation", operations::QUERY_RELATED),
                ("sessionName", self.session_name()),
                ("query", query.as_str()),
                ("id", id.as_str()),
                ("relatedLabel", related_label),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// Remove the relation between two records.
    pub async fn delete_related(
        &self,
        source_module: &str,
        source_record: &str,
        related_module: &str,
        related_record: &str,
    ) -> Result<VtigerResponse> {
        let source_module = resolve(source_module)?;
        let related_module = resolve(related_module)?;
        let source_id = record_ref(source_module, source_record);
        let related_id = record_ref(related_module, related_record);

        debug!("delete_related {} -> {}", source_id, related_id);
        let response = self
            .send_post(&[
                ("operation", operations::DELETE_RELATED),
                ("sessionName", self.session_name()),
                ("sourceRecordId", source_id.as_str()),
                ("relatedRecordId", related_id.as_str()),
            ])
            .await?;
        Self::ensure_success(response)
    }

    /// Relate two records under the given relation id label.
    pub async fn add_related(
        &self,
        source_module: &str,
        source_record: &str,
        related_module: &str,
        related_record: &str,
        relation_id_label: &str,
    ) -> Result<VtigerResponse> {
        let source_module = resolve(source_module)?;
        let related_module = resolve(related_module)?;
        let source_id = record_ref(source_module, source_record);
        let related_id = record_ref(related_module, related_record);

        debug!("add_related {} -> {} ({})", source_id, related_id, relation_id_label);
        let response = self
            .send_post(&[
                ("operation", operations::ADD_RELATED),
                ("sessionName", self.session_name()),
                ("sourceRecordId", source_id.as_str()),
                ("relatedRecordId", related_id.as_str()),
                ("relationIdLabel", relation_id_label),
            ])
            .await?;
        Self::ensure_success(response)
    }

    // --- Request helpers ---

    /// Session token sent with every operation. Empty before a successful
    /// login; unauthenticated calls are rejected by the remote, not here.
    fn session_name(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.session_name.as_str())
            .unwrap_or("")
    }

    async fn send_get(&self, params: &[(&str, &str)]) -> Result<VtigerResponse> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(params)
            .send()
            .await?;
        debug!("GET {} -> {}", self.endpoint, response.status());
        Ok(response.json().await?)
    }

    async fn send_post(&self, form: &[(&str, &str)]) -> Result<VtigerResponse> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .form(form)
            .send()
            .await?;
        debug!("POST {} -> {}", self.endpoint, response.status());
        Ok(response.json().await?)
    }

    /// Surface a `success: false` envelope as an error carrying the remote's
    /// failure message.
    fn ensure_success(response: VtigerResponse) -> Result<VtigerResponse> {
        if !response.success {
            bail!(
                "{}",
                response
                    .error_message()
                    .unwrap_or(constants::GENERIC_REMOTE_ERROR)
            );
        }
        Ok(response)
    }
}

/// Fail-fast module lookup; unknown keys never reach the wire.
fn resolve(key: &str) -> Result<Module> {
    Module::from_key(key).ok_or_else(|| anyhow!("unknown module key '{}'", key))
}
