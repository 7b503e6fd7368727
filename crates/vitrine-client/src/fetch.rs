use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use vitrine_model::ApiEnvelope;

use crate::{config::ClientConfig, error::ClientError, session::SessionContext};

/// Transport seam between the query manager and the backend.
///
/// The manager only ever issues collection GETs; everything else about the
/// transport (auth, timeouts, base URL) is the implementation's business.
/// Tests substitute a recording fake here.
#[async_trait]
pub trait Fetch: Send + Sync + 'static {
    /// GET `<base>/<path>?<query>` and return the raw page payload from a
    /// successful envelope.
    async fn fetch_page(&self, path: &str, query: &str) -> Result<Value, ClientError>;
}

/// reqwest-backed [`Fetch`] implementation.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
    session: Option<SessionContext>,
}

impl HttpFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            session: None,
        })
    }

    /// Attach an authenticated session whose bearer token is sent with
    /// every request.
    pub fn with_session(mut self, session: SessionContext) -> Self {
        self.session = Some(session);
        self
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_page(&self, path: &str, query: &str) -> Result<Value, ClientError> {
        let url = if query.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}?{}", self.base_url, path, query)
        };
        let request_id = Uuid::new_v4();
        debug!(%request_id, %url, "fetching page");

        let mut request = self.client.get(&url);
        if let Some(session) = &self.session {
            request = request.bearer_auth(session.bearer_token().await?);
        }

        let body = request.send().await?.text().await?;
        let envelope: ApiEnvelope<Value> = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("failed to parse envelope: {e}")))?;

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "request rejected".to_string());
            warn!(%request_id, %message, "backend rejected page request");
            return Err(ClientError::Rejected(message));
        }

        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("success envelope without data".to_string()))
    }
}
