use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use async_trait::async_trait;

use crate::error::ClientError;

/// Bearer credentials with an absolute expiry.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub access_token: String,
    pub expires_at: SystemTime,
}

impl SessionToken {
    pub fn new(access_token: impl Into<String>, expires_at: SystemTime) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }
}

/// Callback that exchanges an expired token for a fresh one.
///
/// The token issuance flow itself (login, refresh endpoint) lives outside
/// this crate; callers inject whatever their auth collaborator provides.
#[async_trait]
pub trait RefreshToken: Send + Sync + 'static {
    async fn refresh(&self) -> Result<SessionToken, ClientError>;
}

/// Authenticated session threaded explicitly into the transport.
///
/// There is no ambient global: components that need credentials receive a
/// handle to this context. The refresh callback runs lazily, only when a
/// request finds the stored expiry in the past.
#[derive(Clone)]
pub struct SessionContext {
    token: Arc<RwLock<SessionToken>>,
    refresher: Option<Arc<dyn RefreshToken>>,
}

impl SessionContext {
    pub fn new(token: SessionToken) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
            refresher: None,
        }
    }

    pub fn with_refresher(token: SessionToken, refresher: Arc<dyn RefreshToken>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
            refresher: Some(refresher),
        }
    }

    /// Swap the stored token, e.g. after an explicit re-login.
    pub fn replace(&self, token: SessionToken) {
        *self.token.write().unwrap() = token;
    }

    /// Current bearer token, refreshing it first when expired.
    pub async fn bearer_token(&self) -> Result<String, ClientError> {
        let expired = self.token.read().unwrap().is_expired();
        if expired {
            let Some(refresher) = &self.refresher else {
                return Err(ClientError::Session(
                    "token expired and no refresher configured".to_string(),
                ));
            };
            let fresh = refresher.refresh().await?;
            *self.token.write().unwrap() = fresh;
        }
        Ok(self.token.read().unwrap().access_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct CountingRefresher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RefreshToken for CountingRefresher {
        async fn refresh(&self) -> Result<SessionToken, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SessionToken::new(
                "fresh",
                SystemTime::now() + Duration::from_secs(3600),
            ))
        }
    }

    fn valid_token() -> SessionToken {
        SessionToken::new("valid", SystemTime::now() + Duration::from_secs(3600))
    }

    fn expired_token() -> SessionToken {
        SessionToken::new("stale", SystemTime::now() - Duration::from_secs(1))
    }

    #[tokio::test]
    async fn valid_token_skips_refresh() {
        let refresher = Arc::new(CountingRefresher {
            calls: AtomicUsize::new(0),
        });
        let session = SessionContext::with_refresher(valid_token(), refresher.clone());

        let token = session.bearer_token().await.unwrap();
        assert_eq!(token, "valid");
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn expired_token_refreshes_lazily() {
        let refresher = Arc::new(CountingRefresher {
            calls: AtomicUsize::new(0),
        });
        let session = SessionContext::with_refresher(expired_token(), refresher.clone());

        let token = session.bearer_token().await.unwrap();
        assert_eq!(token, "fresh");
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);

        // The refreshed token is stored; no second refresh.
        let token = session.bearer_token().await.unwrap();
        assert_eq!(token, "fresh");
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_token_without_refresher_errors() {
        let session = SessionContext::new(expired_token());
        let err = session.bearer_token().await.unwrap_err();
        assert!(matches!(err, ClientError::Session(_)));
    }
}
