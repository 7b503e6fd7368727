use std::time::Duration;

/// Quiet interval after the last state mutation before a request fires.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Connection settings for the storefront backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base, e.g. `https://api.example.com/api/v1`. Trailing slashes
    /// are stripped so path joining stays predictable.
    pub base_url: String,
    /// Mutation debounce window.
    pub debounce: Duration,
    /// Per-request timeout. `None` inherits the HTTP client's default.
    pub timeout: Option<Duration>,
    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            debounce: DEFAULT_DEBOUNCE,
            timeout: None,
            user_agent: None,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let cfg = ClientConfig::new("http://localhost:8080/api/");
        assert_eq!(cfg.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn defaults() {
        let cfg = ClientConfig::new("http://localhost:8080");
        assert_eq!(cfg.debounce, DEFAULT_DEBOUNCE);
        assert!(cfg.timeout.is_none());
        assert!(cfg.user_agent.is_none());
    }
}
