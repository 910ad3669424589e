use std::time::Duration;

/// Default origin plus the `/api` prefix the game service is mounted under
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Where the game service lives and how patiently to talk to it.
///
/// Built once and never mutated; share it freely between concurrent calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_MAX_RETRIES)
    }
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration, max_retries: u32) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout,
            max_retries,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-attempt deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Join the base prefix with a path such as `/game/42`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
