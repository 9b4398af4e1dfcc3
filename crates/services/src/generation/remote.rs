use std::env;
use std::time::Duration;

/// Where and how to reach the remote scenario endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    /// API root, e.g. `http://localhost:3001/api`.
    pub base_url: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl RemoteConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `SCENARIO_API_URL` and `SCENARIO_API_TIMEOUT_SECS`.
    ///
    /// Returns `None` when no URL is set, which keeps generation offline.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("SCENARIO_API_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let timeout = env::var("SCENARIO_API_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        Some(Self {
            base_url: base_url.trim().to_string(),
            timeout,
        })
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/generate-scenario", self.base_url.trim_end_matches('/'))
    }
}
