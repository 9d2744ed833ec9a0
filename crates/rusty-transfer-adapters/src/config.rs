use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct TransferAdapterConfig {
    pub runtime_profile: RuntimeProfile,
    pub eip1193_proxy_url: Option<String>,
    pub request_timeout_ms: u64,
    pub receipt_poll_interval_ms: u64,
    /// `None` waits for the receipt indefinitely.
    pub receipt_max_polls: Option<u32>,
}

impl Default for TransferAdapterConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Development,
            eip1193_proxy_url: None,
            request_timeout_ms: 15_000,
            receipt_poll_interval_ms: 1_000,
            receipt_max_polls: None,
        }
    }
}

impl TransferAdapterConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(profile) = env::var("RUSTY_TRANSFER_PROFILE") {
            cfg.runtime_profile = match profile.trim().to_ascii_lowercase().as_str() {
                "production" | "prod" => RuntimeProfile::Production,
                _ => RuntimeProfile::Development,
            };
        }
        if let Ok(url) = env::var("RUSTY_TRANSFER_EIP1193_PROXY_URL") {
            let url = url.trim();
            if !url.is_empty() {
                cfg.eip1193_proxy_url = Some(url.to_owned());
            }
        }
        if let Some(ms) = env_parse("RUSTY_TRANSFER_REQUEST_TIMEOUT_MS") {
            cfg.request_timeout_ms = ms;
        }
        if let Some(ms) = env_parse("RUSTY_TRANSFER_RECEIPT_POLL_MS") {
            cfg.receipt_poll_interval_ms = ms;
        }
        if let Some(polls) = env_parse("RUSTY_TRANSFER_RECEIPT_MAX_POLLS") {
            cfg.receipt_max_polls = Some(polls);
        }
        cfg
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable config value");
            None
        }
    }
}
