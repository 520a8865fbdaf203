use std::env;
use std::sync::Arc;
use std::time::Duration;

use super::core::GroqClient;
use super::tools::UnknownToolPolicy;
use crate::transport::http::DEFAULT_BASE_URL;
use crate::transport::{HttpTransport, HttpTransportConfig};
use crate::Result;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

const DEFAULT_TIMEOUT_SECS: u64 = 100;
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 32;

/// Builder for [`GroqClient`].
///
/// Every setting falls back to an environment variable, then to a default:
///
/// | Setting | Env var | Default |
/// |---------|---------|---------|
/// | API key | `GROQ_API_KEY` | required |
/// | Base URL | `GROQ_BASE_URL` | `https://api.groq.com/openai/v1/` |
/// | Default model | `GROQ_MODEL` | `openai/gpt-oss-120b` |
/// | Timeout | `GROQ_HTTP_TIMEOUT_SECS` | 100 s |
/// | Proxy | `GROQ_PROXY_URL` | none |
/// | Idle connections per host | `GROQ_HTTP_POOL_MAX_IDLE_PER_HOST` | 32 |
#[derive(Debug, Clone, Default)]
pub struct GroqClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    default_model: Option<String>,
    timeout: Option<Duration>,
    proxy: Option<String>,
    pool_max_idle_per_host: Option<usize>,
    unknown_tool_policy: UnknownToolPolicy,
}

impl GroqClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the API base URL (mock servers, gateways).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Model used by [`GroqClient::text`] when a call does not name one.
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    pub fn pool_max_idle_per_host(mut self, n: usize) -> Self {
        self.pool_max_idle_per_host = Some(n);
        self
    }

    pub fn unknown_tool_policy(mut self, policy: UnknownToolPolicy) -> Self {
        self.unknown_tool_policy = policy;
        self
    }

    pub fn build(self) -> Result<GroqClient> {
        let config = HttpTransportConfig {
            api_key: self
                .api_key
                .or_else(|| env_string("GROQ_API_KEY"))
                .unwrap_or_default(),
            base_url: self
                .base_url
                .or_else(|| env_string("GROQ_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self.timeout.unwrap_or_else(|| {
                Duration::from_secs(
                    env_parse("GROQ_HTTP_TIMEOUT_SECS").unwrap_or(DEFAULT_TIMEOUT_SECS),
                )
            }),
            proxy: self.proxy.or_else(|| env_string("GROQ_PROXY_URL")),
            pool_max_idle_per_host: self
                .pool_max_idle_per_host
                .or_else(|| env_parse("GROQ_HTTP_POOL_MAX_IDLE_PER_HOST"))
                .unwrap_or(DEFAULT_POOL_MAX_IDLE_PER_HOST),
        };
        let default_model = self
            .default_model
            .or_else(|| env_string("GROQ_MODEL"))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let transport = Arc::new(HttpTransport::new(config)?);

        Ok(GroqClient {
            transport,
            default_model,
            unknown_tool_policy: self.unknown_tool_policy,
        })
    }
}

fn env_string(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.trim().parse::<T>().ok())
}
