use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::{Method, Proxy, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

use super::{sse, ChatTransport, TransportError};
use crate::error::{Error, ErrorContext};
use crate::error_code;
use crate::request::ChatCompletionRequest;
use crate::types::response::{ChatCompletionChunk, ChatCompletionResponse, ModelList};
use crate::{BoxStream, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/";

const CHAT_COMPLETIONS: &str = "chat/completions";
const MODELS: &str = "models";

/// Settings for [`HttpTransport`], already resolved from builder values and environment.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub proxy: Option<String>,
    pub pool_max_idle_per_host: usize,
}

impl HttpTransportConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(100),
            proxy: None,
            pool_max_idle_per_host: 32,
        }
    }
}

/// reqwest-backed transport for the Groq REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: HttpTransportConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "API key is required",
                ErrorContext::new()
                    .with_field_path("api_key")
                    .with_details("set GROQ_API_KEY or call GroqClientBuilder::api_key"),
            ));
        }

        let base_url = parse_base_url(&config.base_url)?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .http2_adaptive_window(true)
            .http2_keep_alive_interval(Some(Duration::from_secs(30)))
            .http2_keep_alive_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new().with_field_path("proxy"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<(RequestBuilder, String)> {
        let url = self.base_url.join(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid endpoint path `{}`: {}", path, e),
                ErrorContext::new().with_source("http_transport"),
            )
        })?;
        let request_id = uuid::Uuid::new_v4().to_string();
        let req = self
            .client
            .request(method, url)
            .bearer_auth(&self.api_key)
            // Correlation id; Groq ignores it but callers can match it in logs.
            .header("x-request-id", &request_id);
        Ok((req, request_id))
    }

    async fn dispatch(&self, req: RequestBuilder, path: &str, request_id: &str) -> Result<Response> {
        let started = Instant::now();
        let response = req.send().await.map_err(|e| {
            info!(
                path,
                request_id,
                duration_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "groq request failed to send"
            );
            TransportError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (kind, message) = error_code::classify(status.as_u16(), &body);
        info!(
            path,
            request_id,
            status = status.as_u16(),
            kind = kind.name(),
            duration_ms = started.elapsed().as_millis() as u64,
            "groq request failed"
        );
        Err(Error::Remote {
            status: status.as_u16(),
            kind,
            message,
            body,
        })
    }

    /// POST a JSON body and return the raw success body.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Bytes> {
        let (req, request_id) = self.request(Method::POST, path)?;
        let response = self.dispatch(req.json(body), path, &request_id).await?;
        Ok(response.bytes().await.map_err(TransportError::from)?)
    }

    /// POST a multipart form and return the raw success body.
    pub async fn post_multipart(&self, path: &str, form: reqwest::multipart::Form) -> Result<Bytes> {
        let (req, request_id) = self.request(Method::POST, path)?;
        let response = self.dispatch(req.multipart(form), path, &request_id).await?;
        Ok(response.bytes().await.map_err(TransportError::from)?)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let (req, request_id) = self.request(Method::GET, path)?;
        let response = self.dispatch(req, path, &request_id).await?;
        let bytes = response.bytes().await.map_err(TransportError::from)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// `GET models`
    pub async fn list_models(&self) -> Result<ModelList> {
        self.get_json(MODELS).await
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion"
        );
        let bytes = self.post_json(CHAT_COMPLETIONS, request).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn stream_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<BoxStream<'static, ChatCompletionChunk>> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "opening chat completion stream"
        );
        let (req, request_id) = self.request(Method::POST, CHAT_COMPLETIONS)?;
        let req = req.header("accept", "text/event-stream").json(request);
        let response = self.dispatch(req, CHAT_COMPLETIONS, &request_id).await?;

        let bytes = response
            .bytes_stream()
            .map_err(|e| Error::Transport(TransportError::Http(e)));
        Ok(sse::decode_sse(Box::pin(bytes)))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    // `Url::join` drops the last segment unless the base ends with a slash.
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    let url = Url::parse(&normalized).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid base URL `{}`: {}", raw, e),
            ErrorContext::new().with_field_path("base_url"),
        )
    })?;
    if url.cannot_be_a_base() {
        return Err(Error::configuration_with_context(
            format!("Invalid base URL `{}`", raw),
            ErrorContext::new().with_field_path("base_url"),
        ));
    }
    Ok(url)
}
