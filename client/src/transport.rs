//! Executes `HttpRequest`s produced by the core.
//!
//! [`Transport`] is the seam between the I/O-free core and the network.
//! [`UreqTransport`] is the real implementation; tests substitute scripted
//! ones. No timeouts are imposed here beyond whatever the agent applies.

use async_trait::async_trait;
use crud_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the round-trip. Any status code is a successful response;
    /// only failures to get a response at all are errors.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking `ureq` agent driven from `spawn_blocking`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || send(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(method = request.method.as_str(), url = %request.path, "sending request");
    let HttpRequest {
        method,
        path,
        headers,
        body,
    } = request;

    let result = match (method, body) {
        (HttpMethod::Get, _) => with_headers(agent.get(&path), &headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&path), &headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(&path), &headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(&path), &headers).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(&path), &headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => with_headers(agent.put(&path), &headers).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
