//! Network transport backed by a blocking ureq agent.
//!
//! Each request runs on tokio's blocking pool, so a slow backend never stalls
//! the runtime's worker threads.

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are data for the core client to interpret.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::TransportUnavailable(e.to_string()))?
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, ApiError> {
    let HttpRequest {
        method,
        path,
        headers,
        body,
    } = request;

    let result = match (method, body) {
        (HttpMethod::Get, _) => with_headers(agent.get(&path), &headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(&path), &headers).call(),
        (HttpMethod::Post, Some(body)) => with_headers(agent.post(&path), &headers).send(body.as_bytes()),
        (HttpMethod::Post, None) => with_headers(agent.post(&path), &headers).send_empty(),
        (HttpMethod::Patch, Some(body)) => with_headers(agent.patch(&path), &headers).send(body.as_bytes()),
        (HttpMethod::Patch, None) => with_headers(agent.patch(&path), &headers).send_empty(),
    };
    let mut response = result.map_err(|e| ApiError::TransportUnavailable(e.to_string()))?;

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
        .map_err(|e| ApiError::TransportUnavailable(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
