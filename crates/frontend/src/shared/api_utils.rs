//! Browser transport for async page loads
//!
//! Sends the pagination parameters form-encoded, as the query string for GET
//! and as the request body for POST.

use async_trait::async_trait;
use gloo_net::http::Request;

use crate::pagebar::{
    HttpMethod, PageBarError, Params, ResponseKind, Transport, TransportRequest,
    TransportResponse,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// `Transport` backed by `fetch` through gloo-net
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, PageBarError> {
        let encoded = encode_params(&request.params)?;

        let response = match request.method {
            HttpMethod::Get => Request::get(&with_query(&request.url, &encoded)).send().await,
            HttpMethod::Post => Request::post(&request.url)
                .header("Content-Type", FORM_CONTENT_TYPE)
                .body(encoded)
                .map_err(|e| PageBarError::Transport(format!("Failed to build request: {}", e)))?
                .send()
                .await,
        }
        .map_err(|e| PageBarError::Transport(format!("Failed to send request: {}", e)))?;

        if !response.ok() {
            return Err(PageBarError::Transport(format!(
                "Failed to load page: {}",
                response.status()
            )));
        }

        match request.kind {
            ResponseKind::Text => response.text().await.map(TransportResponse::Text),
            ResponseKind::Json => response
                .json::<serde_json::Value>()
                .await
                .map(TransportResponse::Json),
        }
        .map_err(|e| PageBarError::Transport(format!("Failed to read response: {}", e)))
    }
}

/// Form-encode the parameters in their insertion order
pub fn encode_params(params: &Params) -> Result<String, PageBarError> {
    serde_qs::to_string(params)
        .map_err(|e| PageBarError::Transport(format!("Failed to encode params: {}", e)))
}

/// Append an encoded query to `url`
pub fn with_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{}&{}", url, query)
    } else {
        format!("{}?{}", url, query)
    }
}
