//! JSON-over-HTTP transport shared by the adapters.
//!
//! Only transport lives here: encoding a request body, sending it, mapping
//! non-2xx statuses and decoding failures into [`ProviderError`]. The JSON
//! shapes themselves belong to each adapter.

use reqwest::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ProviderError;

/// Encode `body` as JSON, send it and return the raw response text.
///
/// A non-2xx status becomes [`ProviderError::Backend`] carrying the body
/// verbatim.
pub async fn send_json<T: Serialize>(
    provider: &'static str,
    request: RequestBuilder,
    body: &T,
) -> Result<String, ProviderError> {
    let payload = serde_json::to_vec(body).map_err(ProviderError::Encoding)?;
    debug!("Sending {} byte request to {}", payload.len(), provider);

    let response = request
        .header(CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
        .map_err(|source| transport(provider, source))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|source| transport(provider, source))?;

    if !status.is_success() {
        return Err(ProviderError::Backend {
            provider,
            status: status.as_u16(),
            body: text,
        });
    }

    debug!("{} responded with status {} ({} bytes)", provider, status, text.len());
    Ok(text)
}

/// URLs are stripped: some backends carry the API key in the query string.
fn transport(provider: &'static str, source: reqwest::Error) -> ProviderError {
    ProviderError::Transport {
        provider,
        source: source.without_url(),
    }
}

/// Decode a JSON response body.
pub fn decode<T: DeserializeOwned>(provider: &'static str, body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Decoding {
        provider,
        message: e.to_string(),
    })
}
