// SPDX-FileCopyrightText: 2026 LinguaHome Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP plumbing shared by the provider adapters.

use std::time::Duration;

use linguahome_core::LinguaError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Error envelope used by all three APIs: `{"error": {"message", "type"|"status"}}`.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type", alias = "status", default)]
    kind: Option<String>,
}

/// Builds a JSON client with the given auth headers and request timeout.
pub(crate) fn build_client(
    auth_headers: &[(&'static str, &str)],
    timeout: Duration,
) -> Result<reqwest::Client, LinguaError> {
    let mut headers = HeaderMap::new();
    for (name, value) in auth_headers {
        let value = HeaderValue::from_str(value)
            .map_err(|e| LinguaError::Config(format!("invalid {name} header value: {e}")))?;
        headers.insert(HeaderName::from_static(name), value);
    }
    headers.insert("content-type", HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| LinguaError::Provider {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
}

/// POSTs `body` and decodes a successful response as `Resp`.
///
/// Any non-2xx status is a provider error; nothing is retried.
pub(crate) async fn post_json<Req, Resp>(
    client: &reqwest::Client,
    url: &str,
    body: &Req,
    provider: &str,
) -> Result<Resp, LinguaError>
where
    Req: Serialize + ?Sized,
    Resp: DeserializeOwned,
{
    let response = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| LinguaError::Provider {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

    let status = response.status();
    debug!(provider, status = %status, "completion response received");

    let text = response.text().await.map_err(|e| LinguaError::Provider {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;

    if !status.is_success() {
        let message = match serde_json::from_str::<ApiErrorResponse>(&text) {
            Ok(api_err) => match api_err.error.kind {
                Some(kind) => format!("{provider} API error ({kind}): {}", api_err.error.message),
                None => format!("{provider} API error: {}", api_err.error.message),
            },
            Err(_) => format!("{provider} API returned {status}: {text}"),
        };
        return Err(LinguaError::provider(message));
    }

    serde_json::from_str(&text).map_err(|e| LinguaError::Provider {
        message: format!("failed to parse {provider} response: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Joins a base URL and a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
