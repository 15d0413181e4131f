//! HTTP plumbing shared by the catalog clients.
//!
//! Every client maps transport failures and status codes the same way, so the
//! mapping lives here instead of being repeated in each `client.rs`.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::domain::CatalogError;

/// Client identifier sent to every provider
pub const USER_AGENT: &str = concat!("VinylVault/", env!("CARGO_PKG_VERSION"));

/// Build a gzip-enabled client with a bounded request timeout
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, CatalogError> {
    reqwest::Client::builder()
        .gzip(true)
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| CatalogError::Client(e.to_string()))
}

/// Convert a transport error (connect failure, timeout, ...) into a catalog error
pub fn network_error(error: reqwest::Error) -> CatalogError {
    if error.is_timeout() {
        CatalogError::Network(format!("request timed out: {error}"))
    } else {
        CatalogError::Network(error.to_string())
    }
}

/// Check the status and decode the JSON body.
///
/// `resource` names what was requested, for `NotFound` messages.
pub async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    resource: &str,
) -> Result<T, CatalogError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(status, resource, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Map a non-success status to a catalog error
pub fn status_error(status: StatusCode, resource: &str, body: &str) -> CatalogError {
    match status {
        StatusCode::NOT_FOUND => CatalogError::NotFound(resource.to_string()),
        StatusCode::TOO_MANY_REQUESTS => CatalogError::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CatalogError::Unauthorized,
        _ => CatalogError::Api {
            status: status.as_u16(),
            message: error_message(status, body),
        },
    }
}

/// Pull a readable message out of an error body.
///
/// Discogs uses `{"message": ...}`, MusicBrainz `{"error": ...}`.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    parsed
        .as_ref()
        .and_then(|v| v.get("message").or_else(|| v.get("error")))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            let snippet: String = body.chars().take(200).collect();
            if snippet.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            } else {
                snippet
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("VinylVault/"));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "release 249504", ""),
            CatalogError::NotFound(ref what) if what == "release 249504"
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "search", ""),
            CatalogError::RateLimited
        ));
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "search", ""),
            CatalogError::Unauthorized
        ));
    }

    #[test]
    fn test_error_message_from_body() {
        let err = status_error(
            StatusCode::BAD_GATEWAY,
            "search",
            r#"{"message": "Upstream hiccup"}"#,
        );
        assert!(matches!(
            err,
            CatalogError::Api { status: 502, ref message } if message == "Upstream hiccup"
        ));

        let err = status_error(StatusCode::SERVICE_UNAVAILABLE, "search", r#"{"error": "busy"}"#);
        assert!(err.to_string().contains("busy"));

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "search", "");
        assert!(err.to_string().contains("Internal Server Error"));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client(USER_AGENT, Duration::from_secs(5)).is_ok());
    }
}
