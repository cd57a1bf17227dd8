//! HTTP utilities shared by all provider adapters.

use crate::error::{Error, Result};
use reqwest::{Client, Method};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// A completed transport round trip: status, reason phrase, and the raw
/// UTF-8 body. Whether the body is worth decoding is the caller's decision.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert a non-2xx response into a transport error. The body is not
    /// decoded: transport errors short-circuit JSON handling.
    pub fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            tracing::error!(
                "API error: {} {} - {}",
                self.status,
                self.reason,
                sanitize_for_log(&self.body)
            );
            Err(Error::Transport {
                status: self.status,
                reason: self.reason,
            })
        }
    }

    /// Decode the body as JSON, keeping the raw body in the error on failure.
    pub fn decode_json(&self) -> Result<Value> {
        serde_json::from_str(&self.body).map_err(|source| Error::Decode {
            body: self.body.clone(),
            source,
        })
    }
}

/// HTTP client wrapper shared by every adapter
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("apibridge/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Perform one request/response round trip.
    ///
    /// `form_body` is a pre-encoded `application/x-www-form-urlencoded`
    /// string; GET requests never carry one.
    pub async fn fetch(
        &self,
        method: Method,
        url: &str,
        form_body: Option<String>,
    ) -> Result<HttpResponse> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url);

        if let Some(body) = form_body {
            request = request
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let reason = status
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();
        let body = response.text().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }

    /// Fetch with custom headers (used by signed requests).
    pub async fn fetch_with_headers(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
        form_body: Option<String>,
    ) -> Result<HttpResponse> {
        tracing::debug!("{} {} ({} headers)", method, url, headers.len());

        let mut request = self.client.request(method, url);

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(body) = form_body {
            request = request
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = request.send().await?;

        let status = response.status();
        let reason = status
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();
        let body = response.text().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let logged = sanitize_for_log(&body);
        assert!(logged.contains("truncated"));
        assert!(logged.contains("500 bytes"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        let logged = sanitize_for_log("ok\x1b[31m\nline");
        assert_eq!(logged, "ok[31mline");
    }

    #[test]
    fn test_ensure_success_passes_2xx() {
        let resp = HttpResponse {
            status: 204,
            reason: "No Content".into(),
            body: String::new(),
        };
        assert!(resp.ensure_success().is_ok());
    }

    #[test]
    fn test_ensure_success_maps_status_and_reason() {
        let resp = HttpResponse {
            status: 404,
            reason: "Not Found".into(),
            body: "{\"ignored\": true}".into(),
        };
        match resp.ensure_success() {
            Err(Error::Transport { status, reason }) => {
                assert_eq!(status, 404);
                assert_eq!(reason, "Not Found");
            }
            other => panic!("expected transport error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decode_json_keeps_raw_body_on_failure() {
        let resp = HttpResponse {
            status: 200,
            reason: "OK".into(),
            body: "not json".into(),
        };
        match resp.decode_json() {
            Err(Error::Decode { body, .. }) => assert_eq!(body, "not json"),
            other => panic!("expected decode error, got {:?}", other),
        }
    }
}
