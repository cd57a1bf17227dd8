//! Stripe client
//!
//! Builds request paths by chaining resource-name and identifier segments,
//! then dispatches the accumulated path with a verb call.

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpResponse};
use crate::params;
use reqwest::Method;
use serde_json::Value;
use std::fmt::Display;

use super::resources;

/// Stripe API hostname
pub const API_HOSTNAME: &str = "api.stripe.com";
/// Stripe API version path segment
pub const API_VERSION: &str = "v1";

/// Async Stripe client with a fluent resource-path builder.
///
/// A chain accumulates a path, a verb consumes it:
///
/// ```ignore
/// let mut stripe = Stripe::new("sk_test_key", HttpClient::new()?);
/// let plan = stripe.resource("plans")?.id("stripe-test-gold").get(None).await?;
/// ```
///
/// The accumulated path is instance state; do not interleave chains for
/// different logical requests on one instance.
pub struct Stripe {
    endpoint: String,
    http: HttpClient,
    path: Option<String>,
}

impl Stripe {
    /// Create a client. The API key is embedded in the endpoint's user-info
    /// component (`https://{key}:@api.stripe.com/v1`).
    pub fn new(api_key: &str, http: HttpClient) -> Self {
        Self {
            endpoint: format!("https://{}:@{}/{}", api_key, API_HOSTNAME, API_VERSION),
            http,
            path: None,
        }
    }

    /// Replace the endpoint base, e.g. to point at a local test server.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// The endpoint base all paths start from
    pub fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Append an allow-listed resource name to the current path.
    ///
    /// Unknown names fail here, before any request is sent.
    pub fn resource(&mut self, name: &str) -> Result<&mut Self> {
        if !resources::is_resource(name) {
            return Err(Error::UnknownResource(name.to_string()));
        }
        self.push_segment(name);
        Ok(self)
    }

    /// Append an identifier as the next path segment.
    pub fn id<T: Display>(&mut self, id: T) -> &mut Self {
        self.push_segment(&id.to_string());
        self
    }

    /// Clear the current path. Idempotent.
    pub fn reset(&mut self) {
        self.path = None;
    }

    /// The accumulated path, if a chain is in progress
    pub fn current_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn push_segment(&mut self, segment: &str) {
        let base = self.path.take().unwrap_or_else(|| self.endpoint.clone());
        self.path = Some(format!("{}/{}", base, segment));
    }

    /// GET the accumulated path. Params ride the query string.
    pub async fn get(&mut self, params: Option<&Value>) -> Result<Value> {
        self.call(Method::GET, params).await
    }

    /// POST to the accumulated path with form-encoded params.
    pub async fn post(&mut self, params: Option<&Value>) -> Result<Value> {
        self.call(Method::POST, params).await
    }

    /// DELETE the accumulated path with form-encoded params.
    pub async fn delete(&mut self, params: Option<&Value>) -> Result<Value> {
        self.call(Method::DELETE, params).await
    }

    async fn call(&mut self, method: Method, params: Option<&Value>) -> Result<Value> {
        // Take the path up front: the client must start fresh on the next
        // chain whether or not this request succeeds.
        let url = self.path.take().ok_or(Error::NoResource)?;

        let pairs = params.map(params::flatten).unwrap_or_default();

        let (url, body) = if method == Method::GET {
            (params::url_concat(&url, &pairs), None)
        } else if pairs.is_empty() {
            (url, None)
        } else {
            (url, Some(params::form_encode(&pairs)))
        };

        let response = self.http.fetch(method, &url, body).await?;
        parse_response(response)
    }
}

/// Transport result → decoded body.
///
/// Non-2xx short-circuits as a transport error without touching the body;
/// a decoded body carrying a provider `error` object becomes a domain error.
fn parse_response(response: HttpResponse) -> Result<Value> {
    let response = response.ensure_success()?;

    // Handle empty response
    if response.body.is_empty() {
        return Ok(Value::Null);
    }

    let decoded = response.decode_json()?;

    if let Some(error) = decoded.get("error").filter(|e| !e.is_null()) {
        let kind = error
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(Error::Api { kind, message });
    }

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> Stripe {
        Stripe::new("api_key", HttpClient::default())
    }

    #[test]
    fn test_endpoint_embeds_api_key() {
        assert_eq!(
            client().api_endpoint(),
            "https://api_key:@api.stripe.com/v1"
        );
    }

    #[test]
    fn test_unknown_resource_fails_without_touching_path() {
        let mut stripe = client();
        let err = stripe.resource("refunds").map(|_| ()).unwrap_err();
        assert!(matches!(err, Error::UnknownResource(name) if name == "refunds"));
        assert_eq!(stripe.current_path(), None);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut stripe = client();
        stripe.resource("plans").unwrap();
        stripe.reset();
        stripe.reset();
        assert_eq!(stripe.current_path(), None);
    }

    #[test]
    fn test_parse_response_domain_error() {
        let response = HttpResponse {
            status: 200,
            reason: "OK".into(),
            body: json!({
                "error": {"type": "invalid_request", "message": "no such plan"}
            })
            .to_string(),
        };
        match parse_response(response) {
            Err(Error::Api { kind, message }) => {
                assert_eq!(kind, "invalid_request");
                assert_eq!(message, "no such plan");
            }
            other => panic!("expected domain error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_null_error_field_is_success() {
        let response = HttpResponse {
            status: 200,
            reason: "OK".into(),
            body: json!({"id": "plan_1", "error": null}).to_string(),
        };
        let decoded = parse_response(response).unwrap();
        assert_eq!(decoded["id"], "plan_1");
    }

    #[test]
    fn test_parse_response_empty_body_is_null() {
        let response = HttpResponse {
            status: 200,
            reason: "OK".into(),
            body: String::new(),
        };
        assert_eq!(parse_response(response).unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_response_transport_error_skips_decoding() {
        let response = HttpResponse {
            status: 401,
            reason: "Unauthorized".into(),
            body: "this is not json and must never be decoded".into(),
        };
        match parse_response(response) {
            Err(Error::Transport { status, .. }) => assert_eq!(status, 401),
            other => panic!("expected transport error, got {:?}", other),
        }
    }
}
