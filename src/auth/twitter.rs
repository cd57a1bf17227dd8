//! Twitter API client using signed requests.
//!
//! Twitter calls happen outside any login flow, so this client is built for
//! direct API use: assemble a URL from path segments, let an injected
//! [`RequestSigner`] attach credentials, fetch, decode. The signing scheme is
//! a capability, not a baked-in choice — app-only bearer auth ships as
//! [`BearerSigner`], and user-context schemes plug in through the same trait.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::params;
use reqwest::Method;
use serde_json::Value;
use std::sync::Arc;

/// Default API domain, version segment included
pub const DEFAULT_DOMAIN: &str = "api.twitter.com/1.1";

/// Trailing path actions that imply a POST request, e.g.
/// `statuses/update` or `statuses/destroy/1234`.
pub const POST_ACTIONS: &[&str] = &[
    "create",
    "create_all",
    "destroy",
    "destroy_all",
    "new",
    "update",
    "update_with_media",
    "retweet",
    "add",
    "remove",
    "leave",
    "join",
    "report_spam",
];

/// Produces auth material for one request.
///
/// `encode_params` exists because some schemes (OAuth 1.0a) fold the
/// parameter set into the signature; the default is plain form encoding.
pub trait RequestSigner: Send + Sync {
    /// Authorization headers for the given request.
    fn headers(&self, url: &str, method: &Method, request_params: &[(String, String)])
        -> Vec<(String, String)>;

    /// Encode the request parameters, signing them if the scheme requires it.
    fn encode_params(
        &self,
        _url: &str,
        _method: &Method,
        request_params: &[(String, String)],
    ) -> String {
        params::form_encode(request_params)
    }
}

/// App-only OAuth2 bearer-token signing
pub struct BearerSigner {
    token: String,
}

impl BearerSigner {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

impl RequestSigner for BearerSigner {
    fn headers(
        &self,
        _url: &str,
        _method: &Method,
        _request_params: &[(String, String)],
    ) -> Vec<(String, String)> {
        vec![("Authorization".to_string(), format!("Bearer {}", self.token))]
    }
}

/// How response bodies are handed back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Append `.json` to request URLs and decode bodies
    Json,
    /// No format suffix; bodies come back as raw strings
    Raw,
}

/// Twitter API client
pub struct Twitter {
    domain: String,
    secure: bool,
    format: ResponseFormat,
    signer: Arc<dyn RequestSigner>,
    http: HttpClient,
}

impl Twitter {
    /// Create a client against the default API domain over https.
    pub fn new(signer: Arc<dyn RequestSigner>, http: HttpClient) -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            secure: true,
            format: ResponseFormat::Json,
            signer,
            http,
        }
    }

    /// Point the client at another domain, e.g. a local test server.
    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = domain.trim_matches('/').to_string();
        self
    }

    /// Use plain http. Test servers rarely speak TLS.
    pub fn insecure(mut self) -> Self {
        self.secure = false;
        self
    }

    /// Select the response format.
    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }

    /// Infer the verb from the trailing path action; a trailing numeric id
    /// segment does not hide the action before it.
    fn infer_method(path_parts: &[&str], id: Option<&str>) -> Method {
        let action = if id.is_some() {
            path_parts.last()
        } else {
            path_parts
                .iter()
                .rev()
                .find(|part| !part.chars().all(|c| c.is_ascii_digit()))
        };

        match action {
            Some(action) if POST_ACTIONS.contains(action) => Method::POST,
            _ => Method::GET,
        }
    }

    /// Call an API path assembled from `path_parts` and an optional trailing
    /// id, inferring GET/POST from the path.
    ///
    /// ```ignore
    /// twitter.call(&["statuses", "user_timeline"], None, &[]).await?;
    /// twitter.call(&["statuses", "destroy"], Some("1234"), &[]).await?;
    /// ```
    pub async fn call(
        &self,
        path_parts: &[&str],
        id: Option<&str>,
        request_params: &[(String, String)],
    ) -> Result<Value> {
        let method = Self::infer_method(path_parts, id);
        self.call_with_method(method, path_parts, id, request_params)
            .await
    }

    /// Call an API path with an explicit verb, bypassing inference.
    pub async fn call_with_method(
        &self,
        method: Method,
        path_parts: &[&str],
        id: Option<&str>,
        request_params: &[(String, String)],
    ) -> Result<Value> {
        let mut segments: Vec<String> = path_parts
            .iter()
            .map(|part| urlencoding::encode(part).into_owned())
            .collect();
        if let Some(id) = id {
            segments.push(urlencoding::encode(id).into_owned());
        }

        let mut url = format!("{}://{}/{}", self.scheme(), self.domain, segments.join("/"));
        if self.format == ResponseFormat::Json {
            url.push_str(".json");
        }

        let headers = self.signer.headers(&url, &method, request_params);
        let encoded = self.signer.encode_params(&url, &method, request_params);

        let (url, body) = if method == Method::GET {
            let url = if encoded.is_empty() {
                url
            } else {
                format!("{}?{}", url, encoded)
            };
            (url, None)
        } else {
            (url, Some(encoded))
        };

        let response = self
            .http
            .fetch_with_headers(method, &url, &headers, body)
            .await?;

        if !response.is_success() {
            tracing::warn!(
                "Error response {} {} fetching {}",
                response.status,
                response.reason,
                url
            );
            return Err(Error::Transport {
                status: response.status,
                reason: response.reason,
            });
        }

        match self.format {
            ResponseFormat::Json => response.decode_json(),
            ResponseFormat::Raw => Ok(Value::String(response.body)),
        }
    }
}
