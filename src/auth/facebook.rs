//! Facebook authentication using the Graph API and OAuth2.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::params;
use reqwest::Method;
use serde_json::Value;

use super::Redirect;

/// Consent page users are redirected to
pub const OAUTH_AUTHORIZE_URL: &str = "https://graph.facebook.com/oauth/authorize";
/// Endpoint exchanging an authorization code for an access token
pub const OAUTH_ACCESS_TOKEN_URL: &str = "https://graph.facebook.com/oauth/access_token";
/// Graph API base for authenticated requests
pub const BASE_URL: &str = "https://graph.facebook.com";

/// Facebook Graph API adapter.
///
/// Call [`authorize_redirect`](Self::authorize_redirect) to start the login,
/// then [`authenticated_user`](Self::authenticated_user) from the handler
/// registered as the callback URL to finish it.
#[derive(Clone)]
pub struct Facebook {
    client_id: String,
    client_secret: String,
    http: HttpClient,
    authorize_url: String,
    access_token_url: String,
    base_url: String,
}

impl Facebook {
    /// Create an adapter with the application's OAuth credentials.
    pub fn new(client_id: &str, client_secret: &str, http: HttpClient) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            http,
            authorize_url: OAUTH_AUTHORIZE_URL.to_string(),
            access_token_url: OAUTH_ACCESS_TOKEN_URL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Rebase the OAuth and API endpoints, e.g. onto a local test server.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.authorize_url = format!("{}/oauth/authorize", base);
        self.access_token_url = format!("{}/oauth/access_token", base);
        self.base_url = base.to_string();
        self
    }

    /// The URL of the provider's consent page for this application.
    ///
    /// `extra` is appended verbatim; pass `scope` and friends here.
    pub fn authorize_url(&self, redirect_uri: &str, extra: &[(&str, &str)]) -> String {
        let mut pairs = vec![
            ("redirect_uri".to_string(), redirect_uri.to_string()),
            ("client_id".to_string(), self.client_id.clone()),
        ];
        pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        params::url_concat(&self.authorize_url, &pairs)
    }

    /// Redirect the user to obtain OAuth authorization for this service.
    ///
    /// Providers require the callback URL to be registered with the
    /// application; call [`authenticated_user`](Self::authenticated_user)
    /// from the handler serving that URL.
    pub fn authorize_redirect(
        &self,
        redirect: &dyn Redirect,
        redirect_uri: &str,
        extra: &[(&str, &str)],
    ) {
        redirect.redirect(&self.authorize_url(redirect_uri, extra));
    }

    /// Handle the login callback: exchange the code for an access token,
    /// fetch the user's profile, and return it with `access_token` and
    /// `session_expires` merged in.
    pub async fn authenticated_user(&self, redirect_uri: &str, code: &str) -> Result<Value> {
        let pairs = vec![
            ("redirect_uri".to_string(), redirect_uri.to_string()),
            ("code".to_string(), code.to_string()),
            ("client_id".to_string(), self.client_id.clone()),
            ("client_secret".to_string(), self.client_secret.clone()),
        ];

        let url = params::url_concat(&self.access_token_url, &pairs);
        let response = self.http.fetch(Method::GET, &url, None).await?;

        if !response.is_success() {
            tracing::warn!(
                "Facebook auth error: {} {}",
                response.status,
                response.reason
            );
            return Err(Error::Transport {
                status: response.status,
                reason: response.reason,
            });
        }

        // The token response is form-encoded, not JSON. Repeated keys can
        // occur; the last value wins.
        let fields: Vec<(String, String)> = url::form_urlencoded::parse(response.body.as_bytes())
            .into_owned()
            .collect();

        let access_token = fields
            .iter()
            .rev()
            .find(|(key, _)| key == "access_token")
            .map(|(_, value)| value.clone())
            .ok_or_else(|| Error::Api {
                kind: "auth".to_string(),
                message: "token response carried no access_token".to_string(),
            })?;

        let expires = fields
            .iter()
            .rev()
            .find(|(key, _)| key == "expires")
            .map(|(_, value)| value.clone());

        let mut user = self
            .request("/me", Some(access_token.as_str()), &[], None)
            .await?;

        if let Value::Object(ref mut map) = user {
            map.insert("access_token".to_string(), Value::String(access_token));
            map.insert(
                "session_expires".to_string(),
                expires.map(Value::String).unwrap_or(Value::Null),
            );
        }

        Ok(user)
    }

    /// Fetch the given relative API path, e.g. `"/btaylor/picture"`.
    ///
    /// Query arguments go in `args`; a `post_args` mapping turns the request
    /// into a form-encoded POST. Most paths need the `access_token` obtained
    /// through [`authenticated_user`](Self::authenticated_user).
    pub async fn request(
        &self,
        path: &str,
        access_token: Option<&str>,
        args: &[(&str, &str)],
        post_args: Option<&Value>,
    ) -> Result<Value> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        if let Some(token) = access_token {
            pairs.push(("access_token".to_string(), token.to_string()));
            pairs.extend(args.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        }

        let url = params::url_concat(&format!("{}{}", self.base_url, path), &pairs);

        let response = match post_args {
            Some(post_args) => {
                let body = params::form_encode(&params::flatten(post_args));
                self.http.fetch(Method::POST, &url, Some(body)).await?
            }
            None => self.http.fetch(Method::GET, &url, None).await?,
        };

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

        response.decode_json()
    }
}
