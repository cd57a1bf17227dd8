//! Foursquare authentication using OAuth2.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::params;
use reqwest::Method;
use serde_json::Value;

use super::Redirect;

/// Consent page users are redirected to. Foursquare's `authenticate`
/// endpoint skips the re-approval prompt for returning users; the plain
/// `authorize` endpoint does not work for this flow.
pub const OAUTH_AUTHENTICATE_URL: &str = "https://foursquare.com/oauth2/authenticate";
/// Explicit re-approval variant of the consent page
pub const OAUTH_AUTHORIZE_URL: &str = "https://foursquare.com/oauth2/authorize";
/// Endpoint exchanging an authorization code for an access token
pub const OAUTH_ACCESS_TOKEN_URL: &str = "https://foursquare.com/oauth2/access_token";
/// API base for authenticated requests
pub const BASE_URL: &str = "https://api.foursquare.com/v2";

/// Foursquare API adapter.
///
/// See <https://developer.foursquare.com/docs/> for the API surface.
#[derive(Clone)]
pub struct Foursquare {
    client_id: String,
    client_secret: String,
    http: HttpClient,
    authenticate_url: String,
    access_token_url: String,
    base_url: String,
}

impl Foursquare {
    /// Create an adapter with the application's OAuth credentials.
    pub fn new(client_id: &str, client_secret: &str, http: HttpClient) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            http,
            authenticate_url: OAUTH_AUTHENTICATE_URL.to_string(),
            access_token_url: OAUTH_ACCESS_TOKEN_URL.to_string(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Rebase the OAuth endpoints and the API base onto other hosts, e.g. a
    /// local test server. Foursquare serves OAuth and API from different
    /// domains, so both are taken explicitly.
    pub fn with_base_urls(mut self, oauth_base: &str, api_base: &str) -> Self {
        let oauth_base = oauth_base.trim_end_matches('/');
        self.authenticate_url = format!("{}/oauth2/authenticate", oauth_base);
        self.access_token_url = format!("{}/oauth2/access_token", oauth_base);
        self.base_url = api_base.trim_end_matches('/').to_string();
        self
    }

    /// The URL of the provider's consent page for this application.
    pub fn authorize_url(&self, redirect_uri: &str, extra: &[(&str, &str)]) -> String {
        let mut pairs = vec![
            ("redirect_uri".to_string(), redirect_uri.to_string()),
            ("client_id".to_string(), self.client_id.clone()),
            ("response_type".to_string(), "code".to_string()),
        ];
        pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        params::url_concat(&self.authenticate_url, &pairs)
    }

    /// Redirect the user to obtain OAuth authorization for this service.
    pub fn authorize_redirect(
        &self,
        redirect: &dyn Redirect,
        redirect_uri: &str,
        extra: &[(&str, &str)],
    ) {
        redirect.redirect(&self.authorize_url(redirect_uri, extra));
    }

    /// Handle the login callback: exchange the code for an access token,
    /// fetch the user's profile from `/users/self`, and return it with
    /// snake_case name fields and the `access_token` overlaid.
    pub async fn authenticated_user(&self, redirect_uri: &str, code: &str) -> Result<Value> {
        let pairs = vec![
            ("redirect_uri".to_string(), redirect_uri.to_string()),
            ("code".to_string(), code.to_string()),
            ("client_id".to_string(), self.client_id.clone()),
            ("client_secret".to_string(), self.client_secret.clone()),
            ("grant_type".to_string(), "authorization_code".to_string()),
        ];

        let url = params::url_concat(&self.access_token_url, &pairs);
        let response = self.http.fetch(Method::GET, &url, None).await?;

        if !response.is_success() {
            tracing::warn!(
                "Foursquare auth error: {} {}",
                response.status,
                response.reason
            );
            return Err(Error::Transport {
                status: response.status,
                reason: response.reason,
            });
        }

        let session = response.decode_json()?;
        let access_token = session
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Api {
                kind: "auth".to_string(),
                message: "token response carried no access_token".to_string(),
            })?
            .to_string();

        let mut user = self
            .request("/users/self", Some(access_token.as_str()), &[], None)
            .await?;

        if let Value::Object(ref mut map) = user {
            let first_name = map.get("firstName").cloned().unwrap_or(Value::Null);
            let last_name = map.get("lastName").cloned().unwrap_or(Value::Null);
            let home_city = map.get("homeCity").cloned().unwrap_or(Value::Null);

            map.insert("first_name".to_string(), first_name);
            map.insert("last_name".to_string(), last_name);
            map.insert("home_city".to_string(), home_city);
            map.insert("access_token".to_string(), Value::String(access_token));
        }

        Ok(user)
    }

    /// Fetch the given relative API path.
    ///
    /// A token is sent as both `access_token` and `oauth_token` — endpoints
    /// disagree on which name they read. `post_args` turns the request into
    /// a form-encoded POST.
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
            pairs.push(("oauth_token".to_string(), token.to_string()));
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
            // Foursquare error bodies carry detail under `meta`.
            if let Ok(body) = response.decode_json() {
                tracing::warn!(
                    "Foursquare error ({} {}): detail: {}, message: {}, URL: {}",
                    response.status,
                    response.reason,
                    body["meta"]["errorDetail"],
                    body["meta"]["errorMessage"],
                    url
                );
            }
            return Err(Error::Transport {
                status: response.status,
                reason: response.reason,
            });
        }

        response.decode_json()
    }
}
