//! Integration tests for the OAuth adapters using wiremock.
//!
//! Each test mocks the provider's OAuth and API endpoints and drives an
//! adapter through a full flow: token exchange, profile fetch, and the
//! session fields the adapters promise to merge in.

use apibridge::auth::{BearerSigner, Facebook, Foursquare, ResponseFormat, Twitter};
use apibridge::http::HttpClient;
use apibridge::Error;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod facebook_tests {
    use super::*;

    fn adapter(server: &MockServer) -> Facebook {
        Facebook::new("app_id", "app_secret", HttpClient::new().unwrap())
            .with_base_url(&server.uri())
    }

    /// Test the full login callback: code -> token -> profile -> session
    #[tokio::test]
    async fn test_authenticated_user_merges_session() {
        let server = MockServer::start().await;

        // Facebook's token endpoint answers form-encoded, not JSON.
        Mock::given(method("GET"))
            .and(path("/oauth/access_token"))
            .and(query_param("code", "auth-code"))
            .and(query_param("client_id", "app_id"))
            .and(query_param("client_secret", "app_secret"))
            .and(query_param("redirect_uri", "/auth/facebookgraph/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("access_token=fb_tok&expires=5183999"),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/me"))
            .and(query_param("access_token", "fb_tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "19292868552",
                "name": "Bret Taylor"
            })))
            .mount(&server)
            .await;

        let user = adapter(&server)
            .authenticated_user("/auth/facebookgraph/", "auth-code")
            .await
            .unwrap();

        assert_eq!(user["name"], "Bret Taylor");
        assert_eq!(user["access_token"], "fb_tok");
        assert_eq!(user["session_expires"], "5183999");
    }

    /// Test a token response without an expiry still logs the user in
    #[tokio::test]
    async fn test_missing_expiry_becomes_null() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/oauth/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("access_token=fb_tok"))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "1"})))
            .mount(&server)
            .await;

        let user = adapter(&server)
            .authenticated_user("/auth/facebookgraph/", "auth-code")
            .await
            .unwrap();

        assert_eq!(user["session_expires"], Value::Null);
    }

    /// Test a rejected code propagates as a transport error
    #[tokio::test]
    async fn test_auth_error_propagates_transport() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/oauth/access_token"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .authenticated_user("/auth/facebookgraph/", "bad-code")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport { status: 400, .. }));
    }

    /// Test post_args turn a Graph request into a form-encoded POST
    #[tokio::test]
    async fn test_request_posts_form_args() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/me/feed"))
            .and(query_param("access_token", "fb_tok"))
            .and(body_string_contains("message=I+am+posting"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "post_1"})))
            .mount(&server)
            .await;

        let entry = adapter(&server)
            .request(
                "/me/feed",
                Some("fb_tok"),
                &[],
                Some(&json!({"message": "I am posting"})),
            )
            .await
            .unwrap();

        assert_eq!(entry["id"], "post_1");
    }
}

mod foursquare_tests {
    use super::*;

    fn adapter(server: &MockServer) -> Foursquare {
        Foursquare::new("client_id", "client_secret", HttpClient::new().unwrap())
            .with_base_urls(&server.uri(), &format!("{}/v2", server.uri()))
    }

    /// Test the full login callback, including camelCase field mapping
    #[tokio::test]
    async fn test_authenticated_user_maps_profile_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/oauth2/access_token"))
            .and(query_param("grant_type", "authorization_code"))
            .and(query_param("code", "auth-code"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fsq_tok"
            })))
            .mount(&server)
            .await;

        // The token rides both parameter names on API requests.
        Mock::given(method("GET"))
            .and(path("/v2/users/self"))
            .and(query_param("access_token", "fsq_tok"))
            .and(query_param("oauth_token", "fsq_tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "homeCity": "London"
            })))
            .mount(&server)
            .await;

        let user = adapter(&server)
            .authenticated_user("/auth/foursquare/connect", "auth-code")
            .await
            .unwrap();

        assert_eq!(user["first_name"], "Ada");
        assert_eq!(user["last_name"], "Lovelace");
        assert_eq!(user["home_city"], "London");
        assert_eq!(user["access_token"], "fsq_tok");
    }

    /// Test a token response without access_token is a domain error
    #[tokio::test]
    async fn test_tokenless_response_is_domain_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/oauth2/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {}})))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .authenticated_user("/auth/foursquare/connect", "auth-code")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Api { .. }));
    }

    /// Test API errors propagate as transport errors with their status
    #[tokio::test]
    async fn test_api_error_propagates_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/venues/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "meta": {"errorDetail": "Venue missing not found", "errorMessage": "Not found"}
            })))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .request("/venues/missing", Some("fsq_tok"), &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport { status: 404, .. }));
    }
}

mod twitter_tests {
    use super::*;

    fn adapter(server: &MockServer) -> Twitter {
        let domain = server
            .uri()
            .strip_prefix("http://")
            .expect("mock server is plain http")
            .to_string();

        Twitter::new(
            Arc::new(BearerSigner::new("bearer_tok")),
            HttpClient::new().unwrap(),
        )
        .with_domain(&domain)
        .insecure()
    }

    /// Test a read path: GET, signed headers, `.json` suffix, decoded body
    #[tokio::test]
    async fn test_read_call_is_signed_get() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/statuses/user_timeline.json"))
            .and(query_param("screen_name", "rustlang"))
            .and(header("Authorization", "Bearer bearer_tok"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "text": "hello"}])),
            )
            .mount(&server)
            .await;

        let timeline = adapter(&server)
            .call(
                &["statuses", "user_timeline"],
                None,
                &[("screen_name".to_string(), "rustlang".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(timeline[0]["text"], "hello");
    }

    /// Test a write action: inferred POST with a form body
    #[tokio::test]
    async fn test_write_action_is_inferred_post() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/statuses/update.json"))
            .and(body_string_contains("status=posting+from+a+test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 2})))
            .mount(&server)
            .await;

        let status = adapter(&server)
            .call(
                &["statuses", "update"],
                None,
                &[("status".to_string(), "posting from a test".to_string())],
            )
            .await
            .unwrap();

        assert_eq!(status["id"], 2);
    }

    /// Test a destroy with a trailing id still posts
    #[tokio::test]
    async fn test_destroy_with_id_posts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/statuses/destroy/1234.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1234})))
            .mount(&server)
            .await;

        let gone = adapter(&server)
            .call(&["statuses", "destroy"], Some("1234"), &[])
            .await
            .unwrap();

        assert_eq!(gone["id"], 1234);
    }

    /// Test raw format skips the suffix and returns the body verbatim
    #[tokio::test]
    async fn test_raw_format_returns_body_string() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/statuses/user_timeline"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<timeline/>"))
            .mount(&server)
            .await;

        let body = adapter(&server)
            .with_format(ResponseFormat::Raw)
            .call(&["statuses", "user_timeline"], None, &[])
            .await
            .unwrap();

        assert_eq!(body, Value::String("<timeline/>".to_string()));
    }

    /// Test transport errors carry the status through
    #[tokio::test]
    async fn test_rate_limit_propagates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/statuses/user_timeline.json"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = adapter(&server)
            .call(&["statuses", "user_timeline"], None, &[])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport { status: 429, .. }));
    }
}
