//! OAuth login adapters
//!
//! Standalone clients for third-party login providers. Each adapter owns its
//! provider credentials and a shared [`HttpClient`](crate::http::HttpClient);
//! the host framework's redirect primitive is injected through the
//! [`Redirect`] trait rather than inherited from a handler base type.
//!
//! # Module Structure
//!
//! - [`facebook`] - Facebook Graph API OAuth2
//! - [`foursquare`] - Foursquare OAuth2
//! - [`twitter`] - Twitter API with signed requests
//!
//! # Example
//!
//! ```ignore
//! use apibridge::{auth::Facebook, http::HttpClient};
//!
//! async fn on_callback(code: &str) -> apibridge::Result<()> {
//!     let facebook = Facebook::new("app_id", "app_secret", HttpClient::new()?);
//!     let user = facebook.authenticated_user("/auth/facebook/", code).await?;
//!     tracing::info!("logged in: {}", user["name"]);
//!     Ok(())
//! }
//! ```

pub mod facebook;
pub mod foursquare;
pub mod twitter;

pub use facebook::Facebook;
pub use foursquare::Foursquare;
pub use twitter::{BearerSigner, RequestSigner, ResponseFormat, Twitter};

/// Redirect capability supplied by the host web framework.
///
/// `authorize_redirect` sends the user's browser to the provider's consent
/// page through this trait; any `Fn(&str)` works.
pub trait Redirect {
    fn redirect(&self, url: &str);
}

impl<F: Fn(&str)> Redirect for F {
    fn redirect(&self, url: &str) {
        self(url)
    }
}
