//! Thin integration adapters for OAuth2 login flows and REST API calls
//! against four third-party services: Facebook, Foursquare, Twitter, and
//! Stripe. Each adapter builds URLs, performs the HTTP round trip through a
//! shared [`HttpClient`], and decodes JSON responses into
//! [`serde_json::Value`] mappings.
//!
//! # Module Structure
//!
//! - [`auth`] - OAuth login adapters (Facebook, Foursquare, Twitter)
//! - [`stripe`] - Stripe client with a fluent resource-path builder
//! - [`http`] - Shared HTTP client wrapper and response type
//! - [`params`] - Nested-parameter flattening and form/query encoding
//! - [`config`] - Provider credentials from env vars and a config file
//! - [`error`] - Error taxonomy shared by all adapters
//!
//! # Example
//!
//! ```ignore
//! use apibridge::{http::HttpClient, stripe::Stripe, Config};
//!
//! async fn example() -> apibridge::Result<()> {
//!     let config = Config::load();
//!     let api_key = config.effective_stripe_api_key().expect("no Stripe key");
//!
//!     let mut stripe = Stripe::new(&api_key, HttpClient::new()?);
//!     let plans = stripe.resource("plans")?.get(None).await?;
//!     println!("{plans}");
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod stripe;

pub use config::Config;
pub use error::{Error, Result};
pub use http::HttpClient;
