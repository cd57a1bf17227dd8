//! Stripe REST API client
//!
//! A fluent path builder over Stripe's v1 API: chain allow-listed resource
//! names and identifiers, then dispatch with a verb. Responses decode to
//! [`serde_json::Value`]; provider-reported errors surface as
//! [`Error::Api`](crate::Error::Api).
//!
//! # Module Structure
//!
//! - [`resources`] - Fixed allow-list of resource names
//! - [`blocking`] - Synchronous variant of the client
//!
//! # Example
//!
//! ```ignore
//! use apibridge::{http::HttpClient, stripe::Stripe};
//!
//! async fn example() -> apibridge::Result<()> {
//!     let mut stripe = Stripe::new("sk_test_key", HttpClient::new()?);
//!     let subscription = stripe
//!         .resource("customers")?
//!         .id("cus_xyz")
//!         .resource("subscription")?
//!         .get(None)
//!         .await?;
//!     println!("{subscription}");
//!     Ok(())
//! }
//! ```

pub mod blocking;
mod client;
pub mod resources;

pub use client::{Stripe, API_HOSTNAME, API_VERSION};
pub use resources::{is_resource, RESOURCES};
