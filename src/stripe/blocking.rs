//! Blocking Stripe client.
//!
//! Same chaining surface as the async client; every verb suspends the
//! calling thread on a private current-thread runtime. Pick one mode at
//! construction — a client is either blocking or async, never both.

use crate::error::Result;
use crate::http::HttpClient;
use serde_json::Value;
use std::fmt::Display;

/// Blocking-mode Stripe client
pub struct Stripe {
    inner: super::Stripe,
    runtime: tokio::runtime::Runtime,
}

impl Stripe {
    /// Create a blocking client. Fails only if the runtime cannot be built.
    pub fn new(api_key: &str, http: HttpClient) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            inner: super::Stripe::new(api_key, http),
            runtime,
        })
    }

    /// Replace the endpoint base, e.g. to point at a local test server.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.inner = self.inner.with_endpoint(endpoint);
        self
    }

    /// The endpoint base all paths start from
    pub fn api_endpoint(&self) -> &str {
        self.inner.api_endpoint()
    }

    /// Append an allow-listed resource name to the current path.
    pub fn resource(&mut self, name: &str) -> Result<&mut Self> {
        self.inner.resource(name)?;
        Ok(self)
    }

    /// Append an identifier as the next path segment.
    pub fn id<T: Display>(&mut self, id: T) -> &mut Self {
        self.inner.id(id);
        self
    }

    /// Clear the current path. Idempotent.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// The accumulated path, if a chain is in progress
    pub fn current_path(&self) -> Option<&str> {
        self.inner.current_path()
    }

    /// GET the accumulated path, blocking until the response arrives.
    pub fn get(&mut self, params: Option<&Value>) -> Result<Value> {
        self.runtime.block_on(self.inner.get(params))
    }

    /// POST to the accumulated path, blocking until the response arrives.
    pub fn post(&mut self, params: Option<&Value>) -> Result<Value> {
        self.runtime.block_on(self.inner.post(params))
    }

    /// DELETE the accumulated path, blocking until the response arrives.
    pub fn delete(&mut self, params: Option<&Value>) -> Result<Value> {
        self.runtime.block_on(self.inner.delete(params))
    }
}
