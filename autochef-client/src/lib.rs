//! AutoChef HTTP Client
//!
//! A small, type-safe HTTP client for a CyberChef-style transformation
//! service. It covers the two endpoints the recipe search needs:
//! - `POST /magic`: auto-detect a likely decoding recipe
//! - `POST /bake`: run a recipe against an input
//!
//! # Example
//!
//! ```no_run
//! use autochef_client::ChefClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChefClient::new("http://localhost:3000");
//!
//!     let detection = client.magic("NBSWY3DP").await?;
//!     println!("Best guess: {}", detection.best().summary());
//!     Ok(())
//! }
//! ```

pub mod error;
mod bake;
mod magic;

#[cfg(test)]
mod test_server;

// Re-export commonly used types
pub use error::{ClientError, Result};

use autochef_core::dto::magic::MagicArgs;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Header carrying the API key of hosted service variants
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the transformation service
#[derive(Debug, Clone)]
pub struct ChefClient {
    /// Base URL of the service (e.g., "http://localhost:3000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Sent as `x-api-key` when set
    api_key: Option<String>,
    /// Arguments for every `/magic` call
    magic_args: MagicArgs,
}

impl ChefClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service (e.g., "http://localhost:3000")
    ///
    /// # Example
    /// ```
    /// use autochef_client::ChefClient;
    ///
    /// let client = ChefClient::new("http://localhost:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use autochef_client::ChefClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ChefClient::with_client("http://localhost:3000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            api_key: None,
            magic_args: MagicArgs::default(),
        }
    }

    /// Attach an API key, sent with every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the arguments sent to `/magic`
    pub fn with_magic_args(mut self, magic_args: MagicArgs) -> Self {
        self.magic_args = magic_args;
        self
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn magic_args(&self) -> &MagicArgs {
        &self.magic_args
    }

    /// Start a POST request to `path`, with the API key header if configured
    fn post(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self.client.post(url);
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and return the body text
    async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response.text().await?)
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let body = self.handle_text_response(response).await?;

        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
