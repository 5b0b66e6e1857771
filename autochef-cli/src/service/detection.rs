//! Detection service
//!
//! Produces the prefix recipe the search extends.

use async_trait::async_trait;
use autochef_client::{ChefClient, ClientError};
use autochef_core::domain::detection::DetectionResult;

/// Service trait for auto-detecting a decoding recipe
#[async_trait]
pub trait DetectionService: Send + Sync {
    /// Detects likely recipes for `input`, ranked best first
    async fn detect(&self, input: &str) -> Result<DetectionResult, ClientError>;
}

#[async_trait]
impl DetectionService for ChefClient {
    async fn detect(&self, input: &str) -> Result<DetectionResult, ClientError> {
        self.magic(input).await
    }
}
