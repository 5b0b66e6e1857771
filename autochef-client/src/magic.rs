//! Auto-detection endpoint

use autochef_core::domain::detection::DetectionResult;
use autochef_core::dto::magic::{MagicRequest, MagicResponse};
use tracing::debug;

use crate::ChefClient;
use crate::error::{ClientError, Result};

impl ChefClient {
    /// Ask the service for likely decoding recipes
    ///
    /// # Arguments
    /// * `input` - The raw encoded input; must not be empty
    ///
    /// # Returns
    /// Detected recipes ranked best first. An empty result is not an error.
    pub async fn magic(&self, input: &str) -> Result<DetectionResult> {
        if input.is_empty() {
            return Err(ClientError::InvalidRequest(
                "input cannot be empty".to_string(),
            ));
        }

        debug!(
            "POST /magic ({} bytes, depth {})",
            input.len(),
            self.magic_args.depth
        );

        let response = self
            .post("/magic")
            .json(&MagicRequest {
                input: input.to_string(),
                args: self.magic_args.clone(),
            })
            .send()
            .await?;

        let body: MagicResponse = self.handle_response(response).await?;
        debug!("Magic returned {} candidate(s)", body.value.len());

        Ok(body.into())
    }
}
