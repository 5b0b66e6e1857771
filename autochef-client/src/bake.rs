//! Bake endpoint

use autochef_core::domain::pipeline::Pipeline;
use autochef_core::domain::transform::{BakeOutput, TransformResult};
use autochef_core::dto::bake::BakeRequest;
use tracing::{debug, warn};

use crate::ChefClient;
use crate::error::{ClientError, Result};

impl ChefClient {
    /// Run `pipeline` against `input` and return the parsed output
    ///
    /// The service applies the whole pipeline from scratch, so `input` is
    /// always the original raw string. Empty pipelines are refused without
    /// sending anything.
    pub async fn try_bake(&self, input: &str, pipeline: &Pipeline) -> Result<BakeOutput> {
        if pipeline.is_empty() {
            return Err(ClientError::InvalidRequest(
                "recipe cannot be empty".to_string(),
            ));
        }

        debug!(
            "POST /bake ({} operation(s): {})",
            pipeline.len(),
            pipeline.summary()
        );

        let response = self
            .post("/bake")
            .json(&BakeRequest {
                input: input.to_string(),
                recipe: pipeline.clone(),
            })
            .send()
            .await?;

        let body = self.handle_text_response(response).await?;

        BakeOutput::from_body(body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse bake response: {}", e)))
    }

    /// Like [`ChefClient::try_bake`], with every error folded into a
    /// [`TransformResult::Failure`]
    pub async fn bake(&self, input: &str, pipeline: &Pipeline) -> TransformResult {
        match self.try_bake(input, pipeline).await {
            Ok(output) => TransformResult::Success(output),
            Err(e) => {
                if e.is_server_error() {
                    warn!("Service failed on {}: {}", pipeline.summary(), e);
                } else if e.is_client_error() {
                    debug!("Service rejected {}: {}", pipeline.summary(), e);
                }
                let status = e.status();
                let message = match e {
                    ClientError::ApiError { message, .. } => message,
                    other => other.to_string(),
                };
                TransformResult::failure(status, message)
            }
        }
    }
}
