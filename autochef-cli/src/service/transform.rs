//! Transform service
//!
//! Runs one candidate pipeline against the original input.

use async_trait::async_trait;
use autochef_client::ChefClient;
use autochef_core::domain::pipeline::Pipeline;
use autochef_core::domain::transform::TransformResult;

/// Service trait for baking a pipeline
///
/// Implementations never fail: every problem is reported as
/// [`TransformResult::Failure`] so one bad candidate cannot stop a search.
#[async_trait]
pub trait TransformService: Send + Sync {
    async fn bake(&self, input: &str, pipeline: &Pipeline) -> TransformResult;
}

#[async_trait]
impl TransformService for ChefClient {
    async fn bake(&self, input: &str, pipeline: &Pipeline) -> TransformResult {
        ChefClient::bake(self, input, pipeline).await
    }
}
