use crate::{
    error::Result,
    models::{ImageGenerationRequest, ImageGenerationResponse, TextGenerationRequest},
};
use async_trait::async_trait;

/// The complete outbound surface used against the generative provider:
/// one multi-candidate chat completion and one image generation. Neither
/// call is retried; failures propagate to the caller as-is.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn complete_chat(&self, request: TextGenerationRequest) -> Result<Vec<String>>;

    async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse>;
}
