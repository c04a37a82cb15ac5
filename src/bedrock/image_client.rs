use crate::{
    error::{AdGenError, Result},
    models::{ImageGenerationRequest, ImageGenerationResponse, TitanImageResponse},
};
use aws_sdk_bedrockruntime::{error::ProvideErrorMetadata, primitives::Blob, Client};
use serde_json::json;

pub const DEFAULT_IMAGE_MODEL: &str = "amazon.titan-image-generator-v1";

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    default_model: String,
}

impl ImageClient {
    pub fn new(client: Client, default_model: Option<String>) -> Self {
        Self {
            client,
            default_model: default_model.unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        }
    }

    pub async fn generate(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        let model_id = request
            .model_id
            .clone()
            .unwrap_or_else(|| self.default_model.clone());

        let request_payload = match model_id.as_str() {
            id if id.starts_with("amazon.titan-image") => json!({
                "taskType": "TEXT_IMAGE",
                "textToImageParams": {
                    "text": request.prompt
                },
                "imageGenerationConfig": {
                    "numberOfImages": request.num_images.unwrap_or(1),
                    "width": request.width.unwrap_or(1024),
                    "height": request.height.unwrap_or(1024),
                    "quality": "standard",
                    "cfgScale": 8.0
                }
            }),
            _ => {
                return Err(AdGenError::ConfigError(format!(
                    "Unsupported image model: {}",
                    model_id
                )))
            }
        };

        let request_json = serde_json::to_string(&request_payload)
            .map_err(|e| AdGenError::ProviderRequestFailed(e.to_string()))?;

        log::info!("Generating image with model: {}", model_id);

        let response = self
            .client
            .invoke_model()
            .model_id(&model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(request_json.into_bytes()))
            .send()
            .await
            .map_err(|e| {
                log::error!("AWS SDK image generation error: {:?}", e);
                if let Some(service_error) = e.as_service_error() {
                    let code = service_error.code().unwrap_or("unknown");
                    let message = service_error.message().unwrap_or("no message");
                    // Titan reports content-policy refusals as validation
                    // errors naming its content filters. Callers need to tell
                    // "the provider said no" apart from transport failures.
                    if message.contains("content filter") || message.contains("blocked") {
                        AdGenError::ImageGenerationRejected(message.to_string())
                    } else {
                        AdGenError::ProviderRequestFailed(format!("{} - {}", code, message))
                    }
                } else {
                    AdGenError::ProviderRequestFailed(e.to_string())
                }
            })?;

        let response_bytes = response.body.into_inner();
        let response_str = String::from_utf8(response_bytes)
            .map_err(|e| AdGenError::MalformedProviderResponse(e.to_string()))?;

        let titan_response: TitanImageResponse = serde_json::from_str(&response_str)
            .map_err(|e| AdGenError::MalformedProviderResponse(e.to_string()))?;

        match titan_response.images.into_iter().next() {
            Some(image_data) => Ok(ImageGenerationResponse {
                image_data,
                model: model_id,
            }),
            None => Err(AdGenError::EmptyGenerationResult),
        }
    }
}
