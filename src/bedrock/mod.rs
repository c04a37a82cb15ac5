pub mod image_client;
pub mod text_client;
pub mod traits;

use crate::{
    config::BedrockConfig,
    error::Result,
    models::{ImageGenerationRequest, ImageGenerationResponse, TextGenerationRequest},
};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;

pub use image_client::ImageClient;
pub use text_client::TextClient;
pub use traits::GenerationProvider;

#[derive(Clone)]
pub struct BedrockClient {
    text_client: TextClient,
    image_client: ImageClient,
}

impl BedrockClient {
    pub async fn new(bedrock_config: BedrockConfig) -> Result<Self> {
        let aws_config = if let (Some(access_key), Some(secret_key)) =
            (&bedrock_config.access_key, &bedrock_config.secret_key)
        {
            aws_config::from_env()
                .credentials_provider(aws_sdk_bedrockruntime::config::Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "adforge-client",
                ))
                .region(aws_sdk_bedrockruntime::config::Region::new(
                    bedrock_config
                        .region
                        .clone()
                        .unwrap_or_else(|| "us-east-1".to_string()),
                ))
                .load()
                .await
        } else {
            aws_config::load_from_env().await
        };

        let client = Client::new(&aws_config);

        Ok(Self {
            text_client: TextClient::new(client.clone(), bedrock_config.text_model_id),
            image_client: ImageClient::new(client, bedrock_config.image_model_id),
        })
    }

    pub fn text(&self) -> &TextClient {
        &self.text_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[async_trait]
impl GenerationProvider for BedrockClient {
    async fn complete_chat(&self, request: TextGenerationRequest) -> Result<Vec<String>> {
        self.text_client.generate(request).await
    }

    async fn generate_image(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse> {
        self.image_client.generate(request).await
    }
}
