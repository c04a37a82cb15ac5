use crate::{
    error::{AdGenError, Result},
    models::{ClaudeMessagesResponse, CohereTextResponse, TextGenerationRequest, TitanTextResponse},
};
use aws_sdk_bedrockruntime::{error::ProvideErrorMetadata, primitives::Blob, Client};
use serde_json::json;

/// Cohere Command is the default because it honors `num_generations`, which
/// lets one call return several independent candidates.
pub const DEFAULT_TEXT_MODEL: &str = "cohere.command-text-v14";

#[derive(Clone)]
pub struct TextClient {
    client: Client,
    default_model: String,
}

impl TextClient {
    pub fn new(client: Client, default_model: Option<String>) -> Self {
        Self {
            client,
            default_model: default_model.unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
        }
    }

    /// Invoke the model once and return its candidate completions in
    /// provider order. Models without native multi-candidate support return
    /// however many completions their response carries.
    pub async fn generate(&self, request: TextGenerationRequest) -> Result<Vec<String>> {
        let model_id = request
            .model_id
            .clone()
            .unwrap_or_else(|| self.default_model.clone());

        let request_payload = Self::build_request_payload(&request, &model_id)?;
        let request_json = serde_json::to_string(&request_payload)
            .map_err(|e| AdGenError::ProviderRequestFailed(e.to_string()))?;

        log::info!("Invoking text model: {}", model_id);
        log::debug!("Text generation request payload: {}", request_json);

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
                log::error!("AWS SDK text generation error: {:?}", e);
                if let Some(service_error) = e.as_service_error() {
                    AdGenError::ProviderRequestFailed(format!(
                        "{} - {}",
                        service_error.code().unwrap_or("unknown"),
                        service_error.message().unwrap_or("no message")
                    ))
                } else {
                    AdGenError::ProviderRequestFailed(e.to_string())
                }
            })?;

        let response_bytes = response.body.into_inner();
        let response_str = String::from_utf8(response_bytes)
            .map_err(|e| AdGenError::MalformedProviderResponse(e.to_string()))?;

        let candidates = Self::parse_candidates(&response_str, &model_id)?;
        if candidates.is_empty() {
            return Err(AdGenError::EmptyGenerationResult);
        }

        Ok(candidates)
    }

    fn build_request_payload(
        request: &TextGenerationRequest,
        model_id: &str,
    ) -> Result<serde_json::Value> {
        let payload = match model_id {
            id if id.starts_with("cohere.command") => json!({
                "prompt": request.prompt,
                "max_tokens": request.max_tokens.unwrap_or(512),
                "temperature": request.temperature.unwrap_or(0.7),
                "p": 0.9,
                "num_generations": request.candidate_count.unwrap_or(1)
            }),
            id if id.starts_with("amazon.titan") => json!({
                "inputText": request.prompt,
                "textGenerationConfig": {
                    "maxTokenCount": request.max_tokens.unwrap_or(512),
                    "temperature": request.temperature.unwrap_or(0.7),
                    "topP": 0.9
                }
            }),
            id if id.starts_with("anthropic.claude") => json!({
                "messages": [
                    {
                        "role": "user",
                        "content": request.prompt
                    }
                ],
                "max_tokens": request.max_tokens.unwrap_or(512),
                "temperature": request.temperature.unwrap_or(0.7),
                "anthropic_version": "bedrock-2023-05-31"
            }),
            _ => {
                return Err(AdGenError::ConfigError(format!(
                    "Unsupported text model: {}",
                    model_id
                )))
            }
        };

        Ok(payload)
    }

    fn parse_candidates(response_str: &str, model_id: &str) -> Result<Vec<String>> {
        let candidates = match model_id {
            id if id.starts_with("cohere.command") => {
                let parsed: CohereTextResponse = serde_json::from_str(response_str)
                    .map_err(|e| AdGenError::MalformedProviderResponse(e.to_string()))?;
                parsed.generations.into_iter().map(|g| g.text).collect()
            }
            id if id.starts_with("amazon.titan") => {
                let parsed: TitanTextResponse = serde_json::from_str(response_str)
                    .map_err(|e| AdGenError::MalformedProviderResponse(e.to_string()))?;
                parsed.results.into_iter().map(|r| r.output_text).collect()
            }
            id if id.starts_with("anthropic.claude") => {
                let parsed: ClaudeMessagesResponse = serde_json::from_str(response_str)
                    .map_err(|e| AdGenError::MalformedProviderResponse(e.to_string()))?;
                parsed
                    .content
                    .into_iter()
                    .filter(|block| block.block_type == "text")
                    .filter_map(|block| block.text)
                    .collect()
            }
            _ => {
                return Err(AdGenError::ConfigError(format!(
                    "Unsupported text model: {}",
                    model_id
                )))
            }
        };

        Ok(candidates)
    }
}
