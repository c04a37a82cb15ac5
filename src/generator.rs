use std::sync::Arc;

use base64::Engine;

use crate::{
    bedrock::GenerationProvider,
    error::{AdGenError, Result},
    models::{AdFormat, BrandAnalysis, ImageGenerationRequest, TextGenerationRequest},
};

/// Every text-ad call asks for this many independent candidates in one
/// request. Variation rounds keep only the first; the surplus is discarded
/// deliberately to match the established provider contract.
pub const CANDIDATES_PER_CALL: u32 = 3;

const TEXT_TEMPERATURE: f32 = 0.7;
const ANALYSIS_TEMPERATURE: f32 = 0.3;
const DRAFT_IMAGE_SIZE: u32 = 512;

/// Translates the three domain operations (brand analysis, text ad, image)
/// into provider prompts and parses provider output back into domain values.
/// Stateless apart from the provider handle; no retries.
#[derive(Clone)]
pub struct AdGenerator {
    provider: Arc<dyn GenerationProvider>,
}

impl AdGenerator {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self { provider }
    }

    /// Ask the model to profile a brand-style description as a JSON object.
    /// The reply is untrusted free text: code fences are tolerated, anything
    /// that is not a JSON object is a `MalformedProviderResponse`.
    pub async fn analyze_brand_style(&self, text: &str) -> Result<BrandAnalysis> {
        let request = TextGenerationRequest {
            prompt: build_analysis_prompt(text),
            max_tokens: None,
            temperature: Some(ANALYSIS_TEMPERATURE),
            candidate_count: Some(1),
            model_id: None,
        };

        let candidates = self.provider.complete_chat(request).await?;
        let raw = candidates
            .into_iter()
            .next()
            .ok_or(AdGenError::EmptyGenerationResult)?;

        parse_brand_analysis(&raw)
    }

    /// One call, three candidate completions, returned in provider order.
    pub async fn generate_text_ad(
        &self,
        reference_ad: &str,
        brand_style: &str,
        format: AdFormat,
    ) -> Result<Vec<String>> {
        let request = TextGenerationRequest {
            prompt: build_text_prompt(reference_ad, brand_style, format),
            max_tokens: None,
            temperature: Some(TEXT_TEMPERATURE),
            candidate_count: Some(CANDIDATES_PER_CALL),
            model_id: None,
        };

        self.provider.complete_chat(request).await
    }

    /// One image at the format's target resolution, returned as a data URI.
    pub async fn generate_image(
        &self,
        reference_ad: &str,
        brand_style: &str,
        format: AdFormat,
    ) -> Result<String> {
        let (width, height) = format.resolution();
        let request = ImageGenerationRequest {
            prompt: build_image_prompt(reference_ad, brand_style, format),
            model_id: None,
            width: Some(width),
            height: Some(height),
            num_images: Some(1),
        };

        let response = self.provider.generate_image(request).await?;
        into_data_uri(&response.image_data)
    }

    /// One-shot draft: a single text candidate plus a 512x512 visual, with
    /// no format brief. Backs the lightweight draft endpoint.
    pub async fn draft_ad(&self, reference_ad: &str, brand_style: &str) -> Result<(String, String)> {
        let text_request = TextGenerationRequest {
            prompt: build_draft_prompt(reference_ad, brand_style),
            max_tokens: None,
            temperature: Some(TEXT_TEMPERATURE),
            candidate_count: Some(1),
            model_id: None,
        };

        let candidates = self.provider.complete_chat(text_request).await?;
        let text = candidates
            .into_iter()
            .next()
            .ok_or(AdGenError::EmptyGenerationResult)?;

        let image_request = ImageGenerationRequest {
            prompt: format!(
                "An ad visual that matches this brand style: {}. Reference: {}. Keep it modern, clean, and engaging.",
                brand_style, reference_ad
            ),
            model_id: None,
            width: Some(DRAFT_IMAGE_SIZE),
            height: Some(DRAFT_IMAGE_SIZE),
            num_images: Some(1),
        };

        let response = self.provider.generate_image(image_request).await?;
        let image = into_data_uri(&response.image_data)?;

        Ok((text, image))
    }
}

fn build_text_prompt(reference_ad: &str, brand_style: &str, format: AdFormat) -> String {
    format!(
        "You are an expert ad copywriter. Create a fresh and brand-aligned ad based on these inputs:\n\n\
         Reference Ad:\n\"{}\"\n\n\
         Brand Style:\n{}\n\n\
         Format: {}\n\n\
         Requirements:\n\
         - Maintain brand voice and tone\n\
         - Use appropriate length for the format\n\
         - Include a clear call-to-action\n\
         - Ensure brand consistency",
        reference_ad,
        brand_style,
        format.text_brief()
    )
}

fn build_image_prompt(reference_ad: &str, brand_style: &str, format: AdFormat) -> String {
    format!(
        "Create an advertisement image that matches this brand style: {}\n\
         Reference: {}\n\
         Format: {}\n\
         Style: Modern, clean, and engaging\n\
         Requirements:\n\
         - Use brand-appropriate colors\n\
         - Maintain visual consistency\n\
         - Focus on the product/service\n\
         - Include space for text overlay",
        brand_style,
        reference_ad,
        format.image_brief()
    )
}

fn build_analysis_prompt(text: &str) -> String {
    format!(
        "Analyze this brand style description and extract key elements:\n\"{}\"\n\n\
         Extract:\n\
         1. Brand voice (formal, casual, playful, etc.)\n\
         2. Color preferences\n\
         3. Target audience\n\
         4. Key messaging points\n\
         5. Brand personality traits\n\n\
         Format the response as a JSON object.",
        text
    )
}

fn build_draft_prompt(reference_ad: &str, brand_style: &str) -> String {
    format!(
        "You are an expert ad copywriter. Based on the reference ad and brand style, create a fresh and brand-aligned ad.\n\n\
         Reference Ad:\n\"{}\"\n\n\
         Brand Style:\n{}\n\n\
         Generate a new ad with:\n\
         - A catchy headline\n\
         - A short subheadline\n\
         - A clear CTA (Call to Action)",
        reference_ad, brand_style
    )
}

fn parse_brand_analysis(raw: &str) -> Result<BrandAnalysis> {
    let stripped = strip_code_fences(raw);
    let value: serde_json::Value = serde_json::from_str(stripped).map_err(|e| {
        AdGenError::MalformedProviderResponse(format!("brand analysis is not valid JSON: {}", e))
    })?;

    match value {
        serde_json::Value::Object(map) => Ok(BrandAnalysis(map)),
        _ => Err(AdGenError::MalformedProviderResponse(
            "brand analysis is not a JSON object".into(),
        )),
    }
}

/// Models often wrap requested JSON in a Markdown fence.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Validate the provider's base64 payload before handing it out as an image
/// reference; a corrupt payload is a provider fault, not a rendering bug.
fn into_data_uri(image_data: &str) -> Result<String> {
    base64::engine::general_purpose::STANDARD
        .decode(image_data)
        .map_err(|e| {
            AdGenError::MalformedProviderResponse(format!(
                "image payload is not valid base64: {}",
                e
            ))
        })?;

    Ok(format!("data:image/png;base64,{}", image_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ImageGenerationResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubProvider {
        text_candidates: Vec<String>,
        image_data: String,
        last_text_request: Mutex<Option<TextGenerationRequest>>,
        last_image_request: Mutex<Option<ImageGenerationRequest>>,
    }

    impl StubProvider {
        fn new(text_candidates: Vec<&str>, image_data: &str) -> Arc<Self> {
            Arc::new(Self {
                text_candidates: text_candidates.into_iter().map(String::from).collect(),
                image_data: image_data.to_string(),
                last_text_request: Mutex::new(None),
                last_image_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl GenerationProvider for StubProvider {
        async fn complete_chat(&self, request: TextGenerationRequest) -> Result<Vec<String>> {
            *self.last_text_request.lock().unwrap() = Some(request);
            Ok(self.text_candidates.clone())
        }

        async fn generate_image(
            &self,
            request: ImageGenerationRequest,
        ) -> Result<ImageGenerationResponse> {
            *self.last_image_request.lock().unwrap() = Some(request);
            Ok(ImageGenerationResponse {
                image_data: self.image_data.clone(),
                model: "stub".into(),
            })
        }
    }

    #[tokio::test]
    async fn analysis_accepts_fenced_json() {
        let provider = StubProvider::new(
            vec!["```json\n{\"voice\": \"playful\", \"colors\": \"pastel\"}\n```"],
            "aGk=",
        );
        let generator = AdGenerator::new(provider);

        let analysis = generator.analyze_brand_style("Playful and colorful").await.unwrap();
        assert_eq!(analysis.0["voice"], "playful");
        assert_eq!(analysis.0["colors"], "pastel");
    }

    #[tokio::test]
    async fn analysis_rejects_prose() {
        let provider = StubProvider::new(vec!["The brand sounds quite playful overall."], "aGk=");
        let generator = AdGenerator::new(provider);

        let err = generator.analyze_brand_style("Playful").await.unwrap_err();
        assert!(matches!(err, AdGenError::MalformedProviderResponse(_)));
    }

    #[tokio::test]
    async fn analysis_rejects_non_object_json() {
        let provider = StubProvider::new(vec!["[1, 2, 3]"], "aGk=");
        let generator = AdGenerator::new(provider);

        let err = generator.analyze_brand_style("Playful").await.unwrap_err();
        assert!(matches!(err, AdGenError::MalformedProviderResponse(_)));
    }

    #[tokio::test]
    async fn text_ad_requests_three_candidates_with_inputs_embedded() {
        let provider = StubProvider::new(vec!["a", "b", "c"], "aGk=");
        let generator = AdGenerator::new(provider.clone());

        let candidates = generator
            .generate_text_ad("Buy now!", "Playful and colorful", AdFormat::Banner)
            .await
            .unwrap();
        assert_eq!(candidates, vec!["a", "b", "c"]);

        let request = provider.last_text_request.lock().unwrap().take().unwrap();
        assert_eq!(request.candidate_count, Some(CANDIDATES_PER_CALL));
        assert_eq!(request.temperature, Some(TEXT_TEMPERATURE));
        assert!(request.prompt.contains("Buy now!"));
        assert!(request.prompt.contains("Playful and colorful"));
        assert!(request.prompt.contains(AdFormat::Banner.text_brief()));
    }

    #[tokio::test]
    async fn image_uses_format_resolution_and_wraps_data_uri() {
        let provider = StubProvider::new(vec!["a"], "aGVsbG8=");
        let generator = AdGenerator::new(provider.clone());

        let image = generator
            .generate_image("Buy now!", "Playful", AdFormat::Email)
            .await
            .unwrap();
        assert_eq!(image, "data:image/png;base64,aGVsbG8=");

        let request = provider.last_image_request.lock().unwrap().take().unwrap();
        assert_eq!(request.width, Some(800));
        assert_eq!(request.height, Some(400));
        assert_eq!(request.num_images, Some(1));
    }

    #[tokio::test]
    async fn invalid_base64_image_is_malformed() {
        let provider = StubProvider::new(vec!["a"], "not base64!!");
        let generator = AdGenerator::new(provider);

        let err = generator
            .generate_image("Buy now!", "Playful", AdFormat::Social)
            .await
            .unwrap_err();
        assert!(matches!(err, AdGenError::MalformedProviderResponse(_)));
    }

    #[tokio::test]
    async fn draft_keeps_first_candidate_and_uses_fixed_size() {
        let provider = StubProvider::new(vec!["headline", "unused"], "aGk=");
        let generator = AdGenerator::new(provider.clone());

        let (text, image) = generator.draft_ad("Buy now!", "Playful").await.unwrap();
        assert_eq!(text, "headline");
        assert_eq!(image, "data:image/png;base64,aGk=");

        let request = provider.last_image_request.lock().unwrap().take().unwrap();
        assert_eq!(request.width, Some(DRAFT_IMAGE_SIZE));
        assert_eq!(request.height, Some(DRAFT_IMAGE_SIZE));
    }

    #[test]
    fn fence_stripping_handles_plain_and_fenced_payloads() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }
}
