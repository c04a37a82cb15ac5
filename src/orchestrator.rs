use std::sync::Arc;

use futures::future::try_join_all;

use crate::{
    bedrock::GenerationProvider,
    error::{AdGenError, Result},
    generator::AdGenerator,
    models::{AdResponse, AdVariant, GenerationRequest, GenerationResult},
};

/// Drives one request through validate -> analyze -> generate -> assemble.
/// Holds nothing between requests; every call runs in isolation with its own
/// set of outbound provider calls, and a multi-call request either fully
/// succeeds or fully fails.
#[derive(Clone)]
pub struct Orchestrator {
    generator: AdGenerator,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            generator: AdGenerator::new(provider),
        }
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<AdResponse> {
        request.validate()?;

        // Brand analysis always runs, in both modes. Its output rides along
        // in the response for the caller's benefit and does not feed the
        // generation prompts.
        let brand_analysis = self
            .generator
            .analyze_brand_style(&request.brand_style)
            .await
            .map_err(|e| AdGenError::AnalysisFailed {
                source: Box::new(e),
            })?;

        let result = if request.variation_mode {
            self.generate_variations(&request).await?
        } else {
            self.generate_single(&request).await?
        };

        Ok(AdResponse {
            result,
            brand_analysis,
            format: request.format,
        })
    }

    /// Single mode: text and image run concurrently, the first text
    /// candidate becomes the chosen copy, and either failure fails the
    /// whole request.
    async fn generate_single(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let (candidates, image) = futures::try_join!(
            self.generator.generate_text_ad(
                &request.reference_ad,
                &request.brand_style,
                request.format
            ),
            self.generator.generate_image(
                &request.reference_ad,
                &request.brand_style,
                request.format
            ),
        )?;

        let text = candidates
            .into_iter()
            .next()
            .ok_or(AdGenError::EmptyGenerationResult)?;

        Ok(GenerationResult::Single(AdVariant {
            text,
            image,
            variant_id: 1,
        }))
    }

    /// Variation mode: independent full rounds, one per requested variant.
    /// `try_join_all` keeps its output in input order, so variants line up
    /// with round-issue order no matter which round finishes first.
    async fn generate_variations(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let rounds = (1..=request.rounds()).map(|round| self.generate_round(request, round));
        let variants = try_join_all(rounds).await?;

        Ok(GenerationResult::Variations(variants))
    }

    async fn generate_round(&self, request: &GenerationRequest, round: usize) -> Result<AdVariant> {
        let outcome = async {
            let (candidates, image) = futures::try_join!(
                self.generator.generate_text_ad(
                    &request.reference_ad,
                    &request.brand_style,
                    request.format
                ),
                self.generator.generate_image(
                    &request.reference_ad,
                    &request.brand_style,
                    request.format
                ),
            )?;

            let text = candidates
                .into_iter()
                .next()
                .ok_or(AdGenError::EmptyGenerationResult)?;

            Ok(AdVariant {
                text,
                image,
                variant_id: round,
            })
        }
        .await;

        outcome.map_err(|e| AdGenError::VariationGenerationFailed {
            round,
            source: Box::new(e),
        })
    }

    /// One-shot draft used by the lightweight endpoint: same validation
    /// rules, no brand analysis, no variations.
    pub async fn draft(&self, reference_ad: &str, brand_style: &str) -> Result<(String, String)> {
        if reference_ad.is_empty() || brand_style.is_empty() {
            return Err(AdGenError::InvalidRequest(
                "Reference ad and brand style are required".into(),
            ));
        }

        self.generator.draft_ad(reference_ad, brand_style).await
    }
}
