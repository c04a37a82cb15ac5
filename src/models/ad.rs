use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AdGenError, Result};

pub const MIN_VARIATIONS: u32 = 1;
pub const MAX_VARIATIONS: u32 = 5;
pub const DEFAULT_VARIATIONS: u32 = 3;

/// Target ad medium. The enum is closed; anything the mappings below do not
/// recognize is folded to `Social` at the parse boundary so every downstream
/// lookup stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdFormat {
    Social,
    Banner,
    Email,
}

impl Default for AdFormat {
    fn default() -> Self {
        AdFormat::Social
    }
}

impl AdFormat {
    /// Total parse: unrecognized strings fall back to the social defaults.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "banner" => AdFormat::Banner,
            "email" => AdFormat::Email,
            _ => AdFormat::Social,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdFormat::Social => "social",
            AdFormat::Banner => "banner",
            AdFormat::Email => "email",
        }
    }

    /// Target resolution for image generation, in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        match self {
            AdFormat::Social => (1024, 1024),
            AdFormat::Banner => (1024, 512),
            AdFormat::Email => (800, 400),
        }
    }

    /// Copywriting instruction specific to the medium.
    pub fn text_brief(&self) -> &'static str {
        match self {
            AdFormat::Social => {
                "Create a social media post with a catchy headline, engaging description, and clear CTA."
            }
            AdFormat::Banner => {
                "Create a banner ad with a short, impactful headline and clear CTA."
            }
            AdFormat::Email => {
                "Create an email marketing copy with a compelling subject line and body text."
            }
        }
    }

    /// Aspect guidance for the image prompt.
    pub fn image_brief(&self) -> &'static str {
        match self {
            AdFormat::Social => "Create a square social media image",
            AdFormat::Banner => "Create a wide banner image",
            AdFormat::Email => "Create a rectangular email header image",
        }
    }
}

impl std::fmt::Display for AdFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ad-generation request. Built fresh per call; the core keeps no state
/// between requests.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub reference_ad: String,
    pub brand_style: String,
    pub format: AdFormat,
    pub variation_mode: bool,
    pub variation_count: u32,
}

impl GenerationRequest {
    pub fn new(reference_ad: impl Into<String>, brand_style: impl Into<String>) -> Self {
        GenerationRequest {
            reference_ad: reference_ad.into(),
            brand_style: brand_style.into(),
            format: AdFormat::default(),
            variation_mode: false,
            variation_count: DEFAULT_VARIATIONS,
        }
    }

    pub fn with_format(mut self, format: AdFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_variations(mut self, count: u32) -> Self {
        self.variation_mode = true;
        self.variation_count = count;
        self
    }

    /// Both text inputs must be present before any provider call is issued.
    pub fn validate(&self) -> Result<()> {
        if self.reference_ad.is_empty() || self.brand_style.is_empty() {
            return Err(AdGenError::InvalidRequest(
                "Reference ad and brand style are required".into(),
            ));
        }
        Ok(())
    }

    /// Number of generation rounds to run, clamped to [1, 5].
    pub fn rounds(&self) -> usize {
        self.variation_count.clamp(MIN_VARIATIONS, MAX_VARIATIONS) as usize
    }
}

/// Provider-extracted brand profile: voice, color preferences, audience,
/// messaging points, personality traits. The keys come from the model, so
/// this stays an open JSON object rather than a fixed struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandAnalysis(pub serde_json::Map<String, Value>);

/// One (text, image) pairing, identified by a 1-based ordinal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdVariant {
    pub text: String,
    pub image: String,
    #[serde(rename = "variationId")]
    pub variant_id: usize,
}

/// Either one variant (single mode) or an ordered batch (variation mode).
/// Ordering matches generation order.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Single(AdVariant),
    Variations(Vec<AdVariant>),
}

impl GenerationResult {
    pub fn variants(&self) -> Vec<&AdVariant> {
        match self {
            GenerationResult::Single(variant) => vec![variant],
            GenerationResult::Variations(variants) => variants.iter().collect(),
        }
    }
}

/// Everything the caller gets back from a successful generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdResponse {
    pub result: GenerationResult,
    pub brand_analysis: BrandAnalysis,
    pub format: AdFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parse_is_total() {
        assert_eq!(AdFormat::parse("social"), AdFormat::Social);
        assert_eq!(AdFormat::parse("Banner"), AdFormat::Banner);
        assert_eq!(AdFormat::parse("email"), AdFormat::Email);
        assert_eq!(AdFormat::parse("billboard"), AdFormat::Social);
        assert_eq!(AdFormat::parse(""), AdFormat::Social);
    }

    #[test]
    fn format_resolutions_are_distinct() {
        assert_eq!(AdFormat::Social.resolution(), (1024, 1024));
        assert_eq!(AdFormat::Banner.resolution(), (1024, 512));
        assert_eq!(AdFormat::Email.resolution(), (800, 400));
    }

    #[test]
    fn variation_count_clamps() {
        let request = GenerationRequest::new("ad", "style").with_variations(0);
        assert_eq!(request.rounds(), 1);

        let request = GenerationRequest::new("ad", "style").with_variations(9);
        assert_eq!(request.rounds(), 5);

        let request = GenerationRequest::new("ad", "style").with_variations(2);
        assert_eq!(request.rounds(), 2);
    }

    #[test]
    fn empty_inputs_fail_validation() {
        assert!(GenerationRequest::new("", "style").validate().is_err());
        assert!(GenerationRequest::new("ad", "").validate().is_err());
        assert!(GenerationRequest::new("ad", "style").validate().is_ok());
    }

    #[test]
    fn variant_serializes_with_wire_keys() {
        let variant = AdVariant {
            text: "Fun Sale!".into(),
            image: "data:image/png;base64,aGk=".into(),
            variant_id: 1,
        };
        let json = serde_json::to_value(&variant).unwrap();
        assert_eq!(json["variationId"], 1);
        assert_eq!(json["text"], "Fun Sale!");
    }
}
