use thiserror::Error;

/// Every way a generation request can fail. The specific kind is preserved
/// all the way up to the HTTP boundary; nothing in the core retries or
/// downgrades an error into a more generic one.
#[derive(Debug, Error)]
pub enum AdGenError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Malformed provider response: {0}")]
    MalformedProviderResponse(String),

    #[error("Provider returned no candidates")]
    EmptyGenerationResult,

    #[error("Image generation rejected by provider: {0}")]
    ImageGenerationRejected(String),

    #[error("Brand analysis failed: {source}")]
    AnalysisFailed {
        #[source]
        source: Box<AdGenError>,
    },

    #[error("Variation round {round} failed: {source}")]
    VariationGenerationFailed {
        round: usize,
        #[source]
        source: Box<AdGenError>,
    },
}

impl AdGenError {
    /// Client errors are the caller's to fix; everything else is a
    /// provider- or service-side failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AdGenError::InvalidRequest(_))
    }
}

pub type Result<T> = std::result::Result<T, AdGenError>;
