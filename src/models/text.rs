use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct TextGenerationRequest {
    pub prompt: String,
    pub max_tokens: Option<i32>,
    pub temperature: Option<f32>,
    /// How many independent completions to request in a single call.
    /// Only models with native multi-candidate support honor values above 1.
    pub candidate_count: Option<u32>,
    pub model_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CohereGeneration {
    pub text: String,
}

#[derive(Serialize, Deserialize)]
pub struct CohereTextResponse {
    pub generations: Vec<CohereGeneration>,
}

#[derive(Serialize, Deserialize)]
pub struct TitanTextResult {
    #[serde(rename = "outputText")]
    pub output_text: String,
    #[serde(rename = "completionReason")]
    pub completion_reason: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct TitanTextResponse {
    pub results: Vec<TitanTextResult>,
}

#[derive(Serialize, Deserialize)]
pub struct ClaudeContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ClaudeMessagesResponse {
    pub content: Vec<ClaudeContentBlock>,
}
