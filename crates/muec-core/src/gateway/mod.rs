//! AI gateway
//!
//! 生成 AI API への単一呼び出しをラップする境界です。
//! The bot only depends on the [`AiGateway`] trait so tests can inject doubles.

mod gemini;
mod types;

use async_trait::async_trait;

use crate::error::Result;

pub use gemini::GeminiClient;
pub use types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};

/// Boundary around a generative-text API
///
/// One call, one blocking round trip: no retries and no streaming.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Generate a reply for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Name of the model requests are sent to
    fn model(&self) -> &str;
}
