use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    /// Sends `prompt` followed by `content` as a single user turn and returns the
    /// model's text reply.
    async fn complete(&self, prompt: &str, content: &str) -> AppResult<String>;
}
