use async_trait::async_trait;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(endpoint: String, api_key: Option<String>, model: String, max_tokens: u32) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            api_key,
            model,
            max_tokens,
        }
    }

    fn headers(&self) -> AppResult<HeaderMap> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::MissingCredential)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|err| {
                AppError::Configuration(format!("invalid API key header: {err}"))
            })?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }
}

#[async_trait]
impl LanguageModelService for AnthropicClient {
    async fn complete(&self, prompt: &str, content: &str) -> AppResult<String> {
        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: format!("{prompt}\n\n{content}"),
            }],
        };
        debug!(
            model = %self.model,
            chars = request_body.messages[0].content.len(),
            "calling messages API"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers()?)
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call Claude: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let payload: MessagesResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse Claude response: {err}"))
        })?;

        payload
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| {
                AppError::LanguageModel("Claude response contained no text content".to_string())
            })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, api_key: Option<&str>) -> AnthropicClient {
        AnthropicClient::new(
            format!("{}/v1/messages", server.uri()),
            api_key.map(str::to_string),
            "claude-test".to_string(),
            1024,
        )
    }

    #[tokio::test]
    async fn sends_messages_request_and_returns_first_text_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "model": "claude-test",
                "max_tokens": 1024,
                "messages": [{"role": "user", "content": "Summarize:\n\nhello"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "A greeting."},
                    {"type": "text", "text": "ignored"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client(&server, Some("sk-test"))
            .complete("Summarize:", "hello")
            .await
            .unwrap();
        assert_eq!(reply, "A greeting.");
    }

    #[tokio::test]
    async fn non_success_status_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server, Some("sk-test"))
            .complete("Summarize:", "hello")
            .await
            .unwrap_err();
        match err {
            AppError::Api { status, body } => {
                assert_eq!(status, 529);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_content_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let result = client(&server, Some("sk-test"))
            .complete("Summarize:", "hello")
            .await;
        assert!(matches!(result, Err(AppError::LanguageModel(_))));
    }

    #[tokio::test]
    async fn missing_key_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server, None).complete("Summarize:", "hello").await;
        assert!(matches!(result, Err(AppError::MissingCredential)));
    }
}
