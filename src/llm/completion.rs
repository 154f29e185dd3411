// src/llm/completion.rs
// =============================================================================
// This module posts the prompt to an OpenAI-compatible chat-completions API.
//
// Request:
//   POST <endpoint>
//   Authorization: Bearer <api key>
//   { "model": ..., "messages": [{"role": "user", "content": <prompt>}],
//     "stream": false, "max_tokens": ..., "temperature": ..., "top_p": ...,
//     "top_k": ..., "frequency_penalty": ..., "n": ... }
//
// Response handling:
// - Non-2xx status: AnalyzeError::Upstream with the status code and body
// - 2xx: the JSON body is returned untouched
// - extract_content() digs out choices[0].message.content for callers that
//   only want the analysis text (missing -> AnalyzeError::MalformedResponse)
//
// Rust concepts:
// - #[serde(flatten)]: merges SamplingParams' fields into the request body
// - serde_json::Value: an untyped JSON tree, for relaying the provider's
//   response as-is
// =============================================================================

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalyzeError;

/// Generation controls forwarded opaquely to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub frequency_penalty: f32,
    pub n: u32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        SamplingParams {
            max_tokens: 512,
            temperature: 0.7,
            top_p: 0.7,
            top_k: 50,
            frequency_penalty: 0.5,
            n: 1,
        }
    }
}

/// Everything needed for one completion call, except the credentials
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub sampling: SamplingParams,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Wire body of POST /chat/completions
#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    #[serde(flatten)]
    sampling: &'a SamplingParams,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionBody<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        ChatCompletionBody {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            stream: false,
            sampling: &request.sampling,
        }
    }
}

/// Client for the chat-completions endpoint
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    endpoint: String,
}

impl CompletionClient {
    pub fn new(endpoint: &str) -> Result<Self, AnalyzeError> {
        // No explicit timeout: a large prompt can take the provider a while
        let http = Client::builder().build()?;
        Ok(CompletionClient {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    /// Sends the prompt and returns the provider's JSON response unmodified
    pub async fn complete(
        &self,
        request: &CompletionRequest,
        api_key: &str,
    ) -> Result<Value, AnalyzeError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&ChatCompletionBody::from(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzeError::Upstream {
                url: self.endpoint.clone(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Pulls choices[0].message.content out of a completion response
pub fn extract_content(response: &Value) -> Result<String, AnalyzeError> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(AnalyzeError::MalformedResponse)
}
