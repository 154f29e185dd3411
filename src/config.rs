// src/config.rs
// =============================================================================
// Runtime settings shared by the HTTP server and the one-shot CLI.
//
// Built once at startup from CLI flags / environment variables (see cli.rs).
// The API key and model are only defaults: each request may override them.
// =============================================================================

use crate::llm::SamplingParams;

pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-V2-Chat";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_COMPLETION_URL: &str = "https://api.siliconflow.cn/v1/chat/completions";

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Base URL of the GitHub REST API
    pub github_api: String,
    /// Full URL of the chat-completions endpoint
    pub completion_url: String,
    /// Used when a request doesn't bring its own key
    pub default_api_key: Option<String>,
    /// Used when a request doesn't name a model
    pub default_model: String,
    pub sampling: SamplingParams,
}

impl AnalyzerConfig {
    /// Picks the request's key if given, else the configured default.
    /// Blank values count as missing.
    pub fn resolve_api_key(&self, requested: Option<&str>) -> Option<String> {
        non_blank(requested)
            .or_else(|| non_blank(self.default_api_key.as_deref()))
            .map(str::to_string)
    }

    /// Picks the request's model if given, else the configured default
    pub fn resolve_model(&self, requested: Option<&str>) -> String {
        non_blank(requested)
            .unwrap_or(&self.default_model)
            .to_string()
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            github_api: DEFAULT_GITHUB_API.to_string(),
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            default_api_key: None,
            default_model: DEFAULT_MODEL.to_string(),
            sampling: SamplingParams::default(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
