// src/analyze.rs
// =============================================================================
// The analysis pipeline, shared by `serve` and `analyze`.
//
// What happens for one request:
// 1. Resolve API key and model (request value, else configured default)
// 2. Fetch the README
// 3. Walk the repository tree (structure listing + file dump)
// 4. Build the prompt
// 5. Depending on the output format:
//    - prompt:  return the prompt itself, no model call
//    - raw:     return the provider's JSON response as-is
//    - summary: return README, structure and the model's answer text
//
// Any failure in steps 2-5 aborts the request. Per-file download failures
// never reach this level; the walker handles them.
//
// Each call owns its own walk state, so one Analyzer can serve many
// requests at once.
// =============================================================================

use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AnalyzerConfig;
use crate::error::AnalyzeError;
use crate::github::{walk, GitHubClient, RepoRef};
use crate::llm::{build_prompt, extract_content, CompletionClient, CompletionRequest};

/// What an analysis hands back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The completion provider's JSON response, unmodified
    #[default]
    Raw,
    /// README, structure listing and the model's answer text
    Summary,
    /// The assembled instructions only; the model is not called
    Prompt,
}

impl OutputFormat {
    fn calls_model(self) -> bool {
        !matches!(self, OutputFormat::Prompt)
    }
}

/// One analysis job
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub repo: RepoRef,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub format: OutputFormat,
}

/// Body of a `summary` response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub readme_content: String,
    pub repo_structure: String,
    pub ai_analysis: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutput {
    Raw(Value),
    Summary(AnalysisSummary),
    Prompt(String),
}

/// Runs analyses against GitHub and the completion API
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    github: GitHubClient,
    completion: CompletionClient,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzeError> {
        let github = GitHubClient::new(&config.github_api)?;
        let completion = CompletionClient::new(&config.completion_url)?;
        Ok(Analyzer {
            config,
            github,
            completion,
        })
    }

    pub async fn run(&self, request: AnalysisRequest) -> Result<AnalysisOutput, AnalyzeError> {
        // Step 1: request values win over configured defaults
        let model = self.config.resolve_model(request.model.as_deref());

        // Check the key before spending any GitHub requests
        let api_key = if request.format.calls_model() {
            let key = self
                .config
                .resolve_api_key(request.api_key.as_deref())
                .ok_or_else(|| {
                    AnalyzeError::input("No API key: pass ?apiKey=<key> or configure DEFAULT_API_KEY")
                })?;
            Some(key)
        } else {
            None
        };

        info!(
            "Analyzing {} (model: {}, format: {:?})",
            request.repo, model, request.format
        );

        // Steps 2-4: README, tree walk, prompt (any GitHub failure aborts here)
        let readme = self.github.fetch_readme(&request.repo).await?;
        let tree = walk(&self.github, &request.repo).await?;
        let prompt = build_prompt(&request.repo, &readme, &tree.structure, &tree.file_dump);

        info!(
            "Built prompt for {}: {} bytes ({} bytes of structure, {} bytes of files)",
            request.repo,
            prompt.len(),
            tree.structure.len(),
            tree.file_dump.len()
        );

        // Prompt-only requests stop here
        let Some(api_key) = api_key else {
            return Ok(AnalysisOutput::Prompt(prompt));
        };

        // Step 5: one POST to the completion API
        let completion = CompletionRequest {
            model,
            prompt,
            sampling: self.config.sampling.clone(),
        };
        let response = self.completion.complete(&completion, &api_key).await?;
        info!("Completion received for {}", request.repo);

        // Summary keeps only the answer text; raw relays the whole response
        match request.format {
            OutputFormat::Summary => Ok(AnalysisOutput::Summary(AnalysisSummary {
                readme_content: readme,
                repo_structure: tree.structure,
                ai_analysis: extract_content(&response)?,
            })),
            _ => Ok(AnalysisOutput::Raw(response)),
        }
    }
}
