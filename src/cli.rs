// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - serve:   run the HTTP service (GET /analyze)
// - analyze: run one analysis and print the result
//
// Both share SettingsArgs. Every setting can also come from an environment
// variable (DEFAULT_API_KEY, DEFAULT_MODEL, ...), which is how a hosting
// environment injects them.
//
// Rust concepts:
// - Derive macros: Parser/Subcommand/Args generate the parsing code
// - #[command(flatten)]: reuse one group of flags in several subcommands
// =============================================================================

use clap::{Args, Parser, Subcommand};

use crate::analyze::OutputFormat;
use crate::config::{AnalyzerConfig, DEFAULT_COMPLETION_URL, DEFAULT_GITHUB_API, DEFAULT_MODEL};
use crate::llm::SamplingParams;

#[derive(Parser, Debug)]
#[command(
    name = "repo-analyzer",
    version,
    about = "Ask an LLM to explain a GitHub repository",
    long_about = "repo-analyzer reads a GitHub repository's README, directory tree and file \
                  contents, turns them into one prompt and sends it to a chat-completions API."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    ///
    /// Example: repo-analyzer serve --bind 0.0.0.0:8787
    Serve {
        /// Address to listen on
        #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8787")]
        bind: String,

        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Analyze one repository and print the result
    ///
    /// Example: repo-analyzer analyze octocat/Hello-World --format summary
    Analyze {
        /// Repository as owner/repo or a GitHub URL
        repo: String,

        /// What to print
        #[arg(long, value_enum, default_value_t = OutputFormat::Raw)]
        format: OutputFormat,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

/// Settings shared by both subcommands
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// API key for the completion endpoint
    #[arg(long, env = "DEFAULT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name sent to the completion endpoint
    #[arg(long, env = "DEFAULT_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_GITHUB_API)]
    pub github_api: String,

    /// Chat-completions endpoint
    #[arg(long, env = "COMPLETION_URL", default_value = DEFAULT_COMPLETION_URL)]
    pub completion_url: String,

    /// Maximum tokens to generate
    #[arg(long, default_value_t = 512)]
    pub max_tokens: u32,

    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long, default_value_t = 0.7)]
    pub top_p: f32,

    #[arg(long, default_value_t = 50)]
    pub top_k: u32,

    #[arg(long, default_value_t = 0.5)]
    pub frequency_penalty: f32,

    /// Number of completions to request
    #[arg(short = 'n', long = "choices", default_value_t = 1)]
    pub n: u32,
}

impl SettingsArgs {
    pub fn into_config(self) -> AnalyzerConfig {
        AnalyzerConfig {
            github_api: self.github_api,
            completion_url: self.completion_url,
            default_api_key: self.api_key,
            default_model: self.model,
            sampling: SamplingParams {
                max_tokens: self.max_tokens,
                temperature: self.temperature,
                top_p: self.top_p,
                top_k: self.top_k,
                frequency_penalty: self.frequency_penalty,
                n: self.n,
            },
        }
    }
}
