// src/main.rs
// =============================================================================
// This is the entry point of repo-analyzer.
//
// What happens here:
// 1. Set up logging (RUST_LOG overrides the default "info" level)
// 2. Parse command-line arguments using clap
// 3. Dispatch to `serve` (HTTP service) or `analyze` (one-shot)
// 4. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod analyze; // src/analyze.rs - the README -> walk -> prompt -> completion pipeline
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - runtime settings
mod error; // src/error.rs - AnalyzeError
mod github; // src/github/ - GitHub API client and tree walker
mod llm; // src/llm/ - prompt template and completion client
mod server; // src/server/ - HTTP service

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;

use analyze::{AnalysisOutput, AnalysisRequest, Analyzer, OutputFormat};
use cli::{Cli, Commands};
use github::RepoRef;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // Unexpected errors are printed and turned into exit code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, settings } => {
            let analyzer = Analyzer::new(settings.into_config())?;
            server::serve(&bind, analyzer).await
        }
        Commands::Analyze {
            repo,
            format,
            settings,
        } => handle_analyze(&repo, format, settings).await,
    }
}

// Handles the 'analyze' subcommand: one analysis, printed to stdout
async fn handle_analyze(repo: &str, format: OutputFormat, settings: cli::SettingsArgs) -> Result<()> {
    let repo = RepoRef::parse(repo)?;
    let analyzer = Analyzer::new(settings.into_config())?;

    // Key and model already sit in the config as defaults
    let request = AnalysisRequest {
        repo,
        api_key: None,
        model: None,
        format,
    };

    match analyzer.run(request).await? {
        AnalysisOutput::Raw(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        AnalysisOutput::Summary(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
        AnalysisOutput::Prompt(prompt) => println!("{}", prompt),
    }

    Ok(())
}
