// src/server/handlers.rs
// =============================================================================
// Request handlers for the HTTP service.
//
// GET /analyze?repo=<owner/repo or URL>&apiKey=<key>&model=<model>&format=<fmt>
//   200 -> provider JSON (raw), {readmeContent, repoStructure, aiAnalysis}
//          (summary), or the prompt as plain text (prompt)
//   400 -> missing/invalid repo, no API key available
//   500 -> GitHub or the completion API failed
//
// Errors are plain text "Error: <message>", except in summary mode where
// they are JSON {"error": "<message>"} to match the success body.
// =============================================================================

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Deserialize;
use serde_json::json;

use crate::analyze::{AnalysisOutput, AnalysisRequest, Analyzer, OutputFormat};
use crate::error::AnalyzeError;
use crate::github::RepoRef;

pub const USAGE: &str =
    "Please provide a repo URL as a query parameter, e.g., ?repo=owner/repo";

/// Query string of GET /analyze
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    repo: Option<String>,
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
    model: Option<String>,
    #[serde(default)]
    format: OutputFormat,
}

pub async fn analyze(
    State(analyzer): State<Arc<Analyzer>>,
    Query(params): Query<AnalyzeParams>,
) -> Response {
    let format = params.format;

    let Some(repo) = params.repo.filter(|r| !r.trim().is_empty()) else {
        return (StatusCode::BAD_REQUEST, USAGE).into_response();
    };

    let repo = match RepoRef::parse(&repo) {
        Ok(repo) => repo,
        Err(e) => return error_response(format, &e),
    };

    let request = AnalysisRequest {
        repo,
        api_key: params.api_key,
        model: params.model,
        format,
    };

    match analyzer.run(request).await {
        Ok(AnalysisOutput::Raw(json)) => Json(json).into_response(),
        Ok(AnalysisOutput::Summary(summary)) => Json(summary).into_response(),
        Ok(AnalysisOutput::Prompt(prompt)) => prompt.into_response(),
        Err(e) => {
            error!("Analysis failed: {}", e);
            error_response(format, &e)
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

fn error_response(format: OutputFormat, err: &AnalyzeError) -> Response {
    let status = err.status_code();
    match format {
        OutputFormat::Summary => (status, Json(json!({ "error": err.to_string() }))).into_response(),
        OutputFormat::Raw | OutputFormat::Prompt => {
            (status, format!("Error: {}", err)).into_response()
        }
    }
}
