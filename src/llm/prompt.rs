// src/llm/prompt.rs
// =============================================================================
// Builds the instructions sent to the model.
//
// The template is fixed: a numbered list of study steps, then the README,
// the structure listing and the file dump, in that order, verbatim.
// Nothing is truncated here. If the prompt is too large for the model, the
// completion API is the one that says so.
// =============================================================================

use crate::github::RepoRef;

/// Renders the analysis prompt for `repo`
pub fn build_prompt(repo: &RepoRef, readme: &str, structure: &str, file_dump: &str) -> String {
    format!(
        "Prompt: Analyze the {repo} repository to understand its structure, purpose, and functionality. \
Follow these steps to study the codebase:

1. Read the README file to gain an overview of the project, its goals, and any setup instructions.
2. Examine the repository structure to understand how the files and directories are organized.
3. Identify the main entry point of the application and follow the code flow from there.
4. Study the dependencies and libraries the project uses and what they are used for.
5. Analyze the core functionality by examining the key modules, types, and functions.
6. Look at configuration files to understand how the project is configured and what can be changed.
7. Investigate the tests to see how the project checks its behavior and which scenarios are covered.
8. Review documentation and inline comments for insight into the intended behavior.
9. Point out areas for improvement, optimization, or further exploration.
10. Summarize your findings: the project's purpose, key features, and notable observations or recommendations.

README:
{readme}

Repository Structure:
{structure}

File Contents:
{file_dump}
"
    )
}
