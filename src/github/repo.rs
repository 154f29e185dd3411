// src/github/repo.rs
// =============================================================================
// Turns whatever the caller typed into an owner/name pair.
//
// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo/tree/main/src   (extra segments ignored)
//   - github.com/owner/repo, www.github.com/owner/repo
//
// Rust concepts:
// - FromStr: lets us write "owner/repo".parse::<RepoRef>()
// - Display: lets us print a RepoRef as "owner/repo"
// =============================================================================

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::AnalyzeError;

/// A GitHub repository, identified by its owner and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Parses a repository reference from a URL or an "owner/repo" string
    ///
    /// Example:
    ///   "https://github.com/rust-lang/rust" -> RepoRef { owner: "rust-lang", name: "rust" }
    pub fn parse(input: &str) -> Result<Self, AnalyzeError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AnalyzeError::input("Repository reference is empty"));
        }

        let segments: Vec<String> = if input.contains("://") {
            // Full URL: let the url crate deal with scheme, port and query
            let url = Url::parse(input)
                .map_err(|e| AnalyzeError::input(format!("Invalid URL '{}': {}", input, e)))?;

            match url.host_str() {
                Some("github.com") | Some("www.github.com") => {}
                _ => return Err(AnalyzeError::input(format!("Not a GitHub URL: {}", input))),
            }

            url.path_segments()
                .map(|segments| segments.map(str::to_string).collect())
                .unwrap_or_default()
        } else {
            // Scheme-less: "github.com/owner/repo" or plain "owner/repo"
            // "www." is only a host prefix when github.com follows it
            let path = input
                .strip_prefix("www.github.com/")
                .or_else(|| input.strip_prefix("github.com/"))
                .unwrap_or(input);
            path.split('/').map(str::to_string).collect()
        };

        let mut parts = segments.into_iter().filter(|s| !s.is_empty());
        let owner = parts.next().unwrap_or_default();
        let name = parts.next().unwrap_or_default();

        // Remove .git suffix if present
        let name = name.strip_suffix(".git").unwrap_or(&name).to_string();

        if owner.is_empty() || name.is_empty() {
            return Err(AnalyzeError::input(format!(
                "Invalid repository reference '{}': expected owner/repo or a GitHub URL",
                input
            )));
        }

        Ok(RepoRef { owner, name })
    }
}

impl FromStr for RepoRef {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepoRef::parse(s)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_slash_repo() {
        let repo = RepoRef::parse("octocat/Hello-World").unwrap();
        assert_eq!(repo.owner, "octocat");
        assert_eq!(repo.name, "Hello-World");
    }

    #[test]
    fn test_parse_github_url() {
        let repo = RepoRef::parse("https://github.com/rust-lang/rust").unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let repo = RepoRef::parse("https://github.com/user/repo.git").unwrap();
        assert_eq!(repo.owner, "user");
        assert_eq!(repo.name, "repo");
    }

    #[test]
    fn test_parse_url_with_extra_segments() {
        let repo = RepoRef::parse("https://www.github.com/user/repo/tree/main/src/").unwrap();
        assert_eq!(repo.to_string(), "user/repo");
    }

    #[test]
    fn test_parse_schemeless_url() {
        let repo: RepoRef = "github.com/user/repo/".parse().unwrap();
        assert_eq!(repo.to_string(), "user/repo");
    }

    #[test]
    fn test_www_prefix_only_stripped_before_github_com() {
        let repo = RepoRef::parse("www.github.com/user/repo").unwrap();
        assert_eq!(repo.to_string(), "user/repo");

        // Not a host here: "www.foo" is the owner
        let repo = RepoRef::parse("www.foo/bar").unwrap();
        assert_eq!(repo.owner, "www.foo");
        assert_eq!(repo.name, "bar");
    }

    #[test]
    fn test_parse_invalid_url() {
        let result = RepoRef::parse("https://gitlab.com/user/repo");
        assert!(matches!(result, Err(AnalyzeError::Input(_))));
    }

    #[test]
    fn test_parse_missing_name() {
        assert!(RepoRef::parse("octocat").is_err());
        assert!(RepoRef::parse("octocat/").is_err());
        assert!(RepoRef::parse("https://github.com/octocat").is_err());
        assert!(RepoRef::parse("   ").is_err());
    }
}
