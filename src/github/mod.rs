// src/github/mod.rs
// =============================================================================
// This module handles everything we read from GitHub.
//
// Submodules:
// - repo:   Parsing "owner/repo" or GitHub URLs into a RepoRef
// - client: The REST API client and the ContentSource trait
// - binary: Deciding by extension which files to skip
// - walk:   Walking the directory tree into a structure listing + file dump
// =============================================================================

mod binary;
mod client;
mod repo;
mod walk;

pub use client::GitHubClient;
pub use repo::RepoRef;
pub use walk::walk;
