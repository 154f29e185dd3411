// src/github/walk.rs
// =============================================================================
// Walks a repository's directory tree and collects two texts:
// - structure: every path, one per line, directories ending in "/"
// - file dump: every text file inlined under a "File: <path>" header
//
// How it works:
// 1. Start with the root listing on a stack
// 2. Pop a directory, mark it visited, list its contents
// 3. Directories not yet visited are written to the structure and pushed
// 4. Files are written to the structure; their content goes to the dump
//    (binary files get a skip notice, failed downloads a placeholder)
// 5. Repeat until the stack is empty
//
// The stack is LIFO, so the last directory of a listing is explored first.
// The output follows that traversal order, not alphabetical order.
//
// Failure policy:
// - A failed directory listing aborts the whole walk (the error is returned)
// - A failed file download only costs that file its content
//
// All requests are made one after another, so the output order is fully
// determined by the listings.
//
// Rust concepts:
// - Vec as a stack: push() and pop() both work on the end
// - HashSet: To track visited directories (O(1) lookup)
// - &mut borrows: the output buffer is threaded through the walk and only
//   turned into the final WalkResult once, at the end
// =============================================================================

use std::collections::HashSet;
use std::fmt::Write;

use log::{debug, warn};

use super::binary::is_binary;
use super::client::{ContentSource, EntryKind, TreeEntry};
use super::repo::RepoRef;
use crate::error::AnalyzeError;

/// The two texts produced by a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkResult {
    /// One path per line, directories suffixed with "/"
    pub structure: String,
    /// Concatenated "File: <path>\nContent:\n<text>\n\n" blocks
    pub file_dump: String,
}

// A directory waiting to be listed
#[derive(Debug, Clone)]
struct PendingDir {
    // Display path used in the output ("" for the root, "/src/util" below it)
    path: String,
    // Repository path used for the visited check ("" for the root, "src/util")
    key: String,
    listing_url: String,
}

// Growable output buffer, finalized once when the walk is done
#[derive(Debug, Default)]
struct WalkOutput {
    structure: String,
    file_dump: String,
}

impl WalkOutput {
    fn push_dir(&mut self, path: &str) {
        self.structure.push_str(path);
        self.structure.push_str("/\n");
    }

    fn push_file(&mut self, path: &str) {
        self.structure.push_str(path);
        self.structure.push('\n');
    }

    // Writing into a String cannot fail, so the fmt::Result is dropped
    fn push_content(&mut self, path: &str, text: &str) {
        let _ = write!(self.file_dump, "File: {}\nContent:\n{}\n\n", path, text);
    }

    fn push_binary_skip(&mut self, path: &str) {
        let _ = write!(self.file_dump, "File: {}\nContent: Skipped binary file\n\n", path);
    }

    fn push_decoding_skip(&mut self, path: &str) {
        let _ = write!(
            self.file_dump,
            "File: {}\nContent: Skipped due to decoding error\n\n",
            path
        );
    }

    fn finish(self) -> WalkResult {
        WalkResult {
            structure: self.structure,
            file_dump: self.file_dump,
        }
    }
}

/// Walks the whole repository tree, starting at its root listing
///
/// Each directory is listed at most once, even if several listings point at
/// it. Its structure line can still appear more than once in that case.
pub async fn walk<S>(source: &S, repo: &RepoRef) -> Result<WalkResult, AnalyzeError>
where
    S: ContentSource + ?Sized,
{
    // The root has no display path and no repository path
    let mut stack = vec![PendingDir {
        path: String::new(),
        key: String::new(),
        listing_url: source.root_listing_url(repo),
    }];
    let mut visited: HashSet<String> = HashSet::new();
    let mut output = WalkOutput::default();

    while let Some(dir) = stack.pop() {
        // Pushed twice before its first visit: only list it once
        if !visited.insert(dir.key.clone()) {
            continue;
        }

        debug!("Listing {}/ ({})", dir.path, dir.listing_url);

        // A failed listing aborts the whole walk
        let entries = source.list_contents(&dir.listing_url).await?;

        for entry in entries {
            visit_entry(source, &dir, entry, &visited, &mut stack, &mut output).await;
        }
    }

    Ok(output.finish())
}

// Handles one entry of a listing: record it and queue or fetch as needed
async fn visit_entry<S>(
    source: &S,
    parent: &PendingDir,
    entry: TreeEntry,
    visited: &HashSet<String>,
    stack: &mut Vec<PendingDir>,
    output: &mut WalkOutput,
) where
    S: ContentSource + ?Sized,
{
    let path = format!("{}/{}", parent.path, entry.name);

    match entry.kind {
        EntryKind::Directory => {
            // GitHub reports "src/util"; some listings add slashes, drop them
            let key = entry.path.trim_matches('/').to_string();

            // Already listed (a listing pointing back at itself or the root)
            if visited.contains(&key) {
                return;
            }
            output.push_dir(&path);
            stack.push(PendingDir {
                path,
                key,
                listing_url: entry.listing_url,
            });
        }
        EntryKind::File { download_url } => {
            output.push_file(&path);

            // Binary files: skip notice only, no download
            if is_binary(&entry.name) {
                output.push_binary_skip(&path);
                return;
            }

            let Some(download_url) = download_url else {
                warn!("Skipping {}: no download URL", path);
                output.push_decoding_skip(&path);
                return;
            };

            // One file failing never stops the walk
            match source.fetch_raw(&download_url).await {
                Ok(text) => output.push_content(&path, &text),
                Err(e) => {
                    warn!("Skipping content of {}: {}", path, e);
                    output.push_decoding_skip(&path);
                }
            }
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a stack instead of recursion?
//    - Async recursion needs boxed futures (an async fn can't call itself
//      directly), and deep trees would grow the call chain
//    - A Vec<PendingDir> holds the same information explicitly
//
// 2. Why check `visited` both when pushing and when popping?
//    - On push: skip directories that were already listed
//    - On pop: the same directory can be pushed twice before its first
//      listing; the second copy is dropped here
//
// 3. What is `let Some(x) = y else { ... };`?
//    - let-else: bind the value if the pattern matches, otherwise run the
//      block, which must leave the function (return, continue, ...)
// -----------------------------------------------------------------------------
