use serde::{Deserialize, Serialize};

/// Suffix appended to a patch that was cut to the configured size.
pub const TRUNCATION_SENTINEL: &str = "\n... (truncated)";

/// Metadata about a pull request plus its changed files.
/// Note: Not Deserialize — PullRequest is assembled from two GitHub API
/// responses (the pull itself and its file list).
#[derive(Debug, Clone, Serialize)]
pub struct PullRequest {
    /// PR number (e.g., 42)
    pub number: u64,
    /// PR title
    pub title: String,
    /// Author's GitHub login
    pub author: String,
    /// "open" or "closed"
    pub state: String,
    /// `owner/repo`, shown next to the title
    pub repo_name: String,
    /// Changed files, as returned by the files endpoint
    pub files: Vec<FileChange>,
}

/// A single changed file, mirroring an entry of
/// `GET /repos/{owner}/{repo}/pulls/{number}/files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// File path (e.g., "src/auth/config.rs")
    pub filename: String,
    /// "added", "removed", "modified", "renamed", or another GitHub status
    #[serde(default)]
    pub status: String,
    /// Lines added in this file
    #[serde(default)]
    pub additions: usize,
    /// Lines deleted in this file
    #[serde(default)]
    pub deletions: usize,
    /// Total lines changed
    #[serde(default)]
    pub changes: usize,
    /// Unified diff body; absent for binary or oversized files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    /// Path before a rename
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_filename: Option<String>,
}

impl FileChange {
    /// Status used for display and filtering. An empty status counts as modified.
    pub fn effective_status(&self) -> &str {
        if self.status.is_empty() {
            "modified"
        } else {
            &self.status
        }
    }

    /// Whether the patch was cut short upstream.
    pub fn is_truncated(&self) -> bool {
        self.patch
            .as_deref()
            .is_some_and(|patch| patch.contains("(truncated)"))
    }
}

/// Represents the parsed components of a GitHub PR URL.
/// Extracted by parse_pr_url() in pr/mod.rs.
#[derive(Debug, Clone)]
pub struct PrUrl {
    pub owner: String,
    pub repo: String,
    pub pr_number: u64,
}
