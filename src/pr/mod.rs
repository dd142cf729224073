pub mod diff;
pub mod types;

pub use types::{FileChange, PrUrl, PullRequest};

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::Config;
use types::TRUNCATION_SENTINEL;

#[derive(Debug, Error)]
pub enum PrError {
    #[error("GitHub API request failed: {0}")]
    ApiRequest(#[from] reqwest::Error),

    #[error("Invalid PR URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to parse diff: {0}")]
    DiffParse(String),

    #[error("Failed to read patch file: {0}")]
    PatchRead(#[from] std::io::Error),

    #[error("Failed to decode file list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where the changed files of a pull request come from.
#[async_trait]
pub trait PrSource: Send + Sync {
    /// Short description for logs (e.g., "github", "fixture").
    fn name(&self) -> &str;

    /// Load the pull request and its changed files.
    async fn load(&self) -> Result<PullRequest, PrError>;
}

/// Parse a GitHub PR URL into its component parts.
///
/// Expected format: https://github.com/{owner}/{repo}/pull/{number}
pub fn parse_pr_url(url: &str) -> Result<PrUrl, PrError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| PrError::InvalidUrl(url.to_string()))?;

    if parsed.host_str() != Some("github.com") {
        return Err(PrError::InvalidUrl(url.to_string()));
    }

    let segments: Vec<_> = parsed
        .path_segments()
        .ok_or_else(|| PrError::InvalidUrl(url.to_string()))?
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.len() != 4 || segments[2] != "pull" {
        return Err(PrError::InvalidUrl(url.to_string()));
    }

    let pr_number = segments[3]
        .parse::<u64>()
        .map_err(|_| PrError::InvalidUrl(url.to_string()))?;

    Ok(PrUrl {
        owner: segments[0].to_string(),
        repo: segments[1].to_string(),
        pr_number,
    })
}

/// Keep the first `max_files` files and cut every patch longer than
/// `max_patch_bytes`, marking it with the truncation sentinel.
pub fn limit_files(
    mut files: Vec<FileChange>,
    max_files: usize,
    max_patch_bytes: usize,
) -> Vec<FileChange> {
    if files.len() > max_files {
        debug!(total = files.len(), kept = max_files, "dropping files beyond limit");
        files.truncate(max_files);
    }
    for file in &mut files {
        if let Some(patch) = file.patch.take() {
            file.patch = Some(truncate_patch(patch, max_patch_bytes));
        }
    }
    files
}

/// Cut `patch` to at most `max_bytes` (on a char boundary) and append the
/// truncation sentinel. Patches within the limit are returned untouched.
pub fn truncate_patch(mut patch: String, max_bytes: usize) -> String {
    if patch.len() <= max_bytes {
        return patch;
    }
    let mut end = max_bytes;
    while !patch.is_char_boundary(end) {
        end -= 1;
    }
    patch.truncate(end);
    patch.push_str(TRUNCATION_SENTINEL);
    patch
}

/// Fetches a pull request from the GitHub REST API.
pub struct GitHubSource {
    pr_url: PrUrl,
    config: Config,
}

impl GitHubSource {
    pub fn new(pr_url: PrUrl, config: Config) -> Self {
        Self { pr_url, config }
    }
}

#[async_trait]
impl PrSource for GitHubSource {
    fn name(&self) -> &str {
        "github"
    }

    async fn load(&self) -> Result<PullRequest, PrError> {
        fetch_pull_request(&self.pr_url, &self.config).await
    }
}

/// Fetch PR metadata and its changed files from the GitHub API.
///
/// The pull and its file list are requested concurrently. The token is
/// optional; public repositories can be read without one.
#[instrument(skip(config), fields(owner = %pr_url.owner, repo = %pr_url.repo, pr = pr_url.pr_number))]
pub async fn fetch_pull_request(pr_url: &PrUrl, config: &Config) -> Result<PullRequest, PrError> {
    let token = config.github_token();
    if token.is_none() {
        debug!("no GitHub token configured, sending unauthenticated requests");
    }
    let client = reqwest::Client::new();
    let base_url = format!(
        "{}/repos/{}/{}/pulls/{}",
        config.github.api_base().trim_end_matches('/'),
        pr_url.owner,
        pr_url.repo,
        pr_url.pr_number
    );

    #[derive(serde::Deserialize)]
    struct User {
        login: String,
    }

    #[derive(serde::Deserialize)]
    struct PullResponse {
        number: u64,
        title: String,
        state: String,
        user: Option<User>,
    }

    let get = |url: String| {
        let request = client
            .get(url)
            .header("User-Agent", "pr-diff-deck")
            .header("Accept", "application/vnd.github.v3+json");
        match token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    };

    debug!("fetching PR metadata and files from GitHub API");
    let metadata_request = async {
        get(base_url.clone())
            .send()
            .await?
            .error_for_status()?
            .json::<PullResponse>()
            .await
    };
    let files_request = async {
        get(format!("{}/files?per_page=100", base_url))
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<FileChange>>()
            .await
    };
    let (metadata, files) = tokio::try_join!(metadata_request, files_request)?;
    debug!(title = %metadata.title, files = files.len(), "received PR metadata and files");

    let files = limit_files(files, config.viewer.max_files, config.viewer.max_patch_bytes);

    Ok(PullRequest {
        number: metadata.number,
        title: metadata.title,
        author: metadata
            .user
            .map(|user| user.login)
            .unwrap_or_else(|| "ghost".to_string()),
        state: metadata.state,
        repo_name: format!("{}/{}", pr_url.owner, pr_url.repo),
        files,
    })
}

/// Serves an embedded mock PR so the viewer can run without a GitHub token.
pub struct FixtureSource {
    max_patch_bytes: usize,
}

impl FixtureSource {
    pub fn new(config: &Config) -> Self {
        Self {
            max_patch_bytes: config.viewer.max_patch_bytes,
        }
    }
}

#[async_trait]
impl PrSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn load(&self) -> Result<PullRequest, PrError> {
        let json = include_str!("../../tests/fixtures/sample_pr_files.json");
        let files: Vec<FileChange> = serde_json::from_str(json)?;
        Ok(PullRequest {
            number: 42,
            title: "Add OAuth2 login flow".to_string(),
            author: "alice".to_string(),
            state: "open".to_string(),
            repo_name: "octo-org/command-deck".to_string(),
            files: limit_files(files, usize::MAX, self.max_patch_bytes),
        })
    }
}

/// Reads `git diff` output (or a single bare patch) from a local file.
pub struct PatchFileSource {
    path: PathBuf,
    max_patch_bytes: usize,
}

impl PatchFileSource {
    pub fn new(path: PathBuf, config: &Config) -> Self {
        Self {
            path,
            max_patch_bytes: config.viewer.max_patch_bytes,
        }
    }
}

#[async_trait]
impl PrSource for PatchFileSource {
    fn name(&self) -> &str {
        "patch-file"
    }

    async fn load(&self) -> Result<PullRequest, PrError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let display_name = self.path.display().to_string();
        let files = diff::parse_git_diff(&raw, &display_name)?;
        debug!(files = files.len(), bytes = raw.len(), "parsed patch file");
        Ok(PullRequest {
            number: 0,
            title: display_name.clone(),
            author: String::new(),
            state: String::new(),
            repo_name: display_name,
            files: limit_files(files, usize::MAX, self.max_patch_bytes),
        })
    }
}
