use clap::ValueEnum;
use serde::Serialize;

use crate::diff::DiffRow;
use crate::filter::{StatusCounts, StatusFilter};
use crate::pr::FileChange;

/// How rows are laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Old file on the left, new file on the right
    #[default]
    Split,
    /// One column with `-`/`+` markers
    Unified,
}

/// Where and how the view is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Markdown,
    Json,
}

/// Settings that shape a DiffView.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub view: ViewMode,
    /// Print file cards only, without their rows
    pub collapsed: bool,
    pub status: StatusFilter,
    pub query: String,
    /// Characters per side in the split view
    pub column_width: usize,
    /// File count from which the "showing first files" banner appears
    pub large_pr_threshold: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            view: ViewMode::Split,
            collapsed: false,
            status: StatusFilter::All,
            query: String::new(),
            column_width: 60,
            large_pr_threshold: 20,
        }
    }
}

/// One file card: the file as received plus its laid-out rows.
#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    pub file: FileChange,
    /// None when the file carries no patch
    pub rows: Option<Vec<DiffRow>>,
    /// Whether the patch carries the truncation sentinel
    pub truncated: bool,
}

impl FileView {
    /// Text shown in place of rows, if there are none to show.
    pub fn placeholder(&self) -> Option<&'static str> {
        match &self.rows {
            None => match self.file.effective_status() {
                "added" | "removed" => Some("BINARY FILE OR TOO LARGE TO DISPLAY"),
                _ => Some("NO DIFF AVAILABLE"),
            },
            Some(rows) if rows.is_empty() => Some("NO CHANGES TO DISPLAY"),
            Some(_) => None,
        }
    }

    /// Card label, e.g. "ADDED"; unknown statuses are shown uppercased.
    pub fn status_label(&self) -> String {
        self.file.effective_status().to_uppercase()
    }
}

/// Everything the terminal, markdown and JSON writers need.
#[derive(Debug, Clone, Serialize)]
pub struct DiffView {
    pub title: String,
    pub pr_number: u64,
    pub pr_title: String,
    pub author: String,
    pub repo_name: String,
    pub view: ViewMode,
    pub collapsed: bool,
    /// Files left after filtering, in input order
    pub files: Vec<FileView>,
    /// Files before filtering
    pub total_files: usize,
    /// Per-status counts before filtering
    pub status_counts: StatusCounts,
    /// Lines added across the shown files
    pub additions: usize,
    /// Lines deleted across the shown files
    pub deletions: usize,
    /// Whether a filter or search narrowed the list
    pub filtered: bool,
    /// Shown file count reached the large-PR threshold
    pub large_pr: bool,
    /// Characters per side in the split view
    #[serde(skip)]
    pub column_width: usize,
}
