pub mod types;

pub use types::{DiffView, FileView, OutputFormat, RenderOptions, ViewMode};

use colored::{ColoredString, Colorize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::diff::{self, DiffRow, LineKind};
use crate::filter;
use crate::pr::PullRequest;

pub const DEFAULT_TITLE: &str = "CODE DIFFERENTIAL ANALYSIS";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write output file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error("Failed to encode view as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Filter the PR's files and lay out every available patch.
pub fn build(pr: &PullRequest, options: &RenderOptions) -> DiffView {
    let shown = filter::filter_files(&pr.files, options.status, &options.query);
    let (additions, deletions) = filter::totals(shown.iter().copied());

    let files: Vec<FileView> = shown
        .into_iter()
        .map(|file| FileView {
            rows: file.patch.as_deref().map(diff::layout_patch),
            truncated: file.is_truncated(),
            file: file.clone(),
        })
        .collect();
    debug!(shown = files.len(), total = pr.files.len(), "built diff view");

    DiffView {
        title: DEFAULT_TITLE.to_string(),
        pr_number: pr.number,
        pr_title: pr.title.clone(),
        author: pr.author.clone(),
        repo_name: pr.repo_name.clone(),
        view: options.view,
        collapsed: options.collapsed,
        large_pr: files.len() >= options.large_pr_threshold,
        total_files: pr.files.len(),
        status_counts: filter::status_counts(&pr.files),
        additions,
        deletions,
        filtered: options.status != filter::StatusFilter::All || !options.query.is_empty(),
        files,
        column_width: options.column_width,
    }
}

/// Write the view in the requested format.
///
/// Terminal output always goes to stdout. Markdown and JSON go to
/// `output_path` when given, stdout otherwise.
#[instrument(skip(view), fields(files = view.files.len()))]
pub fn output(
    view: &DiffView,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> Result<(), RenderError> {
    let text = match format {
        OutputFormat::Terminal => {
            if output_path.is_some() {
                warn!("terminal format writes to stdout, ignoring output path");
            }
            print!("{}", format_terminal(view));
            return Ok(());
        }
        OutputFormat::Markdown => format_markdown(view),
        OutputFormat::Json => serde_json::to_string_pretty(view)? + "\n",
    };

    match output_path {
        None => {
            debug!("writing view to stdout");
            print!("{}", text);
        }
        Some(path) => {
            debug!(path = %path.display(), "writing view to file");
            std::fs::write(path, text)?;
        }
    }
    Ok(())
}

/// Format the view for the terminal with colors.
///
/// CODE DIFFERENTIAL ANALYSIS  octo-org/command-deck #42
/// 3 FILES MODIFIED  +12  -4
///
/// [MODIFIED] src/auth/config.rs  +3 -1
///    1 │ fn main() {          │    1 │ fn main() {
/// ...
pub fn format_terminal(view: &DiffView) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}", view.title.cyan().bold()));
    if view.pr_number > 0 && !view.repo_name.is_empty() {
        out.push_str(&format!("  {}", format!("{} #{}", view.repo_name, view.pr_number).dimmed()));
    }
    out.push('\n');
    if !view.pr_title.is_empty() {
        out.push_str(&format!("{}\n", view.pr_title));
    }

    if view.total_files == 0 {
        out.push_str(&format!("\n{}\n", "NO FILE CHANGES DETECTED".dimmed()));
        return out;
    }

    if view.filtered {
        let counts = &view.status_counts;
        out.push_str(&format!(
            "Showing {} of {} files  (added {}, removed {}, modified {}, renamed {})\n",
            view.files.len(),
            view.total_files,
            counts.added,
            counts.removed,
            counts.modified,
            counts.renamed
        ));
        if view.files.is_empty() {
            out.push_str(&format!("\n{}\n", "No files match the current filters".yellow()));
            return out;
        }
    }

    out.push_str(&format!(
        "{} {}  {}  {}\n",
        view.files.len(),
        if view.files.len() == 1 { "FILE MODIFIED" } else { "FILES MODIFIED" },
        format!("+{}", view.additions).green(),
        format!("-{}", view.deletions).red()
    ));
    if view.large_pr {
        out.push_str(&format!(
            "{}\n",
            format!("⚠ SHOWING FIRST {} FILES - View full diff on GitHub", view.files.len()).yellow()
        ));
    }

    for file_view in &view.files {
        out.push('\n');
        push_file_card(&mut out, file_view);
        if view.collapsed {
            continue;
        }
        if file_view.truncated {
            out.push_str(&format!("{}\n", "⚠ PATCH TRUNCATED - View full diff on GitHub".yellow()));
        }
        match (&file_view.rows, file_view.placeholder()) {
            (_, Some(placeholder)) => out.push_str(&format!("  {}\n", placeholder.dimmed())),
            (Some(rows), None) => match view.view {
                ViewMode::Split => push_split_rows(&mut out, rows, view.column_width),
                ViewMode::Unified => push_unified_rows(&mut out, rows),
            },
            (None, None) => {}
        }
    }
    out
}

fn push_file_card(out: &mut String, file_view: &FileView) {
    let file = &file_view.file;
    out.push_str(&format!(
        "{} {}",
        colorize_status(&file_view.status_label()),
        file.filename.bold()
    ));
    if let (Some(previous), "renamed") = (&file.previous_filename, file.effective_status()) {
        out.push_str(&format!(" {}", format!("← {}", previous).dimmed()));
    }
    out.push_str(&format!(
        "  {} {}\n",
        format!("+{}", file.additions).green(),
        format!("-{}", file.deletions).red()
    ));
}

fn push_split_rows(out: &mut String, rows: &[DiffRow], width: usize) {
    let separator = "│".dimmed();
    for row in rows {
        if row.kind == LineKind::Hunk {
            out.push_str(&format!("{}\n", fit(&row.left_content, width * 2 + 16).cyan().bold()));
            continue;
        }
        let left = fit(&row.left_content, width);
        // Nothing follows the right column, so it is not padded.
        let right = fit(&row.right_content, width).trim_end().to_string();
        let (left, right) = match row.kind {
            LineKind::Deletion => (left.red(), right.normal()),
            LineKind::Addition => (left.normal(), right.green()),
            _ => (left.normal(), right.normal()),
        };
        out.push_str(&format!(
            "{} {} {} {} {} {} {}\n",
            gutter(row.left_line),
            separator,
            left,
            separator,
            gutter(row.right_line),
            separator,
            right
        ));
    }
}

fn push_unified_rows(out: &mut String, rows: &[DiffRow]) {
    for row in rows {
        let line = match row.kind {
            LineKind::Hunk => {
                out.push_str(&format!("{}\n", row.left_content.cyan().bold()));
                continue;
            }
            LineKind::Deletion => format!("-{}", row.left_content).red(),
            LineKind::Addition => format!("+{}", row.right_content).green(),
            LineKind::Context => format!(" {}", row.left_content).normal(),
        };
        out.push_str(&format!(
            "{} {} {}\n",
            gutter(row.left_line),
            gutter(row.right_line),
            line
        ));
    }
}

/// Right-aligned line number column, blank when the row has no number.
fn gutter(line: Option<usize>) -> ColoredString {
    match line {
        Some(n) => format!("{:>4}", n).dimmed(),
        None => "    ".normal(),
    }
}

/// Pad or cut `content` to exactly `width` characters.
fn fit(content: &str, width: usize) -> String {
    let count = content.chars().count();
    if count <= width {
        return format!("{:<width$}", content, width = width);
    }
    let mut cut: String = content.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Write the view as markdown.
///
/// # CODE DIFFERENTIAL ANALYSIS — octo-org/command-deck #42
/// **3 files modified** | **+12 -4**
///
/// ### [MODIFIED] `src/auth/config.rs` (+3 -1)
/// ```diff
/// @@ -1,3 +1,3 @@
/// ...
/// ```
pub fn format_markdown(view: &DiffView) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}", view.title));
    if view.pr_number > 0 && !view.repo_name.is_empty() {
        md.push_str(&format!(" — {} #{}", view.repo_name, view.pr_number));
    }
    md.push_str("\n\n");
    if !view.pr_title.is_empty() {
        md.push_str(&format!("**{}**", view.pr_title));
        if !view.author.is_empty() {
            md.push_str(&format!(" by {}", view.author));
        }
        md.push_str("\n\n");
    }

    if view.total_files == 0 {
        md.push_str("_NO FILE CHANGES DETECTED_\n");
        return md;
    }
    if view.filtered {
        md.push_str(&format!("Showing {} of {} files\n\n", view.files.len(), view.total_files));
        if view.files.is_empty() {
            md.push_str("_No files match the current filters_\n");
            return md;
        }
    }

    md.push_str(&format!(
        "**{} {}** | **+{} -{}**\n\n",
        view.files.len(),
        if view.files.len() == 1 { "file modified" } else { "files modified" },
        view.additions,
        view.deletions
    ));
    if view.large_pr {
        md.push_str(&format!(
            "> ⚠ Showing first {} files - view the full diff on GitHub\n\n",
            view.files.len()
        ));
    }

    for file_view in &view.files {
        let file = &file_view.file;
        md.push_str(&format!("### [{}] `{}`", file_view.status_label(), file.filename));
        if let (Some(previous), "renamed") = (&file.previous_filename, file.effective_status()) {
            md.push_str(&format!(" ← `{}`", previous));
        }
        md.push_str(&format!(" (+{} -{})\n\n", file.additions, file.deletions));
        if view.collapsed {
            continue;
        }
        if file_view.truncated {
            md.push_str("> ⚠ Patch truncated - view the full diff on GitHub\n\n");
        }
        match (&file_view.rows, file_view.placeholder()) {
            (_, Some(placeholder)) => md.push_str(&format!("_{}_\n\n", placeholder)),
            (Some(rows), None) => match view.view {
                ViewMode::Unified => push_markdown_unified(&mut md, rows),
                ViewMode::Split => push_markdown_split(&mut md, rows),
            },
            (None, None) => {}
        }
    }
    md
}

fn push_markdown_unified(md: &mut String, rows: &[DiffRow]) {
    md.push_str("```diff\n");
    for row in rows {
        match row.kind {
            LineKind::Hunk => md.push_str(&row.left_content),
            LineKind::Deletion => md.push_str(&format!("-{}", row.left_content)),
            LineKind::Addition => md.push_str(&format!("+{}", row.right_content)),
            LineKind::Context => md.push_str(&format!(" {}", row.left_content)),
        }
        md.push('\n');
    }
    md.push_str("```\n\n");
}

fn push_markdown_split(md: &mut String, rows: &[DiffRow]) {
    md.push_str("| Old | | New | |\n|---:|---|---:|---|\n");
    for row in rows {
        if row.kind == LineKind::Hunk {
            md.push_str(&format!("| | **{}** | | |\n", escape_cell(&row.left_content)));
            continue;
        }
        let marker = match row.kind {
            LineKind::Deletion => ("-", ""),
            LineKind::Addition => ("", "+"),
            _ => ("", ""),
        };
        md.push_str(&format!(
            "| {} | {}{} | {} | {}{} |\n",
            row.left_line.map(|n| n.to_string()).unwrap_or_default(),
            marker.0,
            escape_cell(&row.left_content),
            row.right_line.map(|n| n.to_string()).unwrap_or_default(),
            marker.1,
            escape_cell(&row.right_content),
        ));
    }
    md.push('\n');
}

fn escape_cell(content: &str) -> String {
    content.replace('|', "\\|")
}

/// Helper to colorize a file status label for terminal output.
fn colorize_status(label: &str) -> ColoredString {
    let tag = format!("[{}]", label);
    match label {
        "ADDED" => tag.green().bold(),
        "REMOVED" => tag.red().bold(),
        "MODIFIED" => tag.yellow().bold(),
        "RENAMED" => tag.purple().bold(),
        _ => tag.dimmed(),
    }
}
