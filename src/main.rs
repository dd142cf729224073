mod config;
mod diff;
mod filter;
mod pr;
mod render;

use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

use filter::StatusFilter;
use pr::PrSource;
use render::{OutputFormat, RenderOptions, ViewMode};

/// PR Diff Deck — CLI tool that takes a GitHub Pull Request URL and shows
/// every changed file as a side-by-side (or unified) diff.
#[derive(Parser, Debug)]
#[command(name = "pr-diff-deck", version, about)]
struct Cli {
    /// GitHub Pull Request URL (e.g., https://github.com/org/repo/pull/42)
    ///
    /// Not required when --mock or --patch-file is used.
    pr_url: Option<String>,

    /// Use a built-in mock PR for demo purposes (no GitHub token needed)
    #[arg(long, conflicts_with_all = ["pr_url", "patch_file"])]
    r#mock: bool,

    /// Read `git diff` output (or a single patch) from a local file
    #[arg(long, conflicts_with = "pr_url")]
    patch_file: Option<PathBuf>,

    /// Side-by-side or single-column rows
    #[arg(long, value_enum, default_value_t = ViewMode::Split)]
    view: ViewMode,

    /// Output format; defaults to markdown when --output is given, terminal otherwise
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Only show files with this status
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    status: StatusFilter,

    /// Only show files whose path contains this text (case-insensitive)
    #[arg(long, default_value = "")]
    search: String,

    /// Show file cards without their diffs
    #[arg(long)]
    collapsed: bool,

    /// Optional output file path for markdown or JSON output
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = config::Config::load()?;

    let source: Box<dyn PrSource> = if cli.r#mock {
        info!("using mock PR data for demo");
        Box::new(pr::FixtureSource::new(&config))
    } else if let Some(path) = cli.patch_file.clone() {
        info!(path = %path.display(), "reading patch file");
        Box::new(pr::PatchFileSource::new(path, &config))
    } else {
        let pr_url = cli.pr_url.as_deref().ok_or(
            "PR URL is required unless --mock or --patch-file is used. Usage: pr-diff-deck <URL> or pr-diff-deck --mock",
        )?;
        info!("parsing PR URL");
        let parsed_url = pr::parse_pr_url(pr_url)?;
        debug!(owner = %parsed_url.owner, repo = %parsed_url.repo, pr = parsed_url.pr_number, "parsed PR URL");
        Box::new(pr::GitHubSource::new(parsed_url, config.clone()))
    };

    let _main_span = info_span!("pr_diff", source = source.name()).entered();

    info!("loading pull request");
    let pull_request = source.load().await?;
    info!(files = pull_request.files.len(), "loaded changed files");

    let options = RenderOptions {
        view: cli.view,
        collapsed: cli.collapsed,
        status: cli.status,
        query: cli.search,
        column_width: config.viewer.column_width,
        large_pr_threshold: config.viewer.large_pr_threshold,
    };

    info!("laying out diffs");
    let view = render::build(&pull_request, &options);

    let format = cli.format.unwrap_or(if cli.output.is_some() {
        OutputFormat::Markdown
    } else {
        OutputFormat::Terminal
    });
    render::output(&view, format, cli.output.as_deref())?;
    info!(shown = view.files.len(), total = view.total_files, "done");

    Ok(())
}
