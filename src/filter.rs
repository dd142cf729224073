use clap::ValueEnum;
use serde::Serialize;

use crate::pr::FileChange;

/// Restricts the file list to one change status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Added,
    Removed,
    Modified,
    Renamed,
}

impl StatusFilter {
    fn matches(self, file: &FileChange) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Added => file.status == "added",
            StatusFilter::Removed => file.status == "removed",
            StatusFilter::Modified => file.status == "modified",
            StatusFilter::Renamed => file.status == "renamed",
        }
    }
}

/// Number of files per known status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    pub renamed: usize,
}

/// Apply the status filter, then a case-insensitive search over the current
/// and previous file paths. An empty query matches everything.
pub fn filter_files<'a>(
    files: &'a [FileChange],
    status: StatusFilter,
    query: &str,
) -> Vec<&'a FileChange> {
    let query = query.to_lowercase();
    files
        .iter()
        .filter(|file| status.matches(file))
        .filter(|file| {
            query.is_empty()
                || file.filename.to_lowercase().contains(&query)
                || file
                    .previous_filename
                    .as_deref()
                    .is_some_and(|prev| prev.to_lowercase().contains(&query))
        })
        .collect()
}

/// Count files by status. Files without a status count as modified;
/// statuses other than the four known ones are ignored.
pub fn status_counts(files: &[FileChange]) -> StatusCounts {
    files
        .iter()
        .fold(StatusCounts::default(), |mut counts, file| {
            match file.effective_status() {
                "added" => counts.added += 1,
                "removed" => counts.removed += 1,
                "modified" => counts.modified += 1,
                "renamed" => counts.renamed += 1,
                _ => {}
            }
            counts
        })
}

/// Total (additions, deletions) across `files`.
pub fn totals<'a>(files: impl IntoIterator<Item = &'a FileChange>) -> (usize, usize) {
    files
        .into_iter()
        .fold((0, 0), |(add, del), f| (add + f.additions, del + f.deletions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, status: &str, additions: usize, deletions: usize) -> FileChange {
        FileChange {
            filename: name.to_string(),
            status: status.to_string(),
            additions,
            deletions,
            changes: additions + deletions,
            patch: None,
            previous_filename: None,
        }
    }

    fn sample_files() -> Vec<FileChange> {
        let mut renamed = file("README.md", "renamed", 2, 2);
        renamed.previous_filename = Some("docs/README.txt".to_string());
        vec![
            file("src/components/Button.tsx", "modified", 15, 5),
            file("src/utils/helpers.ts", "added", 50, 0),
            file("src/legacy/old.js", "removed", 0, 30),
            renamed,
        ]
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        let files = sample_files();
        assert_eq!(filter_files(&files, StatusFilter::All, "").len(), 4);
    }

    #[test]
    fn test_filter_by_status() {
        let files = sample_files();
        let added = filter_files(&files, StatusFilter::Added, "");
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].filename, "src/utils/helpers.ts");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let files = sample_files();
        let found = filter_files(&files, StatusFilter::All, "BUTTON");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].filename, "src/components/Button.tsx");
    }

    #[test]
    fn test_search_matches_previous_filename() {
        let files = sample_files();
        let found = filter_files(&files, StatusFilter::All, "docs/");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].filename, "README.md");
    }

    #[test]
    fn test_status_and_search_combine() {
        let files = sample_files();
        assert!(filter_files(&files, StatusFilter::Removed, "helpers").is_empty());
    }

    #[test]
    fn test_status_counts() {
        let mut files = sample_files();
        files.push(file("unknown.rs", "", 1, 1));
        files.push(file("copied.rs", "copied", 1, 0));
        let counts = status_counts(&files);
        assert_eq!(
            counts,
            StatusCounts {
                added: 1,
                removed: 1,
                modified: 2,
                renamed: 1,
            }
        );
    }

    #[test]
    fn test_totals() {
        let files = sample_files();
        assert_eq!(totals(&files), (67, 37));
        assert_eq!(totals(filter_files(&files, StatusFilter::Added, "")), (50, 0));
    }
}
