use super::types::FileChange;
use super::PrError;

/// Split `git diff` output into per-file changes shaped like the GitHub
/// files endpoint returns them.
///
/// Each file section starts with:
///   diff --git a/{path} b/{path}
///
/// New files have `--- /dev/null`, deleted files `+++ /dev/null`, renames a
/// `rename from {path}` line. Everything from the first `@@` header of a
/// section onwards becomes that file's `patch`.
///
/// Text without any `diff --git` header is taken to be a single bare patch
/// and reported as one modified file named `fallback_name`.
pub fn parse_git_diff(raw_diff: &str, fallback_name: &str) -> Result<Vec<FileChange>, PrError> {
    if raw_diff.trim().is_empty() {
        return Ok(Vec::new());
    }

    if !raw_diff.lines().any(|line| line.starts_with("diff --git ")) {
        return Ok(vec![bare_patch(raw_diff, fallback_name)]);
    }

    let mut files = Vec::new();
    let mut current: Option<Section> = None;

    for line in raw_diff.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            if let Some(section) = current.take() {
                files.push(section.finish());
            }
            current = Some(Section::start(rest)?);
            continue;
        }

        let Some(section) = current.as_mut() else {
            continue;
        };

        if line.starts_with("@@") {
            section.in_hunk = true;
            section.patch_lines.push(line);
            continue;
        }

        if !section.in_hunk {
            section.read_header(line);
            continue;
        }

        if line.starts_with('+') {
            section.file.additions += 1;
        } else if line.starts_with('-') {
            section.file.deletions += 1;
        }
        section.patch_lines.push(line);
    }

    if let Some(section) = current.take() {
        files.push(section.finish());
    }
    Ok(files)
}

/// A file section of a `git diff` being accumulated.
struct Section<'a> {
    file: FileChange,
    in_hunk: bool,
    patch_lines: Vec<&'a str>,
}

impl<'a> Section<'a> {
    fn start(header: &str) -> Result<Self, PrError> {
        let mut parts = header.split_whitespace();
        let a_path = parts
            .next()
            .ok_or_else(|| PrError::DiffParse("Missing a/ path in diff header".to_string()))?;
        let b_path = parts
            .next()
            .ok_or_else(|| PrError::DiffParse("Missing b/ path in diff header".to_string()))?;
        let filename = b_path
            .strip_prefix("b/")
            .or_else(|| a_path.strip_prefix("a/"))
            .unwrap_or(b_path)
            .to_string();

        Ok(Self {
            file: FileChange {
                filename,
                status: "modified".to_string(),
                additions: 0,
                deletions: 0,
                changes: 0,
                patch: None,
                previous_filename: None,
            },
            in_hunk: false,
            patch_lines: Vec::new(),
        })
    }

    fn read_header(&mut self, line: &str) {
        if line.starts_with("new file mode") || line == "--- /dev/null" {
            self.file.status = "added".to_string();
        } else if line.starts_with("deleted file mode") || line == "+++ /dev/null" {
            self.file.status = "removed".to_string();
        } else if let Some(previous) = line.strip_prefix("rename from ") {
            self.file.status = "renamed".to_string();
            self.file.previous_filename = Some(previous.to_string());
        }
    }

    fn finish(mut self) -> FileChange {
        self.file.changes = self.file.additions + self.file.deletions;
        if !self.patch_lines.is_empty() {
            self.file.patch = Some(self.patch_lines.join("\n"));
        }
        self.file
    }
}

fn bare_patch(raw_diff: &str, name: &str) -> FileChange {
    let mut additions = 0;
    let mut deletions = 0;
    for line in raw_diff.lines() {
        if line.starts_with('+') {
            additions += 1;
        } else if line.starts_with('-') {
            deletions += 1;
        }
    }
    FileChange {
        filename: name.to_string(),
        status: "modified".to_string(),
        additions,
        deletions,
        changes: additions + deletions,
        patch: Some(raw_diff.trim_end_matches('\n').to_string()),
        previous_filename: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample unified diff for testing
    const SAMPLE_DIFF: &str = r#"diff --git a/src/main.rs b/src/main.rs
index abc1234..def5678 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,5 +1,7 @@
 fn main() {
-    println!("old");
+    println!("new");
+    // Added a comment
 }
"#;

    #[test]
    fn test_parse_single_file_diff() {
        let files = parse_git_diff(SAMPLE_DIFF, "unused").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "src/main.rs");
        assert_eq!(files[0].status, "modified");
        assert_eq!(files[0].additions, 2);
        assert_eq!(files[0].deletions, 1);
        assert_eq!(files[0].changes, 3);
        let patch = files[0].patch.as_deref().unwrap();
        assert!(patch.starts_with("@@ -1,5 +1,7 @@"));
        assert!(!patch.contains("+++ b/src/main.rs"));
    }

    #[test]
    fn test_parse_new_file_diff() {
        let diff = r#"diff --git a/new_file.txt b/new_file.txt
new file mode 100644
index 0000000..e69de29
--- /dev/null
+++ b/new_file.txt
@@ -0,0 +1,2 @@
+hello
+world
"#;
        let files = parse_git_diff(diff, "unused").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].status, "added");
        assert_eq!(files[0].additions, 2);
    }

    #[test]
    fn test_parse_deleted_file_diff() {
        let diff = r#"diff --git a/old_file.txt b/old_file.txt
deleted file mode 100644
index e69de29..0000000
--- a/old_file.txt
+++ /dev/null
@@ -1,2 +0,0 @@
-hello
-world
"#;
        let files = parse_git_diff(diff, "unused").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].status, "removed");
        assert_eq!(files[0].deletions, 2);
    }

    #[test]
    fn test_parse_rename_and_binary() {
        let diff = r#"diff --git a/README.txt b/README.md
similarity index 100%
rename from README.txt
rename to README.md
diff --git a/logo.png b/logo.png
index 1111111..2222222 100644
Binary files a/logo.png and b/logo.png differ
"#;
        let files = parse_git_diff(diff, "unused").unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].status, "renamed");
        assert_eq!(files[0].previous_filename.as_deref(), Some("README.txt"));
        assert!(files[0].patch.is_none());
        assert_eq!(files[1].filename, "logo.png");
        assert!(files[1].patch.is_none());
    }

    #[test]
    fn test_triple_dash_inside_hunk_is_a_deletion() {
        let diff = "diff --git a/a.md b/a.md\n--- a/a.md\n+++ b/a.md\n@@ -1,2 +1,1 @@\n--- rule\n keep\n";
        let files = parse_git_diff(diff, "unused").unwrap();
        assert_eq!(files[0].deletions, 1);
        assert_eq!(files[0].status, "modified");
    }

    #[test]
    fn test_bare_patch_uses_fallback_name() {
        let files = parse_git_diff("@@ -1 +1 @@\n-a\n+b\n", "change.patch").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].filename, "change.patch");
        assert_eq!(files[0].patch.as_deref(), Some("@@ -1 +1 @@\n-a\n+b"));
        assert_eq!((files[0].additions, files[0].deletions), (1, 1));
    }

    #[test]
    fn test_parse_empty_diff() {
        let files = parse_git_diff("", "unused").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_malformed_git_header() {
        assert!(parse_git_diff("diff --git onlyone\n", "unused").is_err());
    }
}
