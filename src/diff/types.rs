use serde::Serialize;

/// Classification of a single raw line of a unified diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Hunk,
    Addition,
    Deletion,
    Context,
}

/// One line of a patch after its marker has been interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub kind: LineKind,
    /// Line without its leading marker. Hunk lines keep the full `@@ ... @@` text.
    pub content: &'a str,
}

/// Starting line numbers declared by a `@@ -a,b +c,d @@` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkStart {
    /// First line of the hunk in the old file (`a`)
    pub old_start: usize,
    /// First line of the hunk in the new file (`c`)
    pub new_start: usize,
}

/// A single row of the two-column layout.
///
/// Rows are made through the constructors below, which keep the columns
/// exclusive: additions have nothing on the left, deletions nothing on the
/// right. Context rows show the same text on both sides; hunk rows carry no
/// line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRow {
    pub kind: LineKind,
    pub left_line: Option<usize>,
    pub right_line: Option<usize>,
    pub left_content: String,
    pub right_content: String,
}

impl DiffRow {
    pub fn hunk(header: &str) -> Self {
        Self {
            kind: LineKind::Hunk,
            left_line: None,
            right_line: None,
            left_content: header.to_string(),
            right_content: header.to_string(),
        }
    }

    pub fn addition(right_line: usize, content: &str) -> Self {
        Self {
            kind: LineKind::Addition,
            left_line: None,
            right_line: Some(right_line),
            left_content: String::new(),
            right_content: content.to_string(),
        }
    }

    pub fn deletion(left_line: usize, content: &str) -> Self {
        Self {
            kind: LineKind::Deletion,
            left_line: Some(left_line),
            right_line: None,
            left_content: content.to_string(),
            right_content: String::new(),
        }
    }

    pub fn context(left_line: usize, right_line: usize, content: &str) -> Self {
        Self {
            kind: LineKind::Context,
            left_line: Some(left_line),
            right_line: Some(right_line),
            left_content: content.to_string(),
            right_content: content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_constructors_keep_columns_exclusive() {
        let add = DiffRow::addition(3, "new");
        assert_eq!(add.left_line, None);
        assert!(add.left_content.is_empty());

        let del = DiffRow::deletion(4, "old");
        assert_eq!(del.right_line, None);
        assert!(del.right_content.is_empty());

        let ctx = DiffRow::context(5, 6, "same");
        assert_eq!(ctx.left_content, ctx.right_content);

        let hunk = DiffRow::hunk("@@ -1 +1 @@");
        assert_eq!((hunk.left_line, hunk.right_line), (None, None));
        assert_eq!(hunk.left_content, "@@ -1 +1 @@");
    }

    #[test]
    fn test_row_serializes_kind_lowercase() {
        let json = serde_json::to_value(DiffRow::addition(1, "x")).unwrap();
        assert_eq!(json["kind"], "addition");
        assert_eq!(json["right_line"], 1);
        assert!(json["left_line"].is_null());
    }
}
