use super::types::{ClassifiedLine, LineKind};

/// Content substituted for context lines with nothing after the marker,
/// so the row keeps its height in the rendered columns.
pub const BLANK_CONTEXT: &str = " ";

/// Classify one raw patch line (without its terminator).
///
/// | starts with | kind     | content                         |
/// |-------------|----------|---------------------------------|
/// | `@@`        | Hunk     | the whole line                  |
/// | `+`         | Addition | line minus the `+`              |
/// | `-`         | Deletion | line minus the `-`              |
/// | other       | Context  | line minus its first character  |
pub fn classify_line(line: &str) -> ClassifiedLine<'_> {
    if line.starts_with("@@") {
        return ClassifiedLine {
            kind: LineKind::Hunk,
            content: line,
        };
    }
    if let Some(content) = line.strip_prefix('+') {
        return ClassifiedLine {
            kind: LineKind::Addition,
            content,
        };
    }
    if let Some(content) = line.strip_prefix('-') {
        return ClassifiedLine {
            kind: LineKind::Deletion,
            content,
        };
    }

    let mut chars = line.chars();
    chars.next();
    let content = match chars.as_str() {
        "" => BLANK_CONTEXT,
        rest => rest,
    };
    ClassifiedLine {
        kind: LineKind::Context,
        content,
    }
}
