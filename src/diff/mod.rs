pub mod classify;
pub mod hunk;
pub mod types;

pub use types::{DiffRow, LineKind};

use tracing::debug;

/// Lay a unified-diff patch out into two columns.
///
/// Single pass over the lines of `patch`, keeping one counter per column.
/// A hunk header moves both counters to the starts it declares; a header
/// that does not parse leaves them where they were. Deletions and additions
/// are never paired up: each input line produces exactly one row, in input
/// order.
///
/// Total over any input: malformed text can only produce odd line numbers.
pub fn layout_patch(patch: &str) -> Vec<DiffRow> {
    let mut rows = Vec::new();
    // Number the next deletion/context line gets on the left, and the next
    // addition/context line gets on the right.
    let mut next_left = 1usize;
    let mut next_right = 1usize;

    for line in patch.lines() {
        let classified = classify::classify_line(line);
        match classified.kind {
            LineKind::Hunk => {
                match hunk::parse_hunk_header(classified.content) {
                    Some(start) => {
                        next_left = start.old_start;
                        next_right = start.new_start;
                    }
                    None => {
                        debug!(header = %classified.content, "unparseable hunk header, keeping line counters");
                    }
                }
                rows.push(DiffRow::hunk(classified.content));
            }
            LineKind::Addition => {
                rows.push(DiffRow::addition(next_right, classified.content));
                next_right += 1;
            }
            LineKind::Deletion => {
                rows.push(DiffRow::deletion(next_left, classified.content));
                next_left += 1;
            }
            LineKind::Context => {
                rows.push(DiffRow::context(next_left, next_right, classified.content));
                next_left += 1;
                next_right += 1;
            }
        }
    }

    debug!(rows = rows.len(), "laid out patch");
    rows
}
