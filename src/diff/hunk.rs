use super::types::HunkStart;

/// Largest start accepted. A patch cannot hold more than `isize::MAX` lines,
/// so counters starting at or below this never overflow.
pub const MAX_START: usize = usize::MAX / 2;

/// Parse the starting line numbers out of a hunk header.
///
/// Accepts `@@ -a[,b] +c[,d] @@` anywhere in the line; the counts are
/// optional and ignored. Returns `None` when no such marker is present or a
/// start is above [`MAX_START`].
pub fn parse_hunk_header(line: &str) -> Option<HunkStart> {
    line.match_indices("@@ -")
        .find_map(|(idx, marker)| parse_ranges(&line[idx + marker.len()..]))
}

/// Parse `a[,b] +c[,d] @@` following the `@@ -` marker.
fn parse_ranges(rest: &str) -> Option<HunkStart> {
    let (old_start, rest) = parse_range(rest)?;
    let rest = rest.strip_prefix(" +")?;
    let (new_start, rest) = parse_range(rest)?;
    rest.starts_with(" @@").then_some(HunkStart {
        old_start,
        new_start,
    })
}

/// Parse `start[,count]`, returning the start and the unconsumed input.
fn parse_range(input: &str) -> Option<(usize, &str)> {
    let (start, rest) = take_digits(input);
    if start.is_empty() {
        return None;
    }
    let start = start.parse::<usize>().ok().filter(|&n| n <= MAX_START)?;
    let rest = rest.strip_prefix(',').unwrap_or(rest);
    let (_count, rest) = take_digits(rest);
    Some((start, rest))
}

fn take_digits(input: &str) -> (&str, &str) {
    let end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    input.split_at(end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(line: &str) -> Option<(usize, usize)> {
        parse_hunk_header(line).map(|h| (h.old_start, h.new_start))
    }

    #[test]
    fn test_parse_full_header() {
        assert_eq!(starts("@@ -10,3 +20,3 @@"), Some((10, 20)));
    }

    #[test]
    fn test_parse_header_without_counts() {
        assert_eq!(starts("@@ -7 +9 @@"), Some((7, 9)));
        assert_eq!(starts("@@ -7,2 +9 @@"), Some((7, 9)));
    }

    #[test]
    fn test_parse_header_with_section_heading() {
        assert_eq!(starts("@@ -1,5 +1,7 @@ fn main() {"), Some((1, 1)));
    }

    #[test]
    fn test_parse_new_file_header() {
        assert_eq!(starts("@@ -0,0 +1,2 @@"), Some((0, 1)));
    }

    #[test]
    fn test_parse_malformed_headers() {
        assert_eq!(starts("@@ garbage @@"), None);
        assert_eq!(starts("@@ -a,1 +1 @@"), None);
        assert_eq!(starts("@@ -1,1 +1,1"), None);
        assert_eq!(starts("@@ -1,1 2,1 @@"), None);
        assert_eq!(starts("@@"), None);
    }

    #[test]
    fn test_parse_overflowing_start_is_unparseable() {
        assert_eq!(starts("@@ -99999999999999999999999 +1 @@"), None);
    }

    #[test]
    fn test_parse_start_above_limit_is_unparseable() {
        assert_eq!(starts(&format!("@@ -{} +1 @@", usize::MAX)), None);
        assert_eq!(starts(&format!("@@ -1 +{} @@", MAX_START + 1)), None);
        assert_eq!(starts(&format!("@@ -{} +1 @@", MAX_START)), Some((MAX_START, 1)));
    }

    #[test]
    fn test_parse_combined_diff_marker() {
        // The first `@@ -` occurrence that fits the pattern wins.
        assert_eq!(starts("@@@ -3,2 +4,2 @@@"), Some((3, 4)));
    }
}
