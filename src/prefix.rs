//! Longest-common-prefix matching between file base names.

/// Characters stripped from the end of a shared prefix.
const BOUNDARY_CHARS: &[char] = &['-', '_', ' ', '.', '(', ')'];

/// Returns the longest prefix shared by `a` and `b`, with trailing boundary
/// punctuation removed.
///
/// Comparison is ordinal and case-sensitive. An empty string means the two
/// inputs have no meaningful prefix in common.
///
/// # Examples
///
/// ```
/// use prefixtidy::prefix::common_prefix;
///
/// assert_eq!(common_prefix("data1", "data2"), "data");
/// assert_eq!(common_prefix("video-ep01", "video-ep02"), "video-ep0");
/// assert_eq!(common_prefix("show - A", "show - B"), "show");
/// assert_eq!(common_prefix("alpha", "beta"), "");
/// ```
pub fn common_prefix(a: &str, b: &str) -> String {
    let shared_len: usize = a
        .chars()
        .zip(b.chars())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(ca, _)| ca.len_utf8())
        .sum();

    a[..shared_len].trim_end_matches(BOUNDARY_CHARS).to_string()
}
