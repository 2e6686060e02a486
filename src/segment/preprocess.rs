use regex::Regex;
use tracing::debug;

/// Delete every run of `threshold` or more consecutive line-break characters.
///
/// A threshold of 0 leaves the text untouched. Runs are removed entirely,
/// not collapsed to a single break.
pub fn strip_line_breaks(text: &str, threshold: usize) -> String {
    if threshold == 0 {
        return text.to_string();
    }

    let pattern = format!(r"[\r\n]{{{threshold},}}");
    debug!(%pattern, "strip input text");

    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        // Only reachable if the repetition bound exceeds the regex size limit
        Err(err) => {
            debug!(%err, "line-break pattern rejected, text left as-is");
            text.to_string()
        }
    }
}

/// Split text into trimmed, non-empty lines
pub fn text_lines(text: &str) -> Vec<&str> {
    text.split(is_line_boundary)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Line boundaries recognised when splitting a document into lines
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}'
            | '\u{2029}'
    )
}
