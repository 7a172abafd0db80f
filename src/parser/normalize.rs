//! Report text normalizer: the cheap pre-pass before the rule sweep.

/// Split raw extracted text into trimmed, non-empty lines.
///
/// No other transformation happens here: no case folding, no collapsing of
/// internal whitespace. The capture patterns tolerate variable spacing
/// themselves. An empty document yields an empty sequence.
pub fn normalize_lines(raw_text: &str) -> Vec<&str> {
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
