//! Normalization of free-form path text from the CLI, the config file, and
//! interactive prompts.
//!
//! Values pasted into a terminal routinely arrive wrapped in quotes, with
//! word-processor "smart" quote glyphs, or with a trailing separator. Both
//! sides of every persisted-vs-resolved comparison go through this function,
//! so none of those cosmetic differences ever counts as a change.

const SMART_DOUBLE: [char; 4] = ['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}'];
const SMART_SINGLE: [char; 4] = ['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'];

/// Clean up a raw path string. Total over its input: never panics, never
/// errors. Empty or whitespace-only input maps to `None`.
pub fn sanitize(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    let mut s: String = raw
        .trim()
        .chars()
        .map(|c| {
            if SMART_DOUBLE.contains(&c) {
                '"'
            } else if SMART_SINGLE.contains(&c) {
                '\''
            } else {
                c
            }
        })
        .collect();

    // Strip exactly one layer of matching surrounding quotes.
    let chars: Vec<char> = s.chars().collect();
    if chars.len() >= 2 {
        let (first, last) = (chars[0], chars[chars.len() - 1]);
        if first == last && (first == '"' || first == '\'') {
            s = chars[1..chars.len() - 1].iter().collect();
        }
    }

    let s = s.trim().trim_end_matches(['/', '\\']).trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Sanitize both sides, then compare. `None` and empty are equivalent.
pub fn same_after_sanitize(a: Option<&str>, b: Option<&str>) -> bool {
    sanitize(a) == sanitize(b)
}
