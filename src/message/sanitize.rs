//! Cleanup of generated commit-message text.
//!
//! Models strip the requested format anyway and still wrap the answer in
//! boilerplate ("Here is the commit message: ..."), so the raw completion is
//! normalized before it reaches a commit: known prefixes are stripped, blank
//! lines dropped, the message capped at three lines with an 80-character
//! subject. `clean` is idempotent on already-clean input.

/// Maximum number of lines kept in a cleaned message.
pub const MAX_LINES: usize = 3;

/// Maximum length of the first line, in characters.
pub const MAX_FIRST_LINE_CHARS: usize = 80;

/// Phrase prefixes stripped wherever they lead the text.
const PHRASE_PREFIXES: &[&str] = &["here is", "the commit message"];

/// Labeled prefixes stripped only together with their colon.
const LABEL_PREFIXES: &[&str] = &["commit message:", "generated:", "message:"];

/// Cleans a raw completion into commit-message shape.
///
/// Returns an empty string when nothing usable remains; the caller decides
/// what to fall back to.
#[must_use]
pub fn clean(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in raw.lines() {
        let line = if lines.is_empty() {
            strip_boilerplate(line)
        } else {
            line.trim().to_string()
        };

        if line.is_empty() {
            continue;
        }

        lines.push(line);
        if lines.len() == MAX_LINES {
            break;
        }
    }

    if let Some(first) = lines.first_mut() {
        if first.chars().count() > MAX_FIRST_LINE_CHARS {
            let truncated: String = first.chars().take(MAX_FIRST_LINE_CHARS).collect();
            *first = truncated.trim_end().to_string();
        }
    }

    lines.join("\n")
}

/// Strips known boilerplate prefixes from the start of a line.
///
/// Prefixes compound ("Here is the commit message: ..."), so stripping
/// repeats until the line stops changing.
fn strip_boilerplate(line: &str) -> String {
    let mut rest = line.trim();

    loop {
        let before = rest;

        rest = rest
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .trim_end();

        for prefix in PHRASE_PREFIXES {
            if let Some(stripped) = strip_prefix_ignore_case(rest, prefix) {
                rest = stripped.trim_start();
            }
        }

        // Connective left behind by phrase prefixes: "the commit message is: ..."
        if let Some(stripped) = strip_prefix_ignore_case(rest, "is:") {
            rest = stripped;
        }

        for prefix in LABEL_PREFIXES {
            if let Some(stripped) = strip_prefix_ignore_case(rest, prefix) {
                rest = stripped.trim_start();
            }
        }

        if rest == before {
            break;
        }
    }

    rest.to_string()
}

/// Case-insensitive `strip_prefix` for ASCII prefixes.
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}
