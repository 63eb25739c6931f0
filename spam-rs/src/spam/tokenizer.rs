//! Message tokenization and sender extraction

/// Split text into lowercase alphanumeric tokens.
///
/// Every character that is not alphanumeric acts as a separator. Combining
/// marks with the Alphabetic property (e.g. Devanagari vowel signs) count
/// as alphanumeric and stay inside their word.
pub fn normalize(text: &str) -> Vec<String> {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            cleaned.extend(c.to_lowercase());
        } else {
            cleaned.push(' ');
        }
    }

    cleaned.split_whitespace().map(str::to_string).collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split text into lines on every line boundary, including a lone `\r`.
///
/// `\r\n` counts as a single break. A trailing break does not produce an
/// empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }

        lines.push(&text[start..idx]);
        start = idx + c.len_utf8();

        if c == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                start = next + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Find the sender address in header-like lines.
///
/// Only the first line containing "From:" is consulted; the first
/// whitespace-separated word on it containing '@' is returned verbatim.
pub fn extract_address<'a, I>(lines: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let line = lines.into_iter().find(|line| line.contains("From:"))?;

    line.split_whitespace()
        .find(|word| word.contains('@'))
        .map(str::to_string)
}
