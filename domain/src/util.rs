//! Text helpers for captured command output.

/// Marker appended to output cut at the byte limit
pub const TRUNCATION_MARKER: &str = "\n... (output truncated)";

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Cap captured output at `max_bytes`, appending [`TRUNCATION_MARKER`] when
/// anything was cut.
pub fn cap_output(mut text: String, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text;
    }
    let keep = truncate_str(&text, max_bytes).len();
    text.truncate(keep);
    text.push_str(TRUNCATION_MARKER);
    text
}

/// Remove backspace overstrike sequences (`X\bX` bold, `_\bX` underline)
/// that `man` emits when it believes it is writing to a terminal.
pub fn strip_overstrike(text: &str) -> String {
    if !text.contains('\u{8}') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\u{8}' {
            out.pop();
        } else {
            out.push(c);
        }
    }
    out
}
