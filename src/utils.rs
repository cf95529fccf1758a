use unicode_width::UnicodeWidthChar;

/// Truncate a string to a maximum display width, appending "..." when cut.
/// Width-aware so wide characters in question text do not overflow the
/// summary columns.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(1)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(1);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Option letter for an MCQ index (0 -> 'A').
pub fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}
