// src/core/sanitize.rs

/// Concatenate text nodes and trim the ends. Inner whitespace is left alone.
pub fn clean_text<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined: String = parts.into_iter().collect();
    let trimmed = joined.trim();
    if trimmed.len() == joined.len() { joined } else { s!(trimmed) }
}

/// Collapse every whitespace run (including NBSP and newlines) to one space.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}
