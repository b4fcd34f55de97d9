//! Line breaking shared by template bodies and placed text items. Widths count `char`s.

/// Split one over-long line: cut at the last space at or before `width`, or hard-cut at
/// `width` when that space would be at the start. The tail has leading whitespace removed.
pub(crate) fn break_line(line: &[char], width: usize) -> (&[char], &[char]) {
    let width = width.max(1);
    if line.len() <= width {
        return (line, &[]);
    }
    let cut = line[..=width]
        .iter()
        .rposition(|&c| c == ' ')
        .filter(|&i| i > 0)
        .unwrap_or(width);
    let (head, tail) = line.split_at(cut);
    let skip = tail.iter().take_while(|c| c.is_whitespace()).count();
    (head, &tail[skip..])
}

/// Wrap `text` into at most `max_lines` lines of at most `width` chars. Empty source lines are
/// kept as empty output lines.
pub fn wrap_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for src in text.split('\n') {
        if out.len() >= max_lines {
            break;
        }
        let chars: Vec<char> = src.chars().filter(|&c| c != '\r').collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        let mut rest: &[char] = &chars;
        while rest.len() > width && out.len() < max_lines {
            let (head, tail) = break_line(rest, width);
            out.push(head.iter().collect());
            rest = tail;
        }
        if out.len() < max_lines {
            out.push(rest.iter().take(width).collect());
        }
    }
    out
}

/// Centre `text` in `width` columns, truncating when it does not fit.
pub fn center_text(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let pad = (width - len) / 2;
    format!("{}{}{}", " ".repeat(pad), text, " ".repeat(width - len - pad))
}

/// Truncate to `n` chars.
pub(crate) fn truncate(text: &str, n: usize) -> String {
    text.chars().take(n).collect()
}

/// Right-pad with spaces to `n` chars.
pub(crate) fn pad_end(text: &str, n: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(n.saturating_sub(len)))
}

/// Left-pad with spaces to `n` chars.
pub(crate) fn pad_start(text: &str, n: usize) -> String {
    let len = text.chars().count();
    format!("{}{text}", " ".repeat(n.saturating_sub(len)))
}

#[cfg(test)]
#[path = "../../tests/unit/page/wrap.rs"]
mod tests;
