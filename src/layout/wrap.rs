/// Split `text` into lines no wider than `max_width` according to `measure`.
///
/// Greedy: each word is appended to the current line (joined by a single space) while the
/// measured width stays strictly below `max_width`; otherwise the current line is flushed
/// and the word starts a new one. A word that alone exceeds `max_width` is never split and
/// is emitted as its own overflowing line. Runs of whitespace collapse to single spaces, so
/// `lines.join(" ")` reproduces the word sequence of `text`.
///
/// Returns an empty vector for text without words.
pub fn wrap_text<M>(mut measure: M, text: &str, max_width: f64) -> Vec<String>
where
    M: FnMut(&str) -> f64,
{
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{current} {word}");
        if measure(&candidate) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
