use super::*;

fn per_char(advance: f64) -> impl FnMut(&str) -> f64 {
    move |s: &str| s.chars().count() as f64 * advance
}

#[test]
fn short_title_stays_on_one_line() {
    let lines = wrap_text(per_char(36.0), "Hello World", 480.0);
    assert_eq!(lines, vec!["Hello World".to_string()]);
}

#[test]
fn greedy_breaks_when_width_reaches_limit() {
    // "aaa bbb" is 7 units: exactly at the limit is not accepted.
    let lines = wrap_text(per_char(1.0), "aaa bbb ccc", 7.0);
    assert_eq!(lines, vec!["aaa", "bbb", "ccc"]);

    let lines = wrap_text(per_char(1.0), "aaa bbb ccc", 8.0);
    assert_eq!(lines, vec!["aaa bbb", "ccc"]);
}

#[test]
fn overlong_word_is_its_own_line() {
    let lines = wrap_text(per_char(10.0), "a supercalifragilistic b", 50.0);
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn empty_or_blank_text_has_no_lines() {
    assert!(wrap_text(per_char(1.0), "", 10.0).is_empty());
    assert!(wrap_text(per_char(1.0), "   \n\t ", 10.0).is_empty());
}

#[test]
fn wrapping_is_deterministic_and_preserves_words() {
    let text = "Ten practical   patterns for writing idiomatic Rust in production services";
    let a = wrap_text(per_char(9.0), text, 120.0);
    let b = wrap_text(per_char(9.0), text, 120.0);
    assert_eq!(a, b);
    assert!(a.len() > 1);

    let rejoined = a.join(" ");
    let words: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(rejoined.split(' ').collect::<Vec<_>>(), words);
}
