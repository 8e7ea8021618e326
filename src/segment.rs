use std::sync::LazyLock;

use regex::Regex;

/// Shortest run of characters ending in a clause terminator, full-width or
/// half-width.
static CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^，。：？！,.:?!]*[，。：？！,.:?!]").expect("clause pattern is valid")
});

/// Split poem content into clauses. Line breaks are removed first so only
/// punctuation ends a clause; trailing text without a terminator is dropped.
pub fn segment(content: &str) -> Vec<String> {
    let flattened: String = content.chars().filter(|ch| !matches!(ch, '\n' | '\r')).collect();
    CLAUSE_REGEX
        .find_iter(&flattened)
        .map(|clause| clause.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_full_width_punctuation() {
        assert_eq!(
            segment("春眠不觉晓，处处闻啼鸟。"),
            vec!["春眠不觉晓，", "处处闻啼鸟。"]
        );
    }

    #[test]
    fn text_without_terminator_is_dropped() {
        assert!(segment("abc").is_empty());
        assert_eq!(segment("one, two"), vec!["one,"]);
    }

    #[test]
    fn newlines_do_not_break_clauses() {
        assert_eq!(
            segment("夜来风雨\n声，花落知多少？"),
            vec!["夜来风雨声，", "花落知多少？"]
        );
    }

    #[test]
    fn mixed_latin_punctuation() {
        assert_eq!(
            segment("Hi! Who: me? yes."),
            vec!["Hi!", " Who:", " me?", " yes."]
        );
    }
}
