//! The search mini-language typed into the search bar.
//!
//! A rule is a space separated list of tokens:
//!
//! - `t<text>` filters by title, `d<text>` by dynasty, `a<text>` by author;
//!   the last occurrence of each prefix wins.
//! - a bare base-10 number filters by poem number; the last number wins.
//! - anything else is a content keyword. Keywords keep their input order and
//!   must all appear in the content for a poem to match.
//!
//! Parsing never fails. A token that is only a prefix letter (just `t`) sets
//! that field to the empty string, which the matcher treats as no filter, so
//! it behaves exactly like leaving the field unset.

use tracing::debug;

use crate::models::Poem;

/// Structured filter produced from a search rule. All present filters are
/// combined with AND; the default value matches every poem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Search {
    /// Poem number to match exactly, `0` when unset.
    pub id: i64,
    pub title: String,
    pub dynasty: String,
    pub author: String,
    /// Content keywords in the order they were typed.
    pub content: Vec<String>,
    pub favorites_only: bool,
}

impl Search {
    /// Parse a free-text rule. `favorites_only` is carried through untouched.
    pub fn parse(rule: &str, favorites_only: bool) -> Self {
        let mut search = Search {
            favorites_only,
            ..Search::default()
        };

        for token in rule.trim().split(' ').filter(|token| !token.is_empty()) {
            if let Some(title) = token.strip_prefix('t') {
                search.title = title.to_string();
            } else if let Some(dynasty) = token.strip_prefix('d') {
                search.dynasty = dynasty.to_string();
            } else if let Some(author) = token.strip_prefix('a') {
                search.author = author.to_string();
            } else if let Some(id) = parse_number(token) {
                search.id = id;
            } else {
                search.content.push(token.to_string());
            }
        }

        debug!(rule, ?search, "parsed search rule");
        search
    }

    /// Whether the search carries content keywords, i.e. whether previews
    /// are worth rendering.
    pub fn has_keyword(&self) -> bool {
        !self.content.is_empty()
    }

    /// True when the search filters nothing.
    pub fn is_empty(&self) -> bool {
        self.id == 0
            && self.title.is_empty()
            && self.dynasty.is_empty()
            && self.author.is_empty()
            && self.content.is_empty()
            && !self.favorites_only
    }

    /// Convenience wrapper around [`crate::matcher::matches`].
    pub fn matches(&self, poem: &Poem) -> bool {
        crate::matcher::matches(poem, self)
    }
}

/// Unsigned decimal only: signs are not accepted and values beyond the id
/// range are treated as plain keywords.
fn parse_number(token: &str) -> Option<i64> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_fields_and_keywords() {
        let search = Search::parse("t李白 d唐 word1 word2", false);
        assert_eq!(search.title, "李白");
        assert_eq!(search.dynasty, "唐");
        assert_eq!(search.author, "");
        assert_eq!(search.content, vec!["word1", "word2"]);
        assert_eq!(search.id, 0);
        assert!(!search.favorites_only);
    }

    #[test]
    fn numeric_token_sets_id() {
        let search = Search::parse("123", false);
        assert_eq!(search.id, 123);
        assert!(search.content.is_empty());
    }

    #[test]
    fn last_occurrence_wins() {
        let search = Search::parse("t春 t秋 5 7 a杜甫 a白居易", true);
        assert_eq!(search.title, "秋");
        assert_eq!(search.author, "白居易");
        assert_eq!(search.id, 7);
        assert!(search.favorites_only);
    }

    #[test]
    fn keywords_keep_input_order() {
        let search = Search::parse("  月   光 明 ", false);
        assert_eq!(search.content, vec!["月", "光", "明"]);
    }

    #[test]
    fn bare_prefix_sets_empty_field() {
        let search = Search::parse("t", false);
        assert_eq!(search.title, "");
        assert!(search.is_empty());
    }

    #[test]
    fn signed_or_oversized_numbers_are_keywords() {
        let search = Search::parse("+5 -3 99999999999999999999", false);
        assert_eq!(search.id, 0);
        assert_eq!(search.content, vec!["+5", "-3", "99999999999999999999"]);
    }

    #[test]
    fn empty_rule_yields_default() {
        assert_eq!(Search::parse("   ", false), Search::default());
        assert!(!Search::parse("", false).has_keyword());
    }
}
