use crate::models::Poem;
use crate::query::Search;

/// Evaluate a search against a poem. Cheap scalar checks run first; every
/// substring comparison is case-sensitive and empty filters are no-ops.
pub fn matches(poem: &Poem, search: &Search) -> bool {
    if search.id != 0 && poem.id() != search.id {
        return false;
    }
    if search.favorites_only && !poem.favorite() {
        return false;
    }
    if !contains_if_set(poem.title(), &search.title)
        || !contains_if_set(poem.dynasty(), &search.dynasty)
        || !contains_if_set(poem.author(), &search.author)
    {
        return false;
    }
    search
        .content
        .iter()
        .all(|keyword| poem.content().contains(keyword.as_str()))
}

fn contains_if_set(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Poem {
        Poem::new(4, "登鹳雀楼", "唐", "王之涣", "白日依山尽，黄河入海流。")
    }

    #[test]
    fn empty_search_matches_everything() {
        assert!(matches(&sample(), &Search::default()));
    }

    #[test]
    fn id_must_match_exactly() {
        assert!(matches(&sample(), &Search::parse("4", false)));
        assert!(!matches(&sample(), &Search::parse("40", false)));
    }

    #[test]
    fn favorites_only_requires_flag() {
        let search = Search::parse("", true);
        assert!(!matches(&sample(), &search));
        assert!(matches(&sample().with_favorite(true), &search));
    }

    #[test]
    fn metadata_filters_are_substrings() {
        assert!(matches(&sample(), &Search::parse("t鹳雀 d唐 a之涣", false)));
        assert!(!matches(&sample(), &Search::parse("a李白", false)));
    }

    #[test]
    fn all_keywords_required() {
        let poem = sample();
        let mut search = Search::default();
        search.content = vec!["白日".into(), "黄河".into()];
        assert!(matches(&poem, &search));

        search.content = vec!["白日".into(), "长江".into()];
        assert!(!matches(&poem, &search));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let poem = Poem::new(1, "Ode", "Modern", "Anon", "Light rain.");
        let mut search = Search::default();
        search.content = vec!["light".into()];
        assert!(!matches(&poem, &search));
    }
}
