//! Markdown renderings of a poem for the detail and preview views. Keywords
//! are wrapped in `**` one after another with plain substring replacement, so
//! a later keyword may land inside the emphasis inserted for an earlier one.
//! That sequential behavior is intentional and kept as-is.

use crate::models::Poem;
use crate::query::Search;

/// Emphasis marker wrapped around every keyword hit. No padding spaces go
/// around it: the only reader is the span splitter in the UI, and padding
/// would show up as extra gaps inside unspaced Chinese lines.
pub const EMPHASIS: &str = "**";
/// Number of matching clauses shown in a preview.
const PREVIEW_SEGMENTS: usize = 2;

/// Wrap every occurrence of every keyword in emphasis markers, keyword by
/// keyword in list order. Empty keywords are skipped since they would match
/// between every character.
pub fn highlight(text: &str, keywords: &[String]) -> String {
    keywords
        .iter()
        .filter(|keyword| !keyword.is_empty())
        .fold(text.to_string(), |acc, keyword| {
            acc.replace(keyword.as_str(), &format!("{EMPHASIS}{keyword}{EMPHASIS}"))
        })
}

/// Full poem: abstract header, then each content line as its own paragraph
/// with keywords emphasised.
pub fn detail_markdown(poem: &Poem, search: &Search) -> String {
    let body = poem.content().replace('\n', "\n\n");
    format!(
        "# {}\n\n{}",
        poem.abstract_line(),
        highlight(&body, &search.content)
    )
}

/// Abstract line followed by up to two clauses that contain a keyword,
/// highlighted and joined without a separator.
pub fn preview_markdown(poem: &Poem, search: &Search) -> String {
    let preview: String = poem
        .segments()
        .iter()
        .filter(|clause| {
            search
                .content
                .iter()
                .any(|keyword| clause.contains(keyword.as_str()))
        })
        .take(PREVIEW_SEGMENTS)
        .map(|clause| highlight(clause, &search.content))
        .collect();
    format!("{}\n{}", poem.abstract_line(), preview)
}
