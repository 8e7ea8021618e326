//! Domain model for a stored poem. Fields are read through accessors so the
//! derived segment list can never drift from the content it was computed from:
//! every way of producing a `Poem` goes through [`Poem::new`], which segments
//! the content eagerly.

use std::fmt;

use crate::segment::segment;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single poem with its bibliographic metadata and favorite flag.
pub struct Poem {
    id: i64,
    title: String,
    dynasty: String,
    author: String,
    content: String,
    favorite: bool,
    /// Punctuation-delimited clauses of `content`, in order. Never persisted
    /// as part of the dataset format.
    segments: Vec<String>,
}

impl Poem {
    /// Build a poem from its five base fields. An `id` of `0` means "let the
    /// store assign one".
    pub fn new(
        id: i64,
        title: impl Into<String>,
        dynasty: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let segments = segment(&content);
        Self {
            id,
            title: title.into(),
            dynasty: dynasty.into(),
            author: author.into(),
            content,
            favorite: false,
            segments,
        }
    }

    /// Same poem with a different favorite flag.
    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    /// Same poem under a different number. Content is untouched so the
    /// segments stay valid.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dynasty(&self) -> &str {
        &self.dynasty
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn favorite(&self) -> bool {
        self.favorite
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// One-line summary used by list views: `"{id}. {title}  ({dynasty} {author})"`.
    pub fn abstract_line(&self) -> String {
        format!(
            "{}. {}  ({} {})",
            self.id, self.title, self.dynasty, self.author
        )
    }
}

impl fmt::Display for Poem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abstract_line())
    }
}
