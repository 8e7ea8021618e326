use std::cmp::min;

use crate::models::Poem;
use crate::query::Search;
use crate::store::PoemStore;

use super::forms::PoemForm;

/// Requests to move between screens. Each variant carries exactly what the
/// target screen needs; [`super::app::App::dispatch`] applies them.
#[derive(Debug, Clone)]
pub(crate) enum ScreenEvent {
    /// Back to the list, optionally re-running the current search first.
    ShowEntry { refresh: bool },
    /// Open a poem. `None` keeps the search the detail view last used.
    ShowDetail { poem: Poem, search: Option<Search> },
    /// Edit an existing poem, or start a new one with `None`.
    ShowEdit { poem: Option<Poem> },
}

/// Search bar plus the filtered poem list.
pub(crate) struct EntryScreen {
    pub(crate) rule: String,
    pub(crate) favorites_only: bool,
    pub(crate) search: Search,
    pub(crate) visible: Vec<Poem>,
    pub(crate) selected: usize,
}

impl EntryScreen {
    pub(crate) fn new(store: &PoemStore) -> Self {
        let mut screen = Self {
            rule: String::new(),
            favorites_only: false,
            search: Search::default(),
            visible: Vec::new(),
            selected: 0,
        };
        screen.refresh(store);
        screen
    }

    /// Re-parse the rule and re-run the filter, keeping the selection on the
    /// same poem when it is still visible.
    pub(crate) fn refresh(&mut self, store: &PoemStore) {
        let selected_id = self.current_poem().map(Poem::id);
        self.search = Search::parse(&self.rule, self.favorites_only);
        self.visible = store.filter(&self.search).into_iter().cloned().collect();

        if let Some(index) =
            selected_id.and_then(|id| self.visible.iter().position(|poem| poem.id() == id))
        {
            self.selected = index;
        }
        self.ensure_in_bounds();
    }

    pub(crate) fn set_rule(&mut self, rule: String, store: &PoemStore) {
        self.rule = rule;
        self.selected = 0;
        self.refresh(store);
    }

    pub(crate) fn toggle_favorites_only(&mut self, store: &PoemStore) -> bool {
        self.favorites_only = !self.favorites_only;
        self.refresh(store);
        self.favorites_only
    }

    pub(crate) fn current_poem(&self) -> Option<&Poem> {
        self.visible.get(self.selected)
    }

    /// Move the selection onto poem `id` if it is in the current results.
    pub(crate) fn select_id(&mut self, id: i64) -> bool {
        match self.visible.iter().position(|poem| poem.id() == id) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() as isize - 1;
        self.selected = (self.selected as isize + offset).clamp(0, last) as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        self.selected = min(self.selected, self.visible.len().saturating_sub(1));
    }
}

/// One poem rendered in full.
pub(crate) struct DetailScreen {
    pub(crate) poem: Poem,
    pub(crate) search: Search,
    pub(crate) scroll: u16,
}

impl DetailScreen {
    pub(crate) fn new(poem: Poem, search: Search) -> Self {
        Self {
            poem,
            search,
            scroll: 0,
        }
    }

    pub(crate) fn scroll_by(&mut self, offset: i32) {
        self.scroll = (self.scroll as i32 + offset).clamp(0, u16::MAX as i32) as u16;
    }
}

/// Add/edit form. `original` is the poem being edited, `None` when adding.
pub(crate) struct EditScreen {
    pub(crate) original: Option<Poem>,
    pub(crate) form: PoemForm,
}

impl EditScreen {
    pub(crate) fn new(original: Option<Poem>) -> Self {
        let form = original
            .as_ref()
            .map(PoemForm::from_poem)
            .unwrap_or_default();
        Self { original, form }
    }
}
