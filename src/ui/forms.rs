use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::Poem;

/// Form state behind the edit screen.
#[derive(Default, Clone)]
pub(crate) struct PoemForm {
    pub(crate) number: String,
    pub(crate) title: String,
    pub(crate) dynasty: String,
    pub(crate) author: String,
    pub(crate) content: String,
    pub(crate) active: PoemField,
    pub(crate) error: Option<String>,
}

/// Fields in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum PoemField {
    #[default]
    Number,
    Title,
    Dynasty,
    Author,
    Content,
}

impl PoemField {
    /// Single-line fields shown as `Label: value` rows.
    pub(crate) const INLINE: [(PoemField, &'static str); 4] = [
        (PoemField::Number, "Number"),
        (PoemField::Title, "Title"),
        (PoemField::Dynasty, "Dynasty"),
        (PoemField::Author, "Author"),
    ];

    fn next(self) -> Self {
        match self {
            PoemField::Number => PoemField::Title,
            PoemField::Title => PoemField::Dynasty,
            PoemField::Dynasty => PoemField::Author,
            PoemField::Author => PoemField::Content,
            PoemField::Content => PoemField::Number,
        }
    }

    fn previous(self) -> Self {
        match self {
            PoemField::Number => PoemField::Content,
            PoemField::Title => PoemField::Number,
            PoemField::Dynasty => PoemField::Title,
            PoemField::Author => PoemField::Dynasty,
            PoemField::Content => PoemField::Author,
        }
    }
}

impl PoemForm {
    /// Populate the form from an existing poem when editing.
    pub(crate) fn from_poem(poem: &Poem) -> Self {
        Self {
            number: poem.id().to_string(),
            title: poem.title().to_string(),
            dynasty: poem.dynasty().to_string(),
            author: poem.author().to_string(),
            content: poem.content().to_string(),
            active: PoemField::Title,
            error: None,
        }
    }

    pub(crate) fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    fn value(&self, field: PoemField) -> &String {
        match field {
            PoemField::Number => &self.number,
            PoemField::Title => &self.title,
            PoemField::Dynasty => &self.dynasty,
            PoemField::Author => &self.author,
            PoemField::Content => &self.content,
        }
    }

    fn value_mut(&mut self, field: PoemField) -> &mut String {
        match field {
            PoemField::Number => &mut self.number,
            PoemField::Title => &mut self.title,
            PoemField::Dynasty => &mut self.dynasty,
            PoemField::Author => &mut self.author,
            PoemField::Content => &mut self.content,
        }
    }

    /// Append a character to the active field. The number only takes digits.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() || (self.active == PoemField::Number && !ch.is_ascii_digit()) {
            return false;
        }
        let field = self.active;
        self.value_mut(field).push(ch);
        true
    }

    /// Enter starts a new line inside the content and moves focus elsewhere.
    pub(crate) fn enter(&mut self) {
        if self.active == PoemField::Content {
            self.content.push('\n');
        } else {
            self.next_field();
        }
    }

    pub(crate) fn backspace(&mut self) {
        let field = self.active;
        self.value_mut(field).pop();
    }

    /// Validate the inputs and build the poem to save. A blank number means
    /// "assign one" and is only allowed for new poems.
    pub(crate) fn parse_inputs(&self, editing: bool) -> Result<Poem> {
        let number_raw = self.number.trim();
        let id = if number_raw.is_empty() {
            if editing {
                return Err(anyhow!("Number is required when editing."));
            }
            0
        } else {
            match number_raw.parse::<i64>() {
                Ok(id) if id > 0 => id,
                _ => return Err(anyhow!("Number must be a positive integer.")),
            }
        };

        let title = required(&self.title, "Title")?;
        let dynasty = required(&self.dynasty, "Dynasty")?;
        let author = required(&self.author, "Author")?;
        let content = required(&self.content, "Content")?;

        Ok(Poem::new(id, title, dynasty, author, content))
    }

    /// Render a `Label: value` row for one of the inline fields.
    pub(crate) fn build_line(&self, field_name: &str, field: PoemField) -> Line<'static> {
        let value = self.value(field);
        let is_active = self.active == field;

        let placeholder = if field == PoemField::Number {
            "<auto>"
        } else {
            "<required>"
        };
        let display = if value.is_empty() {
            placeholder.to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Content rows, with a placeholder while empty.
    pub(crate) fn content_lines(&self) -> Vec<Line<'static>> {
        if self.content.is_empty() {
            return vec![Line::from(Span::styled(
                "<required>",
                Style::default().fg(Color::DarkGray),
            ))];
        }
        let style = if self.active == PoemField::Content {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        self.content
            .split('\n')
            .map(|row| Line::from(Span::styled(row.to_string(), style)))
            .collect()
    }

    /// Display width of the requested field's last line, for cursor placement.
    pub(crate) fn value_width(&self, field: PoemField) -> usize {
        let last_row = self.value(field).rsplit('\n').next().unwrap_or_default();
        Line::from(last_row).width()
    }

    /// Index of the last content row.
    pub(crate) fn content_last_row(&self) -> usize {
        self.content.matches('\n').count()
    }
}

fn required(value: &str, label: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(anyhow!("{label} cannot be blank."))
    } else {
        Ok(trimmed.to_string())
    }
}
