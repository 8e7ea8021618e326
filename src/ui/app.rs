use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::Poem;
use crate::query::Search;
use crate::render::{detail_markdown, preview_markdown};
use crate::store::PoemStore;

use super::forms::PoemField;
use super::helpers::{centered_rect, emphasis_spans, markdown_lines, surface_error};
use super::screens::{DetailScreen, EditScreen, EntryScreen, ScreenEvent};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows moved by PageUp/PageDown.
const PAGE: isize = 10;
/// Path offered by the import/export prompt.
const DEFAULT_DATASET_PATH: &str = "poems.json";

/// Top-level screens.
enum Screen {
    Entry,
    Detail(DetailScreen),
    Edit(EditScreen),
}

/// Overlays scoped to the current screen.
enum Mode {
    Normal,
    Searching,
    GoTo(String),
    PathPrompt(PathPrompt),
    ConfirmDelete(Poem),
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Transfer {
    Import,
    Export,
}

struct PathPrompt {
    transfer: Transfer,
    path: String,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI.
pub struct App {
    store: PoemStore,
    entry: EntryScreen,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
    /// Search the detail view falls back to when opened without one.
    detail_search: Search,
}

impl App {
    pub fn new(store: PoemStore) -> Self {
        let entry = EntryScreen::new(&store);
        Self {
            store,
            entry,
            screen: Screen::Entry,
            mode: Mode::Normal,
            status: None,
            detail_search: Search::default(),
        }
    }

    /// Apply a screen transition.
    pub(crate) fn dispatch(&mut self, event: ScreenEvent) {
        self.screen = match event {
            ScreenEvent::ShowEntry { refresh } => {
                if refresh {
                    self.entry.refresh(&self.store);
                }
                Screen::Entry
            }
            ScreenEvent::ShowDetail { poem, search } => {
                if let Some(search) = search {
                    self.detail_search = search;
                }
                Screen::Detail(DetailScreen::new(poem, self.detail_search.clone()))
            }
            ScreenEvent::ShowEdit { poem } => Screen::Edit(EditScreen::new(poem)),
        };
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching => self.handle_search(code),
            Mode::GoTo(input) => self.handle_goto(code, input),
            Mode::PathPrompt(prompt) => self.handle_path_prompt(code, prompt),
            Mode::ConfirmDelete(poem) => self.handle_confirm_delete(code, poem),
        };
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Entry => Ok(self.handle_entry_key(code, exit)),
            Screen::Detail(_) => Ok(self.handle_detail_key(code, exit)),
            Screen::Edit(_) => {
                self.handle_edit_key(code);
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_entry_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.entry.move_selection(-1),
            KeyCode::Down => self.entry.move_selection(1),
            KeyCode::PageUp => self.entry.move_selection(-PAGE),
            KeyCode::PageDown => self.entry.move_selection(PAGE),
            KeyCode::Home => self.entry.select_first(),
            KeyCode::End => self.entry.select_last(),
            KeyCode::Char('f') | KeyCode::Char('/') => {
                self.clear_status();
                return Mode::Searching;
            }
            KeyCode::Char('c') => {
                self.entry.set_rule(String::new(), &self.store);
                self.set_status("Search cleared.", StatusKind::Info);
            }
            KeyCode::Char('v') => {
                let message = if self.entry.toggle_favorites_only(&self.store) {
                    "Showing favorites only."
                } else {
                    "Showing all poems."
                };
                self.set_status(message, StatusKind::Info);
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.entry.current_poem().map(Poem::id) {
                    self.toggle_favorite(id);
                }
            }
            KeyCode::Enter => {
                if let Some(poem) = self.entry.current_poem().cloned() {
                    self.clear_status();
                    let search = Some(self.entry.search.clone());
                    self.dispatch(ScreenEvent::ShowDetail { poem, search });
                } else {
                    self.set_status("No poem selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('+') | KeyCode::Char('a') => {
                self.clear_status();
                self.dispatch(ScreenEvent::ShowEdit { poem: None });
            }
            KeyCode::Char('g') => {
                self.clear_status();
                return Mode::GoTo(String::new());
            }
            KeyCode::Char('i') => return Self::prompt(Transfer::Import),
            KeyCode::Char('x') => return Self::prompt(Transfer::Export),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_detail_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        let Screen::Detail(detail) = &mut self.screen else {
            return Mode::Normal;
        };

        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => {
                self.clear_status();
                self.dispatch(ScreenEvent::ShowEntry { refresh: false });
            }
            KeyCode::Up => detail.scroll_by(-1),
            KeyCode::Down => detail.scroll_by(1),
            KeyCode::PageUp => detail.scroll_by(-(PAGE as i32)),
            KeyCode::PageDown => detail.scroll_by(PAGE as i32),
            KeyCode::Home => detail.scroll = 0,
            KeyCode::Char('e') => {
                let poem = Some(detail.poem.clone());
                self.clear_status();
                self.dispatch(ScreenEvent::ShowEdit { poem });
            }
            KeyCode::Char('-') | KeyCode::Char('d') => {
                return Mode::ConfirmDelete(detail.poem.clone());
            }
            KeyCode::Char(' ') | KeyCode::Char('s') => {
                let id = detail.poem.id();
                if let Some(updated) = self.toggle_favorite(id) {
                    if let Screen::Detail(detail) = &mut self.screen {
                        detail.poem = updated;
                    }
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        let Screen::Edit(edit) = &mut self.screen else {
            return;
        };

        match code {
            KeyCode::Esc => {
                let event = match edit.original.clone() {
                    Some(poem) => ScreenEvent::ShowDetail { poem, search: None },
                    None => ScreenEvent::ShowEntry { refresh: false },
                };
                self.set_status("Edit cancelled.", StatusKind::Info);
                self.dispatch(event);
            }
            KeyCode::Tab | KeyCode::Down => edit.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => edit.form.previous_field(),
            KeyCode::Enter => edit.form.enter(),
            KeyCode::Backspace => edit.form.backspace(),
            KeyCode::F(2) => self.save_edit(),
            KeyCode::Char(ch) => {
                if edit.form.push_char(ch) {
                    edit.form.error = None;
                }
            }
            _ => {}
        }
    }

    /// Ctrl+S saves the edit form.
    pub(crate) fn handle_ctrl_s(&mut self) -> Result<()> {
        if matches!(self.mode, Mode::Normal) && matches!(self.screen, Screen::Edit(_)) {
            self.save_edit();
        }
        Ok(())
    }

    fn save_edit(&mut self) {
        let Screen::Edit(edit) = &mut self.screen else {
            return;
        };

        let poem = match edit.form.parse_inputs(edit.original.is_some()) {
            Ok(poem) => poem,
            Err(err) => {
                let message = surface_error(&err);
                edit.form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
                return;
            }
        };

        let saved = match &edit.original {
            Some(original) => {
                let poem = poem.with_favorite(original.favorite());
                self.store.modify(original, poem).cloned()
            }
            None => self.store.add(poem).cloned(),
        };

        match saved {
            Ok(poem) => {
                let message = format!("Saved {}.", poem.abstract_line());
                self.entry.refresh(&self.store);
                self.dispatch(ScreenEvent::ShowDetail { poem, search: None });
                self.set_status(message, StatusKind::Info);
            }
            Err(err) => {
                let message = err.to_string();
                if let Screen::Edit(edit) = &mut self.screen {
                    edit.form.error = Some(message.clone());
                }
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    fn handle_search(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => {
                self.entry.set_rule(String::new(), &self.store);
                return Mode::Normal;
            }
            KeyCode::Enter => return Mode::Normal,
            KeyCode::Up => self.entry.move_selection(-1),
            KeyCode::Down => self.entry.move_selection(1),
            KeyCode::Backspace => {
                let mut rule = self.entry.rule.clone();
                rule.pop();
                self.entry.set_rule(rule, &self.store);
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                let mut rule = self.entry.rule.clone();
                rule.push(ch);
                self.entry.set_rule(rule, &self.store);
            }
            _ => {}
        }
        Mode::Searching
    }

    fn handle_goto(&mut self, code: KeyCode, mut input: String) -> Mode {
        match code {
            KeyCode::Esc => Mode::Normal,
            KeyCode::Backspace => {
                input.pop();
                Mode::GoTo(input)
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                input.push(ch);
                Mode::GoTo(input)
            }
            KeyCode::Enter => {
                let Ok(id) = input.parse::<i64>() else {
                    self.set_status("Enter a poem number.", StatusKind::Error);
                    return Mode::GoTo(input);
                };
                if self.entry.select_id(id) {
                    self.clear_status();
                } else if self.store.get(id).is_some() {
                    self.set_status(
                        format!("Poem {id} is hidden by the current search."),
                        StatusKind::Error,
                    );
                } else {
                    self.set_status(format!("No poem numbered {id}."), StatusKind::Error);
                }
                Mode::Normal
            }
            _ => Mode::GoTo(input),
        }
    }

    fn handle_path_prompt(&mut self, code: KeyCode, mut prompt: PathPrompt) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Backspace => {
                prompt.path.pop();
                Mode::PathPrompt(prompt)
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                prompt.path.push(ch);
                Mode::PathPrompt(prompt)
            }
            KeyCode::Enter => {
                let result = match prompt.transfer {
                    Transfer::Import => self.import_from(prompt.path.trim()),
                    Transfer::Export => self.export_to(prompt.path.trim()),
                };
                match result {
                    Ok(message) => {
                        self.set_status(message, StatusKind::Info);
                        Mode::Normal
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), StatusKind::Error);
                        Mode::PathPrompt(prompt)
                    }
                }
            }
            _ => Mode::PathPrompt(prompt),
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, poem: Poem) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.store.remove(&poem) {
                    Ok(()) => {
                        self.dispatch(ScreenEvent::ShowEntry { refresh: true });
                        self.set_status(format!("Deleted {}.", poem.title()), StatusKind::Info);
                        Mode::Normal
                    }
                    Err(err) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                        Mode::ConfirmDelete(poem)
                    }
                }
            }
            _ => Mode::ConfirmDelete(poem),
        }
    }

    fn prompt(transfer: Transfer) -> Mode {
        Mode::PathPrompt(PathPrompt {
            transfer,
            path: DEFAULT_DATASET_PATH.to_string(),
        })
    }

    fn toggle_favorite(&mut self, id: i64) -> Option<Poem> {
        match self.store.toggle_favorite(id) {
            Ok(poem) => {
                let poem = poem.clone();
                let message = if poem.favorite() {
                    format!("Added {} to favorites.", poem.title())
                } else {
                    format!("Removed {} from favorites.", poem.title())
                };
                self.entry.refresh(&self.store);
                self.set_status(message, StatusKind::Info);
                Some(poem)
            }
            Err(err) => {
                self.set_status(err.to_string(), StatusKind::Error);
                None
            }
        }
    }

    fn import_from(&mut self, path: &str) -> Result<String> {
        let file = File::open(path).with_context(|| format!("failed to open {path}"))?;
        let count = self.store.import(BufReader::new(file))?;
        self.entry.refresh(&self.store);
        Ok(format!("Imported {count} poems from {path}."))
    }

    fn export_to(&self, path: &str) -> Result<String> {
        let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
        let count = self.store.export(BufWriter::new(file))?;
        Ok(format!("Exported {count} poems to {path}."))
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Entry => self.draw_entry(frame, content_area),
            Screen::Detail(detail) => self.draw_detail(frame, content_area, detail),
            Screen::Edit(edit) => self.draw_edit(frame, content_area, edit),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::GoTo(input) => self.draw_prompt(frame, area, "Go To", "Number", input),
            Mode::PathPrompt(prompt) => {
                let title = match prompt.transfer {
                    Transfer::Import => "Import (replaces the collection)",
                    Transfer::Export => "Export",
                };
                self.draw_prompt(frame, area, title, "File", &prompt.path);
            }
            Mode::ConfirmDelete(poem) => self.draw_confirm_delete(frame, area, poem),
            Mode::Searching | Mode::Normal => {}
        }
    }

    fn draw_entry(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        self.draw_search_bar(frame, chunks[0]);

        let title = format!("Poems ({})", self.entry.visible.len());
        if self.entry.visible.is_empty() {
            let text = if self.store.is_empty() {
                "No poems yet. Press '+' to add one."
            } else {
                "No poems match the current search."
            };
            let message = Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(message, chunks[1]);
            return;
        }

        let with_preview = self.entry.search.has_keyword();
        let items: Vec<ListItem> = self
            .entry
            .visible
            .iter()
            .map(|poem| {
                let star = if poem.favorite() { "★ " } else { "☆ " };
                if with_preview {
                    let preview = preview_markdown(poem, &self.entry.search);
                    let mut rows = preview.splitn(2, '\n');
                    let header = rows.next().unwrap_or_default().to_string();
                    let body = rows.next().unwrap_or_default();
                    let mut highlighted = vec![Span::raw("   ")];
                    highlighted.extend(emphasis_spans(body));
                    ListItem::new(vec![
                        Line::from(vec![Span::raw(star), Span::raw(header)]),
                        Line::from(highlighted),
                    ])
                } else {
                    ListItem::new(Line::from(vec![
                        Span::raw(star),
                        Span::raw(poem.abstract_line()),
                    ]))
                }
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.entry.selected));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let searching = matches!(self.mode, Mode::Searching);
        let mut title = String::from("Search");
        if self.entry.favorites_only {
            title.push_str(" • favorites only");
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if searching {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            });

        let line = if self.entry.rule.is_empty() && !searching {
            Line::from(Span::styled(
                "t<title> d<dynasty> a<author> <number> <keywords>",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.entry.rule.clone())
        };
        let paragraph = Paragraph::new(line).block(block.clone());
        frame.render_widget(paragraph, area);

        if searching {
            let inner = block.inner(area);
            let width = Line::from(self.entry.rule.as_str()).width() as u16;
            frame.set_cursor_position((inner.x + width, inner.y));
        }
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, detail: &DetailScreen) {
        let title = if detail.poem.favorite() {
            "Poem ★"
        } else {
            "Poem"
        };
        let lines = markdown_lines(&detail_markdown(&detail.poem, &detail.search));
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false })
            .scroll((detail.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_edit(&self, frame: &mut Frame, area: Rect, edit: &EditScreen) {
        let form = &edit.form;
        let title = if edit.original.is_some() {
            "Edit Poem"
        } else {
            "Add Poem"
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let inline_rows = PoemField::INLINE.len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(inline_rows + 1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let mut lines: Vec<Line> = PoemField::INLINE
            .iter()
            .map(|(field, label)| form.build_line(label, *field))
            .collect();
        lines.push(Line::from("Content:"));
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        let content_block = Block::default().borders(Borders::LEFT);
        let content_inner = content_block.inner(chunks[1]);
        frame.render_widget(
            Paragraph::new(form.content_lines()).block(content_block),
            chunks[1],
        );

        let hint = match &form.error {
            Some(error) => Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))),
            None => Line::from(Span::styled(
                "Ctrl+S / F2 to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        };
        frame.render_widget(Paragraph::new(hint), chunks[2]);

        let (cursor_x, cursor_y) = match PoemField::INLINE
            .iter()
            .position(|(field, _)| *field == form.active)
        {
            Some(row) => {
                let (field, label) = PoemField::INLINE[row];
                let prefix = Line::from(format!("{label}: ")).width();
                let offset = form.value_width(field);
                (
                    chunks[0].x + (prefix + offset) as u16,
                    chunks[0].y + row as u16,
                )
            }
            None => (
                content_inner.x + form.value_width(PoemField::Content) as u16,
                content_inner.y + form.content_last_row() as u16,
            ),
        };
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let keys: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::Searching) => &[("[Enter]", "Keep"), ("[Esc]", "Clear"), ("[↑↓]", "Navigate")],
            (_, Mode::GoTo(_)) | (_, Mode::PathPrompt(_)) => &[("[Enter]", "Confirm"), ("[Esc]", "Cancel")],
            (_, Mode::ConfirmDelete(_)) => &[("[Y]", "Delete"), ("[N]", "Keep")],
            (Screen::Entry, _) => &[
                ("[f]", "Search"),
                ("[Enter]", "Open"),
                ("[Space]", "Favorite"),
                ("[v]", "Favorites only"),
                ("[+]", "Add"),
                ("[g]", "Go to"),
                ("[i/x]", "Import/Export"),
                ("[q]", "Quit"),
            ],
            (Screen::Detail(_), _) => &[
                ("[Esc]", "Back"),
                ("[e]", "Edit"),
                ("[-]", "Delete"),
                ("[Space]", "Favorite"),
                ("[↑↓]", "Scroll"),
            ],
            (Screen::Edit(_), _) => &[
                ("[Ctrl+S]", "Save"),
                ("[Tab]", "Next field"),
                ("[Esc]", "Cancel"),
            ],
        };

        let mut spans = Vec::with_capacity(keys.len() * 2);
        for (key, action) in keys {
            spans.push(Span::styled(key.to_string(), key_style));
            spans.push(Span::raw(format!(" {action}   ")));
        }
        Line::from(spans)
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, title: &str, label: &str, value: &str) {
        let popup_area = centered_rect(60, 20, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let prefix = format!("{label}: ");
        let lines = vec![
            Line::from(vec![
                Span::raw(prefix.clone()),
                Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to confirm • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x = inner.x + (Line::from(prefix).width() + Line::from(value).width()) as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, poem: &Poem) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Poem").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete '{}' permanently?", poem.abstract_line())),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
