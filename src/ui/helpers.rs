use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::render::EMPHASIS;

/// Style used for highlighted search hits.
pub(crate) fn emphasis_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Split one markdown line on `**` markers, alternating plain and emphasised
/// spans. Marker runs produced by overlapping keywords simply toggle twice.
pub(crate) fn emphasis_spans(text: &str) -> Vec<Span<'static>> {
    text.split(EMPHASIS)
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(index, part)| {
            if index % 2 == 1 {
                Span::styled(part.to_string(), emphasis_style())
            } else {
                Span::raw(part.to_string())
            }
        })
        .collect()
}

/// Turn the renderer's markdown into styled lines. Only the first line may be
/// a `# ` heading; content lines that happen to start with `# ` keep their
/// emphasis.
pub(crate) fn markdown_lines(markdown: &str) -> Vec<Line<'static>> {
    markdown
        .split('\n')
        .enumerate()
        .map(|(index, row)| match row.strip_prefix("# ").filter(|_| index == 0) {
            Some(heading) => Line::from(Span::styled(
                heading.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            None => Line::from(emphasis_spans(row)),
        })
        .collect()
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[Span<'_>]) -> Vec<String> {
        spans.iter().map(|span| span.content.to_string()).collect()
    }

    #[test]
    fn emphasis_alternates() {
        let spans = emphasis_spans("床前**明月**光");
        assert_eq!(texts(&spans), vec!["床前", "明月", "光"]);
        assert_eq!(spans[1].style, emphasis_style());
        assert_eq!(spans[0].style, Style::default());
    }

    #[test]
    fn headings_lose_their_marker() {
        let lines = markdown_lines("# 1. 静夜思  (唐 李白)\n\n床前");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans[0].content, "1. 静夜思  (唐 李白)");
        assert!(lines[1].spans.is_empty());
    }

    #[test]
    fn only_the_first_line_is_a_heading() {
        let lines = markdown_lines("# 1. 题  (唐 某)\n\n# **明月**光");
        assert_eq!(lines.len(), 3);
        assert_eq!(texts(&lines[2].spans), vec!["# ", "明月", "光"]);
        assert_eq!(lines[2].spans[1].style, emphasis_style());
    }

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = anyhow::anyhow!("disk full").context("failed to insert poem");
        assert_eq!(surface_error(&err), "disk full");
    }
}
