use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::tui::{App, ResourceKind};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Resources ({}) ", app.resources.items.len()))
        .title_style(Style::default().fg(Color::Magenta));

    if app.resources.items.is_empty() {
        let paragraph = Paragraph::new("No links or attachments yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .resources
        .items
        .iter()
        .map(|entry| {
            let (marker, detail) = match &entry.kind {
                ResourceKind::Video(url) => (
                    Span::styled("▶ ", Style::default().fg(Color::Red)),
                    Span::styled(url.as_str(), Style::default().fg(Color::White)),
                ),
                ResourceKind::File(a) => (
                    Span::styled("• ", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!("{} ({}, {} bytes)", a.name, a.mime_type, a.size_bytes),
                        Style::default().fg(Color::White),
                    ),
                ),
            };

            ListItem::new(Line::from(vec![
                marker,
                Span::styled(
                    format!("{:<30}", truncate(&entry.topic_name, 28)),
                    Style::default().fg(Color::Yellow),
                ),
                detail,
            ]))
        })
        .collect();

    // Header
    let header = Line::from(vec![
        Span::styled(
            format!("  {:<30}", "Topic"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Resource",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(app.resources.selected);

    let header_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(Paragraph::new(header), header_area);

    let list_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };

    f.render_stateful_widget(list, list_area, &mut state);
}

// Char-based so multibyte names never split mid-character.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
