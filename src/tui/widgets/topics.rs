use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .topics
        .items
        .iter()
        .map(|topic| {
            let done = if topic.is_completed {
                Span::styled("✓ ", Style::default().fg(Color::Green))
            } else {
                Span::styled("  ", Style::default())
            };

            let confidence = match topic.confidence_percentage {
                Some(c) => {
                    let color = if c >= 50 { Color::Green } else { Color::Red };
                    Span::styled(format!("{:>4}%", c), Style::default().fg(color))
                }
                None => Span::styled("    -", Style::default().fg(Color::DarkGray)),
            };

            let studied = topic
                .date_studied
                .map(|d| d.format("%b %d").to_string())
                .unwrap_or_else(|| "-".to_string());

            ListItem::new(Line::from(vec![
                done,
                Span::styled(
                    format!("{:<30}", truncate(&topic.topic_name, 28)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>4}%", topic.progress_percentage),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw("  "),
                confidence,
                Span::styled(
                    format!("  {:<8}", studied),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Topics ")
        .title_style(Style::default().fg(Color::Cyan));

    // Header
    let header = Line::from(vec![
        Span::styled(
            format!("  {:<30}", "Name"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Prog   Conf  Studied",
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
    state.select(app.topics.selected);

    let header_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(ratatui::widgets::Paragraph::new(header), header_area);

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
