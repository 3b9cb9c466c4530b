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
        .subjects
        .items
        .iter()
        .map(|sw| {
            let declared = if sw.subject.total_topics > 0 {
                sw.subject.total_topics
            } else {
                sw.progress.actual_topics
            };
            let bar = progress_bar(sw.progress.completed_topics, declared);

            let progress_color = if sw.progress.progress >= 100 {
                Color::Green
            } else if sw.progress.progress >= 50 {
                Color::Yellow
            } else {
                Color::Red
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<30}", truncate(&sw.subject.name, 28)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(bar, Style::default().fg(Color::Green)),
                Span::styled(
                    format!(" {:>3}/{:<3}", sw.progress.completed_topics, declared),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!(" {:>4}%", sw.progress.progress),
                    Style::default().fg(progress_color),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Subjects ")
        .title_style(Style::default().fg(Color::Cyan));

    // Header
    let header = Line::from(vec![
        Span::styled(
            format!("{:<30}", "Name"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Progress   ",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "Done/Total",
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
    state.select(app.subjects.selected);

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

fn progress_bar(completed: u32, total: u32) -> String {
    const WIDTH: usize = 10;
    let filled = if total == 0 {
        0
    } else {
        (completed as usize * WIDTH) / total as usize
    };
    let empty = WIDTH - filled.min(WIDTH);
    format!("{}{}", "█".repeat(filled.min(WIDTH)), "░".repeat(empty))
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
