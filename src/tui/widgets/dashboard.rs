use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::Topic;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9), // Totals + subject chart row
            Constraint::Length(9), // Weak + strong row
            Constraint::Min(0),    // Recent topics
        ])
        .split(area);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[0]);

    draw_totals(f, app, top_chunks[0]);
    draw_chart(f, app, top_chunks[1]);

    let mid_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_weak(f, app, mid_chunks[0]);
    draw_strong(f, app, mid_chunks[1]);
    draw_recent(f, app, chunks[2]);
}

fn draw_totals(f: &mut Frame, app: &App, area: Rect) {
    let totals = &app.summary.totals;
    let resources = &app.summary.resources;

    let mut text = vec![
        Line::from(vec![
            Span::styled("Subjects: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", totals.total_subjects),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Topics: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", totals.total_topics),
                Style::default().fg(Color::White),
            ),
        ]),
        Line::from(vec![
            Span::styled("Completed: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}", totals.completed_topics),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Progress: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}%", totals.overall_progress),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled("Recent resources: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!(
                    "{} videos, {} files",
                    resources.youtube_links, resources.attachments
                ),
                Style::default().fg(Color::Magenta),
            ),
        ]),
    ];

    if let (Some(weak_avg), Some(strong_avg)) = (
        app.summary.confidence.weak_avg_confidence,
        app.summary.confidence.strong_avg_confidence,
    ) {
        text.push(Line::from(vec![
            Span::styled("Confidence: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}% weak", weak_avg),
                Style::default().fg(Color::Red),
            ),
            Span::raw(" / "),
            Span::styled(
                format!("{}% strong", strong_avg),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Overview ")
        .title_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(text).block(block);
    f.render_widget(paragraph, area);
}

fn draw_chart(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .summary
        .chart
        .iter()
        .map(|point| {
            let bar = progress_bar(point.completed, point.completed + point.remaining);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<17}", point.label),
                    Style::default().fg(Color::White),
                ),
                Span::styled(bar, Style::default().fg(Color::Green)),
                Span::styled(
                    format!(" {}/{}", point.completed, point.completed + point.remaining),
                    Style::default().fg(Color::Yellow),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Subject Progress ")
        .title_style(Style::default().fg(Color::Green));

    if items.is_empty() {
        let paragraph = Paragraph::new("No subjects yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
    } else {
        let list = List::new(items).block(block);
        f.render_widget(list, area);
    }
}

fn draw_weak(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Needs Focus ")
        .title_style(Style::default().fg(Color::Red));

    let items = confidence_items(&app.summary.confidence.weak, Color::Red);
    if items.is_empty() {
        let paragraph = Paragraph::new("No assessed topics yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
    } else {
        let list = List::new(items).block(block);
        f.render_widget(list, area);
    }
}

fn draw_strong(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Strengths ")
        .title_style(Style::default().fg(Color::Green));

    let items = confidence_items(&app.summary.confidence.strong, Color::Green);
    if items.is_empty() {
        let paragraph = Paragraph::new("Nothing at 50% or above yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
    } else {
        let list = List::new(items).block(block);
        f.render_widget(list, area);
    }
}

fn confidence_items(topics: &[Topic], color: Color) -> Vec<ListItem<'_>> {
    topics
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let confidence = topic.confidence_percentage.unwrap_or(0);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:<30}", truncate(&topic.topic_name, 28)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(format!("{:>3}%", confidence), Style::default().fg(color)),
            ]))
        })
        .collect()
}

fn draw_recent(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .summary
        .recent_topics
        .iter()
        .map(|topic| {
            let studied = topic
                .date_studied
                .map(|d| d.format("%b %d").to_string())
                .unwrap_or_else(|| "never".to_string());
            let done = if topic.is_completed {
                Span::styled("done", Style::default().fg(Color::Green))
            } else {
                Span::styled(
                    format!("{}%", topic.progress_percentage),
                    Style::default().fg(Color::Yellow),
                )
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<10}", studied),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<32}", truncate(&topic.topic_name, 30)),
                    Style::default().fg(Color::White),
                ),
                done,
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Topics ")
        .title_style(Style::default().fg(Color::Magenta));

    if items.is_empty() {
        let paragraph = Paragraph::new("No topics studied yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
    } else {
        let list = List::new(items).block(block);
        f.render_widget(list, area);
    }
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
