use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::models::Topic;
use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(topic) = &app.selected_topic else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Topic Detail ");
        let paragraph = Paragraph::new("No topic selected").block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Header info
            Constraint::Length(5), // Progress
            Constraint::Min(0),    // Resources
        ])
        .split(area);

    draw_header(f, topic, chunks[0]);
    draw_progress(f, topic, chunks[1]);
    draw_resources(f, topic, chunks[2]);
}

fn draw_header(f: &mut Frame, topic: &Topic, area: Rect) {
    let source = topic.source.as_deref().unwrap_or("No source");
    let comment = topic.comment.as_deref().unwrap_or("No comment");

    let text = vec![
        Line::from(vec![
            Span::styled("Source: ", Style::default().fg(Color::Gray)),
            Span::styled(source, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Comment: ", Style::default().fg(Color::Gray)),
            Span::styled(comment, Style::default().fg(Color::White)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", topic.topic_name))
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn draw_progress(f: &mut Frame, topic: &Topic, area: Rect) {
    let studied = topic
        .date_studied
        .map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "Not set".to_string());

    let confidence_span = match topic.confidence_percentage {
        Some(c) => Span::styled(
            format!("{}%", c),
            Style::default().fg(if c >= 50 { Color::Green } else { Color::Red }),
        ),
        None => Span::styled("Not assessed", Style::default().fg(Color::DarkGray)),
    };

    let completed_span = if topic.is_completed {
        Span::styled("Completed", Style::default().fg(Color::Green))
    } else {
        Span::styled("In progress", Style::default().fg(Color::Yellow))
    };

    let text = vec![
        Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            completed_span,
            Span::raw("  "),
            Span::styled("Progress: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}%", topic.progress_percentage),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  "),
            Span::styled("Confidence: ", Style::default().fg(Color::Gray)),
            confidence_span,
        ]),
        Line::from(vec![
            Span::styled("Revisions: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", topic.revision_current, topic.revision_target),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!(" ({} left)", topic.revisions_left()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw("  "),
            Span::styled("Studied: ", Style::default().fg(Color::Gray)),
            Span::styled(studied, Style::default().fg(Color::White)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Progress ")
        .title_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(text).block(block);
    f.render_widget(paragraph, area);
}

fn draw_resources(f: &mut Frame, topic: &Topic, area: Rect) {
    let mut items: Vec<ListItem> = topic
        .youtube_links
        .iter()
        .map(|link| {
            ListItem::new(Line::from(vec![
                Span::styled("▶ ", Style::default().fg(Color::Red)),
                Span::styled(link.as_str(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    items.extend(topic.attachments.iter().map(|a| {
        ListItem::new(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Cyan)),
            Span::styled(a.name.as_str(), Style::default().fg(Color::White)),
            Span::styled(
                format!(" ({}, {} bytes)", a.mime_type, a.size_bytes),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
    }));

    let total = topic.youtube_links.len() + topic.attachments.len();
    let title = if total == 0 {
        " Resources (none) ".to_string()
    } else {
        format!(" Resources ({}) ", total)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Style::default().fg(Color::Magenta));

    if items.is_empty() {
        let paragraph = Paragraph::new("No links or attachments yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
    } else {
        let list = List::new(items).block(block);
        f.render_widget(list, area);
    }
}
