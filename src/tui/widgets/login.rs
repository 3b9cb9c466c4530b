use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::App;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" StudyTrack ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(outer, area);

    let box_area = centered_rect(60, 9, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Prompt
            Constraint::Length(3), // Phrase input
            Constraint::Length(2), // Status / hint
        ])
        .split(box_area);

    let prompt = Paragraph::new(Line::from(vec![Span::styled(
        "Say the unlock phrase to enter your dashboard",
        Style::default().fg(Color::White),
    )]));
    f.render_widget(prompt, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(&app.phrase_input, Style::default().fg(Color::White)),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Phrase ")
            .title_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(input, chunks[1]);

    let status = if app.login_error {
        Line::from(Span::styled(
            "Phrase not recognized. Try again.",
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(vec![
            Span::styled("<CR>", Style::default().fg(Color::Cyan)),
            Span::raw(" Unlock  "),
            Span::styled("<Esc>", Style::default().fg(Color::Cyan)),
            Span::raw(" Clear  "),
            Span::styled("^c", Style::default().fg(Color::Cyan)),
            Span::raw(" Quit"),
        ])
    };
    f.render_widget(Paragraph::new(status), chunks[2]);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
