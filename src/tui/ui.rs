use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use super::widgets::{dashboard, login, resources, subjects, topic_detail, topics};
use super::{App, View};

pub fn draw(f: &mut Frame, app: &App) {
    // The login prompt owns the whole frame until the session unlocks.
    if app.view == View::Login || !app.session.is_authenticated() {
        login::draw(f, app, f.area());
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Help bar
        ])
        .split(f.area());

    draw_tabs(f, app, chunks[0]);
    draw_content(f, app, chunks[1]);
    draw_help_bar(f, app, chunks[2]);
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let tab_titles = vec!["Dashboard", "Subjects", "Topics", "Resources"];
    let selected = match app.view {
        View::Login | View::Dashboard => 0,
        View::Subjects => 1,
        View::Topics | View::TopicDetail => 2,
        View::Resources => 3,
    };

    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL).title(" StudyTrack "))
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

fn draw_content(f: &mut Frame, app: &App, area: Rect) {
    match app.view {
        View::Login => login::draw(f, app, area),
        View::Dashboard => dashboard::draw(f, app, area),
        View::Subjects => subjects::draw(f, app, area),
        View::Topics => topics::draw(f, app, area),
        View::TopicDetail => topic_detail::draw(f, app, area),
        View::Resources => resources::draw(f, app, area),
    }
}

fn draw_help_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("h/l", Style::default().fg(Color::Cyan)),
        Span::raw(" Views  "),
    ];

    match app.view {
        View::Login => {}
        View::Dashboard => {
            spans.extend(vec![
                Span::styled("^r", Style::default().fg(Color::Cyan)),
                Span::raw(" Refresh  "),
            ]);
        }
        View::Subjects => {
            spans.extend(vec![
                Span::styled("j/k", Style::default().fg(Color::Cyan)),
                Span::raw(" Nav  "),
                Span::styled("g/G", Style::default().fg(Color::Cyan)),
                Span::raw(" Top/Bot  "),
            ]);
        }
        View::Topics => {
            spans.extend(vec![
                Span::styled("j/k", Style::default().fg(Color::Cyan)),
                Span::raw(" Nav  "),
                Span::styled("g/G", Style::default().fg(Color::Cyan)),
                Span::raw(" Top/Bot  "),
                Span::styled("l/<CR>", Style::default().fg(Color::Cyan)),
                Span::raw(" Open  "),
            ]);
        }
        View::TopicDetail => {
            spans.extend(vec![
                Span::styled("h/<Esc>", Style::default().fg(Color::Cyan)),
                Span::raw(" Back  "),
                Span::styled("^r", Style::default().fg(Color::Cyan)),
                Span::raw(" Refresh  "),
            ]);
        }
        View::Resources => {
            spans.extend(vec![
                Span::styled("j/k", Style::default().fg(Color::Cyan)),
                Span::raw(" Nav  "),
                Span::styled("g/G", Style::default().fg(Color::Cyan)),
                Span::raw(" Top/Bot  "),
            ]);
        }
    }

    spans.extend(vec![
        Span::styled("L", Style::default().fg(Color::Cyan)),
        Span::raw(" Logout  "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(" Quit"),
    ]);

    let help = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

    f.render_widget(help, area);
}
