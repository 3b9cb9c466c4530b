mod ui;
mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::db::Database;
use crate::models::{Attachment, DashboardSummary, SubjectWithProgress, Topic};
use crate::session::SessionState;
use crate::summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Subjects,
    Topics,
    TopicDetail,
    Resources,
}

impl View {
    fn next(&self) -> Self {
        match self {
            View::Login => View::Login,
            View::Dashboard => View::Subjects,
            View::Subjects => View::Topics,
            View::Topics => View::Resources,
            View::TopicDetail => View::Topics,
            View::Resources => View::Dashboard,
        }
    }

    fn prev(&self) -> Self {
        match self {
            View::Login => View::Login,
            View::Dashboard => View::Resources,
            View::Subjects => View::Dashboard,
            View::Topics => View::Subjects,
            View::TopicDetail => View::Topics,
            View::Resources => View::Topics,
        }
    }
}

/// One row in the flat all-resources view: a topic's video link or file
/// attachment, flattened across the whole topic list.
pub struct ResourceEntry {
    pub topic_name: String,
    pub kind: ResourceKind,
}

pub enum ResourceKind {
    Video(String),
    File(Attachment),
}

fn resource_entries(topics: &[Topic]) -> Vec<ResourceEntry> {
    let mut entries = Vec::new();
    for topic in topics {
        for link in &topic.youtube_links {
            entries.push(ResourceEntry {
                topic_name: topic.topic_name.clone(),
                kind: ResourceKind::Video(link.clone()),
            });
        }
        for attachment in &topic.attachments {
            entries.push(ResourceEntry {
                topic_name: topic.topic_name.clone(),
                kind: ResourceKind::File(attachment.clone()),
            });
        }
    }
    entries
}

pub struct StatefulList<T> {
    pub items: Vec<T>,
    pub selected: Option<usize>,
}

impl<T> StatefulList<T> {
    fn with_items(items: Vec<T>) -> Self {
        let selected = if items.is_empty() { None } else { Some(0) };
        Self { items, selected }
    }

    fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= self.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    self.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    fn selected_item(&self) -> Option<&T> {
        self.selected.and_then(|i| self.items.get(i))
    }
}

pub struct App {
    db: Database,
    pub session: SessionState,
    pub view: View,
    pub subjects: StatefulList<SubjectWithProgress>,
    pub topics: StatefulList<Topic>,
    pub resources: StatefulList<ResourceEntry>,
    pub selected_topic: Option<Topic>,
    pub summary: DashboardSummary,
    pub phrase_input: String,
    pub login_error: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(db: Database) -> Result<Self, Box<dyn std::error::Error>> {
        // Data is loaded up front but stays hidden until the unlock
        // phrase is entered.
        let (subjects, topics) = db.snapshot()?;
        let dashboard = summary::dashboard_summary(&subjects, &topics);
        let projected: Vec<SubjectWithProgress> = subjects
            .iter()
            .map(|s| SubjectWithProgress {
                subject: s.clone(),
                progress: summary::subject_progress(s, &topics),
            })
            .collect();

        Ok(Self {
            db,
            session: SessionState::default(),
            view: View::Login,
            subjects: StatefulList::with_items(projected),
            resources: StatefulList::with_items(resource_entries(&topics)),
            topics: StatefulList::with_items(topics),
            selected_topic: None,
            summary: dashboard,
            phrase_input: String::new(),
            login_error: false,
            should_quit: false,
        })
    }

    pub fn refresh_data(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let (subjects, topics) = self.db.snapshot()?;
        self.summary = summary::dashboard_summary(&subjects, &topics);
        self.subjects = StatefulList::with_items(
            subjects
                .iter()
                .map(|s| SubjectWithProgress {
                    subject: s.clone(),
                    progress: summary::subject_progress(s, &topics),
                })
                .collect(),
        );
        self.resources = StatefulList::with_items(resource_entries(&topics));
        self.topics = StatefulList::with_items(topics);
        Ok(())
    }

    fn select_topic(&mut self) {
        if let Some(topic) = self.topics.selected_item() {
            self.selected_topic = Some(topic.clone());
            self.view = View::TopicDetail;
        }
    }

    fn logout(&mut self) {
        self.session.logout();
        self.phrase_input.clear();
        self.login_error = false;
        self.view = View::Login;
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
    ) -> Result<(), Box<dyn std::error::Error>> {
        // The login view captures all input until the session unlocks.
        if self.view == View::Login {
            match key {
                KeyCode::Esc => {
                    self.phrase_input.clear();
                    self.login_error = false;
                }
                KeyCode::Enter => {
                    if self.session.unlock(&self.phrase_input) {
                        self.phrase_input.clear();
                        self.login_error = false;
                        self.refresh_data()?;
                        self.view = View::Dashboard;
                    } else {
                        self.login_error = true;
                    }
                }
                KeyCode::Backspace => {
                    self.phrase_input.pop();
                }
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true;
                }
                KeyCode::Char(c) => {
                    self.phrase_input.push(c);
                    self.login_error = false;
                }
                _ => {}
            }
            return Ok(());
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,

            // Refresh: Ctrl+r
            KeyCode::Char('r') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.refresh_data()?;
            }

            // Logout returns to the phrase prompt
            KeyCode::Char('L') => self.logout(),

            KeyCode::Esc => {
                if self.view == View::TopicDetail {
                    self.view = View::Topics;
                    self.selected_topic = None;
                }
            }

            // Navigation between views: h/l (left/right like vim)
            KeyCode::Char('h') | KeyCode::Left => match self.view {
                View::TopicDetail => {
                    self.view = View::Topics;
                    self.selected_topic = None;
                }
                _ => self.view = self.view.prev(),
            },
            KeyCode::Char('l') | KeyCode::Right => match self.view {
                View::Topics => self.select_topic(),
                _ => self.view = self.view.next(),
            },

            // Tab still works for quick view switching
            KeyCode::Tab => {
                if modifiers.contains(KeyModifiers::SHIFT) {
                    self.view = self.view.prev();
                } else {
                    self.view = self.view.next();
                }
            }
            KeyCode::BackTab => {
                self.view = self.view.prev();
            }

            // List navigation: j/k (vim up/down)
            KeyCode::Char('j') | KeyCode::Down => match self.view {
                View::Subjects => self.subjects.next(),
                View::Topics => self.topics.next(),
                View::Resources => self.resources.next(),
                _ => {}
            },
            KeyCode::Char('k') | KeyCode::Up => match self.view {
                View::Subjects => self.subjects.previous(),
                View::Topics => self.topics.previous(),
                View::Resources => self.resources.previous(),
                _ => {}
            },

            // Jump to top/bottom: g for top, G for bottom
            KeyCode::Char('g') => match self.view {
                View::Subjects if !self.subjects.items.is_empty() => {
                    self.subjects.selected = Some(0);
                }
                View::Topics if !self.topics.items.is_empty() => {
                    self.topics.selected = Some(0);
                }
                View::Resources if !self.resources.items.is_empty() => {
                    self.resources.selected = Some(0);
                }
                _ => {}
            },
            KeyCode::Char('G') => match self.view {
                View::Subjects if !self.subjects.items.is_empty() => {
                    self.subjects.selected = Some(self.subjects.items.len() - 1);
                }
                View::Topics if !self.topics.items.is_empty() => {
                    self.topics.selected = Some(self.topics.items.len() - 1);
                }
                View::Resources if !self.resources.items.is_empty() => {
                    self.resources.selected = Some(self.resources.items.len() - 1);
                }
                _ => {}
            },

            KeyCode::Enter => {
                if self.view == View::Topics {
                    self.select_topic();
                }
            }

            _ => {}
        }
        Ok(())
    }
}

pub fn run(db: Database) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(db)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key.code, key.modifiers)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod view_tests {
        use super::*;

        #[test]
        fn views_cycle_forward() {
            assert_eq!(View::Dashboard.next(), View::Subjects);
            assert_eq!(View::Subjects.next(), View::Topics);
            assert_eq!(View::Topics.next(), View::Resources);
            assert_eq!(View::Resources.next(), View::Dashboard);
        }

        #[test]
        fn views_cycle_backward() {
            assert_eq!(View::Dashboard.prev(), View::Resources);
            assert_eq!(View::Resources.prev(), View::Topics);
            assert_eq!(View::Topics.prev(), View::Subjects);
            assert_eq!(View::Subjects.prev(), View::Dashboard);
        }

        #[test]
        fn topic_detail_returns_to_topics() {
            assert_eq!(View::TopicDetail.next(), View::Topics);
            assert_eq!(View::TopicDetail.prev(), View::Topics);
        }

        #[test]
        fn login_does_not_cycle() {
            assert_eq!(View::Login.next(), View::Login);
            assert_eq!(View::Login.prev(), View::Login);
        }
    }

    mod stateful_list_tests {
        use super::*;

        #[test]
        fn empty_list_has_no_selection() {
            let list: StatefulList<i32> = StatefulList::with_items(vec![]);
            assert!(list.selected.is_none());
            assert!(list.selected_item().is_none());
        }

        #[test]
        fn nonempty_list_selects_first() {
            let list = StatefulList::with_items(vec![10, 20, 30]);
            assert_eq!(list.selected, Some(0));
            assert_eq!(list.selected_item(), Some(&10));
        }

        #[test]
        fn next_wraps_around() {
            let mut list = StatefulList::with_items(vec![1, 2]);
            list.next();
            assert_eq!(list.selected, Some(1));
            list.next();
            assert_eq!(list.selected, Some(0));
        }

        #[test]
        fn previous_wraps_around() {
            let mut list = StatefulList::with_items(vec![1, 2]);
            list.previous();
            assert_eq!(list.selected, Some(1));
        }

        #[test]
        fn navigation_noop_on_empty_list() {
            let mut list: StatefulList<i32> = StatefulList::with_items(vec![]);
            list.next();
            list.previous();
            assert!(list.selected.is_none());
        }
    }

    mod resource_entry_tests {
        use super::*;

        fn make_topic(id: i64, name: &str) -> Topic {
            Topic {
                id,
                subject_id: 1,
                topic_name: name.to_string(),
                is_completed: false,
                progress_percentage: 0,
                confidence_percentage: None,
                revision_target: 0,
                revision_current: 0,
                source: None,
                comment: None,
                date_studied: None,
                youtube_links: vec![],
                attachments: vec![],
                created_at: "2024-01-01T00:00:00Z".to_string(),
            }
        }

        #[test]
        fn flattens_links_and_attachments_in_topic_order() {
            let mut waves = make_topic(1, "Waves");
            waves.youtube_links = vec![
                "https://youtu.be/a".to_string(),
                "https://youtu.be/b".to_string(),
            ];
            let mut optics = make_topic(2, "Optics");
            optics.attachments = vec![Attachment {
                name: "lens-notes.pdf".to_string(),
                url: "https://files.example/lens-notes.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                size_bytes: 4096,
            }];

            let entries = resource_entries(&[waves, optics]);
            assert_eq!(entries.len(), 3);
            assert_eq!(entries[0].topic_name, "Waves");
            assert!(matches!(&entries[0].kind, ResourceKind::Video(url) if url.ends_with("/a")));
            assert!(matches!(&entries[1].kind, ResourceKind::Video(url) if url.ends_with("/b")));
            assert_eq!(entries[2].topic_name, "Optics");
            assert!(
                matches!(&entries[2].kind, ResourceKind::File(a) if a.name == "lens-notes.pdf")
            );
        }

        #[test]
        fn links_come_before_attachments_within_a_topic() {
            let mut topic = make_topic(1, "Waves");
            topic.youtube_links = vec!["https://youtu.be/a".to_string()];
            topic.attachments = vec![Attachment {
                name: "sheet.png".to_string(),
                url: "https://files.example/sheet.png".to_string(),
                mime_type: "image/png".to_string(),
                size_bytes: 512,
            }];

            let entries = resource_entries(&[topic]);
            assert!(matches!(entries[0].kind, ResourceKind::Video(_)));
            assert!(matches!(entries[1].kind, ResourceKind::File(_)));
        }

        #[test]
        fn no_resources_yields_no_entries() {
            let entries = resource_entries(&[make_topic(1, "Waves")]);
            assert!(entries.is_empty());
        }
    }
}
