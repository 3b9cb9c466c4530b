mod db;
mod models;
mod session;
mod summary;
mod tui;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use db::{Database, NewTopic, TopicPatch};
use models::{Attachment, JsonOutput};

const DEFAULT_DB_NAME: &str = "studytrack.db";

#[derive(Parser)]
#[command(name = "studytrack")]
#[command(about = "Track study subjects, topics, and progress from the terminal")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Manage subjects
    #[command(subcommand)]
    Subject(SubjectCommands),

    /// Manage topics
    #[command(subcommand)]
    Topic(TopicCommands),

    /// Show the composed dashboard summary
    Dashboard,

    /// Launch interactive terminal UI
    Tui,
}

#[derive(Subcommand)]
enum SubjectCommands {
    /// List all subjects with their progress
    List,

    /// Add a new subject
    Add {
        /// Subject name
        name: String,

        /// Declared number of topics (0 = infer from actual count)
        #[arg(long, short, default_value_t = 0)]
        total: u32,
    },

    /// Show subject details
    Show {
        /// Subject ID
        id: i64,
    },

    /// Update subject name and/or declared topic count
    Update {
        /// Subject ID
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New declared topic count
        #[arg(long)]
        total: Option<u32>,
    },

    /// Delete a subject and all of its topics
    Delete {
        /// Subject ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum TopicCommands {
    /// List topics, optionally for one subject
    List {
        /// Filter by subject ID
        #[arg(long, short)]
        subject: Option<i64>,
    },

    /// Add a new topic under a subject
    Add {
        /// Subject ID
        subject_id: i64,

        /// Topic name
        name: String,

        /// Mark as already completed
        #[arg(long)]
        completed: bool,

        /// Progress percentage (0-100)
        #[arg(long, short, default_value_t = 0)]
        progress: u8,

        /// Confidence percentage (0-100); omit to leave unassessed
        #[arg(long, short)]
        confidence: Option<u8>,

        /// Revision target count
        #[arg(long, default_value_t = 0)]
        revision_target: u32,

        /// Revisions done so far
        #[arg(long, default_value_t = 0)]
        revision_current: u32,

        /// Study source (book, course, ...)
        #[arg(long, short)]
        source: Option<String>,

        /// Free-form comment
        #[arg(long)]
        comment: Option<String>,

        /// Date studied (YYYY-MM-DD)
        #[arg(long, short)]
        date: Option<String>,

        /// YouTube link (repeatable)
        #[arg(long = "youtube", action = clap::ArgAction::Append)]
        youtube_links: Vec<String>,
    },

    /// Show topic details
    Show {
        /// Topic ID
        id: i64,
    },

    /// Update topic fields (only provided flags change)
    Update {
        /// Topic ID
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Completion state (true/false)
        #[arg(long)]
        completed: Option<bool>,

        /// Progress percentage (0-100)
        #[arg(long, short)]
        progress: Option<u8>,

        /// Confidence percentage (0-100)
        #[arg(long, short)]
        confidence: Option<u8>,

        /// Clear the confidence assessment entirely
        #[arg(long, conflicts_with = "confidence")]
        clear_confidence: bool,

        /// Revision target count
        #[arg(long)]
        revision_target: Option<u32>,

        /// Revisions done so far
        #[arg(long)]
        revision_current: Option<u32>,

        /// Study source
        #[arg(long, short)]
        source: Option<String>,

        /// Free-form comment
        #[arg(long)]
        comment: Option<String>,

        /// Date studied (YYYY-MM-DD)
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Mark a topic completed
    Complete {
        /// Topic ID
        id: i64,
    },

    /// Append a YouTube link to a topic
    Link {
        /// Topic ID
        id: i64,

        /// Link URL
        url: String,
    },

    /// Append a file attachment record to a topic
    Attach {
        /// Topic ID
        id: i64,

        /// Attachment name
        #[arg(long)]
        name: String,

        /// Attachment URL
        #[arg(long)]
        url: String,

        /// MIME type
        #[arg(long, default_value = "application/octet-stream")]
        mime: String,

        /// Size in bytes
        #[arg(long, default_value_t = 0)]
        size: u64,
    },

    /// Delete a topic
    Delete {
        /// Topic ID
        id: i64,
    },
}

fn get_db_path() -> PathBuf {
    if let Ok(path) = std::env::var("STUDYTRACK_DB") {
        return PathBuf::from(path);
    }

    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("studytrack");

    std::fs::create_dir_all(&config_dir).ok();
    config_dir.join(DEFAULT_DB_NAME)
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Use YYYY-MM-DD", raw))
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = get_db_path();
    let db = Database::open(&db_path)?;

    match cli.command {
        Commands::Init => {
            db.init()?;
            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
            } else {
                println!("Database initialized at: {}", db_path.display());
            }
        }

        Commands::Subject(subject_cmd) => run_subject(&db, cli.json, subject_cmd)?,

        Commands::Topic(topic_cmd) => run_topic(&db, cli.json, topic_cmd)?,

        Commands::Dashboard => {
            let (subjects, topics) = db.snapshot()?;
            let dashboard = summary::dashboard_summary(&subjects, &topics);

            if cli.json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&dashboard))?);
            } else {
                print_dashboard(&dashboard);
            }
        }

        Commands::Tui => {
            db.init()?;
            tui::run(db)?;
        }
    }

    Ok(())
}

fn run_subject(
    db: &Database,
    json: bool,
    cmd: SubjectCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        SubjectCommands::List => {
            let (subjects, topics) = db.snapshot()?;
            let projected: Vec<models::SubjectWithProgress> = subjects
                .iter()
                .map(|s| models::SubjectWithProgress {
                    subject: s.clone(),
                    progress: summary::subject_progress(s, &topics),
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&projected))?);
            } else if projected.is_empty() {
                println!("No subjects found.");
            } else {
                println!("{:<5} {:<30} {:>10} {:>9}", "ID", "NAME", "DONE/TOTAL", "PROGRESS");
                println!("{}", "-".repeat(58));
                for sw in projected {
                    let declared = if sw.subject.total_topics > 0 {
                        sw.subject.total_topics
                    } else {
                        sw.progress.actual_topics
                    };
                    println!(
                        "{:<5} {:<30} {:>6}/{:<3} {:>8}%",
                        sw.subject.id,
                        truncate(&sw.subject.name, 28),
                        sw.progress.completed_topics,
                        declared,
                        sw.progress.progress
                    );
                }
            }
        }

        SubjectCommands::Add { name, total } => {
            let id = db.add_subject(&name, total)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "id": id,
                        "name": name
                    })))?
                );
            } else {
                println!("Added subject '{}' with ID: {}", name, id);
            }
        }

        SubjectCommands::Show { id } => {
            if let Some(subject) = db.get_subject(id)? {
                let topics = db.list_topics(Some(id))?;
                let progress = summary::subject_progress(&subject, &topics);

                if json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "subject": subject,
                            "progress": progress,
                            "topics": topics
                        })))?
                    );
                } else {
                    println!("Subject: {}", subject.name);
                    println!("ID: {}", subject.id);
                    println!("Declared topics: {}", subject.total_topics);
                    println!("Created: {}", subject.created_at);
                    println!();
                    println!("--- Progress ---");
                    println!("Completed: {}", progress.completed_topics);
                    println!("Actual topics: {}", progress.actual_topics);
                    println!("Progress: {}%", progress.progress);
                }
            } else if json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err("Subject not found"))?
                );
            } else {
                println!("Subject not found.");
            }
        }

        SubjectCommands::Update { id, name, total } => {
            let subject = db.update_subject(id, name.as_deref(), total)?;
            if json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&subject))?);
            } else {
                println!(
                    "Updated subject {}: '{}' ({} declared topics)",
                    subject.id, subject.name, subject.total_topics
                );
            }
        }

        SubjectCommands::Delete { id } => {
            if db.delete_subject(id)? {
                if json {
                    println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                } else {
                    println!("Subject {} deleted (topics included).", id);
                }
            } else if json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err("Subject not found"))?
                );
            } else {
                println!("Subject not found.");
            }
        }
    }

    Ok(())
}

fn run_topic(
    db: &Database,
    json: bool,
    cmd: TopicCommands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        TopicCommands::List { subject } => {
            let topics = db.list_topics(subject)?;
            if json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&topics))?);
            } else if topics.is_empty() {
                println!("No topics found.");
            } else {
                println!(
                    "{:<5} {:<30} {:<5} {:>9} {:>11} {:<10}",
                    "ID", "NAME", "DONE", "PROGRESS", "CONFIDENCE", "STUDIED"
                );
                println!("{}", "-".repeat(76));
                for topic in topics {
                    let confidence = topic
                        .confidence_percentage
                        .map(|c| format!("{}%", c))
                        .unwrap_or_else(|| "-".to_string());
                    let studied = topic
                        .date_studied
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<5} {:<30} {:<5} {:>8}% {:>11} {:<10}",
                        topic.id,
                        truncate(&topic.topic_name, 28),
                        if topic.is_completed { "yes" } else { "no" },
                        topic.progress_percentage,
                        confidence,
                        studied
                    );
                }
            }
        }

        TopicCommands::Add {
            subject_id,
            name,
            completed,
            progress,
            confidence,
            revision_target,
            revision_current,
            source,
            comment,
            date,
            youtube_links,
        } => {
            let date_studied = date.as_deref().map(parse_date).transpose()?;
            let id = db.add_topic(NewTopic {
                subject_id,
                topic_name: name.clone(),
                is_completed: completed,
                progress_percentage: progress,
                confidence_percentage: confidence,
                revision_target,
                revision_current,
                source,
                comment,
                date_studied,
                youtube_links,
                attachments: vec![],
            })?;

            if json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "id": id,
                        "topic_name": name
                    })))?
                );
            } else {
                println!("Added topic '{}' with ID: {}", name, id);
            }
        }

        TopicCommands::Show { id } => {
            if let Some(topic) = db.get_topic(id)? {
                if json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&topic))?);
                } else {
                    print_topic(&topic);
                }
            } else if json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err("Topic not found"))?
                );
            } else {
                println!("Topic not found.");
            }
        }

        TopicCommands::Update {
            id,
            name,
            completed,
            progress,
            confidence,
            clear_confidence,
            revision_target,
            revision_current,
            source,
            comment,
            date,
        } => {
            let confidence_patch = if clear_confidence {
                Some(None)
            } else {
                confidence.map(Some)
            };
            let date_patch = date
                .as_deref()
                .map(parse_date)
                .transpose()?
                .map(Some);

            let topic = db.update_topic(
                id,
                TopicPatch {
                    topic_name: name,
                    is_completed: completed,
                    progress_percentage: progress,
                    confidence_percentage: confidence_patch,
                    revision_target,
                    revision_current,
                    source: source.map(Some),
                    comment: comment.map(Some),
                    date_studied: date_patch,
                    ..Default::default()
                },
            )?;

            if json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&topic))?);
            } else {
                println!("Updated topic {}.", topic.id);
            }
        }

        TopicCommands::Complete { id } => {
            let topic = db.set_topic_completed(id, true)?;
            if json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&topic))?);
            } else {
                println!("Topic {} marked completed.", topic.id);
            }
        }

        TopicCommands::Link { id, url } => {
            let topic = db.add_youtube_link(id, &url)?;
            if json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&topic))?);
            } else {
                println!(
                    "Added link to topic {} ({} total).",
                    topic.id,
                    topic.youtube_links.len()
                );
            }
        }

        TopicCommands::Attach {
            id,
            name,
            url,
            mime,
            size,
        } => {
            let topic = db.add_attachment(
                id,
                Attachment {
                    name,
                    url,
                    mime_type: mime,
                    size_bytes: size,
                },
            )?;
            if json {
                println!("{}", serde_json::to_string(&JsonOutput::ok(&topic))?);
            } else {
                println!(
                    "Added attachment to topic {} ({} total).",
                    topic.id,
                    topic.attachments.len()
                );
            }
        }

        TopicCommands::Delete { id } => {
            if db.delete_topic(id)? {
                if json {
                    println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                } else {
                    println!("Topic {} deleted.", id);
                }
            } else if json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err("Topic not found"))?
                );
            } else {
                println!("Topic not found.");
            }
        }
    }

    Ok(())
}

fn print_topic(topic: &models::Topic) {
    println!("Topic: {}", topic.topic_name);
    println!("ID: {} (subject {})", topic.id, topic.subject_id);
    println!("Completed: {}", if topic.is_completed { "yes" } else { "no" });
    println!("Progress: {}%", topic.progress_percentage);
    match topic.confidence_percentage {
        Some(c) => println!("Confidence: {}%", c),
        None => println!("Confidence: not assessed"),
    }
    println!(
        "Revisions: {}/{}",
        topic.revision_current, topic.revision_target
    );
    if let Some(source) = &topic.source {
        println!("Source: {}", source);
    }
    if let Some(comment) = &topic.comment {
        println!("Comment: {}", comment);
    }
    if let Some(date) = topic.date_studied {
        println!("Studied: {}", date);
    }
    if !topic.youtube_links.is_empty() {
        println!("YouTube links:");
        for link in &topic.youtube_links {
            println!("  - {}", link);
        }
    }
    if !topic.attachments.is_empty() {
        println!("Attachments:");
        for a in &topic.attachments {
            println!("  - {} ({}, {} bytes)", a.name, a.mime_type, a.size_bytes);
        }
    }
    println!("Created: {}", topic.created_at);
}

fn print_dashboard(dashboard: &models::DashboardSummary) {
    println!("=== Study Dashboard ===");
    println!("Subjects: {}", dashboard.totals.total_subjects);
    println!("Topics (declared): {}", dashboard.totals.total_topics);
    println!("Completed: {}", dashboard.totals.completed_topics);
    println!("Overall progress: {}%", dashboard.totals.overall_progress);

    if !dashboard.chart.is_empty() {
        println!();
        println!("--- Subject Progress ---");
        for point in &dashboard.chart {
            println!(
                "{:<16} {:>3} done, {:>3} remaining",
                point.label, point.completed, point.remaining
            );
        }
    }

    if !dashboard.confidence.weak.is_empty() {
        println!();
        println!("--- Needs Focus ---");
        for topic in &dashboard.confidence.weak {
            println!(
                "{:<30} {:>3}%",
                truncate(&topic.topic_name, 28),
                topic.confidence_percentage.unwrap_or(0)
            );
        }
    }

    if !dashboard.confidence.strong.is_empty() {
        println!();
        println!("--- Strengths ---");
        for topic in &dashboard.confidence.strong {
            println!(
                "{:<30} {:>3}%",
                truncate(&topic.topic_name, 28),
                topic.confidence_percentage.unwrap_or(0)
            );
        }
    }

    if let (Some(weak_avg), Some(strong_avg), Some(tracked)) = (
        dashboard.confidence.weak_avg_confidence,
        dashboard.confidence.strong_avg_confidence,
        dashboard.confidence.topics_tracked,
    ) {
        println!();
        println!(
            "Avg weak confidence: {}%  Avg strong confidence: {}%  Topics tracked: {}",
            weak_avg, strong_avg, tracked
        );
    }

    if !dashboard.recent_topics.is_empty() {
        println!();
        println!("--- Recent Topics ---");
        for topic in &dashboard.recent_topics {
            let studied = topic
                .date_studied
                .map(|d| d.to_string())
                .unwrap_or_else(|| "never".to_string());
            println!(
                "{:<30} {:>8}  {}%",
                truncate(&topic.topic_name, 28),
                studied,
                topic.progress_percentage
            );
        }
        println!();
        println!(
            "Resources in recent topics: {} videos, {} files ({} total)",
            dashboard.resources.youtube_links,
            dashboard.resources.attachments,
            dashboard.resources.total
        );
    }
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
