use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

use crate::models::{Attachment, Subject, Topic};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid json column: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Validation(String),
    #[error("{0} {1} not found")]
    NotFound(&'static str, i64),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Fields for creating a topic; unspecified fields take the same defaults
/// the web form used.
#[derive(Debug, Clone, Default)]
pub struct NewTopic {
    pub subject_id: i64,
    pub topic_name: String,
    pub is_completed: bool,
    pub progress_percentage: u8,
    pub confidence_percentage: Option<u8>,
    pub revision_target: u32,
    pub revision_current: u32,
    pub source: Option<String>,
    pub comment: Option<String>,
    pub date_studied: Option<NaiveDate>,
    pub youtube_links: Vec<String>,
    pub attachments: Vec<Attachment>,
}

/// Partial update: only `Some` fields change. The doubly-wrapped options
/// distinguish "leave as is" from "clear the stored value".
#[derive(Debug, Clone, Default)]
pub struct TopicPatch {
    pub topic_name: Option<String>,
    pub is_completed: Option<bool>,
    pub progress_percentage: Option<u8>,
    pub confidence_percentage: Option<Option<u8>>,
    pub revision_target: Option<u32>,
    pub revision_current: Option<u32>,
    pub source: Option<Option<String>>,
    pub comment: Option<Option<String>>,
    pub date_studied: Option<Option<NaiveDate>>,
    pub youtube_links: Option<Vec<String>>,
    pub attachments: Option<Vec<Attachment>>,
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        // Required per-connection for ON DELETE CASCADE to fire.
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(Self { conn })
    }

    pub fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS subjects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                total_topics INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE IF NOT EXISTS topics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subject_id INTEGER NOT NULL,
                topic_name TEXT NOT NULL,
                is_completed INTEGER NOT NULL DEFAULT 0,
                progress_percentage INTEGER NOT NULL DEFAULT 0,
                confidence_percentage INTEGER,
                revision_target INTEGER NOT NULL DEFAULT 0,
                revision_current INTEGER NOT NULL DEFAULT 0,
                source TEXT,
                comment TEXT,
                date_studied TEXT,
                youtube_links TEXT NOT NULL DEFAULT '[]',
                attachments TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL DEFAULT (datetime('now')),
                FOREIGN KEY (subject_id) REFERENCES subjects(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_topics_subject ON topics(subject_id);
            CREATE INDEX IF NOT EXISTS idx_topics_date ON topics(date_studied);
            "#,
        )?;

        Ok(())
    }

    // Subject operations
    pub fn add_subject(&self, name: &str, total_topics: u32) -> Result<i64> {
        let name = validated_name(name, "subject name")?;
        self.conn.execute(
            "INSERT INTO subjects (name, total_topics) VALUES (?1, ?2)",
            params![name, total_topics],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_subject(&self, id: i64) -> Result<Option<Subject>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, total_topics, created_at FROM subjects WHERE id = ?1")?;

        let subject = stmt.query_row(params![id], map_subject_row);

        match subject {
            Ok(s) => Ok(Some(s)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_subjects(&self) -> Result<Vec<Subject>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, total_topics, created_at FROM subjects
             ORDER BY created_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], map_subject_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Renames and/or re-declares the expected topic count. `None` leaves a
    /// field untouched.
    pub fn update_subject(
        &self,
        id: i64,
        name: Option<&str>,
        total_topics: Option<u32>,
    ) -> Result<Subject> {
        let existing = self
            .get_subject(id)?
            .ok_or(DbError::NotFound("subject", id))?;

        let name = match name {
            Some(n) => validated_name(n, "subject name")?.to_string(),
            None => existing.name,
        };
        let total_topics = total_topics.unwrap_or(existing.total_topics);

        self.conn.execute(
            "UPDATE subjects SET name = ?1, total_topics = ?2 WHERE id = ?3",
            params![name, total_topics, id],
        )?;

        self.get_subject(id)?.ok_or(DbError::NotFound("subject", id))
    }

    /// Deleting a subject cascades to its topics.
    pub fn delete_subject(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM subjects WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    // Topic operations
    pub fn add_topic(&self, new: NewTopic) -> Result<i64> {
        let topic_name = validated_name(&new.topic_name, "topic name")?;
        if self.get_subject(new.subject_id)?.is_none() {
            return Err(DbError::NotFound("subject", new.subject_id));
        }

        let links_json = serde_json::to_string(&new.youtube_links)?;
        let attachments_json = serde_json::to_string(&new.attachments)?;

        self.conn.execute(
            r#"
            INSERT INTO topics (
                subject_id, topic_name, is_completed, progress_percentage,
                confidence_percentage, revision_target, revision_current,
                source, comment, date_studied, youtube_links, attachments
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                new.subject_id,
                topic_name,
                new.is_completed,
                clamp_pct(new.progress_percentage),
                new.confidence_percentage.map(clamp_pct),
                new.revision_target,
                new.revision_current,
                new.source,
                new.comment,
                new.date_studied.map(|d| d.to_string()),
                links_json,
                attachments_json,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn get_topic(&self, id: i64) -> Result<Option<Topic>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1", TOPIC_SELECT))?;

        let topic = stmt.query_row(params![id], map_topic_row);

        match topic {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_topics(&self, subject_id: Option<i64>) -> Result<Vec<Topic>> {
        let topics = if let Some(sid) = subject_id {
            let mut stmt = self.conn.prepare(&format!(
                "{} WHERE subject_id = ?1 ORDER BY created_at DESC, id DESC",
                TOPIC_SELECT
            ))?;
            let rows = stmt.query_map(params![sid], map_topic_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        } else {
            let mut stmt = self
                .conn
                .prepare(&format!("{} ORDER BY created_at DESC, id DESC", TOPIC_SELECT))?;
            let rows = stmt.query_map([], map_topic_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        Ok(topics)
    }

    pub fn update_topic(&self, id: i64, patch: TopicPatch) -> Result<Topic> {
        let existing = self.get_topic(id)?.ok_or(DbError::NotFound("topic", id))?;

        let topic_name = match patch.topic_name {
            Some(n) => validated_name(&n, "topic name")?.to_string(),
            None => existing.topic_name,
        };
        let is_completed = patch.is_completed.unwrap_or(existing.is_completed);
        let progress = clamp_pct(
            patch
                .progress_percentage
                .unwrap_or(existing.progress_percentage),
        );
        let confidence = patch
            .confidence_percentage
            .unwrap_or(existing.confidence_percentage)
            .map(clamp_pct);
        let revision_target = patch.revision_target.unwrap_or(existing.revision_target);
        let revision_current = patch.revision_current.unwrap_or(existing.revision_current);
        let source = patch.source.unwrap_or(existing.source);
        let comment = patch.comment.unwrap_or(existing.comment);
        let date_studied = patch.date_studied.unwrap_or(existing.date_studied);
        let links = patch.youtube_links.unwrap_or(existing.youtube_links);
        let attachments = patch.attachments.unwrap_or(existing.attachments);

        let links_json = serde_json::to_string(&links)?;
        let attachments_json = serde_json::to_string(&attachments)?;

        self.conn.execute(
            r#"
            UPDATE topics
            SET topic_name = ?1,
                is_completed = ?2,
                progress_percentage = ?3,
                confidence_percentage = ?4,
                revision_target = ?5,
                revision_current = ?6,
                source = ?7,
                comment = ?8,
                date_studied = ?9,
                youtube_links = ?10,
                attachments = ?11
            WHERE id = ?12
            "#,
            params![
                topic_name,
                is_completed,
                progress,
                confidence,
                revision_target,
                revision_current,
                source,
                comment,
                date_studied.map(|d| d.to_string()),
                links_json,
                attachments_json,
                id,
            ],
        )?;

        self.get_topic(id)?.ok_or(DbError::NotFound("topic", id))
    }

    pub fn set_topic_completed(&self, id: i64, completed: bool) -> Result<Topic> {
        self.update_topic(
            id,
            TopicPatch {
                is_completed: Some(completed),
                ..Default::default()
            },
        )
    }

    pub fn add_youtube_link(&self, id: i64, url: &str) -> Result<Topic> {
        let existing = self.get_topic(id)?.ok_or(DbError::NotFound("topic", id))?;
        let mut links = existing.youtube_links;
        links.push(url.to_string());
        self.update_topic(
            id,
            TopicPatch {
                youtube_links: Some(links),
                ..Default::default()
            },
        )
    }

    pub fn add_attachment(&self, id: i64, attachment: Attachment) -> Result<Topic> {
        let existing = self.get_topic(id)?.ok_or(DbError::NotFound("topic", id))?;
        let mut attachments = existing.attachments;
        attachments.push(attachment);
        self.update_topic(
            id,
            TopicPatch {
                attachments: Some(attachments),
                ..Default::default()
            },
        )
    }

    pub fn delete_topic(&self, id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM topics WHERE id = ?1", params![id])?;
        Ok(rows > 0)
    }

    /// One consistent pair of lists for the aggregation core: the summary
    /// is computed over both or not at all.
    pub fn snapshot(&self) -> Result<(Vec<Subject>, Vec<Topic>)> {
        let subjects = self.list_subjects()?;
        let topics = self.list_topics(None)?;
        Ok((subjects, topics))
    }
}

const TOPIC_SELECT: &str = r#"
    SELECT id, subject_id, topic_name, is_completed, progress_percentage,
           confidence_percentage, revision_target, revision_current,
           source, comment, date_studied, youtube_links, attachments, created_at
    FROM topics
"#;

fn map_subject_row(row: &rusqlite::Row) -> rusqlite::Result<Subject> {
    Ok(Subject {
        id: row.get(0)?,
        name: row.get(1)?,
        total_topics: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn map_topic_row(row: &rusqlite::Row) -> rusqlite::Result<Topic> {
    let date_raw: Option<String> = row.get(10)?;
    let links_raw: String = row.get(11)?;
    let attachments_raw: String = row.get(12)?;

    Ok(Topic {
        id: row.get(0)?,
        subject_id: row.get(1)?,
        topic_name: row.get(2)?,
        is_completed: row.get(3)?,
        progress_percentage: row.get(4)?,
        confidence_percentage: row.get(5)?,
        revision_target: row.get(6)?,
        revision_current: row.get(7)?,
        source: row.get(8)?,
        comment: row.get(9)?,
        date_studied: date_raw.map(|s| parse_date_col(10, &s)).transpose()?,
        youtube_links: parse_json_col(11, &links_raw)?,
        attachments: parse_json_col(12, &attachments_raw)?,
        created_at: row.get(13)?,
    })
}

fn parse_date_col(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn parse_json_col<T: DeserializeOwned>(idx: usize, raw: &str) -> rusqlite::Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

// Percentages are clamped at the store boundary so the aggregation core
// only ever sees validated data.
fn clamp_pct(value: u8) -> u8 {
    value.min(100)
}

fn validated_name<'a>(name: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(DbError::Validation(format!("{} must not be empty", what)))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        let db = Database::open(":memory:").expect("Failed to create in-memory database");
        db.init().expect("Failed to initialize database");
        db
    }

    fn new_topic(subject_id: i64, name: &str) -> NewTopic {
        NewTopic {
            subject_id,
            topic_name: name.to_string(),
            ..Default::default()
        }
    }

    mod init_tests {
        use super::*;

        #[test]
        fn init_creates_tables() {
            let db = setup_db();
            let subjects: i64 = db
                .conn
                .query_row("SELECT COUNT(*) FROM subjects", [], |row| row.get(0))
                .expect("subjects table should exist");
            assert_eq!(subjects, 0);

            let topics: i64 = db
                .conn
                .query_row("SELECT COUNT(*) FROM topics", [], |row| row.get(0))
                .expect("topics table should exist");
            assert_eq!(topics, 0);
        }

        #[test]
        fn init_is_idempotent() {
            let db = setup_db();
            db.add_subject("Physics", 10).unwrap();

            db.init().expect("Re-init should succeed");

            let subjects = db.list_subjects().unwrap();
            assert_eq!(subjects.len(), 1);
        }
    }

    mod subject_tests {
        use super::*;

        #[test]
        fn add_subject_basic() {
            let db = setup_db();
            let id = db.add_subject("Physics", 12).unwrap();
            assert!(id > 0);

            let subject = db.get_subject(id).unwrap().unwrap();
            assert_eq!(subject.name, "Physics");
            assert_eq!(subject.total_topics, 12);
        }

        #[test]
        fn add_subject_trims_name() {
            let db = setup_db();
            let id = db.add_subject("  Chemistry  ", 0).unwrap();
            let subject = db.get_subject(id).unwrap().unwrap();
            assert_eq!(subject.name, "Chemistry");
        }

        #[test]
        fn add_subject_empty_name_fails() {
            let db = setup_db();
            let result = db.add_subject("   ", 5);
            assert!(matches!(result, Err(DbError::Validation(_))));
        }

        #[test]
        fn get_subject_not_found() {
            let db = setup_db();
            assert!(db.get_subject(999).unwrap().is_none());
        }

        #[test]
        fn list_subjects_newest_first() {
            let db = setup_db();
            let first = db.add_subject("Maths", 0).unwrap();
            let second = db.add_subject("Physics", 0).unwrap();

            let subjects = db.list_subjects().unwrap();
            assert_eq!(subjects.len(), 2);
            // Same created_at second; the id tie-break keeps newest first.
            assert_eq!(subjects[0].id, second);
            assert_eq!(subjects[1].id, first);
        }

        #[test]
        fn update_subject_name_only() {
            let db = setup_db();
            let id = db.add_subject("Phisics", 8).unwrap();
            let updated = db.update_subject(id, Some("Physics"), None).unwrap();
            assert_eq!(updated.name, "Physics");
            assert_eq!(updated.total_topics, 8);
        }

        #[test]
        fn update_subject_total_only() {
            let db = setup_db();
            let id = db.add_subject("Physics", 8).unwrap();
            let updated = db.update_subject(id, None, Some(20)).unwrap();
            assert_eq!(updated.name, "Physics");
            assert_eq!(updated.total_topics, 20);
        }

        #[test]
        fn update_subject_not_found() {
            let db = setup_db();
            let result = db.update_subject(42, Some("Ghost"), None);
            assert!(matches!(result, Err(DbError::NotFound("subject", 42))));
        }

        #[test]
        fn delete_subject_returns_flag() {
            let db = setup_db();
            let id = db.add_subject("Physics", 0).unwrap();
            assert!(db.delete_subject(id).unwrap());
            assert!(!db.delete_subject(id).unwrap());
        }

        #[test]
        fn delete_subject_cascades_to_topics() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            db.add_topic(new_topic(sid, "Kinematics")).unwrap();
            db.add_topic(new_topic(sid, "Dynamics")).unwrap();

            assert!(db.delete_subject(sid).unwrap());
            assert!(db.list_topics(None).unwrap().is_empty());
        }
    }

    mod topic_tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn add_topic_defaults() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let tid = db.add_topic(new_topic(sid, "Kinematics")).unwrap();

            let topic = db.get_topic(tid).unwrap().unwrap();
            assert_eq!(topic.topic_name, "Kinematics");
            assert!(!topic.is_completed);
            assert_eq!(topic.progress_percentage, 0);
            assert!(topic.confidence_percentage.is_none());
            assert!(topic.youtube_links.is_empty());
            assert!(topic.attachments.is_empty());
        }

        #[test]
        fn add_topic_unknown_subject_fails() {
            let db = setup_db();
            let result = db.add_topic(new_topic(77, "Orphan"));
            assert!(matches!(result, Err(DbError::NotFound("subject", 77))));
        }

        #[test]
        fn add_topic_clamps_percentages() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let mut new = new_topic(sid, "Waves");
            new.progress_percentage = 250;
            new.confidence_percentage = Some(180);

            let tid = db.add_topic(new).unwrap();
            let topic = db.get_topic(tid).unwrap().unwrap();
            assert_eq!(topic.progress_percentage, 100);
            assert_eq!(topic.confidence_percentage, Some(100));
        }

        #[test]
        fn add_topic_persists_json_columns() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let mut new = new_topic(sid, "Optics");
            new.youtube_links = vec![
                "https://youtu.be/one".to_string(),
                "https://youtu.be/two".to_string(),
                "https://youtu.be/one".to_string(),
            ];
            new.attachments = vec![Attachment {
                name: "lens-notes.pdf".to_string(),
                url: "https://files.example/lens-notes.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                size_bytes: 4096,
            }];

            let tid = db.add_topic(new).unwrap();
            let topic = db.get_topic(tid).unwrap().unwrap();
            // Insertion order and duplicates survive the round trip.
            assert_eq!(topic.youtube_links.len(), 3);
            assert_eq!(topic.youtube_links[0], topic.youtube_links[2]);
            assert_eq!(topic.attachments.len(), 1);
            assert_eq!(topic.attachments[0].mime_type, "application/pdf");
        }

        #[test]
        fn add_topic_persists_date() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let mut new = new_topic(sid, "Optics");
            new.date_studied = NaiveDate::from_ymd_opt(2024, 3, 1);

            let tid = db.add_topic(new).unwrap();
            let topic = db.get_topic(tid).unwrap().unwrap();
            assert_eq!(topic.date_studied, NaiveDate::from_ymd_opt(2024, 3, 1));
        }

        #[test]
        fn list_topics_filters_by_subject() {
            let db = setup_db();
            let physics = db.add_subject("Physics", 0).unwrap();
            let maths = db.add_subject("Maths", 0).unwrap();
            db.add_topic(new_topic(physics, "Kinematics")).unwrap();
            db.add_topic(new_topic(maths, "Calculus")).unwrap();
            db.add_topic(new_topic(maths, "Algebra")).unwrap();

            assert_eq!(db.list_topics(None).unwrap().len(), 3);
            assert_eq!(db.list_topics(Some(maths)).unwrap().len(), 2);
            assert_eq!(db.list_topics(Some(physics)).unwrap().len(), 1);
        }

        #[test]
        fn update_topic_partial_patch() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let mut new = new_topic(sid, "Waves");
            new.comment = Some("revisit interference".to_string());
            let tid = db.add_topic(new).unwrap();

            let updated = db
                .update_topic(
                    tid,
                    TopicPatch {
                        progress_percentage: Some(60),
                        confidence_percentage: Some(Some(45)),
                        ..Default::default()
                    },
                )
                .unwrap();

            assert_eq!(updated.progress_percentage, 60);
            assert_eq!(updated.confidence_percentage, Some(45));
            // Untouched fields survive.
            assert_eq!(updated.topic_name, "Waves");
            assert_eq!(updated.comment, Some("revisit interference".to_string()));
        }

        #[test]
        fn update_topic_can_clear_confidence() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let mut new = new_topic(sid, "Waves");
            new.confidence_percentage = Some(70);
            let tid = db.add_topic(new).unwrap();

            let updated = db
                .update_topic(
                    tid,
                    TopicPatch {
                        confidence_percentage: Some(None),
                        ..Default::default()
                    },
                )
                .unwrap();
            assert!(updated.confidence_percentage.is_none());
        }

        #[test]
        fn update_topic_not_found() {
            let db = setup_db();
            let result = db.update_topic(9, TopicPatch::default());
            assert!(matches!(result, Err(DbError::NotFound("topic", 9))));
        }

        #[test]
        fn set_topic_completed_roundtrip() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let tid = db.add_topic(new_topic(sid, "Waves")).unwrap();

            let topic = db.set_topic_completed(tid, true).unwrap();
            assert!(topic.is_completed);
            let topic = db.set_topic_completed(tid, false).unwrap();
            assert!(!topic.is_completed);
        }

        #[test]
        fn add_youtube_link_appends() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let tid = db.add_topic(new_topic(sid, "Waves")).unwrap();

            db.add_youtube_link(tid, "https://youtu.be/first").unwrap();
            let topic = db.add_youtube_link(tid, "https://youtu.be/second").unwrap();
            assert_eq!(
                topic.youtube_links,
                vec![
                    "https://youtu.be/first".to_string(),
                    "https://youtu.be/second".to_string()
                ]
            );
        }

        #[test]
        fn add_attachment_appends() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let tid = db.add_topic(new_topic(sid, "Waves")).unwrap();

            let topic = db
                .add_attachment(
                    tid,
                    Attachment {
                        name: "formulas.png".to_string(),
                        url: "https://files.example/formulas.png".to_string(),
                        mime_type: "image/png".to_string(),
                        size_bytes: 512,
                    },
                )
                .unwrap();
            assert_eq!(topic.attachments.len(), 1);
            assert_eq!(topic.attachments[0].name, "formulas.png");
        }

        #[test]
        fn delete_topic_leaves_siblings() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 0).unwrap();
            let first = db.add_topic(new_topic(sid, "Waves")).unwrap();
            let second = db.add_topic(new_topic(sid, "Optics")).unwrap();

            assert!(db.delete_topic(first).unwrap());
            let remaining = db.list_topics(Some(sid)).unwrap();
            assert_eq!(remaining.len(), 1);
            assert_eq!(remaining[0].id, second);
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn snapshot_returns_both_lists() {
            let db = setup_db();
            let sid = db.add_subject("Physics", 4).unwrap();
            db.add_topic(new_topic(sid, "Waves")).unwrap();

            let (subjects, topics) = db.snapshot().unwrap();
            assert_eq!(subjects.len(), 1);
            assert_eq!(topics.len(), 1);
        }

        #[test]
        fn snapshot_of_empty_store_is_empty() {
            let db = setup_db();
            let (subjects, topics) = db.snapshot().unwrap();
            assert!(subjects.is_empty());
            assert!(topics.is_empty());
        }
    }
}
