use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    /// User-declared expected topic count; 0 means "infer from actual count".
    pub total_topics: u32,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub subject_id: i64,
    pub topic_name: String,
    pub is_completed: bool,
    pub progress_percentage: u8,
    /// None means "not yet assessed" -- distinct from 0% confidence.
    pub confidence_percentage: Option<u8>,
    pub revision_target: u32,
    pub revision_current: u32,
    pub source: Option<String>,
    pub comment: Option<String>,
    pub date_studied: Option<NaiveDate>,
    pub youtube_links: Vec<String>,
    pub attachments: Vec<Attachment>,
    pub created_at: String,
}

impl Topic {
    // Current may exceed target; never reports negative.
    pub fn revisions_left(&self) -> u32 {
        self.revision_target.saturating_sub(self.revision_current)
    }
}

/// Read-time projection of a subject's completion; the stored Subject
/// record is never mutated by this computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressProjection {
    pub completed_topics: u32,
    pub actual_topics: u32,
    /// Unclamped: exceeds 100 when the declared total is below the
    /// completed count.
    pub progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectWithProgress {
    pub subject: Subject,
    pub progress: ProgressProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceAnalysis {
    pub weak: Vec<Topic>,
    pub strong: Vec<Topic>,
    pub weak_avg_confidence: Option<u32>,
    pub strong_avg_confidence: Option<u32>,
    /// weak + strong lengths; a topic low enough and confident enough to
    /// land in both sets is counted twice.
    pub topics_tracked: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_subjects: u32,
    /// Sum of *declared* totals, not actual topic counts.
    pub total_topics: u32,
    pub completed_topics: u32,
    pub overall_progress: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCounts {
    pub youtube_links: u32,
    pub attachments: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub completed: u32,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub totals: DashboardTotals,
    pub subjects: Vec<SubjectWithProgress>,
    pub recent_topics: Vec<Topic>,
    pub confidence: ConfidenceAnalysis,
    pub resources: ResourceCounts,
    pub chart: Vec<ChartPoint>,
}

// JSON output wrapper for CLI
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_topic(id: i64, subject_id: i64) -> Topic {
        Topic {
            id,
            subject_id,
            topic_name: format!("Topic {}", id),
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

    mod revision_tests {
        use super::*;

        #[test]
        fn revisions_left_normal() {
            let mut t = make_topic(1, 1);
            t.revision_target = 5;
            t.revision_current = 2;
            assert_eq!(t.revisions_left(), 3);
        }

        #[test]
        fn revisions_left_current_exceeds_target() {
            let mut t = make_topic(1, 1);
            t.revision_target = 2;
            t.revision_current = 7;
            assert_eq!(t.revisions_left(), 0);
        }

        #[test]
        fn revisions_left_both_zero() {
            let t = make_topic(1, 1);
            assert_eq!(t.revisions_left(), 0);
        }
    }

    mod confidence_field_tests {
        use super::*;

        #[test]
        fn absent_confidence_serializes_as_null() {
            let t = make_topic(1, 1);
            let json = serde_json::to_string(&t).unwrap();
            assert!(json.contains("\"confidence_percentage\":null"));
        }

        #[test]
        fn zero_confidence_is_distinct_from_absent() {
            let mut assessed = make_topic(1, 1);
            assessed.confidence_percentage = Some(0);
            let unassessed = make_topic(2, 1);

            assert!(assessed.confidence_percentage.is_some());
            assert!(unassessed.confidence_percentage.is_none());

            let json = serde_json::to_string(&assessed).unwrap();
            assert!(json.contains("\"confidence_percentage\":0"));
        }

        #[test]
        fn topic_roundtrips_through_json() {
            let mut t = make_topic(3, 1);
            t.confidence_percentage = Some(85);
            t.date_studied = NaiveDate::from_ymd_opt(2024, 3, 1);
            t.youtube_links = vec!["https://youtu.be/abc".to_string()];
            t.attachments = vec![Attachment {
                name: "notes.pdf".to_string(),
                url: "https://files.example/notes.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                size_bytes: 1024,
            }];

            let json = serde_json::to_string(&t).unwrap();
            let back: Topic = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }
    }

    mod json_output_tests {
        use super::*;

        #[test]
        fn ok_wraps_data() {
            let output = JsonOutput::ok(42);
            assert!(output.success);
            assert_eq!(output.data, Some(42));
            assert!(output.error.is_none());
        }

        #[test]
        fn err_wraps_message() {
            let output = JsonOutput::<()>::err("subject not found");
            assert!(!output.success);
            assert!(output.data.is_none());
            assert_eq!(output.error, Some("subject not found".to_string()));
        }

        #[test]
        fn serializes_ok_correctly() {
            let output = JsonOutput::ok("test");
            let json = serde_json::to_string(&output).unwrap();
            assert!(json.contains("\"success\":true"));
            assert!(json.contains("\"data\":\"test\""));
            assert!(json.contains("\"error\":null"));
        }
    }
}
