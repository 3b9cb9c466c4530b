//! Derived dashboard statistics. Every function here is a pure projection
//! over an in-memory snapshot of subjects and topics: no stored record is
//! mutated, empty input degrades to zero-valued output, and the same
//! snapshot always produces the same summary.

use crate::models::{
    ChartPoint, ConfidenceAnalysis, DashboardSummary, DashboardTotals, ProgressProjection,
    ResourceCounts, Subject, SubjectWithProgress, Topic,
};

const HIGHLIGHT_LIMIT: usize = 5;
const STRONG_CONFIDENCE_FLOOR: u8 = 50;
const CHART_LABEL_CHARS: usize = 15;

/// Completion projection for one subject. The denominator is the declared
/// `total_topics` when set, otherwise the actual topic count; with a declared
/// total below the completed count the percentage exceeds 100 and is left
/// unclamped for the caller to interpret.
pub fn subject_progress(subject: &Subject, topics: &[Topic]) -> ProgressProjection {
    let mut completed = 0u32;
    let mut actual = 0u32;
    for topic in topics.iter().filter(|t| t.subject_id == subject.id) {
        actual += 1;
        if topic.is_completed {
            completed += 1;
        }
    }

    let denominator = if subject.total_topics > 0 {
        subject.total_topics
    } else {
        actual
    };

    ProgressProjection {
        completed_topics: completed,
        actual_topics: actual,
        progress: percentage(completed, denominator),
    }
}

/// Weakest and strongest topics across the whole set, for dashboard
/// highlighting. Topics without a confidence assessment are excluded from
/// both lists; "strong" additionally requires at least 50% confidence so a
/// sparse dataset's numeric maximum is not labeled a strength.
pub fn rank_confidence(topics: &[Topic]) -> ConfidenceAnalysis {
    let assessed: Vec<&Topic> = topics
        .iter()
        .filter(|t| t.confidence_percentage.is_some())
        .collect();

    let mut weak: Vec<Topic> = assessed.iter().map(|t| (*t).clone()).collect();
    // Stable sort: ties keep their snapshot order.
    weak.sort_by_key(|t| t.confidence_percentage.unwrap_or(0));
    weak.truncate(HIGHLIGHT_LIMIT);

    let mut strong: Vec<Topic> = assessed
        .iter()
        .filter(|t| t.confidence_percentage.unwrap_or(0) >= STRONG_CONFIDENCE_FLOOR)
        .map(|t| (*t).clone())
        .collect();
    strong.sort_by(|a, b| b.confidence_percentage.cmp(&a.confidence_percentage));
    strong.truncate(HIGHLIGHT_LIMIT);

    // Aggregates only when both sets have members. A topic can sit in both
    // lists (bottom five and >= 50 with few topics overall); it counts twice.
    let (weak_avg, strong_avg, tracked) = if !weak.is_empty() && !strong.is_empty() {
        (
            Some(average_confidence(&weak)),
            Some(average_confidence(&strong)),
            Some((weak.len() + strong.len()) as u32),
        )
    } else {
        (None, None, None)
    };

    ConfidenceAnalysis {
        weak,
        strong,
        weak_avg_confidence: weak_avg,
        strong_avg_confidence: strong_avg,
        topics_tracked: tracked,
    }
}

/// The single object the presentation layer renders. Pure and total over
/// the snapshot: empty lists produce zeroed totals and empty sections.
pub fn dashboard_summary(subjects: &[Subject], topics: &[Topic]) -> DashboardSummary {
    let subjects_with: Vec<SubjectWithProgress> = subjects
        .iter()
        .map(|s| SubjectWithProgress {
            subject: s.clone(),
            progress: subject_progress(s, topics),
        })
        .collect();

    // Overall totals sum the *declared* per-subject totals, even though
    // per-subject progress falls back to actual counts when undeclared.
    let total_topics: u32 = subjects.iter().map(|s| s.total_topics).sum();
    let completed_topics: u32 = subjects_with
        .iter()
        .map(|s| s.progress.completed_topics)
        .sum();
    let totals = DashboardTotals {
        total_subjects: subjects.len() as u32,
        total_topics,
        completed_topics,
        overall_progress: percentage(completed_topics, total_topics),
    };

    // Most recently studied first; topics never studied sort last. Stable,
    // so equal (or equally absent) dates keep their snapshot order.
    let mut recent_topics = topics.to_vec();
    recent_topics.sort_by(|a, b| b.date_studied.cmp(&a.date_studied));
    recent_topics.truncate(HIGHLIGHT_LIMIT);

    let youtube_links: u32 = recent_topics
        .iter()
        .map(|t| t.youtube_links.len() as u32)
        .sum();
    let attachments: u32 = recent_topics
        .iter()
        .map(|t| t.attachments.len() as u32)
        .sum();
    let resources = ResourceCounts {
        youtube_links,
        attachments,
        total: youtube_links + attachments,
    };

    let chart = subjects_with
        .iter()
        .map(|sw| {
            let effective_total = if sw.subject.total_topics > 0 {
                sw.subject.total_topics
            } else {
                sw.progress.actual_topics
            };
            ChartPoint {
                label: truncate_label(&sw.subject.name, CHART_LABEL_CHARS),
                completed: sw.progress.completed_topics,
                remaining: effective_total.saturating_sub(sw.progress.completed_topics),
            }
        })
        .collect();

    DashboardSummary {
        totals,
        subjects: subjects_with,
        confidence: rank_confidence(topics),
        recent_topics,
        resources,
        chart,
    }
}

// Round-half-up percentage; 0 for an empty denominator.
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    }
}

fn average_confidence(topics: &[Topic]) -> u32 {
    let sum: u32 = topics
        .iter()
        .map(|t| t.confidence_percentage.unwrap_or(0) as u32)
        .sum();
    (sum as f64 / topics.len() as f64).round() as u32
}

fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let mut label: String = name.chars().take(max_chars).collect();
        label.push('…');
        label
    }
}
