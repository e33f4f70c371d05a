use indexmap::IndexMap;
use serde_json::Value;

use crate::viewer::model::ResponseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Bucketed into per-choice tallies with percentages.
    Choice,
    /// Listed verbatim, one entry per non-empty answer.
    Text,
}

/// One entry of the fixed question catalog the summarizer knows about.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub label: &'static str,
    pub key: &'static str,
    pub kind: QuestionKind,
}

const CATALOG: &[Question] = &[
    Question {
        label: "Parish Member",
        key: "parish_member",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Age Group",
        key: "age_group",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Current Ministries",
        key: "current_ministries",
        kind: QuestionKind::Text,
    },
    Question {
        label: "Interested: Faith Formation",
        key: "cat_faith_formation",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Interested: Liturgical / Mass",
        key: "cat_liturgical",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Interested: Youth Ministry",
        key: "cat_youth",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Interested: Service Groups",
        key: "cat_groups",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Interested: Seasonal / Events",
        key: "cat_seasonal",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Prefers Email Updates",
        key: "pref_email",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Prefers Printed Bulletin",
        key: "pref_bulletin",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Prefers Parish Website",
        key: "pref_website",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Community Connection (1-5)",
        key: "community_connection",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "New Program Ideas",
        key: "community_additions",
        kind: QuestionKind::Text,
    },
    Question {
        label: "Family Support Needs",
        key: "community_families",
        kind: QuestionKind::Text,
    },
    Question {
        label: "Family Growth (Adults)",
        key: "adult_family",
        kind: QuestionKind::Text,
    },
    Question {
        label: "Faith Challenges (Young Adults)",
        key: "young_challenge",
        kind: QuestionKind::Text,
    },
    Question {
        label: "Experience (Seniors)",
        key: "senior_service",
        kind: QuestionKind::Text,
    },
    Question {
        label: "Minor: Favorite Part",
        key: "minor_fav",
        kind: QuestionKind::Text,
    },
    Question {
        label: "Minor: Excitement (1-5)",
        key: "minor_excitement",
        kind: QuestionKind::Choice,
    },
    Question {
        label: "Minor: Feedback",
        key: "minor_feedback",
        kind: QuestionKind::Text,
    },
    Question {
        label: "Prayer Intentions / Final Comments",
        key: "final_comments",
        kind: QuestionKind::Text,
    },
];

/// The static ordered question list the viewer knows how to summarize.
pub fn question_catalog() -> &'static [Question] {
    CATALOG
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceTally {
    pub choice: String,
    pub count: usize,
    /// Share of the question's own answer total, rounded to the nearest
    /// integer percent.
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBody {
    Choices(Vec<ChoiceTally>),
    Answers(Vec<String>),
}

/// Summary block for one question with at least one non-empty answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSummary {
    pub label: &'static str,
    pub key: &'static str,
    /// Number of non-empty answers for this question, not the record count.
    pub total: usize,
    pub body: SummaryBody,
}

fn normalize_choice(value: &Value) -> String {
    match value {
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Buckets the filtered record set against the question catalog. Questions
/// with zero answers are omitted entirely. Choice buckets keep the insertion
/// order of first occurrence; ties are not re-sorted.
pub fn summarize(records: &[ResponseRecord]) -> Vec<QuestionSummary> {
    question_catalog()
        .iter()
        .filter_map(|question| summarize_question(question, records))
        .collect()
}

fn summarize_question(
    question: &Question,
    records: &[ResponseRecord],
) -> Option<QuestionSummary> {
    let answers: Vec<Value> = records
        .iter()
        .filter_map(|record| record.field(question.key))
        .collect();

    if answers.is_empty() {
        return None;
    }
    let total = answers.len();

    let body = match question.kind {
        QuestionKind::Choice => {
            let mut buckets: IndexMap<String, usize> = IndexMap::new();
            for answer in &answers {
                *buckets.entry(normalize_choice(answer)).or_insert(0) += 1;
            }
            SummaryBody::Choices(
                buckets
                    .into_iter()
                    .map(|(choice, count)| ChoiceTally {
                        choice,
                        count,
                        percent: (count as f64 / total as f64 * 100.0).round() as u32,
                    })
                    .collect(),
            )
        }
        QuestionKind::Text => SummaryBody::Answers(
            answers
                .iter()
                .map(|answer| match answer {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
    };

    Some(QuestionSummary {
        label: question.label,
        key: question.key,
        total,
        body,
    })
}
