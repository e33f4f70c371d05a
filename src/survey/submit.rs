use log::{error, info};
use serde_json::{json, Value};

use crate::sink::{DataSink, Result};
use crate::survey::answers::AnswerMap;

/// Table the viewer reads back from.
pub const RESPONSE_TABLE: &str = "survey_responses";

fn top_level(answers: &AnswerMap, key: &str) -> Value {
    match answers.text(key) {
        Some(text) => Value::String(text.to_string()),
        None => Value::Null,
    }
}

/// Normalizes the accumulated Answer Map into the record the sink stores:
/// the known columns extracted explicitly, everything else riding along in
/// the nested `data` payload.
pub fn build_response_record(answers: &AnswerMap) -> Value {
    json!({
        "full_name": top_level(answers, "full_name"),
        "email": top_level(answers, "email"),
        "parish_member": top_level(answers, "parish_member"),
        "age_group": top_level(answers, "age_group"),
        "age": top_level(answers, "age"),
        "data": answers.to_json(),
    })
}

/// Hands the finished survey to the sink. Called exactly once, on terminal
/// page arrival. The caller clears the draft on success; failure is logged
/// and swallowed so the thank-you page stays up (known design gap).
pub async fn submit_survey(sink: &dyn DataSink, answers: &AnswerMap) -> Result<()> {
    let record = build_response_record(answers);
    sink.insert(RESPONSE_TABLE, record).await?;
    info!("Survey response stored ({} answers)", answers.len());
    Ok(())
}

/// Decorative completion effect, the terminal cousin of the original's
/// confetti burst.
pub fn celebrate() {
    info!("🎊 Survey completed! Thank you for your feedback. 🎊");
}

pub(crate) fn log_submit_failure(e: &crate::sink::SinkError) {
    error!("Failed to store survey response: {}", e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn sample_answers() -> AnswerMap {
        let mut answers = AnswerMap::new();
        answers.set("full_name", "Jane Doe");
        answers.set("email", "jane@example.com");
        answers.set("parish_member", "yes");
        answers.set("consent", true);
        answers.set("age_group", "adult");
        answers.set("adult_family", "More family events");
        answers
    }

    #[test]
    fn record_extracts_known_columns_and_nests_everything() {
        let record = build_response_record(&sample_answers());

        assert_eq!(record["full_name"], "Jane Doe");
        assert_eq!(record["parish_member"], "yes");
        assert_eq!(record["age_group"], "adult");
        // No specific age entered: column stays null, not empty string.
        assert!(record["age"].is_null());
        // The nested payload carries the full map, including the extracted
        // columns and checkbox states.
        assert_eq!(record["data"]["adult_family"], "More family events");
        assert_eq!(record["data"]["consent"], true);
        assert_eq!(record["data"]["full_name"], "Jane Doe");
    }

    #[tokio::test]
    async fn submit_inserts_into_the_response_table() {
        let sink = MemorySink::new();
        submit_survey(&sink, &sample_answers()).await.unwrap();

        let rows = sink.rows(RESPONSE_TABLE);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["email"], "jane@example.com");
    }
}
