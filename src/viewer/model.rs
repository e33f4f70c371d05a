use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One finalized, stored survey submission as the sink returns it: the known
/// top-level columns plus the opaque `data` map holding every other answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseRecord {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub parish_member: Option<String>,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

/// Null, empty string and `false` all mean "no answer" at either level.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Bool(b) => !b,
        _ => false,
    }
}

impl ResponseRecord {
    fn column(&self, key: &str) -> Option<Value> {
        match key {
            "full_name" => self.full_name.clone().map(Value::String),
            "email" => self.email.clone().map(Value::String),
            "parish_member" => self.parish_member.clone().map(Value::String),
            "age_group" => self.age_group.clone().map(Value::String),
            "age" => self.age.clone(),
            "created_at" => self
                .created_at
                .map(|ts| Value::String(ts.to_rfc3339())),
            _ => None,
        }
    }

    /// The one place the merge rule lives: read the top-level column first,
    /// fall back to the nested `data` map. Both levels treat null, empty
    /// string and `false` as absent.
    pub fn field(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.column(key) {
            if !is_empty_value(&value) {
                return Some(value);
            }
        }

        self.data
            .as_ref()
            .and_then(|data| data.get(key))
            .filter(|value| !is_empty_value(value))
            .cloned()
    }

    pub fn has_answer(&self, key: &str) -> bool {
        self.field(key).is_some()
    }
}

/// Renders a stored answer for display: booleans become Yes/No, strings come
/// through verbatim, numbers via their canonical form.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> ResponseRecord {
        serde_json::from_value(json!({
            "id": "7f0c0e4e-9d7a-4c7e-8ad4-6a0b7a6a2f11",
            "full_name": "Jane Doe",
            "email": "",
            "parish_member": "yes",
            "age_group": "adult",
            "created_at": "2026-01-25T10:00:00Z",
            "data": {
                "email": "jane@example.com",
                "full_name": "Shadowed Name",
                "pref_email": true,
                "pref_bulletin": false,
                "final_comments": ""
            }
        }))
        .unwrap()
    }

    #[test]
    fn top_level_column_takes_precedence() {
        let r = record();
        assert_eq!(r.field("full_name"), Some(json!("Jane Doe")));
    }

    #[test]
    fn empty_column_falls_back_to_nested_data() {
        let r = record();
        assert_eq!(r.field("email"), Some(json!("jane@example.com")));
    }

    #[test]
    fn empty_and_false_nested_values_are_absent() {
        let r = record();
        assert_eq!(r.field("final_comments"), None);
        assert_eq!(r.field("pref_bulletin"), None);
        assert_eq!(r.field("never_asked"), None);
        assert!(r.has_answer("pref_email"));
    }

    #[test]
    fn booleans_display_as_yes_no() {
        assert_eq!(display_value(&json!(true)), "Yes");
        assert_eq!(display_value(&json!(false)), "No");
        assert_eq!(display_value(&json!("verbatim")), "verbatim");
        assert_eq!(display_value(&json!(42)), "42");
    }

    #[test]
    fn decodes_a_minimal_row() {
        let r: ResponseRecord = serde_json::from_value(json!({"full_name": "A"})).unwrap();
        assert_eq!(r.full_name.as_deref(), Some("A"));
        assert!(r.created_at.is_none());
        assert!(r.data.is_none());
    }
}
