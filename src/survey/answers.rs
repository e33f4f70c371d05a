use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single collected answer. Checkboxes store their checked state, radio
/// groups and plain fields store the entered string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
}

impl AnswerValue {
    /// An unchecked checkbox or an empty/whitespace-only string counts as
    /// "unanswered", exactly like an absent key.
    pub fn is_answered(&self) -> bool {
        match self {
            AnswerValue::Flag(checked) => *checked,
            AnswerValue::Text(text) => !text.trim().is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text.as_str()),
            AnswerValue::Flag(_) => None,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(checked: bool) -> Self {
        AnswerValue::Flag(checked)
    }
}

impl From<&str> for AnswerValue {
    fn from(text: &str) -> Self {
        AnswerValue::Text(text.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(text: String) -> Self {
        AnswerValue::Text(text)
    }
}

/// The flat key -> value record of everything a respondent has entered so far.
/// Keys keep insertion order so the submitted payload reads in survey order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap {
    entries: IndexMap<String, AnswerValue>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.entries.get(key)
    }

    /// The stored string for `key`, or `None` if the field is unanswered or
    /// holds a checkbox state.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .filter(|value| value.is_answered())
            .and_then(AnswerValue::as_text)
    }

    /// Checked state for a checkbox field; absent keys read as unchecked.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(AnswerValue::Flag(true)))
    }

    pub fn is_answered(&self, key: &str) -> bool {
        self.get(key).map(AnswerValue::is_answered).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The full map as a JSON object, used for the nested `data` payload.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_unchecked_values_read_as_unanswered() {
        let mut answers = AnswerMap::new();
        answers.set("full_name", "");
        answers.set("pref_email", false);
        answers.set("final_comments", "   ");

        assert!(!answers.is_answered("full_name"));
        assert!(!answers.is_answered("pref_email"));
        assert!(!answers.is_answered("final_comments"));
        assert!(!answers.is_answered("never_set"));

        answers.set("full_name", "Jane Doe");
        answers.set("pref_email", true);
        assert!(answers.is_answered("full_name"));
        assert!(answers.flag("pref_email"));
    }

    #[test]
    fn serializes_to_plain_json_scalars() {
        let mut answers = AnswerMap::new();
        answers.set("full_name", "Jane Doe");
        answers.set("consent", true);

        let json = answers.to_json();
        assert_eq!(json["full_name"], "Jane Doe");
        assert_eq!(json["consent"], true);

        let back: AnswerMap = serde_json::from_value(json).unwrap();
        assert_eq!(back, answers);
    }
}
