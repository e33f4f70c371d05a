use crate::viewer::model::{display_value, ResponseRecord};

struct DetailField {
    label: &'static str,
    key: &'static str,
}

struct DetailGroup {
    title: &'static str,
    fields: &'static [DetailField],
}

const GROUPS: &[DetailGroup] = &[
    DetailGroup {
        title: "Basic Information",
        fields: &[
            DetailField { label: "Full Name", key: "full_name" },
            DetailField { label: "Email", key: "email" },
            DetailField { label: "Parish Member", key: "parish_member" },
            DetailField { label: "Age Group", key: "age_group" },
            DetailField { label: "Specific Age", key: "age" },
            DetailField { label: "Submitted At", key: "created_at" },
        ],
    },
    DetailGroup {
        title: "Ministry Interests",
        fields: &[
            DetailField { label: "Current Ministries", key: "current_ministries" },
            DetailField { label: "Faith Formation", key: "cat_faith_formation" },
            DetailField { label: "Liturgical / Mass", key: "cat_liturgical" },
            DetailField { label: "Youth Ministry", key: "cat_youth" },
            DetailField { label: "Service Groups", key: "cat_groups" },
            DetailField { label: "Seasonal / Events", key: "cat_seasonal" },
        ],
    },
    DetailGroup {
        title: "Communication Preferences",
        fields: &[
            DetailField { label: "Email Updates", key: "pref_email" },
            DetailField { label: "Printed Bulletin", key: "pref_bulletin" },
            DetailField { label: "Parish Website", key: "pref_website" },
        ],
    },
    DetailGroup {
        title: "Feedback & Community",
        fields: &[
            DetailField { label: "Community Connection (1-5)", key: "community_connection" },
            DetailField { label: "New Program Ideas", key: "community_additions" },
            DetailField { label: "Family Support Needs", key: "community_families" },
            DetailField { label: "Family Growth (Adults)", key: "adult_family" },
            DetailField { label: "Faith Challenges (Young Adults)", key: "young_challenge" },
            DetailField { label: "Experience (Seniors)", key: "senior_service" },
            DetailField { label: "Minor: Favorite Part", key: "minor_fav" },
            DetailField { label: "Minor: Excitement (1-5)", key: "minor_excitement" },
            DetailField { label: "Minor: Feedback", key: "minor_feedback" },
            DetailField { label: "Prayer Intentions / Final Comments", key: "final_comments" },
        ],
    },
];

/// One rendered detail section: a heading plus the label/value pairs that
/// actually have answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub title: &'static str,
    pub items: Vec<(&'static str, String)>,
}

/// Resolves one record into its grouped detail view. Every field goes through
/// the merge-rule accessor; empty fields are skipped and groups with nothing
/// to show are omitted, matching the original details overlay.
pub fn render_details(record: &ResponseRecord) -> Vec<DetailSection> {
    GROUPS
        .iter()
        .filter_map(|group| {
            let items: Vec<_> = group
                .fields
                .iter()
                .filter_map(|field| {
                    let value = record.field(field.key)?;
                    let rendered = if field.key == "created_at" {
                        record
                            .created_at
                            .map(|ts| ts.format("%b %e, %Y %H:%M UTC").to_string())
                            .unwrap_or_else(|| display_value(&value))
                    } else {
                        display_value(&value)
                    };
                    Some((field.label, rendered))
                })
                .collect();

            if items.is_empty() {
                None
            } else {
                Some(DetailSection {
                    title: group.title,
                    items,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_without_answers_are_omitted() {
        let record: ResponseRecord = serde_json::from_value(json!({
            "full_name": "Jane Doe",
            "parish_member": "yes",
            "data": {}
        }))
        .unwrap();

        let sections = render_details(&record);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Basic Information");
        assert_eq!(sections[0].items[0], ("Full Name", "Jane Doe".to_string()));
    }

    #[test]
    fn nested_answers_and_checkboxes_render() {
        let record: ResponseRecord = serde_json::from_value(json!({
            "full_name": "Jane Doe",
            "created_at": "2026-01-25T10:30:00Z",
            "data": {
                "pref_email": true,
                "pref_bulletin": false,
                "community_additions": "Bible study"
            }
        }))
        .unwrap();

        let sections = render_details(&record);
        let titles: Vec<_> = sections.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "Basic Information",
                "Communication Preferences",
                "Feedback & Community"
            ]
        );

        let comms = &sections[1];
        // The unchecked bulletin box is absent, not rendered as "No".
        assert_eq!(comms.items, vec![("Email Updates", "Yes".to_string())]);

        let basic = &sections[0];
        let submitted = basic
            .items
            .iter()
            .find(|(label, _)| *label == "Submitted At")
            .unwrap();
        assert!(submitted.1.contains("2026"));
    }
}
