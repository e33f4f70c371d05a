use serde::{Deserialize, Serialize};

/// Age bracket selected on the survey. Drives which conditional section of the
/// feedback page is visible; the stored radio value is the lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    Minor,
    Young,
    Adult,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Minor,
        AgeGroup::Young,
        AgeGroup::Adult,
        AgeGroup::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Minor => "minor",
            AgeGroup::Young => "young",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "minor" => Some(AgeGroup::Minor),
            "young" => Some(AgeGroup::Young),
            "adult" => Some(AgeGroup::Adult),
            "senior" => Some(AgeGroup::Senior),
            _ => None,
        }
    }
}

/// What kind of input a field is. Resolved once here in the static schema so
/// collection, validation and restore never have to re-detect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Checkbox,
    Radio(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// When set, the field only exists inside that age-conditional section.
    pub section: Option<AgeGroup>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageSchema {
    pub title: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl PageSchema {
    /// Fields that are actually on screen for the given visible age section.
    /// Hidden-section fields are excluded even if marked required.
    pub fn visible_fields(
        &self,
        visible_section: Option<AgeGroup>,
    ) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields
            .iter()
            .filter(move |field| field.section.is_none() || field.section == visible_section)
    }
}

const YES_NO: &[&str] = &["yes", "no"];
const SCALE_1_5: &[&str] = &["1", "2", "3", "4", "5"];

const ABOUT_YOU: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "full_name",
        label: "Full Name",
        kind: FieldKind::Text,
        required: true,
        section: None,
    },
    FieldDescriptor {
        key: "email",
        label: "Email Address",
        kind: FieldKind::Email,
        required: true,
        section: None,
    },
    FieldDescriptor {
        key: "parish_member",
        label: "Are you a registered parish member?",
        kind: FieldKind::Radio(YES_NO),
        required: true,
        section: None,
    },
    FieldDescriptor {
        key: "consent",
        label: "I agree that my responses may be stored by the parish office",
        kind: FieldKind::Checkbox,
        required: true,
        section: None,
    },
];

const AGE: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "age_group",
        label: "Which age group do you belong to?",
        kind: FieldKind::Radio(&["minor", "young", "adult", "senior"]),
        required: true,
        section: None,
    },
    FieldDescriptor {
        key: "age",
        label: "Specific Age",
        kind: FieldKind::Number,
        required: false,
        section: None,
    },
];

const MINISTRY: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "current_ministries",
        label: "Which ministries are you currently involved in?",
        kind: FieldKind::Text,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "cat_faith_formation",
        label: "Interested in Faith Formation",
        kind: FieldKind::Checkbox,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "cat_liturgical",
        label: "Interested in Liturgical / Mass ministries",
        kind: FieldKind::Checkbox,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "cat_youth",
        label: "Interested in Youth Ministry",
        kind: FieldKind::Checkbox,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "cat_groups",
        label: "Interested in Service Groups",
        kind: FieldKind::Checkbox,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "cat_seasonal",
        label: "Interested in Seasonal / Event help",
        kind: FieldKind::Checkbox,
        required: false,
        section: None,
    },
];

const COMMUNICATION: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "pref_email",
        label: "Email Updates",
        kind: FieldKind::Checkbox,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "pref_bulletin",
        label: "Printed Bulletin",
        kind: FieldKind::Checkbox,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "pref_website",
        label: "Parish Website",
        kind: FieldKind::Checkbox,
        required: false,
        section: None,
    },
];

const COMMUNITY: &[FieldDescriptor] = &[
    FieldDescriptor {
        key: "community_connection",
        label: "How connected do you feel to the parish community? (1-5)",
        kind: FieldKind::Radio(SCALE_1_5),
        required: true,
        section: None,
    },
    FieldDescriptor {
        key: "community_additions",
        label: "What new programs would you like to see?",
        kind: FieldKind::Text,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "community_families",
        label: "How can the parish better support families?",
        kind: FieldKind::Text,
        required: false,
        section: None,
    },
    FieldDescriptor {
        key: "adult_family",
        label: "How can we help your family grow in faith?",
        kind: FieldKind::Text,
        required: false,
        section: Some(AgeGroup::Adult),
    },
    FieldDescriptor {
        key: "young_challenge",
        label: "What is the biggest challenge to your faith right now?",
        kind: FieldKind::Text,
        required: false,
        section: Some(AgeGroup::Young),
    },
    FieldDescriptor {
        key: "senior_service",
        label: "How has your experience of parish life been?",
        kind: FieldKind::Text,
        required: false,
        section: Some(AgeGroup::Senior),
    },
    FieldDescriptor {
        key: "minor_fav",
        label: "What is your favorite part of parish life?",
        kind: FieldKind::Text,
        required: false,
        section: Some(AgeGroup::Minor),
    },
    FieldDescriptor {
        key: "minor_excitement",
        label: "How excited are you about youth activities? (1-5)",
        kind: FieldKind::Radio(SCALE_1_5),
        required: false,
        section: Some(AgeGroup::Minor),
    },
    FieldDescriptor {
        key: "minor_feedback",
        label: "Anything you would change?",
        kind: FieldKind::Text,
        required: false,
        section: Some(AgeGroup::Minor),
    },
];

const FINAL: &[FieldDescriptor] = &[FieldDescriptor {
    key: "final_comments",
    label: "Prayer intentions or final comments",
    kind: FieldKind::Text,
    required: false,
    section: None,
}];

const THANK_YOU: &[FieldDescriptor] = &[];

const PAGES: &[PageSchema] = &[
    PageSchema {
        title: "About You",
        fields: ABOUT_YOU,
    },
    PageSchema {
        title: "Age",
        fields: AGE,
    },
    PageSchema {
        title: "Ministry Involvement",
        fields: MINISTRY,
    },
    PageSchema {
        title: "Communication Preferences",
        fields: COMMUNICATION,
    },
    PageSchema {
        title: "Community & Feedback",
        fields: COMMUNITY,
    },
    PageSchema {
        title: "Final Thoughts",
        fields: FINAL,
    },
    PageSchema {
        title: "Thank You",
        fields: THANK_YOU,
    },
];

/// The static ordered page list. The last page is the terminal thank-you page
/// with no fields; reaching it triggers submission.
pub fn survey_pages() -> &'static [PageSchema] {
    PAGES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_terminal_and_empty() {
        let pages = survey_pages();
        assert!(pages.len() >= 2);
        assert!(pages.last().unwrap().fields.is_empty());
    }

    #[test]
    fn hidden_section_fields_are_not_visible() {
        let community = &survey_pages()[4];

        let visible: Vec<_> = community
            .visible_fields(Some(AgeGroup::Adult))
            .map(|f| f.key)
            .collect();
        assert!(visible.contains(&"adult_family"));
        assert!(!visible.contains(&"young_challenge"));
        assert!(!visible.contains(&"minor_fav"));

        // No age selected: only the unconditional fields remain.
        let visible: Vec<_> = community.visible_fields(None).map(|f| f.key).collect();
        assert!(visible.contains(&"community_connection"));
        assert!(!visible.iter().any(|k| k.starts_with("minor_")));
    }

    #[test]
    fn age_group_round_trips_through_stored_value() {
        for group in AgeGroup::ALL {
            assert_eq!(AgeGroup::from_value(group.as_str()), Some(group));
        }
        assert_eq!(AgeGroup::from_value("elder"), None);
    }
}
