use crate::viewer::model::ResponseRecord;

/// Selection value that matches every record.
pub const FILTER_ALL: &str = "all";

/// Pair of optional equality constraints over the two filterable columns.
/// `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseFilter {
    pub age_group: Option<String>,
    pub parish_member: Option<String>,
}

impl ResponseFilter {
    /// Builds a filter from the two dropdown selections, mapping the "all"
    /// sentinel to no constraint.
    pub fn from_selections(age_group: &str, parish_member: &str) -> Self {
        let constraint = |value: &str| {
            if value == FILTER_ALL {
                None
            } else {
                Some(value.to_string())
            }
        };
        Self {
            age_group: constraint(age_group),
            parish_member: constraint(parish_member),
        }
    }

    pub fn matches(&self, record: &ResponseRecord) -> bool {
        let age_ok = self
            .age_group
            .as_deref()
            .map(|wanted| record.age_group.as_deref() == Some(wanted))
            .unwrap_or(true);
        let member_ok = self
            .parish_member
            .as_deref()
            .map(|wanted| record.parish_member.as_deref() == Some(wanted))
            .unwrap_or(true);
        age_ok && member_ok
    }

    /// Narrows the result set. Pure; keeps the source (newest-first) order.
    pub fn apply(&self, all: &[ResponseRecord]) -> Vec<ResponseRecord> {
        all.iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, age_group: &str, member: &str) -> ResponseRecord {
        ResponseRecord {
            full_name: Some(name.to_string()),
            age_group: Some(age_group.to_string()),
            parish_member: Some(member.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<ResponseRecord> {
        vec![
            record("A", "adult", "yes"),
            record("B", "minor", "no"),
            record("C", "adult", "no"),
            record("D", "senior", "yes"),
        ]
    }

    fn names(records: &[ResponseRecord]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.full_name.as_deref().unwrap())
            .collect()
    }

    #[test]
    fn all_all_returns_everything_in_order() {
        let all = sample();
        let filtered = ResponseFilter::from_selections(FILTER_ALL, FILTER_ALL).apply(&all);
        assert_eq!(names(&filtered), names(&all));
    }

    #[test]
    fn both_constraints_apply_conjunctively() {
        let all = sample();
        let filtered = ResponseFilter::from_selections("adult", "no").apply(&all);
        assert_eq!(names(&filtered), vec!["C"]);
    }

    #[test]
    fn member_filter_alone_preserves_relative_order() {
        let all = sample();
        let filtered = ResponseFilter::from_selections(FILTER_ALL, "yes").apply(&all);
        assert_eq!(names(&filtered), vec!["A", "D"]);
    }

    #[test]
    fn yes_no_scenario_from_two_records() {
        let all = vec![record("First", "adult", "yes"), record("Second", "adult", "no")];
        let filtered = ResponseFilter::from_selections(FILTER_ALL, "yes").apply(&all);
        assert_eq!(names(&filtered), vec!["First"]);
    }

    #[test]
    fn records_missing_the_column_never_match_a_constraint() {
        let mut bare = ResponseRecord::default();
        bare.full_name = Some("X".to_string());
        let all = vec![bare];

        assert_eq!(
            ResponseFilter::from_selections("adult", FILTER_ALL)
                .apply(&all)
                .len(),
            0
        );
        assert_eq!(
            ResponseFilter::from_selections(FILTER_ALL, FILTER_ALL)
                .apply(&all)
                .len(),
            1
        );
    }
}
