//! Narrowing a record list before export.

use crate::model::{AssignmentRecord, Section};

/// Criteria a record must meet to be kept. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Exact week label, e.g. "08 Sep".
    pub week: Option<String>,
    pub section: Option<Section>,

    /// Matches a record when any of its assignees has this name, ignoring
    /// ASCII case. Paired slots are split on the separator.
    pub assignee: Option<String>,
}

impl RecordFilter {
    pub fn is_empty(&self) -> bool {
        self.week.is_none() && self.section.is_none() && self.assignee.is_none()
    }

    fn matches(&self, record: &AssignmentRecord, separator: &str) -> bool {
        if let Some(week) = &self.week
            && record.week.trim() != week.trim()
        {
            return false;
        }
        if let Some(section) = self.section
            && record.section != section
        {
            return false;
        }
        if let Some(name) = &self.assignee {
            let name = name.trim();
            let mut names = split_assignees(&record.assignee, separator);
            if !names.any(|n| n.eq_ignore_ascii_case(name)) {
                return false;
            }
        }
        true
    }
}

/// Records matching `filter`, in input order.
pub fn filter(
    records: &[AssignmentRecord],
    filter: &RecordFilter,
    separator: &str,
) -> Vec<AssignmentRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r, separator))
        .cloned()
        .collect()
}

fn split_assignees<'a>(assignee: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    let separator = if separator.trim().is_empty() {
        separator
    } else {
        separator.trim()
    };
    assignee
        .split(separator)
        .map(str::trim)
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(week: &str, section: Section, assignee: &str) -> AssignmentRecord {
        AssignmentRecord {
            week: week.into(),
            section,
            order: "1".into(),
            slot_label: "Slot".into(),
            assignee: assignee.into(),
        }
    }

    fn sample() -> Vec<AssignmentRecord> {
        vec![
            record("01 Sep", Section::Opening, "Ana"),
            record("01 Sep", Section::Ministry, "Carla / Daniel"),
            record("08 Sep", Section::Ministry, "Daniel / Ana"),
            record("08 Sep", Section::Closing, ""),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let f = RecordFilter::default();
        assert!(f.is_empty());
        assert_eq!(filter(&sample(), &f, " / "), sample());
    }

    #[test]
    fn week_and_section_combine() {
        let f = RecordFilter {
            week: Some("08 Sep".into()),
            section: Some(Section::Ministry),
            assignee: None,
        };
        let kept = filter(&sample(), &f, " / ");
        assert_eq!(kept, vec![record("08 Sep", Section::Ministry, "Daniel / Ana")]);
    }

    #[test]
    fn assignee_matches_either_half_of_a_pair() {
        let f = RecordFilter {
            assignee: Some("ana".into()),
            ..RecordFilter::default()
        };
        let weeks: Vec<_> = filter(&sample(), &f, " / ")
            .into_iter()
            .map(|r| (r.week, r.section))
            .collect();
        assert_eq!(
            weeks,
            [
                ("01 Sep".to_string(), Section::Opening),
                ("08 Sep".to_string(), Section::Ministry),
            ]
        );
    }

    #[test]
    fn assignee_does_not_match_substrings() {
        let records = vec![record("01 Sep", Section::Opening, "Anabela")];
        let f = RecordFilter {
            assignee: Some("Ana".into()),
            ..RecordFilter::default()
        };
        assert!(filter(&records, &f, " / ").is_empty());
    }
}
