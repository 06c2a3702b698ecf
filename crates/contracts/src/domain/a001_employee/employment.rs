use crate::shared::dates::add_months;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Prefix marking ids minted on the client for rows the backend has not seen.
pub const PLACEHOLDER_PREFIX: &str = "tmp-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentLabel {
    #[serde(rename = "PROBATIONARY")]
    Probationary,
    #[serde(rename = "AGENCY HIRED")]
    AgencyHired,
    #[serde(rename = "PROJECT BASED")]
    ProjectBased,
    #[serde(rename = "REGULAR")]
    Regular,
}

impl EmploymentLabel {
    pub const ALL: [EmploymentLabel; 4] = [
        Self::Probationary,
        Self::AgencyHired,
        Self::ProjectBased,
        Self::Regular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Probationary => "PROBATIONARY",
            Self::AgencyHired => "AGENCY HIRED",
            Self::ProjectBased => "PROJECT BASED",
            Self::Regular => "REGULAR",
        }
    }

    /// Lenient parse: case-insensitive, `_`/`-` accepted in place of spaces.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_uppercase().replace(['_', '-'], " ");
        Self::ALL.into_iter().find(|l| l.as_str() == normalized)
    }

    pub fn uses_start_date(&self) -> bool {
        !matches!(self, Self::Regular)
    }

    pub fn uses_end_date(&self) -> bool {
        !matches!(self, Self::Regular)
    }

    pub fn requires_end_date(&self) -> bool {
        matches!(self, Self::AgencyHired | Self::ProjectBased)
    }

    pub fn uses_regularization_date(&self) -> bool {
        matches!(self, Self::Regular)
    }
}

/// Row identity of an employment-type entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryId {
    /// Row already stored by the backend
    Server(i64),
    /// Disposable client id, never sent as a real identifier
    Placeholder(String),
}

impl EntryId {
    pub fn server_id(&self) -> Option<i64> {
        match self {
            Self::Server(id) => Some(*id),
            Self::Placeholder(_) => None,
        }
    }

    /// Interpret an upstream id string: placeholder-prefixed strings stay
    /// placeholders, integers become server ids.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.starts_with(PLACEHOLDER_PREFIX) {
            return Some(Self::Placeholder(raw.to_string()));
        }
        raw.parse::<i64>().ok().map(Self::Server)
    }

    pub fn as_key(&self) -> String {
        match self {
            Self::Server(id) => id.to_string(),
            Self::Placeholder(s) => s.clone(),
        }
    }
}

/// Mints placeholder ids for one wizard session.
///
/// The seed is chosen by whoever opens the session; ids are unique within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSeq {
    seed: String,
    next: u32,
}

impl PlaceholderSeq {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            next: 0,
        }
    }

    pub fn next_id(&mut self) -> EntryId {
        self.next += 1;
        EntryId::Placeholder(format!("{}{}-{}", PLACEHOLDER_PREFIX, self.seed, self.next))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmploymentTypeEntry {
    pub id: EntryId,
    pub label: Option<EmploymentLabel>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub regularization_date: Option<NaiveDate>,
}

impl EmploymentTypeEntry {
    pub fn new(id: EntryId) -> Self {
        Self {
            id,
            label: None,
            start_date: None,
            end_date: None,
            regularization_date: None,
        }
    }
}

/// Which date of an entry an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmploymentDateField {
    Start,
    End,
    Regularization,
}

impl EmploymentDateField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Start => "employment_start_date",
            Self::End => "employment_end_date",
            Self::Regularization => "regularization_date",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "Start Date",
            Self::End => "End Date",
            Self::Regularization => "Regularization Date",
        }
    }
}

/// Derived-field pass over every entry. Returns true if anything changed.
///
/// - PROBATIONARY with a start date and no end date gets
///   `end = start + probation_months`.
/// - REGULAR carries no start or end date.
/// - Any other label carries no regularization date.
///
/// Applying it twice is the same as applying it once.
pub fn apply_employment_rules(entries: &mut [EmploymentTypeEntry], probation_months: u32) -> bool {
    let mut changed = false;
    for entry in entries.iter_mut() {
        match entry.label {
            Some(EmploymentLabel::Regular) => {
                if entry.start_date.is_some() || entry.end_date.is_some() {
                    entry.start_date = None;
                    entry.end_date = None;
                    changed = true;
                }
            }
            Some(label) => {
                if entry.regularization_date.is_some() {
                    entry.regularization_date = None;
                    changed = true;
                }
                if label == EmploymentLabel::Probationary && entry.end_date.is_none() {
                    if let Some(end) = entry.start_date.and_then(|s| add_months(s, probation_months)) {
                        entry.end_date = Some(end);
                        changed = true;
                    }
                }
            }
            None => {}
        }
    }
    changed
}

/// The "current" entry: latest start date first, falling back to the first
/// entry when none has a start date.
pub fn representative_entry(entries: &[EmploymentTypeEntry]) -> Option<&EmploymentTypeEntry> {
    entries
        .iter()
        .filter(|e| e.start_date.is_some())
        .max_by_key(|e| e.start_date)
        .or_else(|| entries.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entry(label: EmploymentLabel, start: Option<NaiveDate>) -> EmploymentTypeEntry {
        EmploymentTypeEntry {
            id: EntryId::Server(1),
            label: Some(label),
            start_date: start,
            end_date: None,
            regularization_date: None,
        }
    }

    #[test]
    fn test_label_parse_is_lenient() {
        assert_eq!(EmploymentLabel::parse("agency_hired"), Some(EmploymentLabel::AgencyHired));
        assert_eq!(EmploymentLabel::parse("Project-Based"), Some(EmploymentLabel::ProjectBased));
        assert_eq!(EmploymentLabel::parse(" regular "), Some(EmploymentLabel::Regular));
        assert_eq!(EmploymentLabel::parse("contractual"), None);
    }

    #[test]
    fn test_probationary_end_date_derived() {
        let mut entries = vec![entry(EmploymentLabel::Probationary, Some(d(2026, 1, 10)))];
        assert!(apply_employment_rules(&mut entries, 6));
        assert_eq!(entries[0].end_date, Some(d(2026, 7, 10)));
    }

    #[test]
    fn test_probationary_keeps_existing_end_date() {
        let mut entries = vec![entry(EmploymentLabel::Probationary, Some(d(2026, 1, 10)))];
        entries[0].end_date = Some(d(2026, 3, 1));
        assert!(!apply_employment_rules(&mut entries, 6));
        assert_eq!(entries[0].end_date, Some(d(2026, 3, 1)));
    }

    #[test]
    fn test_regular_clears_start_and_end() {
        let mut entries = vec![entry(EmploymentLabel::Regular, Some(d(2026, 1, 10)))];
        entries[0].end_date = Some(d(2026, 7, 10));
        entries[0].regularization_date = Some(d(2026, 7, 11));
        assert!(apply_employment_rules(&mut entries, 6));
        assert_eq!(entries[0].start_date, None);
        assert_eq!(entries[0].end_date, None);
        assert_eq!(entries[0].regularization_date, Some(d(2026, 7, 11)));
    }

    #[test]
    fn test_rules_are_idempotent() {
        let mut entries = vec![
            entry(EmploymentLabel::Probationary, Some(d(2025, 8, 31))),
            entry(EmploymentLabel::Regular, Some(d(2024, 1, 1))),
            entry(EmploymentLabel::AgencyHired, Some(d(2024, 1, 1))),
        ];
        entries[2].regularization_date = Some(d(2024, 6, 1));
        apply_employment_rules(&mut entries, 6);
        let once = entries.clone();
        assert!(!apply_employment_rules(&mut entries, 6));
        assert_eq!(entries, once);
        assert_eq!(entries[0].end_date, Some(d(2026, 2, 28)));
        assert_eq!(entries[2].regularization_date, None);
    }

    #[test]
    fn test_placeholder_ids_unique_and_prefixed() {
        let mut seq = PlaceholderSeq::new("abc");
        let a = seq.next_id();
        let b = seq.next_id();
        assert_ne!(a, b);
        assert_eq!(a.server_id(), None);
        assert!(a.as_key().starts_with(PLACEHOLDER_PREFIX));
        assert_eq!(EntryId::parse(&a.as_key()), Some(a));
        assert_eq!(EntryId::parse("42"), Some(EntryId::Server(42)));
    }

    #[test]
    fn test_representative_entry_prefers_latest_start() {
        let entries = vec![
            entry(EmploymentLabel::Probationary, Some(d(2024, 1, 1))),
            entry(EmploymentLabel::AgencyHired, Some(d(2025, 1, 1))),
            entry(EmploymentLabel::Regular, None),
        ];
        assert_eq!(representative_entry(&entries).unwrap().label, Some(EmploymentLabel::AgencyHired));

        let undated = vec![entry(EmploymentLabel::Regular, None), entry(EmploymentLabel::Probationary, None)];
        assert_eq!(representative_entry(&undated).unwrap().label, Some(EmploymentLabel::Regular));
        assert!(representative_entry(&[]).is_none());
    }
}
