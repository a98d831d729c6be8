//! Dates a recurring series must not occur on.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Membership test over calendar dates excluded from a series.
pub trait SkipLookup {
    fn is_skipped(&self, date: NaiveDate) -> bool;
}

impl<T: SkipLookup + ?Sized> SkipLookup for &T {
    fn is_skipped(&self, date: NaiveDate) -> bool {
        (**self).is_skipped(date)
    }
}

impl SkipLookup for [NaiveDate] {
    fn is_skipped(&self, date: NaiveDate) -> bool {
        self.contains(&date)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
/// Ordered, duplicate-free set of skipped dates. Serialized as a sorted list.
pub struct SkipSet(BTreeSet<NaiveDate>);

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a date and reports whether it was not already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.0.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.iter().copied()
    }
}

impl SkipLookup for SkipSet {
    fn is_skipped(&self, date: NaiveDate) -> bool {
        self.contains(date)
    }
}

impl FromIterator<NaiveDate> for SkipSet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<NaiveDate> for SkipSet {
    fn extend<I: IntoIterator<Item = NaiveDate>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut skips = SkipSet::new();
        assert!(skips.insert(date(3, 5)));
        assert!(!skips.insert(date(3, 5)));
        assert_eq!(skips.len(), 1);
        assert!(skips.is_skipped(date(3, 5)));
        assert!(!skips.is_skipped(date(3, 6)));
    }

    #[test]
    fn deserializing_duplicates_collapses_them() {
        let skips: SkipSet =
            serde_json::from_str(r#"["2025-03-05","2025-01-05","2025-03-05"]"#).unwrap();
        assert_eq!(skips.iter().collect::<Vec<_>>(), vec![date(1, 5), date(3, 5)]);
        assert_eq!(
            serde_json::to_string(&skips).unwrap(),
            r#"["2025-01-05","2025-03-05"]"#
        );
    }

    #[test]
    fn slices_act_as_lookups() {
        let raw = vec![date(1, 1), date(2, 1)];
        assert!(raw.as_slice().is_skipped(date(2, 1)));
        assert!(!raw.as_slice().is_skipped(date(3, 1)));
    }
}
