use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::vacation::error::VacationError;

/// One contiguous, inclusive date range within a vacation plan.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    #[schema(example = "2026-07-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-07-05", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Number of calendar days covered, both endpoints included.
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }

    /// Iterate every day in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let count = self.day_count().max(0) as usize;
        (0..count).map(move |offset| self.start_date + Duration::days(offset as i64))
    }
}

/// Validate a proposed split set and return its total day count.
///
/// Enforced: at least one split, each range well-formed, the per-plan split
/// cap, and pairwise non-overlap within the plan itself.
pub fn validate_splits(splits: &[DateRange], max_splits: usize) -> Result<i64, VacationError> {
    if splits.is_empty() {
        return Err(VacationError::validation(
            "a vacation plan needs at least one date range",
        ));
    }
    if splits.len() > max_splits {
        return Err(VacationError::validation(format!(
            "a vacation plan may contain at most {max_splits} date ranges"
        )));
    }

    for split in splits {
        if split.start_date > split.end_date {
            return Err(VacationError::validation(format!(
                "start date {} is after end date {}",
                split.start_date, split.end_date
            )));
        }
    }

    for (i, a) in splits.iter().enumerate() {
        for b in &splits[i + 1..] {
            if a.overlaps(b) {
                return Err(VacationError::validation(format!(
                    "date ranges {}..{} and {}..{} overlap within the plan",
                    a.start_date, a.end_date, b.start_date, b.end_date
                )));
            }
        }
    }

    Ok(splits.iter().map(DateRange::day_count).sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn r(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end))
    }

    #[test]
    fn day_count_is_inclusive() {
        assert_eq!(r("2026-07-01", "2026-07-01").day_count(), 1);
        assert_eq!(r("2026-07-01", "2026-07-05").day_count(), 5);
    }

    #[test]
    fn overlap_detects_shared_days_and_touching_ranges() {
        assert!(r("2026-07-01", "2026-07-05").overlaps(&r("2026-07-05", "2026-07-10")));
        assert!(r("2026-07-03", "2026-07-04").overlaps(&r("2026-07-01", "2026-07-05")));
        assert!(!r("2026-07-01", "2026-07-05").overlaps(&r("2026-07-06", "2026-07-10")));
    }

    #[test]
    fn days_iterates_every_date() {
        let days: Vec<_> = r("2026-07-01", "2026-07-03").days().collect();
        assert_eq!(days, vec![d("2026-07-01"), d("2026-07-02"), d("2026-07-03")]);
    }

    #[test]
    fn validate_rejects_empty_plan() {
        let err = validate_splits(&[], 6).unwrap_err();
        assert!(matches!(err, VacationError::Validation(_)));
    }

    #[test]
    fn validate_rejects_too_many_splits() {
        let splits: Vec<_> = (1..=7)
            .map(|m| r(&format!("2026-{m:02}-01"), &format!("2026-{m:02}-02")))
            .collect();
        assert!(validate_splits(&splits, 6).is_err());
        assert!(validate_splits(&splits[..6], 6).is_ok());
    }

    #[test]
    fn validate_rejects_inverted_range() {
        assert!(validate_splits(&[r("2026-07-05", "2026-07-01")], 6).is_err());
    }

    #[test]
    fn validate_rejects_internal_overlap() {
        let splits = [r("2026-07-01", "2026-07-05"), r("2026-07-04", "2026-07-08")];
        assert!(validate_splits(&splits, 6).is_err());
    }

    #[test]
    fn validate_sums_total_days() {
        let splits = [r("2026-07-01", "2026-07-05"), r("2026-08-01", "2026-08-02")];
        assert_eq!(validate_splits(&splits, 6).unwrap(), 7);
    }
}
