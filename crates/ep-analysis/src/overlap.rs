//! Date-range overlap of two assignments

use chrono::NaiveDate;
use ep_models::AssignmentRecord;

/// Inclusive range during which two tenures coincide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl OverlapWindow {
    /// Both ends count, so a shared single day is one day
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Shared window of two tenures, if any
pub fn overlap_window(a: &AssignmentRecord, b: &AssignmentRecord) -> Option<OverlapWindow> {
    let start = a.date_from.max(b.date_from);
    let end = a.date_to.min(b.date_to);
    (start <= end).then_some(OverlapWindow { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: (i32, u32, u32), to: (i32, u32, u32)) -> AssignmentRecord {
        AssignmentRecord::new(
            1,
            1,
            NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_partial_overlap() {
        let a = record((2024, 1, 1), (2024, 1, 10));
        let b = record((2024, 1, 5), (2024, 1, 20));
        let window = overlap_window(&a, &b).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(window.days(), 6);
        assert_eq!(overlap_window(&b, &a), Some(window));
    }

    #[test]
    fn test_single_shared_day_counts_as_one() {
        let a = record((2024, 1, 1), (2024, 1, 1));
        let b = record((2024, 1, 1), (2024, 1, 1));
        assert_eq!(overlap_window(&a, &b).unwrap().days(), 1);
    }

    #[test]
    fn test_touching_ranges_share_the_boundary_day() {
        let a = record((2024, 1, 1), (2024, 1, 10));
        let b = record((2024, 1, 10), (2024, 1, 20));
        assert_eq!(overlap_window(&a, &b).unwrap().days(), 1);
    }

    #[test]
    fn test_disjoint_ranges() {
        let a = record((2024, 1, 1), (2024, 1, 10));
        let b = record((2024, 2, 1), (2024, 2, 10));
        assert_eq!(overlap_window(&a, &b), None);
    }

    #[test]
    fn test_contained_range_spans_year_boundary() {
        let a = record((2023, 12, 1), (2024, 2, 29));
        let b = record((2023, 12, 31), (2024, 1, 1));
        assert_eq!(overlap_window(&a, &b).unwrap().days(), 2);
        // Long windows are counted in whole days, not a day-of-month component
        let c = record((2023, 1, 1), (2024, 12, 31));
        assert_eq!(overlap_window(&a, &c).unwrap().days(), 91);
    }
}
