//! Calendar date ranges with an exclusive end, iterated one day at a time.

use chrono::NaiveDate;
use std::iter::FusedIterator;

/// A half-open range of calendar dates, `start..end`.
///
/// The range is `Copy`, so it can be iterated as many times as needed; every
/// iteration yields the same dates in ascending order. A range whose `start` is
/// on or after its `end` is empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use weather_report::days_between;
///
/// let start = NaiveDate::from_ymd_opt(2023, 6, 8).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 6, 10).unwrap();
///
/// let days: Vec<NaiveDate> = days_between(start, end).into_iter().collect();
/// assert_eq!(days, vec![start, start.succ_opt().unwrap()]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of dates the range yields.
    pub fn len(&self) -> usize {
        usize::try_from((self.end - self.start).num_days()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn iter(&self) -> Days {
        Days {
            next: self.start,
            end: self.end,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.iter()
    }
}

/// Iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: NaiveDate,
    end: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.next >= self.end {
            return None;
        }
        let current = self.next;
        // `end` is a valid date past `current`, so the successor always exists.
        self.next = current.succ_opt().unwrap_or(self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = DateRange::new(self.next, self.end).len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

/// Yields `start`, `start + 1 day`, ... up to but excluding `end`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end)
}
