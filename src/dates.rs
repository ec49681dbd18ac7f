//! Inclusive calendar-day ranges.

use std::mem::replace;

use chrono::{Duration, NaiveDate};

/// Lazy iterator over every calendar day from start to end, both inclusive.
///
/// An inverted pair (end before start) yields nothing rather than failing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + Duration::days(1);
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}

// -- Tests -------------------------------------------------------------------
