//! Month-end date resolution.

use crate::error::{FixtureError, FixtureResult};
use chrono::{Datelike, Days, Local, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Last calendar day of the month containing `date`.
///
/// Day 28 plus four days always lands in the following month; stepping
/// back by that day-of-month returns to the last day of `date`'s month.
pub fn month_end_of(date: NaiveDate) -> NaiveDate {
    let day = u64::from(date.day());
    let day_28 = if day >= 28 {
        date - Days::new(day - 28)
    } else {
        date + Days::new(28 - day)
    };
    let next_month = day_28 + Days::new(4);
    next_month - Days::new(u64::from(next_month.day()))
}

/// First day of the month following `date`'s month.
pub fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    month_end_of(date) + Days::new(1)
}

/// Strict `YYYY-MM-DD` parse.
pub fn parse_reference_date(input: &str) -> FixtureResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| FixtureError::InvalidDate {
        input: input.to_string(),
    })
}

/// The snapshot date for a batch: the override when given, otherwise the
/// last day of `today`'s month.
pub fn resolve_month_end(override_date: Option<&str>, today: NaiveDate) -> FixtureResult<NaiveDate> {
    match override_date {
        Some(s) => parse_reference_date(s),
        None => Ok(month_end_of(today)),
    }
}

/// Local calendar date. Only the runner reads the wall clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
