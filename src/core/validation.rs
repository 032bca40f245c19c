//! Parameter validators.
//!
//! Every validator is pure: the current date is passed in rather than read
//! from the system clock. A failure is always [`Error::Validation`] carrying
//! the message shown to the caller.

use crate::errors::{Error, Result};
use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const INVALID_MONTH: &str = "Please enter correct month";
pub const INVALID_YEAR: &str = "Please enter correct year";
pub const INVALID_DATE: &str = "Provide a valid date format: YYYY-MM-DD";
pub const INVALID_YEAR_MONTH: &str = "Please enter correct year month in format YYYY-MM";
pub const FUTURE_YEAR_MONTH: &str = "year or month cannot be greater than current date";

/// Earliest year accepted by [`validate_year`].
pub const MIN_YEAR: i32 = 2000;

/// Largest money or quantity value that can be stored.
pub const MAX_AMOUNT: i64 = 2_147_483_647;

#[allow(clippy::expect_used)] // Literal patterns, checked by the tests below
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("year pattern is valid"));

#[allow(clippy::expect_used)]
static YEAR_MONTH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-(0[1-9]|1[0-2])$").expect("year-month pattern is valid")
});

/// A calendar month, backed by its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// Builds a year-month, returning `None` for an impossible month.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// First day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Last day of the month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Accepts an integer month between 1 and the current month inclusive.
///
/// Only the month component of `today` matters, so later months become
/// valid as the calendar reaches them.
pub fn validate_month(month: &str, today: NaiveDate) -> Result<u32> {
    let parsed: i64 = month
        .trim()
        .parse()
        .map_err(|_| Error::validation(INVALID_MONTH))?;

    if parsed < 1 || parsed > i64::from(today.month()) {
        return Err(Error::validation(INVALID_MONTH));
    }

    u32::try_from(parsed).map_err(|_| Error::validation(INVALID_MONTH))
}

/// Accepts exactly four digits naming a year between 2000 and the current year.
pub fn validate_year(year: &str, today: NaiveDate) -> Result<i32> {
    if !YEAR_PATTERN.is_match(year) {
        return Err(Error::validation(INVALID_YEAR));
    }

    let parsed: i32 = year.parse().map_err(|_| Error::validation(INVALID_YEAR))?;
    if (MIN_YEAR..=today.year()).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(Error::validation(INVALID_YEAR))
    }
}

/// Accepts a `YYYY-MM-DD` date.
pub fn validate_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| Error::validation(INVALID_DATE))
}

/// Accepts a whole number between 0 and [`MAX_AMOUNT`] written as plain digits.
///
/// Signs, decimals and anything too large are rejected with `message`.
pub fn validate_amount(value: &str, message: &str) -> Result<i64> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::validation(message));
    }

    value
        .parse::<i64>()
        .ok()
        .filter(|amount| *amount <= MAX_AMOUNT)
        .ok_or_else(|| Error::validation(message))
}

/// Accepts a `YYYY-MM` string that is not later than the current month.
///
/// A malformed value and a future value are rejected with different messages.
pub fn validate_year_month(year_month: &str, today: NaiveDate) -> Result<YearMonth> {
    let captures = YEAR_MONTH_PATTERN
        .captures(year_month)
        .ok_or_else(|| Error::validation(INVALID_YEAR_MONTH))?;

    let year: i32 = captures[1]
        .parse()
        .map_err(|_| Error::validation(INVALID_YEAR_MONTH))?;
    let month: u32 = captures[2]
        .parse()
        .map_err(|_| Error::validation(INVALID_YEAR_MONTH))?;

    if year > today.year() || (year == today.year() && month > today.month()) {
        return Err(Error::validation(FUTURE_YEAR_MONTH));
    }

    YearMonth::new(year, month).ok_or_else(|| Error::validation(INVALID_YEAR_MONTH))
}
