//! Reporting periods
//!
//! A [`ReportPeriod`] is an inclusive date range used by the read-side
//! aggregator and by posting-template effective-date lookups.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for period construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Invalid period: from {from} is after to {to}")]
    Inverted { from: NaiveDate, to: NaiveDate },
}

/// How period summaries are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodGrouping {
    Day,
    Month,
}

/// An inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    from: NaiveDate,
    to: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period, failing if `from` is after `to`
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, PeriodError> {
        if from > to {
            return Err(PeriodError::Inverted { from, to });
        }
        Ok(Self { from, to })
    }

    /// A single-day period
    pub fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    /// Returns the first day of the period
    pub fn from_date(&self) -> NaiveDate {
        self.from
    }

    /// Returns the last day of the period
    pub fn to_date(&self) -> NaiveDate {
        self.to
    }

    /// Returns true if the date falls within the period (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    /// Returns the grouping key for a date, e.g. "2025-03-08" or "2025-03"
    pub fn group_key(date: NaiveDate, grouping: PeriodGrouping) -> String {
        match grouping {
            PeriodGrouping::Day => date.format("%Y-%m-%d").to_string(),
            PeriodGrouping::Month => format!("{:04}-{:02}", date.year(), date.month()),
        }
    }
}
