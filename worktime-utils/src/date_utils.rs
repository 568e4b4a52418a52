use std::fmt::{Display, Formatter};
use thiserror::*;

use time::{Date, Month};

#[derive(Debug, Error)]
pub enum WorktimeDateUtilsError {
    #[error("Invalid month number: {0}")]
    InvalidMonth(u8),
    #[error("Invalid date: {0}")]
    DateError(#[from] time::error::ComponentRange),
}

/// A calendar month of a specific year.
///
/// The attendance domain works in whole calendar months, so this is the
/// unit every aggregation and export is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub fn new(year: i32, month: u8) -> Result<Self, WorktimeDateUtilsError> {
        let month = Month::try_from(month).map_err(|_| WorktimeDateUtilsError::InvalidMonth(month))?;
        Ok(Self { year, month })
    }

    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn month_number(&self) -> u8 {
        self.month as u8
    }

    /// Number of days in this month, leap years included.
    pub fn len(&self) -> u8 {
        self.month.length(self.year)
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first_day(&self) -> Result<Date, WorktimeDateUtilsError> {
        Ok(Date::from_calendar_date(self.year, self.month, 1)?)
    }

    pub fn last_day(&self) -> Result<Date, WorktimeDateUtilsError> {
        Ok(Date::from_calendar_date(self.year, self.month, self.len())?)
    }

    /// All days of the month in ascending order.
    pub fn days(&self) -> Result<Vec<Date>, WorktimeDateUtilsError> {
        (1..=self.len())
            .map(|day| Ok(Date::from_calendar_date(self.year, self.month, day)?))
            .collect()
    }

    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn previous(&self) -> Self {
        match self.month {
            Month::January => Self {
                year: self.year - 1,
                month: Month::December,
            },
            month => Self {
                year: self.year,
                month: month.previous(),
            },
        }
    }

    pub fn next(&self) -> Self {
        match self.month {
            Month::December => Self {
                year: self.year + 1,
                month: Month::January,
            },
            month => Self {
                year: self.year,
                month: month.next(),
            },
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.year, self.month as u8)
    }
}
