//! Week sequencing: meeting dates and their short labels.
//!
//! A plan covers four or five consecutive weekly meetings. Each week is
//! identified by a short `"%d %b"` label (`"01 Sep"`), which is what
//! assignment records and documents carry.

use jiff::ToSpan;
use jiff::civil::{Date, Weekday};

/// One meeting week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub label: String,
    pub date: Date,
}

/// How many weeks a plan spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekCount {
    Four,
    Five,
}

impl WeekCount {
    pub fn get(self) -> u8 {
        match self {
            Self::Four => 4,
            Self::Five => 5,
        }
    }
}

impl TryFrom<u8> for WeekCount {
    type Error = WeekError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            other => Err(WeekError::InvalidCount(other)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WeekError {
    #[error("week count must be 4 or 5, got {0}")]
    InvalidCount(u8),

    #[error("duplicate week label: {0}")]
    DuplicateLabel(String),

    #[error("date out of range: {0}")]
    Date(#[from] jiff::Error),
}

/// The short label for a meeting date.
pub fn label(date: Date) -> String {
    date.strftime("%d %b").to_string()
}

/// `count` weeks, seven days apart, starting at `start`.
///
/// A repeated label is a precondition violation and is returned as an error.
pub fn sequence(start: Date, count: WeekCount) -> Result<Vec<Week>, WeekError> {
    let mut weeks: Vec<Week> = Vec::with_capacity(usize::from(count.get()));
    let mut date = start;
    for i in 0..count.get() {
        if i > 0 {
            date = date.checked_add(7.days())?;
        }
        let label = label(date);
        if weeks.iter().any(|w| w.label == label) {
            return Err(WeekError::DuplicateLabel(label));
        }
        weeks.push(Week { label, date });
    }
    Ok(weeks)
}

/// Every `weekday` of the given month: always four or five weeks.
pub fn month(year: i16, month: i8, weekday: Weekday) -> Result<Vec<Week>, WeekError> {
    let first = Date::new(year, month, 1)?.nth_weekday_of_month(1, weekday)?;
    let mut count = 1;
    let mut next = first.checked_add(7.days())?;
    while next.month() == month {
        count += 1;
        next = next.checked_add(7.days())?;
    }
    sequence(first, WeekCount::try_from(count)?)
}
