//! Calendar window of a scan and the day bucket of a commit inside it.
//!
//! A window always covers whole calendar weeks, Monday to Sunday, because the
//! result is rendered as a grid of week rows.

use crate::error::{ContribError, Result};
use crate::util::{beginning_of_day, end_of_day};
use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, TimeDelta};

pub const DEFAULT_DURATION_DAYS: i64 = 365;
/// Upper bound of `duration_weeks`, about a century.
pub const MAX_DURATION_WEEKS: u32 = 5200;

/// How far back from now the window ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    Years(u32),
    Months(u32),
    Weeks(u64),
    Days(u64),
}

impl Delta {
    /// Parses `<int>[y|m|w|d]`; an empty string means no delta. The sign is
    /// ignored, a delta always points into the past.
    pub fn parse(input: &str) -> Result<Option<Self>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let invalid = || ContribError::InvalidDelta(input.to_string());
        let unit = input.chars().last().ok_or_else(invalid)?;
        let amount: i64 = input[..input.len() - unit.len_utf8()]
            .parse()
            .map_err(|_| invalid())?;
        let amount = amount.unsigned_abs();

        let delta = match unit {
            'y' => Delta::Years(u32::try_from(amount).map_err(|_| invalid())?),
            'm' => Delta::Months(u32::try_from(amount).map_err(|_| invalid())?),
            'w' => Delta::Weeks(amount),
            'd' => Delta::Days(amount),
            _ => return Err(invalid()),
        };
        Ok(Some(delta))
    }

    fn rewind(self, now: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            Delta::Years(n) => now.checked_sub_months(Months::new(n.checked_mul(12)?)),
            Delta::Months(n) => now.checked_sub_months(Months::new(n)),
            Delta::Weeks(n) => now.checked_sub_days(Days::new(n.checked_mul(7)?)),
            Delta::Days(n) => now.checked_sub_days(Days::new(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub begin: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub total_days: i64,
}

impl ScanWindow {
    /// Computes the window ending `delta` before `now` and spanning
    /// `duration_weeks` weeks (365 days when zero), widened to whole weeks.
    pub fn compute(delta: &str, duration_weeks: u32, now: DateTime<FixedOffset>) -> Result<Self> {
        let end = match Delta::parse(delta)? {
            Some(d) => d
                .rewind(now)
                .ok_or_else(|| ContribError::InvalidDelta(delta.to_string()))?,
            None => now,
        };

        if duration_weeks > MAX_DURATION_WEEKS {
            return Err(ContribError::InvalidDuration(duration_weeks));
        }
        let duration_days = if duration_weeks > 0 {
            i64::from(duration_weeks) * 7
        } else {
            DEFAULT_DURATION_DAYS
        };

        // only a delta reaching the start of the calendar can overflow here
        end.checked_sub_signed(TimeDelta::days(duration_days))
            .and_then(|begin| Self::aligned(begin, end))
            .ok_or_else(|| ContribError::InvalidDelta(delta.to_string()))
    }

    /// Widens `[begin, end]` to the Monday at or before `begin` and the Sunday
    /// at or after `end`. `None` past the calendar bounds.
    pub fn aligned(begin: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Option<Self> {
        let offset = *end.offset();
        let begin_date = begin
            .date_naive()
            .checked_sub_days(Days::new(u64::from(begin.weekday().num_days_from_monday())))?;
        let end_date = end
            .date_naive()
            .checked_add_days(Days::new(u64::from(6 - end.weekday().num_days_from_monday())))?;

        Some(Self {
            begin: beginning_of_day(begin_date, offset),
            end: end_of_day(end_date, offset),
            total_days: (end_date - begin_date).num_days() + 1,
        })
    }

    /// Trailing cells needed to complete the last week row.
    pub fn grid_offset(&self) -> i64 {
        7 - i64::from(self.end.weekday().num_days_from_sunday())
    }

    /// Bucket index of `timestamp`, or `None` when it falls outside the window.
    pub fn day_offset(&self, timestamp: DateTime<FixedOffset>) -> Option<i64> {
        if timestamp > self.end {
            return None;
        }
        if timestamp == self.end {
            return Some(0);
        }

        let elapsed = self.end - timestamp;
        let mut days = elapsed.num_days();
        if elapsed > TimeDelta::days(days) {
            days += 1;
        }
        if days > self.total_days {
            return None;
        }
        Some(days + self.grid_offset())
    }

    /// Calendar day a bucket index stands for.
    pub fn bucket_date(&self, index: i64) -> Option<NaiveDate> {
        let end_date = self.end.date_naive();
        if index == 0 {
            return Some(end_date);
        }
        let back = index - 1 - self.grid_offset();
        if back < 0 {
            return None;
        }
        end_date.checked_sub_days(Days::new(back as u64))
    }
}
