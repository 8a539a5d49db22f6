use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

fn at_offset(local: NaiveDateTime, offset: FixedOffset) -> DateTime<FixedOffset> {
    let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Midnight of `date` in `offset`.
pub fn beginning_of_day(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    at_offset(date.and_time(NaiveTime::MIN), offset)
}

/// 23:59:59 of `date` in `offset`.
pub fn end_of_day(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    at_offset(date.and_time(last_second), offset)
}

pub fn folders_label<P: AsRef<std::path::Path>>(folders: &[P]) -> String {
    folders
        .iter()
        .map(|f| f.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn day_bounds_keep_the_offset() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 29).unwrap();

        let begin = beginning_of_day(date, offset);
        let end = end_of_day(date, offset);

        assert_eq!(begin.date_naive(), date);
        assert_eq!(begin.hour(), 0);
        assert_eq!(end.date_naive(), date);
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(*end.offset(), offset);
    }
}
