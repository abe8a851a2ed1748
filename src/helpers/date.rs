//! Date helper functions

use chrono::{DateTime, Datelike, TimeZone};

/// Format a date like "October, 28th 2022"
pub fn format_date_long<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_with_month(date, "%B")
}

/// Format a date like "Oct, 28th 2022"
pub fn format_date_short<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_with_month(date, "%b")
}

fn format_with_month<Tz: TimeZone>(date: &DateTime<Tz>, month_format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let day = date.day();
    format!(
        "{}, {}{} {}",
        date.format(month_format),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

/// English ordinal suffix for a day of the month
pub fn ordinal_suffix(day: u32) -> &'static str {
    if day > 3 && day < 21 {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_date_long() {
        let date = Utc.with_ymd_and_hms(2022, 10, 28, 10, 30, 0).unwrap();
        assert_eq!(format_date_long(&date), "October, 28th 2022");
    }

    #[test]
    fn test_format_date_short() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date_short(&date), "Jan, 1st 2024");
    }

    #[test]
    fn test_ordinal_suffix() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(31), "st");
    }
}
