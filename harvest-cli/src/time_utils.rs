use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

pub fn today_local() -> Date {
    let now = OffsetDateTime::now_utc();
    if let Ok(local_offset) = UtcOffset::current_local_offset() {
        now.to_offset(local_offset).date()
    } else {
        now.date()
    }
}

/// Strict `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<Date, time::error::Parse> {
    Date::parse(input.trim(), DATE_FORMAT)
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date("2024-12-25").unwrap(), date!(2024 - 12 - 25));
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_date("25/12/2024").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2024-1-5").is_err());
    }

    #[test]
    fn formats_with_padding() {
        assert_eq!(format_date(date!(2024 - 01 - 05)), "2024-01-05");
    }
}
