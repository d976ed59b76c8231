use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Textual form accepted for query dates, also used on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` date.
///
/// chrono alone accepts single-digit months/days and signed or longer years,
/// so the shape is checked before the calendar validation.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(Error::InvalidDateFormat(text.to_string()));
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| Error::InvalidDateFormat(text.to_string()))
}

/// `end == start` is a valid single-day range.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(Error::InvalidDateRange {
            start: format_date(&start),
            end: format_date(&end),
        });
    }
    Ok(())
}

/// Parse both ends of a range. Supplying only one of them is its own error.
pub fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(Error::IncompleteDateRange);
    };
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    validate_range(start, end)?;
    Ok((start, end))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_back() {
        for s in ["2023-01-01", "2020-02-29", "1999-12-31", "2024-10-05"] {
            let d = parse_date(s).unwrap();
            assert_eq!(format_date(&d), s);
        }
        assert_eq!(
            parse_date("2023-03-07").unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 7).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        for s in [
            "2023/01/01",
            "01-01-2023",
            "20230101",
            "2023-1-01",
            "2023-01-1",
            "2023-13-01",
            "2023-02-30",
            "2023-00-10",
            "2023-01-01 ",
            " 2023-01-01",
            "2023-01-01T00:00",
            "+2023-01-1",
            "",
        ] {
            assert!(
                matches!(parse_date(s), Err(Error::InvalidDateFormat(ref t)) if t == s),
                "accepted {s:?}"
            );
        }
    }

    #[test]
    fn validates_range_order() {
        let a = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        assert!(validate_range(a, b).is_ok());
        assert!(validate_range(a, a).is_ok());
        assert!(matches!(
            validate_range(b, a),
            Err(Error::InvalidDateRange { ref start, ref end }) if start == "2023-01-02" && end == "2023-01-01"
        ));
    }

    #[test]
    fn half_range_is_incomplete() {
        assert!(matches!(
            parse_range(Some("2023-01-01"), None),
            Err(Error::IncompleteDateRange)
        ));
        assert!(matches!(
            parse_range(None, Some("2023-01-01")),
            Err(Error::IncompleteDateRange)
        ));
        assert!(matches!(parse_range(None, None), Err(Error::IncompleteDateRange)));
        assert!(parse_range(Some("2023-01-01"), Some("2023-01-01")).is_ok());
    }
}
