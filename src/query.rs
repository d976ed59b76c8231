use chrono::NaiveDate;

use crate::categories::{INFO, is_known_category};
use crate::date::{format_date, parse_range};
use crate::error::{Error, Result};

/// Validated date-range query for one file category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub category: String,
}

impl QuerySpec {
    /// Query parameters in the order the catalog endpoint documents them.
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("dateStart", format_date(&self.start)),
            ("dateEnd", format_date(&self.end)),
            ("FileCategory", self.category.clone()),
        ]
    }
}

/// A request is decided once, when it is built: either a listing of the
/// available categories or a download query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRequest {
    ListCategories,
    Download(QuerySpec),
}

impl QueryRequest {
    /// Build and validate a request from raw text.
    ///
    /// The `info` category short-circuits before any date checks, so the
    /// dates may be missing or malformed in that case. Otherwise the dates are
    /// parsed, the range is checked, and the category must be a known one.
    pub fn build(start: Option<&str>, end: Option<&str>, category: &str) -> Result<Self> {
        if category == INFO {
            return Ok(QueryRequest::ListCategories);
        }

        let (start, end) = parse_range(start, end)?;
        if !is_known_category(category) {
            return Err(Error::UnknownCategory(category.to_string()));
        }

        Ok(QueryRequest::Download(QuerySpec {
            start,
            end,
            category: category.to_string(),
        }))
    }

    pub fn category(&self) -> &str {
        match self {
            QueryRequest::ListCategories => INFO,
            QueryRequest::Download(spec) => &spec.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_download_query() {
        let q = QueryRequest::build(Some("2023-01-01"), Some("2023-01-02"), "DayAheadLoadForecast")
            .unwrap();
        let QueryRequest::Download(spec) = q else {
            panic!("expected a download query");
        };
        assert_eq!(spec.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(spec.end, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
        assert_eq!(
            spec.params(),
            [
                ("dateStart", "2023-01-01".to_string()),
                ("dateEnd", "2023-01-02".to_string()),
                ("FileCategory", "DayAheadLoadForecast".to_string()),
            ]
        );
    }

    #[test]
    fn info_bypasses_date_validation() {
        assert_eq!(QueryRequest::build(None, None, "info").unwrap(), QueryRequest::ListCategories);
        assert_eq!(
            QueryRequest::build(Some("garbage"), None, "info").unwrap(),
            QueryRequest::ListCategories
        );
        assert_eq!(
            QueryRequest::build(Some("2023-02-01"), Some("2023-01-01"), "info").unwrap(),
            QueryRequest::ListCategories
        );
    }

    #[test]
    fn validation_order_is_dates_then_category() {
        assert!(matches!(
            QueryRequest::build(Some("2023/01/01"), Some("2023-01-02"), "Nope"),
            Err(Error::InvalidDateFormat(_))
        ));
        assert!(matches!(
            QueryRequest::build(Some("2023-01-03"), Some("2023-01-02"), "Nope"),
            Err(Error::InvalidDateRange { .. })
        ));
        assert!(matches!(
            QueryRequest::build(Some("2023-01-01"), None, "DayAheadLoadForecast"),
            Err(Error::IncompleteDateRange)
        ));
        assert!(matches!(
            QueryRequest::build(Some("2023-01-01"), Some("2023-01-02"), "Nope"),
            Err(Error::UnknownCategory(ref c)) if c == "Nope"
        ));
    }
}
