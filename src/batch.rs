use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Error, Result};
use crate::query::QueryRequest;

/// Raw `startDate,endDate,category` triple from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub start: String,
    pub end: String,
    pub category: String,
}

impl BatchRow {
    fn from_record(record: &StringRecord) -> Result<Self> {
        if record.len() != 3 {
            return Err(Error::Usage(format!(
                "expected 3 fields (startDate,endDate,category), got {}",
                record.len()
            )));
        }
        Ok(Self {
            start: record[0].to_string(),
            end: record[1].to_string(),
            category: record[2].to_string(),
        })
    }

    /// Empty date fields count as absent, so `,,info` is a listing row.
    pub fn into_request(self) -> Result<QueryRequest> {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        let start = non_empty(&self.start);
        let end = non_empty(&self.end);
        QueryRequest::build(start.as_deref(), end.as_deref(), &self.category)
    }
}

/// Read a batch of queries, one per line, no header row. Blank or
/// whitespace-only lines are skipped but still counted.
///
/// The whole batch is rejected on the first malformed line; the error carries
/// the 1-based line number.
pub fn read_batch(source: impl Read) -> Result<Vec<QueryRequest>> {
    let mut requests = Vec::new();
    for (i, line) in BufReader::new(source).lines().enumerate() {
        let line_no = i as u64 + 1;
        let at_line = |e: Error| Error::BatchFormat {
            line: line_no,
            source: Box::new(e),
        };

        let line = line.map_err(|e| at_line(Error::Io(e)))?;
        if line.trim().is_empty() {
            continue;
        }

        let request = parse_record(&line)
            .and_then(|record| BatchRow::from_record(&record))
            .and_then(BatchRow::into_request)
            .map_err(at_line)?;
        requests.push(request);
    }

    Ok(requests)
}

fn parse_record(line: &str) -> Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

pub fn read_batch_file(path: &Path) -> Result<Vec<QueryRequest>> {
    let file = File::open(path)?;
    read_batch(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_rows_in_file_order() {
        let input = "2023-01-01,2023-01-02,DayAheadLoadForecast\n\
                     2023-02-01,2023-02-01,UnitProduction\n\
                     \n\
                     2023-03-01,2023-03-05,IMBABE\n";
        let requests = read_batch(input.as_bytes()).unwrap();
        let categories: Vec<&str> = requests.iter().map(|r| r.category()).collect();
        assert_eq!(categories, ["DayAheadLoadForecast", "UnitProduction", "IMBABE"]);
    }

    #[test]
    fn info_row_needs_no_dates() {
        let requests = read_batch(",,info\n".as_bytes()).unwrap();
        assert_eq!(requests, vec![QueryRequest::ListCategories]);
    }

    #[test]
    fn malformed_row_rejects_whole_batch_with_line_number() {
        let input = "2023-01-01,2023-01-02,DayAheadLoadForecast\n\
                     2023-01-01,2023-01-02,UnitProduction\n\
                     2023/01/01,2023-01-02,UnitProduction\n\
                     2023-01-01,2023-01-02,IMBABE\n";
        match read_batch(input.as_bytes()) {
            Err(Error::BatchFormat { line, source }) => {
                assert_eq!(line, 3);
                assert!(matches!(*source, Error::InvalidDateFormat(_)));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn line_numbers_count_skipped_blank_lines() {
        let input = "2023-01-01,2023-01-02,IMBABE\n\n\n2023-01-01,2023-01-02,Bad\n";
        match read_batch(input.as_bytes()) {
            Err(Error::BatchFormat { line, source }) => {
                assert_eq!(line, 4);
                assert!(matches!(*source, Error::UnknownCategory(ref c) if c == "Bad"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn whitespace_only_lines_are_blank() {
        let input = "2023-01-01,2023-01-02,IMBABE\n   \n\t\n2023-01-03,2023-01-04,IMBABE\r\n";
        assert_eq!(read_batch(input.as_bytes()).unwrap().len(), 2);

        let input = "  \n2023-01-01,2023-01-02,IMBABE\n \t \n2023-01-05,2023-01-04,IMBABE\n";
        assert!(matches!(
            read_batch(input.as_bytes()),
            Err(Error::BatchFormat { line: 4, .. })
        ));
    }

    #[test]
    fn wrong_field_count_and_unknown_category() {
        assert!(matches!(
            read_batch("2023-01-01,2023-01-02\n".as_bytes()),
            Err(Error::BatchFormat { line: 1, .. })
        ));
        assert!(matches!(
            read_batch("2023-01-01,2023-01-02,IMBABE\n2023-01-01,2023-01-02,Bogus\n".as_bytes()),
            Err(Error::BatchFormat { line: 2, .. })
        ));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2023-01-01,2023-01-31,MonthlyNTC").unwrap();
        writeln!(file, "2023-02-01,2023-02-28,MonthlyNTC").unwrap();
        let requests = read_batch_file(file.path()).unwrap();
        assert_eq!(requests.len(), 2);
    }
}
