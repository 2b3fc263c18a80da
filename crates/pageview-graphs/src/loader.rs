//! CSV ingest of the daily page-view export.
//!
//! The input is a headed CSV with at least a `date` and a `value` column.
//! Rows are indexed by date and returned in ascending date order. Any
//! malformed row aborts the load; there is no partial result.

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use pageview_common::{PageViewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{BTreeMap, Entry};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

const DATE_COLUMN: &str = "date";
const VALUE_COLUMN: &str = "value";

/// One day of page views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewRecord {
    pub date: NaiveDate,
    pub value: u64,
}

impl PageViewRecord {
    pub fn new(date: NaiveDate, value: u64) -> Self {
        Self { date, value }
    }
}

/// Date-indexed page-view counts, sorted ascending by date with unique dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewSeries {
    records: Vec<PageViewRecord>,
}

impl PageViewSeries {
    /// Build a series from records in any order.
    ///
    /// Fails with a validation error when two records share a date.
    pub fn new(mut records: Vec<PageViewRecord>) -> Result<Self> {
        records.sort_by_key(|record| record.date);
        if let Some(pair) = records.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(PageViewError::validation_field(
                format!("duplicate date {}", pair[0].date),
                DATE_COLUMN,
            ));
        }
        Ok(Self { records })
    }

    /// Subsequence of an already sorted series; order and uniqueness carry over.
    pub(crate) fn retain_from(&self, mut keep: impl FnMut(&PageViewRecord) -> bool) -> Self {
        Self {
            records: self.records.iter().copied().filter(|r| keep(r)).collect(),
        }
    }

    /// Load a series from a CSV file.
    #[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| PageViewError::Csv {
            message: format!("failed to open '{}'", path.display()),
            source: Some(Box::new(err)),
        })?;
        let series = Self::from_csv_reader(file)?;
        info!(
            path = %path.display(),
            records = series.len(),
            first = ?series.first_date(),
            last = ?series.last_date(),
            "Loaded page-view series"
        );
        Ok(series)
    }

    /// Load a series from any CSV source.
    pub fn from_csv_reader<R: Read>(source: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader.headers()?.clone();
        let date_idx = column_index(&headers, DATE_COLUMN)?;
        let value_idx = column_index(&headers, VALUE_COLUMN)?;

        let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let line = record.position().map(|pos| pos.line()).unwrap_or(0);
            let date = parse_date(field(&record, date_idx), line)?;
            let value = parse_value(field(&record, value_idx), line)?;

            match by_date.entry(date) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(_) => {
                    return Err(PageViewError::parse(
                        line,
                        DATE_COLUMN,
                        format!("duplicate date {date}"),
                    ));
                }
            }
        }

        debug!(rows = by_date.len(), "Parsed CSV rows");
        Ok(Self {
            records: by_date
                .into_iter()
                .map(|(date, value)| PageViewRecord { date, value })
                .collect(),
        })
    }

    pub fn records(&self) -> &[PageViewRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageViewRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Values in date order.
    pub fn values(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.value).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Value recorded on `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<u64> {
        self.records
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|idx| self.records[idx].value)
    }
}

impl<'a> IntoIterator for &'a PageViewSeries {
    type Item = &'a PageViewRecord;
    type IntoIter = std::slice::Iter<'a, PageViewRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
        .ok_or_else(|| PageViewError::csv(format!("missing required column '{name}'")))
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

/// Accepts `YYYY-MM-DD`, or a date-time whose date part is kept.
fn parse_date(raw: &str, line: u64) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(datetime.date());
        }
    }
    Err(PageViewError::parse(
        line,
        DATE_COLUMN,
        format!("'{raw}' is not an ISO date"),
    ))
}

fn parse_value(raw: &str, line: u64) -> Result<u64> {
    raw.parse::<u64>().map_err(|err| {
        PageViewError::parse(
            line,
            VALUE_COLUMN,
            format!("'{raw}' is not a non-negative integer ({err})"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parses_basic_csv() {
        let csv = "date,value\n2016-05-09,1201\n2016-05-10,2329\n";
        let series = PageViewSeries::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.records()[0], PageViewRecord::new(date(2016, 5, 9), 1201));
        assert_eq!(series.get(date(2016, 5, 10)), Some(2329));
        assert_eq!(series.get(date(2016, 5, 11)), None);
    }

    #[test]
    fn test_sorts_by_date_and_ignores_extra_columns() {
        let csv = "id,value,date\n1, 300 ,2017-01-03\n2,100,2017-01-01\n3,200,2017-01-02\n";
        let series = PageViewSeries::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(series.values(), vec![100, 200, 300]);
        assert_eq!(series.first_date(), Some(date(2017, 1, 1)));
        assert_eq!(series.last_date(), Some(date(2017, 1, 3)));
    }

    #[test]
    fn test_accepts_datetime_dates() {
        let csv = "date,value\n2018-03-04T00:00:00,5\n2018-03-05 00:00:00,6\n";
        let series = PageViewSeries::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(series.first_date(), Some(date(2018, 3, 4)));
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "day,value\n2016-05-09,1201\n";
        let err = PageViewSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PageViewError::Csv { .. }));
        assert!(err.to_string().contains("date"));
    }

    #[test]
    fn test_malformed_date_reports_line() {
        let csv = "date,value\n2016-05-09,1201\n2016-13-40,12\n";
        let err = PageViewSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
        match err {
            PageViewError::Parse { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "date");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_value_is_fatal() {
        for bad in ["-5", "12.5", "lots", ""] {
            let csv = format!("date,value\n2016-05-09,{bad}\n");
            let err = PageViewSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
            assert!(
                matches!(err, PageViewError::Parse { ref column, .. } if column == "value"),
                "value {bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_duplicate_date_is_fatal() {
        let csv = "date,value\n2016-05-09,1\n2016-05-09,2\n";
        let err = PageViewSeries::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate date 2016-05-09"));
    }

    #[test]
    fn test_header_only_gives_empty_series() {
        let series = PageViewSeries::from_csv_reader("date,value\n".as_bytes()).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_new_sorts_and_rejects_duplicates() {
        let series = PageViewSeries::new(vec![
            PageViewRecord::new(date(2020, 2, 2), 2),
            PageViewRecord::new(date(2020, 2, 1), 1),
        ])
        .unwrap();
        assert_eq!(series.values(), vec![1, 2]);

        let dup = PageViewSeries::new(vec![
            PageViewRecord::new(date(2020, 2, 1), 2),
            PageViewRecord::new(date(2020, 2, 1), 1),
        ]);
        assert!(dup.is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = PageViewSeries::from_csv_path("/no/such/pageviews.csv").unwrap_err();
        assert!(matches!(err, PageViewError::Csv { .. }));
    }
}
