//! Assignment file parser
//!
//! Input is comma-delimited text, one assignment per line:
//!
//! ```text
//! EmpID, ProjectID, DateFrom, DateTo
//! 143, 12, 2013-11-01, 2014-01-05
//! 218, 10, 2012-05-16, NULL
//! ```
//!
//! Blank lines and lines with fewer than four fields are skipped. The first
//! data-shaped line may be a header and is skipped when it looks like one.
//! Every other line must be a valid assignment; the first bad line aborts the
//! whole batch.

use std::io::BufRead;

use chrono::{Local, NaiveDate};
use ep_core::{PairError, PairResult, ValidationError, ValidationResult};
use ep_models::AssignmentRecord;
use tracing::{debug, warn};

use crate::dates::{DateCell, DateFormats};

const FIELD_COUNT: usize = 4;
const BOM: char = '\u{feff}';

/// Line-by-line assignment parser
#[derive(Debug, Clone)]
pub struct RecordParser {
    formats: DateFormats,
    reference_date: NaiveDate,
    detect_header: bool,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DateFormats::default())
    }
}

impl RecordParser {
    /// Parser resolving ongoing tenures against today's local date
    pub fn new(formats: DateFormats) -> Self {
        Self {
            formats,
            reference_date: Local::now().date_naive(),
            detect_header: true,
        }
    }

    /// Resolve ongoing tenures against `date` instead of today
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Treat every four-field line as data, even a header-looking first line
    pub fn without_header_detection(mut self) -> Self {
        self.detect_header = false;
        self
    }

    /// Parse already-decoded text
    pub fn parse_str(&self, text: &str) -> ValidationResult<Vec<AssignmentRecord>> {
        let mut batch = Batch::new(self);
        for (index, line) in text.lines().enumerate() {
            batch.push(line, index + 1)?;
        }
        batch.finish()
    }

    /// Parse raw upload bytes, which must be UTF-8
    pub fn parse_bytes(&self, bytes: &[u8]) -> PairResult<Vec<AssignmentRecord>> {
        self.parse_reader(bytes)
    }

    /// Parse a stream line by line without buffering the whole input
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> PairResult<Vec<AssignmentRecord>> {
        let mut batch = Batch::new(self);
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line.map_err(|e| {
                warn!(line = line_number, error = %e, "Failed to read assignment file");
                PairError::file_processing(format!(
                    "Failed to read CSV file at line {}: {}",
                    line_number, e
                ))
            })?;
            batch.push(&line, line_number)?;
        }
        Ok(batch.finish()?)
    }

    fn parse_fields(
        &self,
        fields: &[&str],
        line_number: usize,
    ) -> ValidationResult<AssignmentRecord> {
        let employee_id = parse_id(fields[0], "Employee ID", line_number)?;
        let project_id = parse_id(fields[1], "Project ID", line_number)?;

        let date_from = match self.read_date(fields[2], line_number)? {
            Some(date) => date,
            None => return Err(ValidationError::MissingStartDate { line: line_number }),
        };
        let date_to = self
            .read_date(fields[3], line_number)?
            .unwrap_or(self.reference_date);

        AssignmentRecord::new(employee_id, project_id, date_from, date_to)
            .ok_or(ValidationError::StartAfterEnd { line: line_number })
    }

    fn read_date(&self, raw: &str, line_number: usize) -> ValidationResult<Option<NaiveDate>> {
        match self.formats.read(raw) {
            DateCell::Date(date) => Ok(Some(date)),
            DateCell::Absent => Ok(None),
            DateCell::Unparseable => Err(ValidationError::InvalidDate {
                line: line_number,
                value: raw.to_string(),
            }),
        }
    }

    /// A header names its columns: no numeric ids and no start date
    fn looks_like_header(&self, fields: &[&str]) -> bool {
        fields[0].parse::<i64>().is_err()
            && fields[1].parse::<i64>().is_err()
            && !self.formats.is_date(fields[2])
    }
}

/// Accumulates records across lines for one input
struct Batch<'a> {
    parser: &'a RecordParser,
    records: Vec<AssignmentRecord>,
    seen_data_line: bool,
}

impl<'a> Batch<'a> {
    fn new(parser: &'a RecordParser) -> Self {
        Self {
            parser,
            records: Vec::new(),
            seen_data_line: false,
        }
    }

    fn push(&mut self, line: &str, line_number: usize) -> ValidationResult<()> {
        let line = if line_number == 1 {
            line.trim_start_matches(BOM)
        } else {
            line
        };

        let Some(fields) = split_fields(line) else {
            if !line.trim().is_empty() {
                debug!(line = line_number, "Skipping line with too few fields");
            }
            return Ok(());
        };

        let first_data_line = !self.seen_data_line;
        self.seen_data_line = true;
        if first_data_line && self.parser.detect_header && self.parser.looks_like_header(&fields)
        {
            debug!(line = line_number, "Skipping header line");
            return Ok(());
        }

        match self.parser.parse_fields(&fields, line_number) {
            Ok(record) => {
                self.records.push(record);
                Ok(())
            }
            Err(e) => {
                warn!(line = line_number, error = %e, "Rejecting assignment file");
                Err(e)
            }
        }
    }

    fn finish(self) -> ValidationResult<Vec<AssignmentRecord>> {
        if self.records.is_empty() {
            return Err(ValidationError::NoRecords);
        }
        debug!(records = self.records.len(), "Parsed assignment file");
        Ok(self.records)
    }
}

/// Trimmed fields of a data-shaped line, or `None` for blank and short lines
fn split_fields(line: &str) -> Option<Vec<&str>> {
    if line.trim().is_empty() {
        return None;
    }
    // A trailing empty field is kept: `1,2,2024-01-01,` is an ongoing tenure
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < FIELD_COUNT {
        return None;
    }
    Some(fields)
}

fn parse_id(raw: &str, field: &'static str, line_number: usize) -> ValidationResult<i32> {
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidInteger {
            line: line_number,
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parser() -> RecordParser {
        RecordParser::default().with_reference_date(date(2024, 6, 30))
    }

    #[test]
    fn test_parse_basic_file() {
        let records = parser()
            .parse_str("101,1,2024-01-01,2024-01-10\n102,1,2024-01-05,2024-01-20\n")
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id, 101);
        assert_eq!(records[0].project_id, 1);
        assert_eq!(records[0].date_from, date(2024, 1, 1));
        assert_eq!(records[1].date_to, date(2024, 1, 20));
    }

    #[test]
    fn test_fields_are_trimmed_and_extra_fields_ignored() {
        let records = parser()
            .parse_str(" 101 , 1 , 2024-01-01 , 2024-01-10 , note\r\n")
            .unwrap();
        assert_eq!(records[0].employee_id, 101);
        assert_eq!(records[0].date_to, date(2024, 1, 10));
    }

    #[test]
    fn test_ongoing_tenure_resolves_to_reference_date() {
        let records = parser()
            .parse_str("101,1,2024-01-01,NULL\n102,1,2024-02-01,\n103,1,2024-03-01, null")
            .unwrap();
        assert!(records.iter().all(|r| r.date_to == date(2024, 6, 30)));
    }

    #[test]
    fn test_skips_blank_and_short_lines() {
        let records = parser()
            .parse_str("\n   \n# exported\nonly,three,fields\n101,1,2024-01-01,2024-01-10\n\n")
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_skips_header_line() {
        let records = parser()
            .parse_str("EmpID, ProjectID, DateFrom, DateTo\n101,1,2024-01-01,2024-01-10")
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_header_detection_can_be_disabled() {
        let err = parser()
            .without_header_detection()
            .parse_str("EmpID,ProjectID,DateFrom,DateTo\n101,1,2024-01-01,2024-01-10")
            .unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_only_first_data_line_can_be_a_header() {
        let err = parser()
            .parse_str("101,1,2024-01-01,2024-01-10\nEmpID,ProjectID,DateFrom,DateTo")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidInteger {
                line: 2,
                field: "Employee ID",
                value: "EmpID".into(),
            }
        );
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let records = parser()
            .parse_str("\u{feff}101,1,2024-01-01,2024-01-10")
            .unwrap();
        assert_eq!(records[0].employee_id, 101);
    }

    #[test]
    fn test_invalid_employee_id_names_field_and_line() {
        let err = parser()
            .parse_str("abc,1,2024-01-01,2024-01-10")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidInteger {
                line: 1,
                field: "Employee ID",
                value: "abc".into(),
            }
        );
        assert_eq!(err.to_string(), "Line 1: Invalid Employee ID 'abc'");
    }

    #[test]
    fn test_invalid_project_id() {
        let err = parser()
            .parse_str("101,1,2024-01-01,2024-01-10\n\n102,x1,2024-01-01,2024-01-10")
            .unwrap_err();
        assert_eq!(err.to_string(), "Line 3: Invalid Project ID 'x1'");
    }

    #[test]
    fn test_ids_must_be_positive() {
        let err = parser().parse_str("0,1,2024-01-01,2024-01-10").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInteger { field: "Employee ID", .. }));

        let err = parser().parse_str("5,-2,2024-01-01,2024-01-10").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidInteger { field: "Project ID", .. }));
    }

    #[test]
    fn test_unparseable_date() {
        let err = parser()
            .parse_str("101,1,01.01.2024,2024-01-10")
            .unwrap_err();
        assert_eq!(err.to_string(), "Line 1: Unable to parse date '01.01.2024'");
    }

    #[test]
    fn test_missing_start_date() {
        let err = parser().parse_str("101,1,NULL,2024-01-10").unwrap_err();
        assert_eq!(err, ValidationError::MissingStartDate { line: 1 });
    }

    #[test]
    fn test_start_after_end() {
        let err = parser()
            .parse_str("101,1,2024-02-01,2024-01-01")
            .unwrap_err();
        assert_eq!(err, ValidationError::StartAfterEnd { line: 1 });
    }

    #[test]
    fn test_open_tenure_starting_after_reference_date() {
        let err = parser().parse_str("101,1,2024-07-01,NULL").unwrap_err();
        assert_eq!(err, ValidationError::StartAfterEnd { line: 1 });
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        assert_eq!(parser().parse_str(""), Err(ValidationError::NoRecords));
        assert_eq!(
            parser().parse_str("EmpID,ProjectID,DateFrom,DateTo\n\n"),
            Err(ValidationError::NoRecords)
        );
    }

    #[test]
    fn test_mixed_date_layouts_round_trip() {
        let records = parser()
            .parse_str(
                "1,1,2024-03-25,2024-03-25\n\
                 2,1,25/03/2024,25/03/2024\n\
                 3,1,03/25/2024,03/25/2024\n\
                 4,1,25-03-2024,25-03-2024\n\
                 5,1,2024/03/25,2024/03/25",
            )
            .unwrap();
        for record in records {
            assert_eq!(record.date_from.format("%Y-%m-%d").to_string(), "2024-03-25");
            assert_eq!(record.date_to, record.date_from);
        }
    }

    #[test]
    fn test_parse_bytes_rejects_invalid_utf8() {
        let bytes = b"101,1,2024-01-01,2024-01-10\n\xff\xfe,1,2024-01-01,2024-01-10\n";
        let err = parser().parse_bytes(bytes).unwrap_err();
        assert!(matches!(err, PairError::FileProcessing { .. }));
    }

    #[test]
    fn test_parse_bytes_surfaces_validation_errors() {
        let err = parser().parse_bytes(b"abc,1,2024-01-01,2024-01-10").unwrap_err();
        assert!(matches!(
            err,
            PairError::Validation(ValidationError::InvalidInteger { line: 1, .. })
        ));
    }

    #[test]
    fn test_short_year_is_unparseable() {
        let err = parser()
            .parse_str("101,1,2024-01-01,2024-01-10\n102,1,05-03-24,2024-01-10")
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                line: 2,
                value: "05-03-24".into(),
            }
        );
        assert_eq!(err.to_string(), "Line 2: Unable to parse date '05-03-24'");
    }

    #[test]
    fn test_trailing_empty_end_date_is_ongoing() {
        let records = parser().parse_str("1,2,2024-01-01,").unwrap();
        assert_eq!(records[0].date_to, date(2024, 6, 30));
    }
}
