//! Delimited text parsing.

use ::csv::ReaderBuilder;
use thiserror::Error;

use super::header::{normalize_cell, normalize_header, unique_headers};

#[derive(Debug, Error)]
pub(super) enum ParseError {
    #[error("no header row")]
    Empty,
    #[error(transparent)]
    Csv(#[from] ::csv::Error),
    #[error("line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        line: u64,
        found: usize,
        expected: usize,
    },
}

#[derive(Debug)]
pub(super) struct ParsedText {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses comma-delimited text with a single header row.
///
/// Blank lines (including lines of bare delimiters) are skipped. Short rows
/// are padded with empty cells; surplus fields are tolerated only when empty.
/// Header names are made unique.
pub(super) fn parse_records(text: &str) -> Result<ParsedText, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if headers.is_none() {
            headers = Some(unique_headers(
                record.iter().map(normalize_header).collect(),
            ));
            continue;
        }
        let expected = headers.as_ref().map_or(0, Vec::len);
        if record.len() > expected
            && record
                .iter()
                .skip(expected)
                .any(|value| !value.trim().is_empty())
        {
            return Err(ParseError::RaggedRow {
                line: record.position().map_or(0, ::csv::Position::line),
                found: record.len(),
                expected,
            });
        }
        let mut row = Vec::with_capacity(expected);
        for idx in 0..expected {
            row.push(record.get(idx).map(normalize_cell).unwrap_or_default());
        }
        rows.push(row);
    }

    let headers = headers.ok_or(ParseError::Empty)?;
    Ok(ParsedText { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let parsed = parse_records("Time,humidity ESP32\n2025-01-01 00:00:00,61.2\n").unwrap();
        assert_eq!(parsed.headers, vec!["Time", "humidity ESP32"]);
        assert_eq!(parsed.rows, vec![vec!["2025-01-01 00:00:00", "61.2"]]);
    }

    #[test]
    fn skips_blank_lines_and_pads_short_rows() {
        let parsed = parse_records("\n,,\na,b,c\n1,2\n\n4,5,6\n").unwrap();
        assert_eq!(parsed.headers, vec!["a", "b", "c"]);
        assert_eq!(
            parsed.rows,
            vec![vec!["1", "2", ""], vec!["4", "5", "6"]]
        );
    }

    #[test]
    fn quoted_fields_keep_delimiters() {
        let parsed = parse_records("time,note\n2025-01-01,\"pump, east\"\n").unwrap();
        assert_eq!(parsed.rows[0][1], "pump, east");
    }

    #[test]
    fn trailing_empty_fields_are_tolerated() {
        let parsed = parse_records("a,b\n1,2,\n").unwrap();
        assert_eq!(parsed.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn surplus_fields_are_rejected() {
        let result = parse_records("a,b\n1,2,3\n");
        assert!(matches!(
            result,
            Err(ParseError::RaggedRow {
                found: 3,
                expected: 2,
                ..
            })
        ));
    }

    #[test]
    fn trailing_delimiters_in_header_become_named_columns() {
        let parsed = parse_records("time,temperature,,\n2025-03-01,21,,\n").unwrap();
        assert_eq!(
            parsed.headers,
            vec!["time", "temperature", "Unnamed: 2", "Unnamed: 3"]
        );
        assert_eq!(parsed.rows, vec![vec!["2025-03-01", "21", "", ""]]);
    }

    #[test]
    fn empty_text_has_no_header() {
        assert!(matches!(parse_records(""), Err(ParseError::Empty)));
        assert!(matches!(parse_records("\n\n"), Err(ParseError::Empty)));
    }
}
