//! Record Parser: raw lines or row texts into coordinate records.
//!
//! Two input dialects exist and are deliberately kept separate:
//!
//! - The **plain-text dialect** (`parse_document`) handles loosely formatted
//!   document exports. Each line is tried against an ordered pattern cascade
//!   and lines that match nothing are dropped silently, since that format is
//!   full of surrounding prose and noise.
//! - The **row-text dialect** (`parse_rows`) handles text extracted from
//!   structured table rows. A row that cannot produce two coordinates is a
//!   hard validation failure; structured markup has no excuse for noise.
//!
//! A single universal grammar would either over-match noise in the first
//! dialect or under-report malformed rows in the second, so the asymmetry is
//! part of the contract.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Error, Record, Result};

// Plain-text pattern cascade, tried in order, first match wins.
static CHAR_SPACED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.)\s+(\d+)\s+(\d+)$").unwrap());
static CHAR_COMMA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.),\s?(\d+),\s?(\d+)$").unwrap());
static TOKEN_SPACED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)\s+(\d+)\s+(\d+)$").unwrap());

// Row-text extraction: every digit run and every non-digit run, globally.
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static NON_DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D+").unwrap());

/// Parse a plain-text document export into coordinate records.
///
/// Lines are trimmed and blank lines discarded. Each remaining line is
/// matched against the pattern cascade; unrecognized lines are skipped with
/// a warning, never an error. Emptiness of the result is NOT checked here;
/// the bounds calculator rejects an empty record set.
pub fn parse_document(text: &str) -> Vec<Record> {
    let mut records = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match match_line(line) {
            Some(record) => records.push(record),
            None => log::warn!("skipping unrecognized line: {line:?}"),
        }
    }

    records
}

/// Try the cascade against one trimmed, non-empty line.
fn match_line(line: &str) -> Option<Record> {
    for pattern in [&*CHAR_SPACED, &*CHAR_COMMA, &*TOKEN_SPACED] {
        if let Some(caps) = pattern.captures(line) {
            // Coordinates too large for u32 count as a non-match and fall
            // through to the next pattern, like any other malformed line.
            let x: u32 = match caps[2].parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            let y: u32 = match caps[3].parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            return Some(Record {
                glyph: caps[1].to_string(),
                x,
                y,
            });
        }
    }
    None
}

/// Parse extracted table-row texts into coordinate records.
///
/// Strict: every row must yield at least two digit runs that parse as
/// non-negative integers, or the whole parse fails with a validation error
/// naming the offending row. The first two digit runs bind to `x` and `y`;
/// any further digit runs are ignored.
pub fn parse_rows(rows: &[String]) -> Result<Vec<Record>> {
    rows.iter().map(|text| parse_row(text)).collect()
}

fn parse_row(text: &str) -> Result<Record> {
    let mut digits = DIGIT_RUN.find_iter(text);
    let x_run = digits.next().ok_or_else(|| validation(text))?;
    let y_run = digits.next().ok_or_else(|| validation(text))?;

    let x: u32 = x_run.as_str().parse().map_err(|_| validation(text))?;
    let y: u32 = y_run.as_str().parse().map_err(|_| validation(text))?;

    // The glyph is everything that is not a coordinate, trimmed run by run.
    // Rows carrying only digits still occupy a cell, as a space.
    let glyph: String = NON_DIGIT_RUN
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .collect();
    let glyph = if glyph.is_empty() { " ".to_string() } else { glyph };

    Ok(Record { glyph, x, y })
}

fn validation(text: &str) -> Error {
    Error::Validation {
        row: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(glyph: &str, x: u32, y: u32) -> Record {
        Record {
            glyph: glyph.to_string(),
            x,
            y,
        }
    }

    #[test]
    fn document_single_char_spaced() {
        assert_eq!(parse_document("A 3 4"), vec![rec("A", 3, 4)]);
    }

    #[test]
    fn document_comma_form() {
        assert_eq!(parse_document("B, 1, 2"), vec![rec("B", 1, 2)]);
        assert_eq!(parse_document("B,1,2"), vec![rec("B", 1, 2)]);
    }

    #[test]
    fn document_multi_char_token() {
        assert_eq!(parse_document("## 5 6"), vec![rec("##", 5, 6)]);
    }

    #[test]
    fn document_skips_noise_and_blanks() {
        let text = "Secret message below\n\n   \nA 3 4\nthis line has no coords\nC 0 0\n";
        assert_eq!(parse_document(text), vec![rec("A", 3, 4), rec("C", 0, 0)]);
    }

    #[test]
    fn document_trims_lines() {
        assert_eq!(parse_document("   A 3 4   "), vec![rec("A", 3, 4)]);
    }

    #[test]
    fn document_empty_input_yields_no_records() {
        assert!(parse_document("").is_empty());
        assert!(parse_document("nothing useful here").is_empty());
    }

    #[test]
    fn document_cascade_order_prefers_single_char() {
        // A digit can serve as the glyph under the first pattern.
        assert_eq!(parse_document("7 1 2"), vec![rec("7", 1, 2)]);
    }

    #[test]
    fn row_basic() {
        let rows = vec!["X 0 0".to_string(), "Y 1 1".to_string()];
        assert_eq!(
            parse_rows(&rows).unwrap(),
            vec![rec("X", 0, 0), rec("Y", 1, 1)]
        );
    }

    #[test]
    fn row_extra_digit_runs_ignored() {
        let rows = vec!["Z 2 3 99".to_string()];
        assert_eq!(parse_rows(&rows).unwrap(), vec![rec("Z", 2, 3)]);
    }

    #[test]
    fn row_multi_token_glyph_concatenated() {
        let rows = vec!["a 1 b 2".to_string()];
        let records = parse_rows(&rows).unwrap();
        assert_eq!(records[0].glyph, "ab");
        assert_eq!((records[0].x, records[0].y), (1, 2));
    }

    #[test]
    fn row_digits_only_gets_space_glyph() {
        let rows = vec!["4 5".to_string()];
        assert_eq!(parse_rows(&rows).unwrap(), vec![rec(" ", 4, 5)]);
    }

    #[test]
    fn row_with_one_digit_run_is_validation_error() {
        let rows = vec!["only 7 here".to_string()];
        match parse_rows(&rows) {
            Err(Error::Validation { row }) => assert_eq!(row, "only 7 here"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn row_empty_text_is_validation_error() {
        let rows = vec![String::new()];
        assert!(matches!(
            parse_rows(&rows),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn row_overflowing_coordinate_is_validation_error() {
        let rows = vec!["A 99999999999999999999 1".to_string()];
        assert!(matches!(
            parse_rows(&rows),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn row_failure_is_not_skipped() {
        // One bad row poisons the whole batch, unlike the document dialect.
        let rows = vec!["X 0 0".to_string(), "bad".to_string()];
        assert!(parse_rows(&rows).is_err());
    }
}
