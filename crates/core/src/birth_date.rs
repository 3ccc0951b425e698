//! Birth date wire codec.
//!
//! Birth dates travel as `day/month/year` text. Parsing is strict against
//! [`BIRTH_DATE_FORMAT`]: day and month may carry a leading zero or not, but the calendar is
//! not lenient, so `31/02/1999` is rejected rather than rolled over. Rendering never pads, so
//! `01/04/1999` goes in and `1/4/1999` comes out.

use crate::constants::BIRTH_DATE_FORMAT;
use chrono::{Datelike, NaiveDate};

/// Parse wire text into a calendar date.
///
/// # Errors
///
/// Returns the `chrono` parse error for anything that does not match `dd/mm/yyyy`.
pub fn parse(text: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(text, BIRTH_DATE_FORMAT)
}

/// Render a stored date as `day/month/year` without zero padding.
pub fn format(date: NaiveDate) -> String {
    // month0 is zero-based.
    format!("{}/{}/{}", date.day(), date.month0() + 1, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_and_unpadded_forms_to_the_same_date() {
        let padded = parse("01/04/1999").unwrap();
        let unpadded = parse("1/4/1999").unwrap();
        assert_eq!(padded, unpadded);
        assert_eq!(padded, NaiveDate::from_ymd_opt(1999, 4, 1).unwrap());
    }

    #[test]
    fn formats_without_padding() {
        let date = NaiveDate::from_ymd_opt(1999, 4, 11).unwrap();
        assert_eq!(format(date), "11/4/1999");

        let date = NaiveDate::from_ymd_opt(2001, 12, 3).unwrap();
        assert_eq!(format(date), "3/12/2001");
    }

    #[test]
    fn re_encodes_wire_text() {
        assert_eq!(format(parse("11/4/1999").unwrap()), "11/4/1999");
        assert_eq!(format(parse("11/04/1999").unwrap()), "11/4/1999");
    }

    #[test]
    fn rejects_non_dates() {
        assert!(parse("not-a-date").is_err());
        assert!(parse("").is_err());
        assert!(parse("1999-04-11").is_err());
        assert!(parse("11/4").is_err());
    }

    #[test]
    fn rejects_trailing_input() {
        assert!(parse("11/4/1999 10:00").is_err());
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(parse("31/02/1999").is_err());
        assert!(parse("11/13/1999").is_err());
        assert!(parse("0/4/1999").is_err());
    }

    #[test]
    fn parse_error_is_descriptive() {
        let err = parse("not-a-date").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
