//! Numeric and date literal conversion.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::LexErrorKind;

/// Parse integer literal text: decimal, `&H` hex or `&O` octal.
pub fn parse_integer(text: &str) -> Result<i64, LexErrorKind> {
    let lower = text.to_ascii_lowercase();
    let (digits, radix) = if let Some(hex) = lower.strip_prefix("&h") {
        (hex, 16)
    } else if let Some(oct) = lower.strip_prefix("&o") {
        (oct, 8)
    } else {
        (lower.as_str(), 10)
    };
    i64::from_str_radix(digits, radix).map_err(|_| LexErrorKind::InvalidInteger(text.to_string()))
}

/// Parse float literal text (`3.14`, `1E3`, `2.5e-3`). Values beyond the
/// `f64` range are rejected rather than rounded to infinity.
pub fn parse_float(text: &str) -> Result<f64, LexErrorKind> {
    text.parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .ok_or_else(|| LexErrorKind::InvalidFloat(text.to_string()))
}

/// The value of a `#...#` literal.
///
/// Dates are loosely typed in VBScript, so text matching none of the known
/// layouts is kept as-is rather than rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum DateValue {
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Text(String),
}

#[derive(Clone, Copy)]
enum Shape {
    DateTime,
    Date,
    Time,
}

/// Accepted layouts, tried in order. Month names match in any case.
const DATE_PATTERNS: &[(&str, Shape)] = &[
    ("%d-%b-%Y %H:%M:%S", Shape::DateTime), // 31-Dec-1999 21:26:00
    ("%Y-%m-%d %H:%M:%S", Shape::DateTime), // 1999-12-31 21:26:00
    ("%m/%d/%Y %I:%M:%S %p", Shape::DateTime), // 12/31/1999 9:26:00 PM
    ("%d-%b-%Y", Shape::Date),              // 31-Dec-1999
    ("%Y-%m-%d", Shape::Date),              // 1999-12-31
    ("%m/%d/%Y", Shape::Date),              // 12/31/1999
    ("%m-%d-%Y", Shape::Date),              // 12-31-1999
    ("%H:%M:%S", Shape::Time),              // 21:26:00
];

/// Parse date literal text; the first matching layout wins.
pub fn parse_date(text: &str) -> DateValue {
    let trimmed = text.trim();
    for (pattern, shape) in DATE_PATTERNS {
        let parsed = match shape {
            Shape::DateTime => NaiveDateTime::parse_from_str(trimmed, pattern)
                .ok()
                .map(DateValue::DateTime),
            Shape::Date => NaiveDate::parse_from_str(trimmed, pattern)
                .ok()
                .map(DateValue::Date),
            Shape::Time => NaiveTime::parse_from_str(trimmed, pattern)
                .ok()
                .map(DateValue::Time),
        };
        if let Some(value) = parsed {
            return value;
        }
    }
    DateValue::Text(text.to_string())
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateValue::DateTime(dt) => write!(f, "{}", dt.format("%m/%d/%Y %I:%M:%S %p")),
            DateValue::Date(d) => write!(f, "{}", d.format("%m/%d/%Y")),
            DateValue::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            DateValue::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Numbers
    // =========================================================================

    #[test]
    fn test_decimal_integer() {
        assert_eq!(parse_integer("10"), Ok(10));
    }

    #[test]
    fn test_hex_integer() {
        assert_eq!(parse_integer("&H1F"), Ok(31));
        assert_eq!(parse_integer("&hff"), Ok(255));
    }

    #[test]
    fn test_octal_integer() {
        assert_eq!(parse_integer("&O17"), Ok(15));
    }

    #[test]
    fn test_bad_octal_digit() {
        assert_eq!(
            parse_integer("&O18"),
            Err(LexErrorKind::InvalidInteger("&O18".into()))
        );
    }

    #[test]
    fn test_integer_overflow() {
        assert!(parse_integer("99999999999999999999").is_err());
    }

    #[test]
    fn test_floats() {
        assert_eq!(parse_float("3.25"), Ok(3.25));
        assert_eq!(parse_float("1E3"), Ok(1000.0));
        assert_eq!(parse_float("2.5e-3"), Ok(0.0025));
    }

    #[test]
    fn test_float_out_of_range() {
        assert_eq!(
            parse_float("1E400"),
            Err(LexErrorKind::InvalidFloat("1E400".into()))
        );
        assert_eq!(parse_float("1E-400"), Ok(0.0));
    }

    // =========================================================================
    // Dates
    // =========================================================================

    #[test]
    fn test_month_name_date_time() {
        let d = parse_date("31-Dec-1999 21:26:00");
        assert_eq!(d.to_string(), "12/31/1999 09:26:00 PM");
    }

    #[test]
    fn test_upper_case_month_name() {
        assert_eq!(parse_date("31-DEC-1999").to_string(), "12/31/1999");
    }

    #[test]
    fn test_iso_date_time() {
        assert!(matches!(
            parse_date("1999-12-31 21:26:00"),
            DateValue::DateTime(_)
        ));
    }

    #[test]
    fn test_us_date_time_either_case() {
        assert_eq!(
            parse_date("12/31/1999 9:26:00 pm").to_string(),
            "12/31/1999 09:26:00 PM"
        );
        assert_eq!(
            parse_date("12/31/1999 9:26:00 AM").to_string(),
            "12/31/1999 09:26:00 AM"
        );
    }

    #[test]
    fn test_date_only_layouts() {
        for text in ["31-Dec-1999", "1999-12-31", "12/31/1999", "12-31-1999"] {
            assert_eq!(parse_date(text).to_string(), "12/31/1999", "{text}");
        }
    }

    #[test]
    fn test_time_only() {
        assert_eq!(parse_date("21:26:00").to_string(), "21:26:00");
    }

    #[test]
    fn test_unparsed_date_passes_through() {
        assert_eq!(parse_date("Dec 1999"), DateValue::Text("Dec 1999".into()));
        assert_eq!(parse_date("Dec 1999").to_string(), "Dec 1999");
    }

    #[test]
    fn test_rendered_date_reparses_to_itself() {
        for text in ["31-Dec-1999 21:26:00", "1999-12-31", "21:26:00"] {
            let once = parse_date(text).to_string();
            assert_eq!(parse_date(&once).to_string(), once);
        }
    }
}
