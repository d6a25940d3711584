use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::Value;
use crate::ModcfgError;

// Shape gate for `YYYY-MM-DD` optionally followed by ` HH:MM:SS[.ffffff]`.
// Field ranges (months, leap days, hours) are checked through chrono below.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})(?: (\d{2}):(\d{2}):(\d{2})(?:\.(\d{1,6}))?)?$",
    )
    .expect("date shape regex is valid")
});

/// Validate the raw text of a `date(...)`/`datetime(...)` literal.
///
/// The literal is accepted or rejected atomically: either every field is
/// well-formed and in range, or the whole thing is `InvalidDateFormat`.
/// Text without a time part yields `Value::Date`, text with one yields
/// `Value::DateTime`, under either keyword.
pub fn parse_date_literal(raw: &str, line: usize, column: usize) -> Result<Value, ModcfgError> {
    let invalid = || ModcfgError::InvalidDateFormat {
        literal: raw.to_string(),
        line,
        column,
        hint: Some("Expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS[.ffffff]".into()),
        code: Some(215),
    };

    let caps = DATE_SHAPE.captures(raw.trim()).ok_or_else(invalid)?;

    let year: i32 = caps[1].parse().map_err(|_| invalid())?;
    let month: u32 = caps[2].parse().map_err(|_| invalid())?;
    let day: u32 = caps[3].parse().map_err(|_| invalid())?;

    // Calendar validation, leap years included.
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;

    let Some(hour) = caps.get(4) else {
        return Ok(Value::Date(date));
    };

    let hour: u32 = hour.as_str().parse().map_err(|_| invalid())?;
    let minute: u32 = caps[5].parse().map_err(|_| invalid())?;
    let second: u32 = caps[6].parse().map_err(|_| invalid())?;
    let micros: u32 = match caps.get(7) {
        // Fractions shorter than six digits are right-padded to microseconds.
        Some(frac) => format!("{:0<6}", frac.as_str())
            .parse()
            .map_err(|_| invalid())?,
        None => 0,
    };

    let time = NaiveTime::from_hms_micro_opt(hour, minute, second, micros).ok_or_else(invalid)?;

    Ok(Value::DateTime(date.and_time(time)))
}
