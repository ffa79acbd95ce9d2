//! Duration string parsing.
//!
//! Timeout settings are written as a sequence of decimal numbers, each with an
//! optional fraction and a unit suffix, such as `300ms`, `1.5h` or `2h45m`.
//! Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. The bare
//! value `0` is accepted without a unit.
//!
//! # Examples
//!
//! ```rust
//! use cri_config::duration::parse_duration;
//! use std::time::Duration;
//!
//! assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
//! assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
//! assert!(parse_duration("30").is_err());
//! ```

use std::time::Duration;
use thiserror::Error;

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Largest representable duration, in nanoseconds.
const MAX_NANOS: u128 = i64::MAX as u128;

/// Fraction digits beyond this scale cannot change the result.
const MAX_FRACTION_SCALE: u128 = 10u128.pow(18);

/// Errors produced by [`parse_duration`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("empty duration")]
    Empty,

    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("negative duration {0:?} is not allowed")]
    Negative(String),

    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        // U+00B5 micro sign and U+03BC greek small letter mu
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Parse a duration string such as `"4h0m0s"` or `"300ms"`.
///
/// A leading `+` is allowed. A leading `-` is only allowed when the value is
/// zero, because timeouts cannot be negative.
///
/// # Errors
///
/// Returns a [`DurationParseError`] describing the first problem found.
pub fn parse_duration(input: &str) -> Result<Duration, DurationParseError> {
    if input.is_empty() {
        return Err(DurationParseError::Empty);
    }

    let invalid = || DurationParseError::Invalid(input.to_string());

    let (negative, mut rest) = match input.as_bytes()[0] {
        b'-' => (true, &input[1..]),
        b'+' => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        // Integer part
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let mut whole: u128 = 0;
        for digit in rest[..int_len].bytes() {
            whole = whole * 10 + u128::from(digit - b'0');
            if whole > MAX_NANOS {
                return Err(DurationParseError::Overflow(input.to_string()));
            }
        }
        rest = &rest[int_len..];

        // Fraction part
        let mut fraction: u128 = 0;
        let mut scale: u128 = 1;
        let mut fraction_len = 0;
        if let Some(after_dot) = rest.strip_prefix('.') {
            fraction_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            for digit in after_dot[..fraction_len].bytes() {
                if scale >= MAX_FRACTION_SCALE {
                    break;
                }
                fraction = fraction * 10 + u128::from(digit - b'0');
                scale *= 10;
            }
            rest = &after_dot[fraction_len..];
        }

        if int_len == 0 && fraction_len == 0 {
            return Err(invalid());
        }

        let unit_len = rest
            .bytes()
            .take_while(|b| *b != b'.' && !b.is_ascii_digit())
            .count();
        if unit_len == 0 {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let unit = &rest[..unit_len];
        let multiplier = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;
        rest = &rest[unit_len..];

        let value = whole * multiplier + fraction * multiplier / scale;
        total += value;
        if total > MAX_NANOS {
            return Err(DurationParseError::Overflow(input.to_string()));
        }
    }

    if negative && total > 0 {
        return Err(DurationParseError::Negative(input.to_string()));
    }

    // MAX_NANOS fits in u64
    Ok(Duration::from_nanos(total as u64))
}
