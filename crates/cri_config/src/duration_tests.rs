//! Tests for duration parsing.

use super::*;

#[test]
fn test_parse_simple_units() {
    let cases = [
        ("30s", Duration::from_secs(30)),
        ("5m", Duration::from_secs(300)),
        ("4h", Duration::from_secs(4 * 3600)),
        ("300ms", Duration::from_millis(300)),
        ("10us", Duration::from_micros(10)),
        ("10\u{00b5}s", Duration::from_micros(10)),
        ("10\u{03bc}s", Duration::from_micros(10)),
        ("7ns", Duration::from_nanos(7)),
    ];

    for (input, expected) in cases {
        assert_eq!(parse_duration(input), Ok(expected), "input {:?}", input);
    }
}

#[test]
fn test_parse_compound_durations() {
    assert_eq!(
        parse_duration("4h0m0s"),
        Ok(Duration::from_secs(4 * 3600))
    );
    assert_eq!(
        parse_duration("2h30m"),
        Ok(Duration::from_secs(2 * 3600 + 30 * 60))
    );
    assert_eq!(
        parse_duration("1m0.5s"),
        Ok(Duration::from_millis(60_500))
    );
}

#[test]
fn test_parse_fractions() {
    assert_eq!(parse_duration("1.5h"), Ok(Duration::from_secs(5400)));
    assert_eq!(parse_duration(".5s"), Ok(Duration::from_millis(500)));
    assert_eq!(parse_duration("1.s"), Ok(Duration::from_secs(1)));
    assert_eq!(
        parse_duration("0.000000001s"),
        Ok(Duration::from_nanos(1))
    );
}

#[test]
fn test_parse_zero_and_signs() {
    assert_eq!(parse_duration("0"), Ok(Duration::ZERO));
    assert_eq!(parse_duration("0s"), Ok(Duration::ZERO));
    assert_eq!(parse_duration("-0"), Ok(Duration::ZERO));
    assert_eq!(parse_duration("+5s"), Ok(Duration::from_secs(5)));
}

#[test]
fn test_negative_duration_rejected() {
    assert_eq!(
        parse_duration("-5s"),
        Err(DurationParseError::Negative("-5s".to_string()))
    );
}

#[test]
fn test_missing_unit_rejected() {
    assert_eq!(
        parse_duration("30"),
        Err(DurationParseError::MissingUnit("30".to_string()))
    );
    assert!(matches!(
        parse_duration("1h30"),
        Err(DurationParseError::MissingUnit(_))
    ));
}

#[test]
fn test_unknown_unit_rejected() {
    assert_eq!(
        parse_duration("3d"),
        Err(DurationParseError::UnknownUnit {
            unit: "d".to_string(),
            input: "3d".to_string(),
        })
    );
    assert!(matches!(
        parse_duration("10 s"),
        Err(DurationParseError::UnknownUnit { .. })
    ));
}

#[test]
fn test_malformed_input_rejected() {
    for input in ["not-a-duration", "s", ".s", "-", "+", "1h-1m", "abc5s"] {
        assert!(parse_duration(input).is_err(), "input {:?} should fail", input);
    }
    assert_eq!(parse_duration(""), Err(DurationParseError::Empty));
}

#[test]
fn test_overflow_rejected() {
    assert!(matches!(
        parse_duration("3000000h"),
        Err(DurationParseError::Overflow(_))
    ));
    assert!(matches!(
        parse_duration("99999999999999999999ns"),
        Err(DurationParseError::Overflow(_))
    ));
    assert!(parse_duration("2562047h").is_ok());
}
