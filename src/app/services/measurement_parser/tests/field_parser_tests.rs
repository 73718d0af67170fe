//! Tests for numeric and light-source field parsing

use super::super::field_parsers::{parse_decimal, parse_light_source};

#[test]
fn test_decimal_comma_and_point_agree() {
    assert_eq!(parse_decimal("12,34"), Some(12.34));
    assert_eq!(parse_decimal("12.34"), Some(12.34));
    assert_eq!(parse_decimal("12,34"), parse_decimal("12.34"));
}

#[test]
fn test_negative_and_whitespace() {
    assert_eq!(parse_decimal(" -0,44 "), Some(-0.44));
    assert_eq!(parse_decimal("\t100,0"), Some(100.0));
}

#[test]
fn test_missing_tokens() {
    assert_eq!(parse_decimal(""), None);
    assert_eq!(parse_decimal("   "), None);
    assert_eq!(parse_decimal("nan"), None);
    assert_eq!(parse_decimal("NaN"), None);
    assert_eq!(parse_decimal("NULL"), None);
    assert_eq!(parse_decimal("null"), None);
}

#[test]
fn test_junk_tokens_are_missing_not_errors() {
    assert_eq!(parse_decimal("abc"), None);
    assert_eq!(parse_decimal("12,34,56"), None);
    assert_eq!(parse_decimal("--5"), None);
}

#[test]
fn test_light_source_with_degree_symbol() {
    assert_eq!(
        parse_light_source("D50/10°"),
        Some(("D50".to_string(), 10))
    );
}

#[test]
fn test_light_source_without_degree_symbol() {
    assert_eq!(parse_light_source("D65/2"), Some(("D65".to_string(), 2)));
}

#[test]
fn test_light_source_spacing_and_case() {
    assert_eq!(
        parse_light_source("d50 / 10 °"),
        Some(("D50".to_string(), 10))
    );
    assert_eq!(parse_light_source("A / 2"), Some(("A".to_string(), 2)));
}

#[test]
fn test_light_source_unrecognizable() {
    assert_eq!(parse_light_source(""), None);
    assert_eq!(parse_light_source("daylight"), None);
    assert_eq!(parse_light_source("/10"), None);
}
