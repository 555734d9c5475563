//! Tests for `TimeOfDay` construction, parsing and ordering.

use chrono::NaiveTime;
use slot_engine::{SlotError, TimeOfDay};

fn tod(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::new(hour, minute).unwrap()
}

// ---------------------------------------------------------------------------
// 24-hour parsing
// ---------------------------------------------------------------------------

#[test]
fn parses_24_hour_text() {
    let t = TimeOfDay::parse("18:05").unwrap();
    assert_eq!(t.hour(), 18);
    assert_eq!(t.minute(), 5);
}

#[test]
fn parse_ignores_surrounding_whitespace() {
    assert_eq!(TimeOfDay::parse("  7:30 ").unwrap(), tod(7, 30));
}

#[test]
fn from_str_matches_parse() {
    let t: TimeOfDay = "09:15".parse().unwrap();
    assert_eq!(t, tod(9, 15));
}

#[test]
fn missing_separator_is_parse_error() {
    assert!(matches!(TimeOfDay::parse("1830"), Err(SlotError::Parse(_))));
}

#[test]
fn non_numeric_field_is_parse_error() {
    assert!(matches!(TimeOfDay::parse("ab:30"), Err(SlotError::Parse(_))));
    assert!(matches!(TimeOfDay::parse("18:xx"), Err(SlotError::Parse(_))));
}

#[test]
fn out_of_range_text_is_parse_error() {
    assert!(matches!(TimeOfDay::parse("24:00"), Err(SlotError::Parse(_))));
    assert!(matches!(TimeOfDay::parse("10:60"), Err(SlotError::Parse(_))));
}

#[test]
fn new_rejects_out_of_range() {
    assert!(matches!(TimeOfDay::new(24, 0), Err(SlotError::InvalidArgument(_))));
    assert!(matches!(TimeOfDay::new(0, 60), Err(SlotError::InvalidArgument(_))));
}

// ---------------------------------------------------------------------------
// Ordering and display
// ---------------------------------------------------------------------------

#[test]
fn orders_by_hour_then_minute() {
    assert!(tod(9, 59) < tod(10, 0));
    assert!(tod(10, 0) < tod(10, 1));
    assert!(tod(10, 30) <= tod(10, 30));
    assert!(tod(23, 0) > tod(22, 59));
}

#[test]
fn displays_zero_padded() {
    assert_eq!(tod(7, 5).to_string(), "07:05");
}

#[test]
fn converts_from_naive_time_dropping_seconds() {
    let t = TimeOfDay::from(NaiveTime::from_hms_opt(18, 29, 59).unwrap());
    assert_eq!(t, tod(18, 29));
    assert_eq!(tod(18, 29).to_naive_time(), NaiveTime::from_hms_opt(18, 29, 0).unwrap());
}

// ---------------------------------------------------------------------------
// Legacy 12-hour conversion
// ---------------------------------------------------------------------------

#[test]
fn pm_adds_twelve_hours() {
    assert_eq!(TimeOfDay::from_12h(7, 30, "pm").unwrap(), tod(19, 30));
}

#[test]
fn noon_pm_is_unchanged() {
    assert_eq!(TimeOfDay::from_12h(12, 15, "PM").unwrap(), tod(12, 15));
}

#[test]
fn morning_am_is_unchanged() {
    assert_eq!(TimeOfDay::from_12h(9, 0, "am").unwrap(), tod(9, 0));
}

#[test]
fn midnight_am_maps_to_2359() {
    // Exactly 12:00 am becomes 23:59, not 00:00.
    assert_eq!(TimeOfDay::from_12h(12, 0, "am").unwrap(), tod(23, 59));
}

#[test]
fn half_past_twelve_am_passes_through() {
    assert_eq!(TimeOfDay::from_12h(12, 30, "AM").unwrap(), tod(12, 30));
}

#[test]
fn unknown_meridiem_is_invalid_argument() {
    assert!(matches!(
        TimeOfDay::from_12h(7, 0, "xm"),
        Err(SlotError::InvalidArgument(_))
    ));
}

#[test]
fn parses_12_hour_text() {
    assert_eq!(TimeOfDay::parse_12h("7:30pm").unwrap(), tod(19, 30));
    assert_eq!(TimeOfDay::parse_12h(" 10:00 AM ").unwrap(), tod(10, 0));
    assert_eq!(TimeOfDay::parse_12h("12:00am").unwrap(), tod(23, 59));
}

#[test]
fn twelve_hour_text_without_separator_fails() {
    assert!(matches!(TimeOfDay::parse_12h("730pm"), Err(SlotError::Parse(_))));
    assert!(matches!(TimeOfDay::parse_12h("7:30xm"), Err(SlotError::InvalidArgument(_))));
}

#[test]
fn comparison_helpers_agree_with_ordering() {
    assert!(tod(10, 0).is_before_or_equal(&tod(10, 0)));
    assert!(tod(9, 59).is_before_or_equal(&tod(10, 0)));
    assert!(!tod(10, 1).is_before_or_equal(&tod(10, 0)));
    assert!(tod(10, 1).is_strictly_after(&tod(10, 0)));
    assert!(!tod(10, 0).is_strictly_after(&tod(10, 0)));
}

#[test]
fn twelve_hour_reading_above_twelve_is_invalid_argument() {
    assert!(matches!(TimeOfDay::from_12h(13, 0, "pm"), Err(SlotError::InvalidArgument(_))));
    assert!(matches!(
        TimeOfDay::from_12h(u32::MAX, 0, "pm"),
        Err(SlotError::InvalidArgument(_))
    ));
    assert!(matches!(
        TimeOfDay::parse_12h("4294967295:00pm"),
        Err(SlotError::InvalidArgument(_))
    ));
}

#[test]
fn oversized_hour_text_is_parse_error() {
    assert!(matches!(TimeOfDay::parse_12h("99999999999:00pm"), Err(SlotError::Parse(_))));
}

#[test]
fn signed_or_empty_fields_are_parse_errors() {
    assert!(matches!(TimeOfDay::parse("+5:07"), Err(SlotError::Parse(_))));
    assert!(matches!(TimeOfDay::parse("5:+07"), Err(SlotError::Parse(_))));
    assert!(matches!(TimeOfDay::parse(":30"), Err(SlotError::Parse(_))));
    assert!(matches!(TimeOfDay::parse_12h("+7:30pm"), Err(SlotError::Parse(_))));
}
