//! Integration tests for the rule-based single-task path
//!
//! These cover the documented end-to-end scenarios plus the future-date
//! guarantees: a parsed due date is never in the past at parse time, and a
//! bare weekday mention never resolves to the same day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use taskscribe::parse::dates;
use taskscribe::parse::SingleTaskParser;
use taskscribe::Priority;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

// ============================================================================
// Documented scenarios
// ============================================================================

#[test]
fn test_call_client_tomorrow_5pm() {
    let now = at(2026, 8, 25, 10, 0);
    let task = SingleTaskParser::new().parse("Call client Rajeev tomorrow 5pm", now);

    assert!(task.title.contains("Call client"));
    assert_eq!(task.assignee, "Rajeev");
    assert!(task.time_specified);
    assert_eq!(task.due_time_formatted.as_deref(), Some("5:00 PM"));
    assert!(task.due_date.starts_with("2026-08-26"));
    assert_eq!(task.priority, Priority::P3);
    assert_eq!(task.priority_text, "Medium");
}

#[test]
fn test_landing_page_past_june_rolls_year() {
    let now = at(2026, 8, 25, 10, 0);
    let task =
        SingleTaskParser::new().parse("Finish landing page for Aman by 11pm 20th June P1", now);

    assert_eq!(task.assignee, "Aman");
    assert_eq!(task.priority, Priority::P1);
    assert_eq!(task.due_date, "2027-06-20T23:00:00");
}

#[test]
fn test_june_still_ahead_keeps_year() {
    let now = at(2026, 5, 1, 10, 0);
    let task =
        SingleTaskParser::new().parse("Finish landing page for Aman by 11pm 20th June P1", now);
    assert_eq!(task.due_date, "2026-06-20T23:00:00");
}

#[test]
fn test_parser_never_fails_on_plain_text() {
    let now = at(2026, 8, 25, 10, 0);
    for input in ["x", "do the thing", "!!!", "42"] {
        let task = SingleTaskParser::new().parse(input, now);
        assert!(!task.title.is_empty());
        assert_eq!(task.priority, Priority::P3);
    }
}

// ============================================================================
// Future-date guarantees
// ============================================================================

#[test]
fn test_weekday_request_on_that_weekday_is_next_week() {
    // Walk a whole week of reference days: asking for the current weekday
    // must always land 7 days out.
    let names = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
    for offset in 0..7 {
        let now = at(2026, 8, 24, 9, 0) + Duration::days(offset); // Aug 24 is a Monday
        let name = names[now.date().weekday().num_days_from_monday() as usize];
        let resolved = dates::resolve(&format!("review by {}", name), now);
        assert_eq!(resolved.due.date(), now.date() + Duration::days(7));
    }
}

#[test]
fn test_earlier_time_today_means_tomorrow_not_next_year() {
    let now = at(2026, 8, 25, 14, 0);
    let resolved = dates::resolve("standup today 9am", now);
    assert_eq!(resolved.due, at(2026, 8, 26, 9, 0));
}

proptest! {
    #[test]
    fn prop_roll_forward_never_in_the_past(
        year in 2000i32..2030,
        month in 1u32..=12,
        day in 1u32..=28,
        hour in 0u32..24,
        minute in 0u32..60,
    ) {
        let now = at(2026, 8, 25, 10, 0);
        let due = at(year, month, day, hour, minute);
        let rolled = dates::roll_forward(due, now);
        prop_assert!(rolled.date() >= now.date());
    }

    #[test]
    fn prop_resolved_sentences_are_never_past(
        day in 1u32..=28,
        month in 1u32..=12,
        hour in 1u32..=12,
    ) {
        let now = at(2026, 8, 25, 10, 0);
        let months = [
            "january", "february", "march", "april", "may", "june", "july",
            "august", "september", "october", "november", "december",
        ];
        let text = format!("ship by {}pm {} {}", hour, months[(month - 1) as usize], day);
        let resolved = dates::resolve(&text, now);
        prop_assert!(resolved.due.date() >= now.date());
    }
}
