//! Natural-language due-date resolution
//!
//! Scans a whole sentence for date and time cues rather than expecting a
//! pre-isolated fragment. Every resolved instant is forced into the future
//! relative to an injected reference instant (`now`), never a hidden clock
//! read, so callers and tests stay deterministic.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Hour used when the sentence names no time of day (5 PM)
pub const DEFAULT_DUE_HOUR: u32 = 17;

/// Outcome of scanning a sentence for date/time cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub due: NaiveDateTime,
    /// True when an explicit time token was found in the text
    pub time_specified: bool,
}

/// Date-rule kinds, evaluated in precedence order:
/// relative words > end-of-period markers > weekday names > absolute forms.
#[derive(Debug, Clone, Copy)]
enum DateRule {
    Tomorrow,
    Today,
    NextWeek,
    ThisWeek,
    EndOfDay,
    EndOfWeek,
    EndOfMonth,
    Weekday,
    DayMonth,
    MonthDay,
    Numeric,
}

static DATE_RULES: Lazy<Vec<(Regex, DateRule)>> = Lazy::new(|| {
    let rules: [(&str, DateRule); 11] = [
        (r"\btomorrow\b", DateRule::Tomorrow),
        (r"\b(?:today|tonight)\b", DateRule::Today),
        (r"\bnext\s+week\b", DateRule::NextWeek),
        (r"\bthis\s+week\b", DateRule::ThisWeek),
        (r"\b(?:end\s+of\s+(?:the\s+)?day|eod|cob)\b", DateRule::EndOfDay),
        (r"\b(?:end\s+of\s+(?:the\s+)?week|eow)\b", DateRule::EndOfWeek),
        (
            r"\b(?:end\s+of\s+(?:the\s+)?month|eom)\b",
            DateRule::EndOfMonth,
        ),
        (
            r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
            DateRule::Weekday,
        ),
        (
            // "20th June", "3 Sep"
            r"\b(\d{1,2})(?:st|nd|rd|th)?\s+(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)\b",
            DateRule::DayMonth,
        ),
        (
            // "June 20", "Sep 3rd"
            r"\b(january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)\s+(\d{1,2})(?:st|nd|rd|th)?\b",
            DateRule::MonthDay,
        ),
        (r"\b(\d{1,2})/(\d{1,2})\b", DateRule::Numeric),
    ];
    rules
        .into_iter()
        .map(|(pat, rule)| (Regex::new(pat).expect("valid date pattern"), rule))
        .collect()
});

// Meridiem form first so "11pm" wins over a bare-colon match; the bare form
// requires a colon so day ordinals ("20th") never read as hours.
static TIME_AMPM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)\b").expect("valid time pattern"));
static TIME_BARE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("valid time pattern"));

/// Scan lowercased-or-not text for date and time cues and return a future
/// instant. Defaults: today's date, 17:00. Never fails.
pub fn resolve(text: &str, now: NaiveDateTime) -> ResolvedDate {
    let lower = text.to_lowercase();
    let date = resolve_date(&lower, now).unwrap_or_else(|| now.date());
    let (time, time_specified) = match extract_time(&lower) {
        Some((h, m)) => (NaiveTime::from_hms_opt(h, m, 0), true),
        None => (NaiveTime::from_hms_opt(DEFAULT_DUE_HOUR, 0, 0), false),
    };
    let time = time.unwrap_or_default();
    let due = roll_forward(date.and_time(time), now);
    ResolvedDate {
        due,
        time_specified,
    }
}

/// First matching date rule wins; None when no rule matches
fn resolve_date(lower: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    for (re, rule) in DATE_RULES.iter() {
        if let Some(caps) = re.captures(lower) {
            if let Some(date) = apply_rule(*rule, &caps, now) {
                return Some(date);
            }
        }
    }
    None
}

fn apply_rule(rule: DateRule, caps: &Captures<'_>, now: NaiveDateTime) -> Option<NaiveDate> {
    let today = now.date();
    match rule {
        DateRule::Tomorrow => today.succ_opt(),
        DateRule::Today | DateRule::EndOfDay => Some(today),
        DateRule::NextWeek => today.checked_add_signed(Duration::days(7)),
        // "this week" and end-of-week both land on the upcoming Friday
        // (today when asked on a Friday).
        DateRule::ThisWeek | DateRule::EndOfWeek => {
            let offset = days_until(today.weekday(), Weekday::Fri, true);
            today.checked_add_signed(Duration::days(offset))
        }
        DateRule::EndOfMonth => last_day_of_month(today.year(), today.month()),
        DateRule::Weekday => {
            let target = parse_weekday(caps.get(1)?.as_str())?;
            // Bare weekday on that same weekday means next week's occurrence,
            // never today.
            let offset = days_until(today.weekday(), target, false);
            today.checked_add_signed(Duration::days(offset))
        }
        DateRule::DayMonth => {
            let day: u32 = caps.get(1)?.as_str().parse().ok()?;
            let month = parse_month(caps.get(2)?.as_str())?;
            NaiveDate::from_ymd_opt(today.year(), month, day)
        }
        DateRule::MonthDay => {
            let month = parse_month(caps.get(1)?.as_str())?;
            let day: u32 = caps.get(2)?.as_str().parse().ok()?;
            NaiveDate::from_ymd_opt(today.year(), month, day)
        }
        DateRule::Numeric => {
            let month: u32 = caps.get(1)?.as_str().parse().ok()?;
            let day: u32 = caps.get(2)?.as_str().parse().ok()?;
            NaiveDate::from_ymd_opt(today.year(), month, day)
        }
    }
}

/// Days from `current` to the next `target` weekday. With `allow_today`,
/// a zero offset stands; otherwise it becomes a full week.
fn days_until(current: Weekday, target: Weekday, allow_today: bool) -> i64 {
    let offset = (target.num_days_from_monday() as i64 + 7
        - current.num_days_from_monday() as i64)
        % 7;
    if offset == 0 && !allow_today {
        7
    } else {
        offset
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn parse_month(name: &str) -> Option<u32> {
    let month = match &name[..3.min(name.len())] {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Extract an explicit time token: `H(:MM)? am|pm` first, then bare `H:MM`.
/// Out-of-range hours/minutes are skipped so the caller falls back to the
/// default time.
fn extract_time(lower: &str) -> Option<(u32, u32)> {
    for caps in TIME_AMPM_RE.captures_iter(lower) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps
            .get(2)
            .map(|m| m.as_str().parse().unwrap_or(60))
            .unwrap_or(0);
        let meridiem = caps.get(3)?.as_str();
        let hour = match (meridiem, hour) {
            ("pm", h) if h < 12 => h + 12,
            ("am", 12) => 0,
            (_, h) => h,
        };
        if hour <= 23 && minute <= 59 {
            return Some((hour, minute));
        }
    }
    for caps in TIME_BARE_RE.captures_iter(lower) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
        if hour <= 23 && minute <= 59 {
            return Some((hour, minute));
        }
    }
    None
}

/// Force a resolved instant into the future.
///
/// Comparing date portions only: a past date gains whole years until it
/// reaches the present; a time earlier today moves to tomorrow instead.
pub fn roll_forward(due: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
    if due.date() < now.date() {
        roll_forward_year(due, now)
    } else if due.date() == now.date() && due < now {
        due + Duration::days(1)
    } else {
        due
    }
}

/// Year-increment-only variant, applied to model-returned dates
pub fn roll_forward_year(due: NaiveDateTime, now: NaiveDateTime) -> NaiveDateTime {
    let mut date = due.date();
    while date < now.date() {
        date = add_year(date);
    }
    date.and_time(due.time())
}

// Feb 29 lands on Feb 28 in a non-leap target year.
fn add_year(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() + 1)
        .or_else(|| NaiveDate::from_ymd_opt(date.year() + 1, 2, 28))
        .unwrap_or(date)
}
