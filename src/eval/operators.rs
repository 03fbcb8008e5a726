use super::context::EvaluationContext;
use crate::rule::ConditionOperator;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::RegexBuilder;
use serde_json::Value;

/// Dispatches a single operator against a resolved field value.
///
/// `field` is `None` when the dotted path did not resolve ("undefined").
/// Every arm fails closed: type mismatches, malformed patterns, missing
/// operands, and missing context all produce `false` rather than an error.
pub(super) fn apply(
    operator: ConditionOperator,
    field: Option<&Value>,
    value: &Value,
    value2: Option<&Value>,
    context: Option<&EvaluationContext>,
) -> bool {
    use ConditionOperator as Op;
    match operator {
        Op::Equals => loose_equals(field, value),
        Op::NotEquals => !loose_equals(field, value),
        Op::Contains => string_test(field, value, |haystack, needle| haystack.contains(needle)),
        Op::StartsWith => string_test(field, value, |haystack, needle| haystack.starts_with(needle)),
        Op::EndsWith => string_test(field, value, |haystack, needle| haystack.ends_with(needle)),
        Op::Matches => regex_test(field, value),
        Op::IsEmpty => is_empty(field),
        Op::GreaterThan => numeric_test(field, value, |a, b| a > b),
        Op::LessThan => numeric_test(field, value, |a, b| a < b),
        Op::GreaterThanOrEquals => numeric_test(field, value, |a, b| a >= b),
        Op::LessThanOrEquals => numeric_test(field, value, |a, b| a <= b),
        Op::Between => between(field, value, value2),
        Op::Before => date_test(field, value, |field_date, bound| field_date < bound),
        Op::After => date_test(field, value, |field_date, bound| field_date > bound),
        Op::Within => within_days(field, value),
        Op::DayOfWeek => day_of_week(field, value),
        Op::DayOfMonth => day_of_month(field, value),
        Op::IsNull => matches!(field, None | Some(Value::Null)),
        Op::In => in_list(field, value),
        Op::InGroup => {
            context.is_some_and(|ctx| field.is_some_and(|member| ctx.is_member(value, member)))
        }
        Op::Unsupported => false,
    }
}

/// Loose equality: numeric strings coerce to numbers, string comparison is
/// case-insensitive, booleans compare by identity, and an undefined field
/// only equals an explicit null.
fn loose_equals(field: Option<&Value>, value: &Value) -> bool {
    let Some(field) = field else {
        return value.is_null();
    };
    match (field, value) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        _ => {
            if let (Some(a), Some(b)) = (value_as_f64(field), value_as_f64(value)) {
                return (a - b).abs() < f64::EPSILON;
            }
            match (value_as_str(field), value_as_str(value)) {
                (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
                _ => false,
            }
        }
    }
}

/// Case-insensitive substring-family test. Non-string fields never match;
/// an empty search value matches vacuously.
fn string_test(field: Option<&Value>, value: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
    let Some(Value::String(haystack)) = field else {
        return false;
    };
    let Some(needle) = search_string(value) else {
        return false;
    };
    if needle.is_empty() {
        return true;
    }
    test(&haystack.to_lowercase(), &needle.to_lowercase())
}

fn regex_test(field: Option<&Value>, value: &Value) -> bool {
    let Some(Value::String(text)) = field else {
        return false;
    };
    let Some(pattern) = value_as_str(value) else {
        return false;
    };
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

fn is_empty(field: Option<&Value>) -> bool {
    match field {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

fn numeric_test(field: Option<&Value>, value: &Value, test: impl Fn(f64, f64) -> bool) -> bool {
    match (field.and_then(value_as_f64), value_as_f64(value)) {
        (Some(a), Some(b)) => test(a, b),
        _ => false,
    }
}

/// Inclusive range check. A missing upper bound never matches.
fn between(field: Option<&Value>, value: &Value, value2: Option<&Value>) -> bool {
    let (Some(n), Some(low), Some(high)) = (
        field.and_then(value_as_f64),
        value_as_f64(value),
        value2.and_then(value_as_f64),
    ) else {
        return false;
    };
    n >= low && n <= high
}

fn date_test(
    field: Option<&Value>,
    value: &Value,
    test: impl Fn(DateTime<Utc>, DateTime<Utc>) -> bool,
) -> bool {
    match (field.and_then(parse_date), parse_date(value)) {
        (Some(field_date), Some(bound)) => test(field_date, bound),
        _ => false,
    }
}

/// `true` iff the field date is strictly in the future and at most `value`
/// days from now. The comparison is against the current instant, not the
/// start of day: a timestamp earlier than now is out, even today.
fn within_days(field: Option<&Value>, value: &Value) -> bool {
    let Some(date) = field.and_then(parse_date) else {
        return false;
    };
    let Some(days) = value_as_f64(value) else {
        return false;
    };
    if days < 0.0 {
        return false;
    }
    let now = Utc::now();
    date > now && date <= now + Duration::seconds((days * 86_400.0) as i64)
}

/// Matches the field's weekday against an array of day numbers (0 = Sunday)
/// and/or case-insensitive day names.
fn day_of_week(field: Option<&Value>, value: &Value) -> bool {
    let Some(date) = field.and_then(parse_date) else {
        return false;
    };
    let Value::Array(days) = value else {
        return false;
    };
    let weekday = date.weekday().num_days_from_sunday();
    days.iter().any(|day| match day {
        Value::Number(n) => n.as_f64() == Some(f64::from(weekday)),
        Value::String(name) => weekday_index(name) == Some(weekday),
        _ => false,
    })
}

fn weekday_index(name: &str) -> Option<u32> {
    const DAYS: [&str; 7] = [
        "sunday",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
    ];
    let name = name.trim().to_lowercase();
    // Accept full names and unambiguous prefixes of three letters or more.
    if name.len() < 3 {
        return None;
    }
    DAYS.iter()
        .position(|day| day.starts_with(&name))
        .map(|i| i as u32)
}

fn day_of_month(field: Option<&Value>, value: &Value) -> bool {
    let Some(date) = field.and_then(parse_date) else {
        return false;
    };
    let Some(day) = value_as_f64(value) else {
        return false;
    };
    f64::from(date.day()) == day
}

/// `value` must be an array; membership uses the same loose equality as
/// `equals`, so string candidates match case-insensitively.
fn in_list(field: Option<&Value>, value: &Value) -> bool {
    let Value::Array(candidates) = value else {
        return false;
    };
    candidates
        .iter()
        .any(|candidate| loose_equals(field, candidate))
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Stringifies a scalar search operand. Arrays and objects do not stringify.
fn search_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parses a date operand: RFC 3339 strings, naive `YYYY-MM-DD[THH:MM:SS]`
/// strings (taken as UTC), or numeric epoch milliseconds.
fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(dt.and_utc());
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        }
        _ => None,
    }
}
