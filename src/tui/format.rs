//! Display formatting for answers and timestamps
//!
//! Everything here is a total function of its inputs: malformed or missing
//! data degrades to an empty string, never a panic.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::{FormElement, FormElementType};

/// Render one answer value for display, according to the element's
/// declared type.
///
/// `value` is the raw JSON the respondent submitted, or `None` when the
/// response holds no answer for this element.
pub fn format_response_value(element: &FormElement, value: Option<&Value>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    match element.element_type {
        // Presentational kinds carry no answers; nothing to show even if
        // a stray value is present.
        FormElementType::WelcomeScreen
        | FormElementType::EndScreen
        | FormElementType::Statement => String::new(),

        FormElementType::MultipleChoice | FormElementType::Dropdown => list_text(value),

        FormElementType::YesNo
        | FormElementType::Rating
        | FormElementType::Number
        | FormElementType::Date
        | FormElementType::ShortText
        | FormElementType::LongText
        | FormElementType::Email
        | FormElementType::PhoneNumber => scalar_text(value),

        // Future element kinds: the list renderer handles every JSON
        // shape, so new types degrade to something readable.
        FormElementType::Unknown => list_text(value),
    }
}

/// Render a scalar answer. Booleans become labels, numbers plain digits,
/// strings pass through; anything else falls back to compact JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Render an answer that may be a selection list: arrays join their items
/// with ", ", scalars render as themselves.
fn list_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_text(other),
    }
}

/// Elapsed time since `then` as a short human phrase, measured against a
/// caller-supplied clock so rendering is deterministic under test.
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);

    if elapsed.num_seconds() < 60 {
        return "less than a minute ago".to_string();
    }
    if elapsed.num_minutes() < 60 {
        let mins = elapsed.num_minutes();
        return format!("{} minute{} ago", mins, plural(mins));
    }
    if elapsed.num_hours() < 24 {
        let hours = elapsed.num_hours();
        return format!("{} hour{} ago", hours, plural(hours));
    }
    if elapsed.num_days() < 7 {
        let days = elapsed.num_days();
        return format!("{} day{} ago", days, plural(days));
    }
    if elapsed.num_days() < 30 {
        let weeks = elapsed.num_weeks();
        return format!("{} week{} ago", weeks, plural(weeks));
    }
    if elapsed.num_days() < 365 {
        let months = (elapsed.num_days() / 30).max(1);
        return format!("{} month{} ago", months, plural(months));
    }
    let years = elapsed.num_days() / 365;
    format!("{} year{} ago", years, plural(years))
}

/// Creation date for a form card; an absent date renders as a placeholder.
pub fn format_created_date(created_at: Option<DateTime<Utc>>) -> String {
    match created_at {
        Some(date) => date.format("%b %d, %Y").to_string(),
        None => "Unknown date".to_string(),
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
