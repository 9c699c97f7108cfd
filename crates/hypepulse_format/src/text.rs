//! Text helpers: splitting, ratios and `**key:** value` sections.

use hypepulse_upstream::{format_float, StatValue};
use serde_json::Value as JsonValue;

/// Split text into fragments of at most `max_len` characters.
///
/// Fragments concatenate back to the input. Empty input yields a single
/// empty fragment. A `max_len` of zero is treated as one.
///
/// ```
/// use hypepulse_format::split_text;
///
/// let parts = split_text("abcdefg", 3);
/// assert_eq!(parts, vec!["abc", "def", "g"]);
/// assert_eq!(split_text("", 10), vec![""]);
/// ```
pub fn split_text(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut parts = Vec::with_capacity(text.len() / max_len + 1);
    let mut current = String::new();
    let mut count = 0;
    for c in text.chars() {
        if count == max_len {
            parts.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    parts.push(current);
    parts
}

/// Length of a text in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Ratio of two stats.
///
/// With a non-zero denominator the quotient is shown with exactly two
/// decimals (an absent numerator counts as zero). Otherwise the numerator is
/// shown as-is, and the ratio is absent when the numerator is too.
///
/// ```
/// use hypepulse_format::ratio;
/// use hypepulse_upstream::StatValue;
/// use serde_json::json;
///
/// let kills = json!(10);
/// let numerator = StatValue::from_json(&kills);
/// assert_eq!(ratio(numerator, Some(4.0)).as_deref(), Some("2.50"));
/// assert_eq!(ratio(numerator, Some(0.0)).as_deref(), Some("10"));
/// assert_eq!(ratio(None, None), None);
/// ```
pub fn ratio(numerator: Option<StatValue<'_>>, denominator: Option<f64>) -> Option<String> {
    match denominator.filter(|d| *d != 0.0 && !d.is_nan()) {
        Some(den) => {
            let num = numerator.and_then(|v| v.as_f64()).unwrap_or(0.0);
            Some(fixed_2(num / den))
        }
        None => numerator.map(|v| v.to_string()),
    }
}

/// Two decimals, rounding halves away from zero.
fn fixed_2(value: f64) -> String {
    if !value.is_finite() {
        return format_float(value);
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{:.2}", rounded)
}

/// Render a value for a `**key:** value` line: scalars as-is, nested values
/// and `null` as indented JSON.
pub fn render_value(value: &JsonValue) -> String {
    match StatValue::from_json(value) {
        Some(stat) => stat.to_string(),
        None => "null".to_string(),
    }
}

/// Append a `**key:** value` line.
pub fn push_line(out: &mut String, key: &str, value: &str) {
    out.push_str("**");
    out.push_str(key);
    out.push_str(":** ");
    out.push_str(value);
    out.push('\n');
}

/// Render a titled section from labelled values, skipping absent ones.
///
/// ```
/// use hypepulse_format::render_section;
///
/// let text = render_section("Pit Stats for Notch", [("kills", Some("3".to_string())), ("kdr", None)]);
/// assert_eq!(text, "**Pit Stats for Notch:**\n**kills:** 3\n");
/// ```
pub fn render_section<K, I>(title: &str, fields: I) -> String
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, Option<String>)>,
{
    let mut out = format!("**{}:**\n", title);
    for (key, value) in fields {
        if let Some(value) = value {
            push_line(&mut out, key.as_ref(), &value);
        }
    }
    out
}

/// Render a titled section from a JSON container, skipping `null` values.
///
/// Objects contribute their keys, arrays their indices.
pub fn render_json_section(title: &str, value: &JsonValue) -> String {
    let present = |v: &JsonValue| (!v.is_null()).then(|| render_value(v));
    match value {
        JsonValue::Object(map) => render_section(title, map.iter().map(|(k, v)| (k.clone(), present(v)))),
        JsonValue::Array(items) => render_section(
            title,
            items.iter().enumerate().map(|(i, v)| (i.to_string(), present(v))),
        ),
        _ => render_section(title, std::iter::empty::<(String, Option<String>)>()),
    }
}
