//! Cart lines and the pure transforms over them.
//!
//! Stored carts are wire data: whatever an earlier session persisted is
//! accepted field by field, with per-field fallbacks instead of errors.
//! The storefront never rejects a request because of a malformed cart.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One line of the cart.
///
/// `price` is whole rubles. Decoding is deliberately forgiving: `qty`
/// accepts numbers or numeric strings and falls back to 1, `price` falls
/// back to 0, missing text fields become empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "price_lenient")]
    pub price: i64,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_qty", deserialize_with = "qty_lenient")]
    pub qty: u32,
}

const fn default_qty() -> u32 {
    1
}

fn qty_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(qty_from_value(&Value::deserialize(deserializer)?))
}

fn price_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(price_from_value(&Value::deserialize(deserializer)?))
}

// Floored and bounds-checked, so the i64 cast downstream cannot truncate.
fn floor_to_i64(v: f64) -> Option<f64> {
    let v = v.floor();
    (v.is_finite() && v.abs() < 9.0e18).then_some(v)
}

/// Floor-parse integer-ish text: `"2"`, `"2.9"` and `" 15 "` all parse,
/// anything else is `None`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_int_lenient(text: &str) -> Option<i64> {
    floor_to_i64(text.trim().parse::<f64>().ok()?).map(|v| v as i64)
}

#[allow(clippy::cast_possible_truncation)]
fn numeric(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().and_then(floor_to_i64).map(|v| v as i64),
        Value::String(s) => parse_int_lenient(s),
        _ => None,
    }
}

fn qty_from_i64(value: Option<i64>) -> u32 {
    match value {
        Some(v) if v >= 1 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Quantity coercion for text input: positive numbers pass, anything else
/// (zero included) is 1.
#[must_use]
pub fn qty_from_str(text: &str) -> u32 {
    qty_from_i64(parse_int_lenient(text))
}

/// Price coercion for text input: numbers pass floored, anything else is 0.
#[must_use]
pub fn price_from_str(text: &str) -> i64 {
    parse_int_lenient(text).unwrap_or(0)
}

fn qty_from_value(value: &Value) -> u32 {
    qty_from_i64(numeric(value))
}

fn price_from_value(value: &Value) -> i64 {
    numeric(value).unwrap_or(0)
}

/// Decode a stored cart payload.
///
/// Anything that is not an array yields the empty cart; array entries that
/// are not objects are skipped. Never errors.
#[must_use]
pub fn lines_from_value(value: Value) -> Vec<CartLine> {
    match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Merge a line into the cart: an existing line with the same `id` absorbs
/// the incoming quantity, otherwise the line is appended. The cart holds at
/// most one line per id.
pub fn add_line(lines: &mut Vec<CartLine>, incoming: CartLine) {
    if let Some(existing) = lines.iter_mut().find(|l| l.id == incoming.id) {
        existing.qty = existing.qty.saturating_add(incoming.qty);
    } else {
        lines.push(incoming);
    }
}

/// Adjust the quantity of the line at `index` by `delta`.
///
/// A result of zero or less removes the line. Out-of-range indexes are
/// ignored: the cart may have changed since the form was rendered.
pub fn update_qty(lines: &mut Vec<CartLine>, index: usize, delta: i64) {
    let Some(line) = lines.get_mut(index) else {
        return;
    };
    let next = i64::from(line.qty).saturating_add(delta);
    if next <= 0 {
        lines.remove(index);
    } else {
        line.qty = u32::try_from(next).unwrap_or(u32::MAX);
    }
}

/// Total quantity across all lines - the header badge number.
#[must_use]
pub fn total_qty(lines: &[CartLine]) -> u32 {
    lines.iter().fold(0, |sum, l| sum.saturating_add(l.qty))
}

/// Cart subtotal in rubles.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> i64 {
    lines.iter().map(|l| i64::from(l.qty) * l.price).sum()
}
