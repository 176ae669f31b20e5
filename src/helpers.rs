use serde_json::{Map, Value};
use url::form_urlencoded;

/// Truthiness as the notification script sees it: `null`, `false`, `0`
/// and `""` count as absent.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a value when it lands in a query string or header.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            n.as_f64().map(number_to_string).unwrap_or_default()
        },
        Value::String(s) => s.to_owned(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<String>>()
            .join(","),
        Value::Object(_) => String::from("[object Object]"),
    }
}

/// Shortest round-trip form of a number, laid out the way script engines
/// print it: plain decimals from `1e-6` up to `1e21`, `1e+21` style
/// beyond that, and `0` for negative zero.
pub fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value == 0.0 {
        return String::from("0");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value < 0.0 {
        return format!("-{}", number_to_string(-value));
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => {
            (mantissa, exponent.parse::<i32>().unwrap_or(0))
        },
        None => (scientific.as_str(), 0),
    };
    let digits = mantissa.replace('.', "");
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (whole, fraction) = digits.split_at(n as usize);
        format!("{}.{}", whole, fraction)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat(-n as usize), digits)
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, exponent.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, exponent.abs())
        }
    }
}

/// Own enumerable fields of a spread value, in order.
fn spread_fields(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (key.to_owned(), coerce_to_string(value)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, value)| (index.to_string(), coerce_to_string(value)))
            .collect(),
        Value::String(s) => s
            .chars()
            .enumerate()
            .map(|(index, c)| (index.to_string(), c.to_string()))
            .collect(),
        _ => vec![],
    }
}

/// Builds `{action, ...data}` in object-literal enumeration order: keys
/// that are array indexes first, ascending, then `action` and the other
/// keys in insertion order. A field named `action` inside `data` keeps the
/// `action` slot but takes the field's value.
pub fn query_pairs(action: &str, data: Option<&Value>) -> Vec<(String, String)> {
    let mut pairs = vec![(String::from("action"), action.to_owned())];

    if let Some(data) = data {
        for (key, value) in spread_fields(data) {
            match pairs.iter_mut().find(|(k, _)| *k == key) {
                Some(existing) => existing.1 = value,
                None => pairs.push((key, value)),
            }
        }
    }

    let (mut indexed, named): (Vec<_>, Vec<_>) = pairs
        .into_iter()
        .partition(|(key, _)| array_index(key).is_some());
    indexed.sort_by_key(|(key, _)| array_index(key));
    indexed.extend(named);

    indexed
}

/// Canonical array index: decimal digits without leading zeros, below
/// `2^32 - 1`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty()
        || (key.len() > 1 && key.starts_with('0'))
        || !key.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

/// Appends form-encoded `pairs` to `target`, separated by `?` or `&`
/// depending on whether the target already has a query.
pub fn append_query(target: &str, pairs: &[(String, String)]) -> String {
    let separator = if target.contains('?') { '&' } else { '?' };
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish();

    format!("{}{}{}", target, separator, query)
}

/// Header map of a fetch descriptor. Anything but an object yields no
/// headers.
pub fn string_map(value: Option<&Value>) -> Vec<(String, String)> {
    match value {
        Some(Value::Object(map)) => map_to_pairs(map),
        _ => vec![],
    }
}

fn map_to_pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .map(|(key, value)| (key.to_owned(), coerce_to_string(value)))
        .collect()
}
