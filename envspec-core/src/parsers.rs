//! Ready-made parsers for common variable types.

use crate::entry::{BoxError, Parser};
use crate::value::Value;
use url::Url;

/// The raw string, unchanged. Same as having no parser.
pub fn string() -> Parser {
    Parser::new(|raw: &str| Ok::<_, BoxError>(raw.to_string()))
}

/// A signed 64-bit integer. Surrounding whitespace is ignored.
pub fn int() -> Parser {
    Parser::new(|raw: &str| {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| format!("not an integer: {raw}"))
    })
}

/// A finite floating point number.
pub fn float() -> Parser {
    Parser::new(|raw: &str| match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("not a number: {raw}")),
    })
}

/// `true`/`false`, `1`/`0`, `yes`/`no` or `on`/`off`, in any case.
pub fn boolean() -> Parser {
    Parser::new(|raw: &str| match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(format!("not a boolean: {raw}")),
    })
}

/// A TCP/UDP port between 1 and 65535.
pub fn port() -> Parser {
    Parser::new(|raw: &str| match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(format!("not a valid port: {raw}")),
    })
}

/// An absolute URL, kept as a [`Url`] inside [`Value::Other`].
pub fn url() -> Parser {
    Parser::new(|raw: &str| Url::parse(raw.trim()))
}

/// A JSON document. Scalars become scalar values, arrays and objects stay
/// a `serde_json::Value`.
pub fn json() -> Parser {
    Parser::new(|raw: &str| serde_json::from_str::<serde_json::Value>(raw))
}

/// A comma separated list. Items are trimmed and empty items dropped.
pub fn list() -> Parser {
    Parser::new(|raw: &str| {
        Ok::<_, BoxError>(
            raw.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect::<Vec<_>>(),
        )
    })
}

/// Helper for reading a list value back out of an [`Env`](crate::Env).
pub fn as_list(value: &Value) -> Option<&[String]> {
    value.downcast_ref::<Vec<String>>().map(Vec::as_slice)
}
