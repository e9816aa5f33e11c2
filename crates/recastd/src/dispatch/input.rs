//! Typed accessors over a command's JSON input.
//!
//! JSON `null` is treated the same as an absent key.

use serde_json::{Map, Value};

use super::errors::CommandError;

/// Command input as received from the client.
pub(crate) type Input = Map<String, Value>;

fn present<'a>(input: &'a Input, key: &str) -> Option<&'a Value> {
    input.get(key).filter(|value| !value.is_null())
}

/// Returns the string stored under `key`.
pub(crate) fn require_str<'a>(input: &'a Input, key: &str) -> Result<&'a str, CommandError> {
    optional_str(input, key)?.ok_or_else(|| CommandError::missing_key(key))
}

/// Returns the string stored under `key`, if present.
pub(crate) fn optional_str<'a>(input: &'a Input, key: &str) -> Result<Option<&'a str>, CommandError> {
    present(input, key)
        .map(|value| {
            value
                .as_str()
                .ok_or_else(|| CommandError::invalid_type(key, "a string"))
        })
        .transpose()
}

/// Returns the number stored under `key`, truncated towards zero.
pub(crate) fn optional_integer(input: &Input, key: &str) -> Result<Option<i64>, CommandError> {
    present(input, key)
        .map(|value| integer(value).ok_or_else(|| CommandError::invalid_type(key, "a number")))
        .transpose()
}

/// Returns the object stored under `key`.
pub(crate) fn require_object<'a>(input: &'a Input, key: &str) -> Result<&'a Input, CommandError> {
    present(input, key)
        .ok_or_else(|| CommandError::missing_key(key))?
        .as_object()
        .ok_or_else(|| CommandError::invalid_type(key, "an object"))
}

/// Returns the list stored under `key`, if present.
pub(crate) fn optional_array<'a>(
    input: &'a Input,
    key: &str,
) -> Result<Option<&'a [Value]>, CommandError> {
    present(input, key)
        .map(|value| {
            value
                .as_array()
                .map(Vec::as_slice)
                .ok_or_else(|| CommandError::invalid_type(key, "a list"))
        })
        .transpose()
}

/// Returns the non-negative source coordinate stored under `parent.key`.
pub(crate) fn require_coordinate(
    object: &Input,
    parent: &str,
    key: &str,
) -> Result<u32, CommandError> {
    let qualified = format!("{parent}.{key}");
    let value = present(object, key).ok_or_else(|| CommandError::missing_key(&qualified))?;
    let number =
        integer(value).ok_or_else(|| CommandError::invalid_type(&qualified, "a number"))?;
    u32::try_from(number).map_err(|_| {
        CommandError::invalid_argument(format!(
            "\"{qualified}\" key must be a non-negative integer"
        ))
    })
}

fn integer(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    if let Some(number) = value.as_u64() {
        return Some(i64::try_from(number).unwrap_or(i64::MAX));
    }
    // Float to integer casts saturate, which is the truncation we want.
    value.as_f64().map(|number| number.trunc() as i64)
}
