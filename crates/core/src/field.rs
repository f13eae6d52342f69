//! Typed extraction of subclass fields from a record.
//!
//! Each helper removes the key from the record when present, so whatever is
//! left afterwards can be kept verbatim in the attribute bag. A missing key
//! yields `Ok(None)`; a key holding the wrong JSON type is a `ParseError`.

use serde_json::Value;

use crate::entity::Record;
use crate::error::{ParseError, ParseResult};

pub fn take_string(fields: &mut Record, key: &str) -> ParseResult<Option<String>> {
    match fields.remove(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ParseError::invalid(key, "a string")),
    }
}

pub fn take_u64(fields: &mut Record, key: &str) -> ParseResult<Option<u64>> {
    match fields.remove(key) {
        None => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| ParseError::invalid(key, "a non-negative integer")),
    }
}

pub fn take_f64(fields: &mut Record, key: &str) -> ParseResult<Option<f64>> {
    match fields.remove(key) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ParseError::invalid(key, "a number")),
    }
}

pub fn take_string_list(fields: &mut Record, key: &str) -> ParseResult<Option<Vec<String>>> {
    match fields.remove(key) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(ParseError::invalid(key, "a list of strings")),
            })
            .collect::<ParseResult<Vec<_>>>()
            .map(Some),
        Some(_) => Err(ParseError::invalid(key, "a list of strings")),
    }
}
