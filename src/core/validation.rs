//! Field validation shared by the ZIP resolver and the request intake.
//!
//! Everything here runs before any I/O. Each check returns the
//! `ValidationError` carrying the exact caller-facing message.

use crate::domain::model::{PhoneNumber, PostalCode, RequestType};
use crate::utils::error::{IntakeError, Result};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

pub const MSG_NO_ZIP: &str = "No ZIP code given!";
pub const MSG_INVALID_ZIP: &str = "Not a valid zip code";
pub const MSG_EMPTY_BODY: &str = "The request body is empty";
pub const MSG_NO_TOKEN: &str = "No token provided";
pub const MSG_INVALID_PHONE: &str = "The phone number is empty";
pub const MSG_MISSING_ZIP_OR_REQUEST: &str = "Zip code or request is missing";
pub const MSG_INVALID_REQUEST_CODE: &str = "Not a valid request code";

static POSTAL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}$").unwrap());

/// Absent, `null` and `""` all count as missing. `0` and `false` do not.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Stricter than `is_present`: `0` and `false` also count as not given.
pub fn is_given(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        other => is_present(other),
    }
}

/// Empty or non-JSON payloads are treated as no body at all.
pub fn parse_body(raw: &[u8]) -> Option<Value> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(raw).ok()
}

/// Body must be a JSON object.
pub fn require_body(body: Option<&Value>) -> Result<&Map<String, Value>> {
    body.and_then(Value::as_object)
        .ok_or_else(|| IntakeError::validation(MSG_EMPTY_BODY))
}

pub fn require_field<'a>(
    body: &'a Map<String, Value>,
    field: &str,
    message: &str,
) -> Result<&'a Value> {
    body.get(field)
        .filter(|value| is_present(Some(*value)))
        .ok_or_else(|| IntakeError::validation(message))
}

pub fn parse_postal_code(text: &str) -> Result<PostalCode> {
    if POSTAL_CODE_RE.is_match(text) {
        Ok(PostalCode::new_unchecked(text.to_string()))
    } else {
        Err(IntakeError::validation(MSG_INVALID_ZIP))
    }
}

/// Accepts a JSON string or a JSON integer whose decimal form is five digits.
pub fn validate_postal_code(value: &Value) -> Result<PostalCode> {
    match value {
        Value::String(s) => parse_postal_code(s),
        Value::Number(n) => parse_postal_code(&n.to_string()),
        _ => Err(IntakeError::validation(MSG_INVALID_ZIP)),
    }
}

/// Accepts a JSON integer (or integral float) or a string holding one, in `-1..=9`.
pub fn validate_request_type(value: &Value) -> Result<RequestType> {
    let code = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 1e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    };

    code.and_then(RequestType::new)
        .ok_or_else(|| IntakeError::validation(MSG_INVALID_REQUEST_CODE))
}

pub fn validate_phone(value: Option<&Value>) -> Result<PhoneNumber> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(PhoneNumber::new_unchecked(s.clone())),
        _ => Err(IntakeError::validation(MSG_INVALID_PHONE)),
    }
}
