//! Structural validation of untyped model output against a response contract.

use crate::domain::{DomainError, Feature};
use chrono::{DateTime, NaiveDateTime};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

/// Deserialize `value` into contract `T` and apply its field rules.
///
/// Missing required fields, wrong types, unknown enum values and out-of-range
/// numbers all surface as [`DomainError::Validation`] tagged with `feature`.
pub fn validate_payload<T>(feature: Feature, value: serde_json::Value) -> Result<T, DomainError>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(value).map_err(|e| DomainError::Validation {
        feature,
        reason: e.to_string(),
    })?;
    parsed.validate().map_err(|e| DomainError::Validation {
        feature,
        reason: e.to_string(),
    })?;
    Ok(parsed)
}

/// Accepts RFC 3339 timestamps plus the minute-precision forms models tend to
/// emit (`2024-03-01T09:00Z`, `2024-03-01T09:00`).
pub fn validate_iso_timestamp(value: &str) -> Result<(), ValidationError> {
    if is_iso_timestamp(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("iso_timestamp");
        err.message = Some(format!("'{}' is not an ISO-8601 timestamp", value).into());
        Err(err)
    }
}

/// Rejects strings that are empty or only whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("must contain non-whitespace text".into());
        Err(err)
    } else {
        Ok(())
    }
}

fn is_iso_timestamp(value: &str) -> bool {
    if DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z").is_ok()
    {
        return true;
    }
    let naive = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
        .unwrap_or(value);
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(naive, fmt).is_ok())
}
