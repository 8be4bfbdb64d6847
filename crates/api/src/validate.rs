//! Local argument checks performed before any request is sent.

use crate::error::{ApiError, Result};
use crate::params::JsonMap;
use base64::Engine as _;

/// Trimmed, non-empty required text.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when the value is empty after trimming.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

/// Optional text that must not be blank when supplied.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for a present but blank value.
pub fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => {
            Err(ApiError::validation(format!("{field} cannot be empty")))
        }
        Some(v) => Ok(Some(v.trim().to_string())),
    }
}

/// # Errors
///
/// Returns [`ApiError::Validation`] for an empty list.
pub fn require_items<T>(field: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(ApiError::validation(format!(
            "{field} must contain at least one item"
        )));
    }
    Ok(())
}

/// # Errors
///
/// Returns [`ApiError::Validation`] for a negative value.
pub fn require_non_negative(field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if v < 0.0 => Err(ApiError::validation(format!("{field} cannot be negative"))),
        _ => Ok(()),
    }
}

/// Reject update calls that carry no fields.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when `fields` is empty.
pub fn require_any_field(fields: &JsonMap) -> Result<()> {
    if fields.is_empty() {
        return Err(ApiError::validation(
            "At least one field must be provided for update",
        ));
    }
    Ok(())
}

/// Decode standard base64 file content.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for empty or malformed input.
pub fn decode_base64(field: &str, data: &str) -> Result<Vec<u8>> {
    let data = require_text(field, data)?;
    base64::engine::general_purpose::STANDARD
        .decode(data.as_bytes())
        .map_err(|e| ApiError::validation(format!("{field} must be valid base64: {e}")))
}

/// Parse a MIME type such as `application/pdf`.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for an unparsable content type.
pub fn parse_content_type(field: &str, value: &str) -> Result<mime::Mime> {
    value
        .trim()
        .parse::<mime::Mime>()
        .map_err(|e| ApiError::validation(format!("{field} is not a valid MIME type: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(require_text("name", "  Plumbing ").expect("ok"), "Plumbing");
        let err = require_text("name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn optional_text_rejects_blank_only_when_present() {
        assert_eq!(optional_text("name", None).expect("ok"), None);
        assert!(optional_text("name", Some(" ")).is_err());
        assert_eq!(
            optional_text("name", Some(" x ")).expect("ok"),
            Some("x".to_string())
        );
    }

    #[test]
    fn lists_and_numbers() {
        assert!(require_items::<String>("events", &[]).is_err());
        assert!(require_items("events", &["job.created"]).is_ok());
        assert!(require_non_negative("price", Some(-0.01)).is_err());
        assert!(require_non_negative("price", Some(0.0)).is_ok());
        assert!(require_non_negative("price", None).is_ok());
    }

    #[test]
    fn empty_update_is_rejected() {
        let empty = JsonMap::new();
        assert_eq!(
            require_any_field(&empty).unwrap_err().to_string(),
            "At least one field must be provided for update"
        );
        let mut some = JsonMap::new();
        some.insert("name".into(), json!("x"));
        assert!(require_any_field(&some).is_ok());
    }

    #[test]
    fn base64_and_mime() {
        assert_eq!(decode_base64("file_data", "aGk=").expect("ok"), b"hi");
        assert!(decode_base64("file_data", "***").is_err());
        assert!(parse_content_type("content_type", "application/pdf").is_ok());
        assert!(parse_content_type("content_type", "nonsense").is_err());
    }
}
