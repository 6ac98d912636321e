use serde_json::Value;

use crate::domain::ApiErrorMessage;

/// Decode the error messages of a non-2xx response body.
///
/// Beepsend reports failures under `errors`; some gateways answer with a top-level `error` or
/// `message` string instead. Bodies that are not JSON (HTML error pages, empty bodies) yield no
/// messages.
pub fn decode_error_body(body: &str) -> Vec<ApiErrorMessage> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };

    match &value {
        Value::Object(map) => {
            if let Some(errors) = map.get("errors") {
                return ApiErrorMessage::list_from_value(errors);
            }
            ["error", "message"]
                .iter()
                .find_map(|key| map.get(*key))
                .map(ApiErrorMessage::list_from_value)
                .unwrap_or_default()
        }
        Value::Array(_) | Value::String(_) => ApiErrorMessage::list_from_value(&value),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_errors_array_with_codes() {
        let body = r#"{"errors": [{"code": 1004, "description": "Invalid token"}]}"#;
        let errors = decode_error_body(body);
        assert_eq!(
            errors,
            vec![ApiErrorMessage {
                code: Some(1004),
                field: None,
                description: "Invalid token".to_owned(),
            }]
        );
    }

    #[test]
    fn decodes_field_keyed_errors() {
        let body = r#"{"errors": {"email": "Already taken"}}"#;
        let errors = decode_error_body(body);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field.as_deref(), Some("email"));
        assert_eq!(errors[0].description, "Already taken");
    }

    #[test]
    fn falls_back_to_top_level_message() {
        let errors = decode_error_body(r#"{"error": "Not found"}"#);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].description, "Not found");

        let errors = decode_error_body(r#"["Server error"]"#);
        assert_eq!(errors[0].description, "Server error");
    }

    #[test]
    fn non_json_bodies_yield_no_messages() {
        assert!(decode_error_body("").is_empty());
        assert!(decode_error_body("<html>502 Bad Gateway</html>").is_empty());
        assert!(decode_error_body(r#"{"status": "down"}"#).is_empty());
    }
}
