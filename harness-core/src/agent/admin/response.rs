use rst_common::standard::serde_json::Value;

use super::types::AdminError;

/// `field_str` reads a string field from an admin response, following a dotted path
/// such as `sent.schema_id`
pub fn field_str(value: &Value, path: &str) -> Option<String> {
    let mut current = value;
    for key in path.split('.') {
        current = current.get(key)?;
    }

    current.as_str().map(|val| val.to_string())
}

/// `required_str` is [`field_str`] that fails with [`AdminError::MissingField`]
pub fn required_str(value: &Value, path: &str) -> Result<String, AdminError> {
    field_str(value, path).ok_or(AdminError::MissingField(path.to_string()))
}

/// `first_str` returns the first path that resolves to a string
pub fn first_str(value: &Value, paths: &[&str]) -> Result<String, AdminError> {
    paths
        .iter()
        .find_map(|path| field_str(value, path))
        .ok_or(AdminError::MissingField(paths.join("|")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_common::standard::serde_json::json;

    #[test]
    fn test_field_str_nested() {
        let value = json!({"sent": {"schema_id": "schema-1"}, "count": 1});
        assert_eq!(field_str(&value, "sent.schema_id"), Some("schema-1".to_string()));
        assert_eq!(field_str(&value, "count"), None);
        assert_eq!(field_str(&value, "sent.missing"), None);
    }

    #[test]
    fn test_required_str_missing() {
        let value = json!({});
        let result = required_str(&value, "connection_id");
        assert!(matches!(result, Err(AdminError::MissingField(_))));
    }

    #[test]
    fn test_first_str() {
        let value = json!({"sent": {"schema_id": "schema-2"}});
        let found = first_str(&value, &["schema_id", "sent.schema_id"]);
        assert_eq!(found, Ok("schema-2".to_string()));

        let missing = first_str(&value, &["a", "b"]);
        assert_eq!(missing, Err(AdminError::MissingField("a|b".to_string())));
    }
}
