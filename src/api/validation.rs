use super::ApiError;

/// Rejects empty required string fields before the core is invoked.
pub fn require_field<'a>(value: &'a str, name: &str) -> Result<&'a str, ApiError> {
    if value.is_empty() {
        return Err(ApiError::validation(format!("{name} is required")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_field() {
        assert!(require_field("core", "team_name").is_ok());
        assert!(require_field("", "team_name").is_err());
    }

    #[test]
    fn test_error_names_the_field() {
        let err = require_field("", "user_id").unwrap_err();
        assert!(err.to_string().contains("user_id"));
    }
}
