use crate::utils::error::{IntakeError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(IntakeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| IntakeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        // 不回顯密鑰類的值
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Table names: 3-255 chars of `[A-Za-z0-9_.-]`.
pub fn validate_table_name(field_name: &str, table: &str) -> Result<()> {
    let valid_chars = table
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');

    if table.len() < 3 || table.len() > 255 || !valid_chars {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: table.to_string(),
            reason: "Table name must be 3-255 characters of letters, digits, '_', '-' or '.'"
                .to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("dynamodb_endpoint", "https://example.com").is_ok());
        assert!(validate_url("dynamodb_endpoint", "http://localhost:8000").is_ok());
        assert!(validate_url("dynamodb_endpoint", "").is_err());
        assert!(validate_url("dynamodb_endpoint", "invalid-url").is_err());
        assert!(validate_url("dynamodb_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_path", "./data").is_ok());
        assert!(validate_path("data_path", "").is_err());
        assert!(validate_path("data_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("jwt_key", "secret").is_ok());
        assert!(validate_non_empty_string("jwt_key", "   ").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("x".to_string());
        assert_eq!(validate_required_field("jwt_key", &present).unwrap(), "x");
        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("jwt_key", &missing),
            Err(IntakeError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("region_table", "regions").is_ok());
        assert!(validate_table_name("region_table", "corona-db.requests").is_ok());
        assert!(validate_table_name("region_table", "ab").is_err());
        assert!(validate_table_name("region_table", "bad table").is_err());
    }
}
