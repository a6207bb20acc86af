use crate::config::policy;
use crate::utils::error::{BingoError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BingoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BingoError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BingoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(BingoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BingoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BingoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// The grid dimension must have an entry in the fixed layout table.
pub fn validate_grid_dimension(field_name: &str, value: usize) -> Result<()> {
    if !policy::SUPPORTED_GRID_DIMENSIONS.contains(&value) {
        return Err(BingoError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!(
                "Unsupported grid dimension. Supported: {}",
                policy::SUPPORTED_GRID_DIMENSIONS
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    }
    Ok(())
}

pub fn validate_months(field_name: &str, months: &[u32]) -> Result<()> {
    for &month in months {
        validate_range(field_name, month, 1, 12)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base_url", "https://example.com").is_ok());
        assert!(validate_url("api_base_url", "http://example.com").is_ok());
        assert!(validate_url("api_base_url", "").is_err());
        assert!(validate_url("api_base_url", "invalid-url").is_err());
        assert!(validate_url("api_base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("num_cards", 5, 1).is_ok());
        assert!(validate_positive_number("num_cards", 0, 1).is_err());
    }

    #[test]
    fn test_validate_grid_dimension() {
        assert!(validate_grid_dimension("grid_size", 3).is_ok());
        assert!(validate_grid_dimension("grid_size", 5).is_ok());
        assert!(validate_grid_dimension("grid_size", 7).is_err());
        assert!(validate_grid_dimension("grid_size", 0).is_err());
    }

    #[test]
    fn test_validate_months() {
        assert!(validate_months("months", &[1, 6, 12]).is_ok());
        assert!(validate_months("months", &[]).is_ok());
        assert!(validate_months("months", &[0]).is_err());
        assert!(validate_months("months", &[13]).is_err());
    }
}
