use crate::utils::error::{BookingError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BookingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_email_address(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let trimmed = value.trim();
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected an address of the form name@domain".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| BookingError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidConfigValueError {
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
        return Err(BookingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("notifier.webhook_url", "https://example.com/hook").is_ok());
        assert!(validate_url("notifier.webhook_url", "http://example.com").is_ok());
        assert!(validate_url("notifier.webhook_url", "").is_err());
        assert!(validate_url("notifier.webhook_url", "invalid-url").is_err());
        assert!(validate_url("notifier.webhook_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_email_address() {
        assert!(validate_email_address("booking.recipient", "host@studio.dev").is_ok());
        assert!(validate_email_address("booking.recipient", "  ").is_err());
        assert!(validate_email_address("booking.recipient", "no-at-sign").is_err());
        assert!(validate_email_address("booking.recipient", "@studio.dev").is_err());
        assert!(validate_email_address("booking.recipient", "a b@studio.dev").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("notifier.timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("notifier.timeout_seconds", 0u64, 1, 300).is_err());
        assert!(validate_range("notifier.timeout_seconds", 301u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("https://example.com".to_string());
        let missing: Option<String> = None;
        assert!(validate_required_field("notifier.webhook_url", &present).is_ok());
        assert!(matches!(
            validate_required_field("notifier.webhook_url", &missing),
            Err(BookingError::MissingConfigError { .. })
        ));
    }
}
