use crate::utils::error::{MailerError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// `Display Name <user@domain.tld>`. Kept loose: any non-bracket text, an
/// `@` and a dot inside the brackets.
const SENDER_PATTERN: &str = r"^[^<>]+<[^<>]+@[^<>]+\.[^<>]+>$";

static SENDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SENDER_PATTERN).expect("valid sender pattern"));

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MailerError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MailerError::InvalidConfigValueError {
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
        return Err(MailerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_sender(sender: &str) -> Result<()> {
    if !SENDER_RE.is_match(sender) {
        return Err(MailerError::validation(
            "Invalid sender format. Expected \"Name <email@example.com>\"",
        ));
    }
    Ok(())
}
