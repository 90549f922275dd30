use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("{message}")]
    ValidationError { message: String },

    #[error("Invalid email address(es): {}", .invalid.join(","))]
    InvalidRecipients { invalid: Vec<String> },

    #[error("Network or fetch error: {message}")]
    NetworkError { message: String },

    #[error("HTTP error! status: {status}")]
    HttpStatusError { status: u16 },

    #[error("Failed to parse response as JSON")]
    ResponseParseError,

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl MailerError {
    pub fn validation(message: impl Into<String>) -> Self {
        MailerError::ValidationError {
            message: message.into(),
        }
    }

    /// Errors that abort the whole invocation rather than just the command.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            MailerError::InvalidRecipients { .. }
                | MailerError::ConfigError { .. }
                | MailerError::InvalidConfigValueError { .. }
        )
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_terminal() {
            1
        } else {
            0
        }
    }
}

pub type Result<T> = std::result::Result<T, MailerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_messages() {
        assert_eq!(
            MailerError::HttpStatusError { status: 500 }.to_string(),
            "HTTP error! status: 500"
        );
        assert_eq!(
            MailerError::ResponseParseError.to_string(),
            "Failed to parse response as JSON"
        );
        assert_eq!(
            MailerError::NetworkError {
                message: "connection refused".to_string()
            }
            .to_string(),
            "Network or fetch error: connection refused"
        );
    }

    #[test]
    fn test_invalid_recipients_is_terminal() {
        let err = MailerError::InvalidRecipients {
            invalid: vec!["bad".to_string(), "worse".to_string()],
        };
        assert_eq!(err.to_string(), "Invalid email address(es): bad,worse");
        assert!(err.is_terminal());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_validation_is_recoverable() {
        let err = MailerError::validation("No template data provided");
        assert_eq!(err.to_string(), "No template data provided");
        assert!(!err.is_terminal());
        assert_eq!(err.exit_code(), 0);
    }
}
