use crate::utils::error::{MailerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account and endpoint used for every request of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    user: String,
    token: String,
    base_url: String,
}

impl Credentials {
    pub fn new(user: &str, token: &str, base_url: &str) -> Result<Self> {
        if user.is_empty() || token.is_empty() || base_url.is_empty() {
            return Err(MailerError::ConfigError {
                message: "User/token/api-url required".to_string(),
            });
        }

        Ok(Self {
            user: user.to_string(),
            token: token.to_string(),
            base_url: base_url.to_string(),
        })
    }

    /// Parses the `username:token` form accepted on the command line.
    /// Everything after the first `:` belongs to the token.
    pub fn from_token_string(token: Option<&str>, base_url: &str) -> Result<Self> {
        let raw = token.ok_or_else(|| MailerError::ConfigError {
            message: "Authentication token is required".to_string(),
        })?;

        let (user, secret) = raw
            .split_once(':')
            .filter(|(user, secret)| !user.is_empty() && !secret.is_empty())
            .ok_or_else(|| MailerError::ConfigError {
                message: "Invalid token format. Expected \"username:token\"".to_string(),
            })?;

        Self::new(user, secret, base_url)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateRequest {
    pub template: String,
    pub domain: String,
    pub sender: Option<String>,
    pub name: Option<String>,
    pub subject: Option<String>,
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendRequest {
    pub name: String,
    pub rcpt: String,
    pub domain: String,
    pub locale: Option<String>,
    pub vars: Option<Map<String, Value>>,
}

/// Recipients split into parseable addresses and rejected raw tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientList {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// Body of `POST /api/v1/template`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateBody {
    pub template: String,
    pub domain: String,
    pub sender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    pub user: String,
    pub token: String,
}

/// Body of `POST /api/v1/send`. `rcpt` is the caller's raw list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendBody {
    pub name: String,
    pub rcpt: String,
    pub domain: String,
    pub locale: String,
    pub vars: Map<String, Value>,
    pub user: String,
    pub token: String,
}

/// Disposition of a single HTTP call. Exactly one field is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchOutcome {
    result: Option<Value>,
    error: Option<String>,
}

impl FetchOutcome {
    pub fn success(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
        }
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }

    pub fn into_result(self) -> std::result::Result<Value, String> {
        match (self.result, self.error) {
            (Some(value), _) => Ok(value),
            (None, Some(error)) => Err(error),
            (None, None) => Err("empty outcome".to_string()),
        }
    }
}

impl From<Result<Value>> for FetchOutcome {
    fn from(result: Result<Value>) -> Self {
        match result {
            Ok(value) => FetchOutcome::success(value),
            Err(e) => FetchOutcome::failure(e.to_string()),
        }
    }
}
