use crate::domain::model::{FetchOutcome, SendBody, TemplateBody};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Failure reported by a template engine, carried as its message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CapabilityError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileIssue {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    pub errors: Vec<CompileIssue>,
}

impl CompileReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMailbox {
    pub display_name: Option<String>,
    pub address: String,
}

pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> std::result::Result<String, CapabilityError>;
}

pub trait TemplateCompiler: Send + Sync {
    fn compile(&self, template: &str) -> CompileReport;
}

pub trait AddressParser: Send + Sync {
    /// `None` when `token` is not exactly one mailbox.
    fn parse_mailbox(&self, token: &str) -> Option<ParsedMailbox>;
}

/// The two remote endpoints. Template storage surfaces failures as `Err`,
/// sends report them inside the returned outcome.
#[async_trait]
pub trait MailerApi: Send + Sync {
    async fn post_template(&self, body: &TemplateBody) -> Result<Value>;
    async fn post_send(&self, body: &SendBody) -> FetchOutcome;
}
