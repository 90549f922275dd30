use crate::config::input::parse_vars;
use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::domain::model::{SendRequest, TemplateRequest};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "mjml-mailer")]
#[command(about = "Store MJML templates on a mailer service and send them to recipients")]
#[command(version)]
pub struct CliConfig {
    /// Base API endpoint [default: http://localhost:3000]
    #[arg(short = 'a', long, global = true)]
    pub api: Option<String>,

    /// Authentication token in the format "username:token"
    #[arg(short = 't', long, global = true)]
    pub token: Option<String>,

    /// Template file (Nunjucks with MJML); stdin is read when omitted
    #[arg(short = 'f', long, global = true)]
    pub file: Option<PathBuf>,

    /// Sender, e.g. "Name <email@example.com>"
    #[arg(short = 's', long, global = true)]
    pub sender: Option<String>,

    /// Recipient email addresses (comma-separated)
    #[arg(short = 'r', long, global = true)]
    pub rcpt: Option<String>,

    /// Template name
    #[arg(short = 'n', long, global = true)]
    pub name: Option<String>,

    /// Email subject
    #[arg(short = 'b', long, global = true)]
    pub subject: Option<String>,

    #[arg(short = 'l', long, global = true)]
    pub locale: Option<String>,

    #[arg(short = 'd', long, global = true)]
    pub domain: Option<String>,

    /// Template parameters (JSON object)
    #[arg(short = 'v', long, global = true)]
    pub vars: Option<String>,

    /// TOML settings file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds [default: 30]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Store a template on the server
    Template,
    /// Send a template to recipients
    Send,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            api: self.api.clone(),
            token: self.token.clone(),
            timeout_seconds: self.timeout,
            domain: self.domain.clone(),
            locale: self.locale.clone(),
            sender: self.sender.clone(),
        }
    }

    /// Loads `--config` if given and layers the flags on top.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Some(config)
            }
            None => None,
        };

        let settings = Settings::resolve(&self.overrides(), file.as_ref());
        settings.validate()?;
        Ok(settings)
    }

    pub fn template_request(&self, settings: &Settings, template: String) -> TemplateRequest {
        TemplateRequest {
            template,
            domain: settings.domain.clone(),
            sender: settings.sender.clone(),
            name: self.name.clone(),
            subject: self.subject.clone(),
            locale: settings.locale.clone(),
        }
    }

    pub fn send_request(&self, settings: &Settings) -> Result<SendRequest> {
        Ok(SendRequest {
            name: self.name.clone().unwrap_or_default(),
            rcpt: self.rcpt.clone().unwrap_or_default(),
            domain: settings.domain.clone(),
            locale: settings.locale.clone(),
            vars: parse_vars(self.vars.as_deref())?,
        })
    }
}
