// Application layer: wires configuration, adapters and the core together for
// a single command-line invocation.

use crate::config::input::read_template_data;
use crate::config::{CliConfig, Command};
use crate::core::builder::RequestBuilder;
use crate::core::client::TransportClient;
use crate::core::mailer::Mailer;
use crate::domain::model::{Credentials, FetchOutcome};
use crate::utils::error::Result;
use serde_json::Value;

/// What a successfully dispatched command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Stored(Value),
    Sent(FetchOutcome),
}

impl CommandOutput {
    /// The single line (or pretty JSON block) printed on stdout.
    pub fn render(&self) -> String {
        let response = |value: &Value| {
            let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            format!("Response: {}", pretty)
        };

        match self {
            CommandOutput::Stored(value) => response(value),
            CommandOutput::Sent(outcome) => match (outcome.result(), outcome.error()) {
                (Some(value), _) => response(value),
                (None, Some(error)) => error.to_string(),
                (None, None) => String::new(),
            },
        }
    }
}

pub async fn run(config: &CliConfig) -> Result<CommandOutput> {
    let settings = config.settings()?;
    tracing::debug!("Effective settings: {:?}", settings);

    let credentials = Credentials::from_token_string(settings.token.as_deref(), &settings.api)?;
    let client = TransportClient::from_credentials(&credentials, settings.timeout())?;
    let mailer = Mailer::new(RequestBuilder::with_defaults(credentials), client);

    match config.command {
        Command::Template => {
            let template = read_template_data(config.file.as_deref())?;
            let request = config.template_request(&settings, template);
            let result = mailer.store_template(&request).await?;
            Ok(CommandOutput::Stored(result))
        }
        Command::Send => {
            let request = config.send_request(&settings)?;
            let outcome = mailer.send(&request).await?;
            Ok(CommandOutput::Sent(outcome))
        }
    }
}
