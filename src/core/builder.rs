use crate::adapters::{LettreAddressParser, MiniJinjaRenderer, MrmlCompiler};
use crate::domain::model::{
    Credentials, RecipientList, SendBody, SendRequest, TemplateBody, TemplateRequest,
};
use crate::domain::ports::{AddressParser, TemplateCompiler, TemplateRenderer};
use crate::utils::error::{MailerError, Result};
use crate::utils::validation::validate_sender;

/// Validates raw request fields and assembles request bodies. Never touches
/// the network.
pub struct RequestBuilder<R = MiniJinjaRenderer, C = MrmlCompiler, A = LettreAddressParser> {
    credentials: Credentials,
    renderer: R,
    compiler: C,
    address_parser: A,
}

impl RequestBuilder {
    pub fn with_defaults(credentials: Credentials) -> Self {
        Self::new(
            credentials,
            MiniJinjaRenderer::new(),
            MrmlCompiler,
            LettreAddressParser,
        )
    }
}

impl<R: TemplateRenderer, C: TemplateCompiler, A: AddressParser> RequestBuilder<R, C, A> {
    pub fn new(credentials: Credentials, renderer: R, compiler: C, address_parser: A) -> Self {
        Self {
            credentials,
            renderer,
            compiler,
            address_parser,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn build_template_request(&self, data: &TemplateRequest) -> Result<TemplateBody> {
        if data.template.is_empty() {
            return Err(MailerError::validation("No template data provided"));
        }

        self.validate_template(&data.template)?;

        let sender = data.sender.clone().unwrap_or_default();
        if !sender.is_empty() {
            validate_sender(&sender)?;
        }

        Ok(TemplateBody {
            template: data.template.clone(),
            domain: data.domain.clone(),
            sender,
            name: data.name.clone(),
            subject: data.subject.clone(),
            locale: data.locale.clone(),
            user: self.credentials.user().to_string(),
            token: self.credentials.token().to_string(),
        })
    }

    pub fn validate_recipients(&self, rcpt: &str) -> RecipientList {
        let mut recipients = RecipientList::default();

        for token in rcpt.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match self.address_parser.parse_mailbox(token) {
                Some(mailbox) if !mailbox.address.is_empty() => {
                    recipients.valid.push(mailbox.address)
                }
                _ => recipients.invalid.push(token.to_string()),
            }
        }

        recipients
    }

    pub fn build_send_request(&self, data: &SendRequest) -> Result<SendBody> {
        if data.name.is_empty() || data.rcpt.is_empty() {
            return Err(MailerError::validation("Invalid request body"));
        }

        let recipients = self.validate_recipients(&data.rcpt);
        if !recipients.invalid.is_empty() {
            tracing::warn!("Rejecting send: {} invalid recipient(s)", recipients.invalid.len());
            return Err(MailerError::InvalidRecipients {
                invalid: recipients.invalid,
            });
        }
        tracing::debug!("Send to {} recipient(s)", recipients.valid.len());

        Ok(SendBody {
            name: data.name.clone(),
            rcpt: data.rcpt.clone(),
            domain: data.domain.clone(),
            locale: data.locale.clone().unwrap_or_default(),
            vars: data.vars.clone().unwrap_or_default(),
            user: self.credentials.user().to_string(),
            token: self.credentials.token().to_string(),
        })
    }

    fn validate_template(&self, template: &str) -> Result<()> {
        let mut problems = Vec::new();

        if let Err(e) = self.renderer.render(template, &serde_json::json!({})) {
            problems.push(e.to_string());
        }

        let report = self.compiler.compile(template);
        if !report.is_clean() {
            let messages: Vec<&str> = report.errors.iter().map(|e| e.message.as_str()).collect();
            problems.push(format!("MJML validation errors: {}", messages.join(", ")));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(MailerError::validation(format!(
                "Template validation failed: {}",
                problems.join(", ")
            )))
        }
    }
}
