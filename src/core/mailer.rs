use crate::core::builder::RequestBuilder;
use crate::domain::model::{FetchOutcome, SendRequest, TemplateRequest};
use crate::domain::ports::{AddressParser, MailerApi, TemplateCompiler, TemplateRenderer};
use crate::utils::error::Result;
use serde_json::Value;

/// One invocation: validate, build, post.
pub struct Mailer<T: MailerApi, R, C, A> {
    builder: RequestBuilder<R, C, A>,
    api: T,
}

impl<T, R, C, A> Mailer<T, R, C, A>
where
    T: MailerApi,
    R: TemplateRenderer,
    C: TemplateCompiler,
    A: AddressParser,
{
    pub fn new(builder: RequestBuilder<R, C, A>, api: T) -> Self {
        Self { builder, api }
    }

    /// Transport failures come back as `Err`.
    pub async fn store_template(&self, request: &TemplateRequest) -> Result<Value> {
        tracing::info!("Storing template {:?}", request.name.as_deref().unwrap_or(""));
        let body = self.builder.build_template_request(request)?;
        tracing::debug!("Template body: {}", redacted(serde_json::to_value(&body)?));
        self.api.post_template(&body).await
    }

    /// `Err` only for invalid input; transport failures are in the outcome.
    pub async fn send(&self, request: &SendRequest) -> Result<FetchOutcome> {
        tracing::info!("Sending template {:?}", request.name);
        let body = self.builder.build_send_request(request)?;
        tracing::debug!("Send body: {}", redacted(serde_json::to_value(&body)?));
        Ok(self.api.post_send(&body).await)
    }
}

fn redacted(mut body: Value) -> Value {
    if let Some(token) = body.get_mut("token") {
        *token = Value::String("***".to_string());
    }
    body
}
