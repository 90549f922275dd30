pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{Overrides, Settings};
pub use core::{builder::RequestBuilder, client::TransportClient, mailer::Mailer};
pub use domain::model::{
    Credentials, FetchOutcome, RecipientList, SendBody, SendRequest, TemplateBody,
    TemplateRequest,
};
pub use utils::error::{MailerError, Result};
