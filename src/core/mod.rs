pub mod builder;
pub mod client;
pub mod mailer;

pub use crate::domain::model::{FetchOutcome, RecipientList, SendBody, TemplateBody};
pub use crate::domain::ports::MailerApi;
pub use crate::utils::error::Result;
