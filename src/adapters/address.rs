use crate::domain::ports::{AddressParser, ParsedMailbox};
use lettre::message::Mailbox;

/// RFC 5322 mailbox parsing, with or without a display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct LettreAddressParser;

impl AddressParser for LettreAddressParser {
    fn parse_mailbox(&self, token: &str) -> Option<ParsedMailbox> {
        let mailbox: Mailbox = token.parse().ok()?;
        Some(ParsedMailbox {
            display_name: mailbox.name,
            address: mailbox.email.to_string(),
        })
    }
}
