//! Email channel configurations

use crate::constants::{
    EMAIL_ACCOUNT_ID_TAG, EMAIL_GROUP_ID_LIST_TAG, RECIPIENT_LIST_TAG, RECIPIENT_TAG,
};
use herald_core::document::{
    object_list, parse_object, required, string_list, DocumentBuilder, FieldAction, FromDocument,
    ToDocument, TokenStream,
};
use herald_core::validation::{require_non_empty, validate_email};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;

/// A single email recipient
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailRecipient {
    recipient: String,
}

impl EmailRecipient {
    /// Create a recipient, validating the address
    pub fn new(recipient: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let recipient = recipient.into();
        validate_email(&recipient, "EmailRecipient")?;
        Ok(EmailRecipient { recipient })
    }

    /// Recipient address
    pub fn recipient(&self) -> &str {
        &self.recipient
    }
}

impl Writeable for EmailRecipient {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.recipient);
    }
}

impl Readable for EmailRecipient {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(EmailRecipient::new(input.read_string()?)?)
    }
}

impl ToDocument for EmailRecipient {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(RECIPIENT_TAG, self.recipient.as_str())
            .build()
    }
}

impl FromDocument for EmailRecipient {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut recipient = None;
        parse_object(stream, "EmailRecipient", |field, stream| {
            match field {
                RECIPIENT_TAG => recipient = Some(stream.text()?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let recipient = required(recipient, "EmailRecipient", RECIPIENT_TAG)?;
        Ok(EmailRecipient::new(recipient)?)
    }
}

/// Email channel: a sending account plus recipients and recipient groups
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email {
    email_account_id: String,
    recipients: Vec<EmailRecipient>,
    email_group_ids: Vec<String>,
}

impl Email {
    /// Create an email channel
    ///
    /// `email_account_id` names the SMTP or SES account config to send from.
    pub fn new(
        email_account_id: impl Into<String>,
        recipients: Vec<EmailRecipient>,
        email_group_ids: Vec<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let email_account_id = email_account_id.into();
        require_non_empty(&email_account_id, "Email", "emailAccountID")?;
        Ok(Email {
            email_account_id,
            recipients,
            email_group_ids,
        })
    }

    /// Sending account config id
    pub fn email_account_id(&self) -> &str {
        &self.email_account_id
    }

    /// Direct recipients
    pub fn recipients(&self) -> &[EmailRecipient] {
        &self.recipients
    }

    /// Email group config ids
    pub fn email_group_ids(&self) -> &[String] {
        &self.email_group_ids
    }
}

impl Writeable for Email {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.email_account_id);
        out.write_list(&self.recipients);
        out.write_string_list(&self.email_group_ids);
    }
}

impl Readable for Email {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let email_account_id = input.read_string()?;
        let recipients = input.read_list()?;
        let email_group_ids = input.read_string_list()?;
        Ok(Email::new(email_account_id, recipients, email_group_ids)?)
    }
}

impl ToDocument for Email {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(EMAIL_ACCOUNT_ID_TAG, self.email_account_id.as_str())
            .object_list(RECIPIENT_LIST_TAG, &self.recipients)
            .string_list(EMAIL_GROUP_ID_LIST_TAG, &self.email_group_ids)
            .build()
    }
}

impl FromDocument for Email {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut email_account_id = None;
        let mut recipients = Vec::new();
        let mut email_group_ids = Vec::new();
        parse_object(stream, "Email", |field, stream| {
            match field {
                EMAIL_ACCOUNT_ID_TAG => email_account_id = Some(stream.text()?),
                RECIPIENT_LIST_TAG => recipients = object_list(stream, EmailRecipient::parse)?,
                EMAIL_GROUP_ID_LIST_TAG => email_group_ids = string_list(stream)?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let email_account_id = required(email_account_id, "Email", EMAIL_ACCOUNT_ID_TAG)?;
        Ok(Email::new(email_account_id, recipients, email_group_ids)?)
    }
}

/// Reusable named list of recipients
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailGroup {
    recipients: Vec<EmailRecipient>,
}

impl EmailGroup {
    /// Create a group
    pub fn new(recipients: Vec<EmailRecipient>) -> Self {
        EmailGroup { recipients }
    }

    /// Group members
    pub fn recipients(&self) -> &[EmailRecipient] {
        &self.recipients
    }
}

impl Writeable for EmailGroup {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_list(&self.recipients);
    }
}

impl Readable for EmailGroup {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(EmailGroup::new(input.read_list()?))
    }
}

impl ToDocument for EmailGroup {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .object_list(RECIPIENT_LIST_TAG, &self.recipients)
            .build()
    }
}

impl FromDocument for EmailGroup {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut recipients = Vec::new();
        parse_object(stream, "EmailGroup", |field, stream| {
            match field {
                RECIPIENT_LIST_TAG => recipients = object_list(stream, EmailRecipient::parse)?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        Ok(EmailGroup::new(recipients))
    }
}
