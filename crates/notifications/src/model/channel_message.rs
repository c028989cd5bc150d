//! Message body delivered to a channel

use crate::constants::{
    ATTACHMENT_TAG, FILE_CONTENT_TYPE_TAG, FILE_DATA_TAG, FILE_ENCODING_TAG, FILE_NAME_TAG,
    HTML_DESCRIPTION_TAG, TEXT_DESCRIPTION_TAG,
};
use herald_core::document::{
    parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument, TokenStream,
};
use herald_core::validation::require_non_empty;
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;

/// File attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attachment {
    file_name: String,
    file_encoding: String,
    file_data: String,
    file_content_type: Option<String>,
}

impl Attachment {
    /// Create an attachment; `file_data` is already encoded per `file_encoding`
    pub fn new(
        file_name: impl Into<String>,
        file_encoding: impl Into<String>,
        file_data: impl Into<String>,
        file_content_type: Option<String>,
    ) -> Self {
        Attachment {
            file_name: file_name.into(),
            file_encoding: file_encoding.into(),
            file_data: file_data.into(),
            file_content_type,
        }
    }

    /// File name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Encoding of `file_data`, e.g. `base64`
    pub fn file_encoding(&self) -> &str {
        &self.file_encoding
    }

    /// Encoded file contents
    pub fn file_data(&self) -> &str {
        &self.file_data
    }

    /// MIME type, if known
    pub fn file_content_type(&self) -> Option<&str> {
        self.file_content_type.as_deref()
    }
}

impl Writeable for Attachment {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.file_name);
        out.write_string(&self.file_encoding);
        out.write_string(&self.file_data);
        out.write_optional_string(self.file_content_type.as_deref());
    }
}

impl Readable for Attachment {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(Attachment::new(
            input.read_string()?,
            input.read_string()?,
            input.read_string()?,
            input.read_optional_string()?,
        ))
    }
}

impl ToDocument for Attachment {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(FILE_NAME_TAG, self.file_name.as_str())
            .field(FILE_ENCODING_TAG, self.file_encoding.as_str())
            .field(FILE_DATA_TAG, self.file_data.as_str())
            .field_if_some(FILE_CONTENT_TYPE_TAG, self.file_content_type.as_deref())
            .build()
    }
}

impl FromDocument for Attachment {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut file_name = None;
        let mut file_encoding = None;
        let mut file_data = None;
        let mut file_content_type = None;
        parse_object(stream, "Attachment", |field, stream| {
            match field {
                FILE_NAME_TAG => file_name = Some(stream.text()?),
                FILE_ENCODING_TAG => file_encoding = Some(stream.text()?),
                FILE_DATA_TAG => file_data = Some(stream.text()?),
                FILE_CONTENT_TYPE_TAG => file_content_type = stream.text_or_null()?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        Ok(Attachment::new(
            required(file_name, "Attachment", FILE_NAME_TAG)?,
            required(file_encoding, "Attachment", FILE_ENCODING_TAG)?,
            required(file_data, "Attachment", FILE_DATA_TAG)?,
            file_content_type,
        ))
    }
}

/// Text, optional HTML and optional attachment sent to a channel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelMessage {
    text_description: String,
    html_description: Option<String>,
    attachment: Option<Attachment>,
}

impl ChannelMessage {
    /// Create a message; the text body is mandatory
    pub fn new(
        text_description: impl Into<String>,
        html_description: Option<String>,
        attachment: Option<Attachment>,
    ) -> std::result::Result<Self, ValidationError> {
        let text_description = text_description.into();
        require_non_empty(&text_description, "ChannelMessage", "text message")?;
        Ok(ChannelMessage {
            text_description,
            html_description,
            attachment,
        })
    }

    /// Plain text body
    pub fn text_description(&self) -> &str {
        &self.text_description
    }

    /// HTML body, if any
    pub fn html_description(&self) -> Option<&str> {
        self.html_description.as_deref()
    }

    /// Attachment, if any
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}

impl Writeable for ChannelMessage {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.text_description);
        out.write_optional_string(self.html_description.as_deref());
        out.write_optional(self.attachment.as_ref());
    }
}

impl Readable for ChannelMessage {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let text_description = input.read_string()?;
        let html_description = input.read_optional_string()?;
        let attachment = input.read_optional()?;
        Ok(ChannelMessage::new(
            text_description,
            html_description,
            attachment,
        )?)
    }
}

impl ToDocument for ChannelMessage {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(TEXT_DESCRIPTION_TAG, self.text_description.as_str())
            .field_if_some(HTML_DESCRIPTION_TAG, self.html_description.as_deref())
            .object_if_some(ATTACHMENT_TAG, self.attachment.as_ref())
            .build()
    }
}

impl FromDocument for ChannelMessage {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut text_description = None;
        let mut html_description = None;
        let mut attachment = None;
        parse_object(stream, "ChannelMessage", |field, stream| {
            match field {
                TEXT_DESCRIPTION_TAG => text_description = Some(stream.text()?),
                HTML_DESCRIPTION_TAG => html_description = stream.text_or_null()?,
                ATTACHMENT_TAG => attachment = Some(Attachment::parse(stream)?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let text_description = required(text_description, "ChannelMessage", TEXT_DESCRIPTION_TAG)?;
        Ok(ChannelMessage::new(
            text_description,
            html_description,
            attachment,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};

    fn full_message() -> ChannelMessage {
        ChannelMessage::new(
            "Disk usage above 90%",
            Some("<b>Disk usage</b> above 90%".to_string()),
            Some(Attachment::new(
                "report.csv",
                "base64",
                "aG9zdCx1c2FnZQ==",
                Some("text/csv".to_string()),
            )),
        )
        .unwrap()
    }

    #[test]
    fn test_text_required() {
        let err = ChannelMessage::new("", None, None).unwrap_err();
        assert_eq!(err.message, "text message is null or empty");
    }

    #[test]
    fn test_round_trips() {
        let message = full_message();
        assert_eq!(from_bytes::<ChannelMessage>(&to_bytes(&message)).unwrap(), message);
        assert_eq!(
            from_json_str::<ChannelMessage>(&to_json_string(&message)).unwrap(),
            message
        );
    }

    #[test]
    fn test_text_only() {
        let message = from_json_str::<ChannelMessage>(r#"{"text_description":"hi"}"#).unwrap();
        assert_eq!(message.html_description(), None);
        assert_eq!(message.attachment(), None);
        assert_eq!(to_json_string(&message), r#"{"text_description":"hi"}"#);
    }

    #[test]
    fn test_attachment_requires_data() {
        let err = from_json_str::<ChannelMessage>(
            r#"{"text_description":"hi","attachment":{"file_name":"a","file_encoding":"b"}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("file_data field absent"));
    }
}
