//! Origin of a notification event

use super::severity::{SeverityType, SEVERITY_TYPES};
use crate::constants::{REFERENCE_ID_TAG, SEVERITY_TAG, TAGS_TAG, TITLE_TAG};
use herald_core::dispatch::TaggedVariant;
use herald_core::document::{
    parse_object, required, string_list, DocumentBuilder, FieldAction, FromDocument, ToDocument,
    TokenStream,
};
use herald_core::validation::require_non_empty;
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;

/// What raised a notification, e.g. an alert or a finished job
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventSource {
    title: String,
    reference_id: String,
    severity: SeverityType,
    tags: Vec<String>,
}

impl EventSource {
    /// Create an event source
    pub fn new(
        title: impl Into<String>,
        reference_id: impl Into<String>,
        severity: SeverityType,
        tags: Vec<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let title = title.into();
        require_non_empty(&title, "EventSource", "title")?;
        Ok(EventSource {
            title,
            reference_id: reference_id.into(),
            severity,
            tags,
        })
    }

    /// Human-readable title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Id of the originating object
    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    /// Severity, `info` unless set
    pub fn severity(&self) -> SeverityType {
        self.severity
    }

    /// Free-form tags
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl Writeable for EventSource {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.title);
        out.write_string(&self.reference_id);
        out.write_enum(self.severity);
        out.write_string_list(&self.tags);
    }
}

impl Readable for EventSource {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let title = input.read_string()?;
        let reference_id = input.read_string()?;
        let severity = input.read_enum()?;
        let tags = input.read_string_list()?;
        Ok(EventSource::new(title, reference_id, severity, tags)?)
    }
}

impl ToDocument for EventSource {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(TITLE_TAG, self.title.as_str())
            .field(REFERENCE_ID_TAG, self.reference_id.as_str())
            .field(SEVERITY_TAG, self.severity.tag())
            .string_list(TAGS_TAG, &self.tags)
            .build()
    }
}

impl FromDocument for EventSource {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut title = None;
        let mut reference_id = None;
        let mut severity = SeverityType::Info;
        let mut tags = Vec::new();
        parse_object(stream, "EventSource", |field, stream| {
            match field {
                TITLE_TAG => title = Some(stream.text()?),
                REFERENCE_ID_TAG => reference_id = Some(stream.text()?),
                SEVERITY_TAG => severity = SEVERITY_TYPES.resolve_current(stream)?,
                TAGS_TAG => tags = string_list(stream)?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let title = required(title, "EventSource", TITLE_TAG)?;
        let reference_id = required(reference_id, "EventSource", REFERENCE_ID_TAG)?;
        Ok(EventSource::new(title, reference_id, severity, tags)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};

    #[test]
    fn test_title_required() {
        assert!(EventSource::new(" ", "ref", SeverityType::Info, vec![]).is_err());
    }

    #[test]
    fn test_defaults_when_parsing() {
        let source =
            from_json_str::<EventSource>(r#"{"title":"t","reference_id":"r"}"#).unwrap();
        assert_eq!(source.severity(), SeverityType::Info);
        assert!(source.tags().is_empty());
    }

    #[test]
    fn test_reference_id_required() {
        let err = from_json_str::<EventSource>(r#"{"title":"t"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "document error: reference_id field absent while parsing EventSource"
        );
    }

    #[test]
    fn test_round_trips() {
        let source = EventSource::new(
            "Monitor tripped",
            "abc-123",
            SeverityType::Critical,
            vec!["prod".to_string(), "cpu".to_string()],
        )
        .unwrap();
        assert_eq!(from_bytes::<EventSource>(&to_bytes(&source)).unwrap(), source);
        assert_eq!(
            from_json_str::<EventSource>(&to_json_string(&source)).unwrap(),
            source
        );
    }
}
