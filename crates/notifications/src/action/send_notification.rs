//! Send a message to one or more channels

use crate::constants::{
    CHANNEL_ID_LIST_TAG, CHANNEL_MESSAGE_TAG, EVENT_SOURCE_TAG, THREAD_CONTEXT_TAG,
};
use crate::model::{ChannelMessage, EventSource};
use herald_core::document::{
    parse_object, required, string_list, DocumentBuilder, FieldAction, FromDocument, ToDocument,
    TokenStream,
};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{ActionRequest, RequestValidationErrors, Result};
use serde_json::Value;

const RECORD: &str = "SendNotificationRequest";

/// Deliver `channel_message` about `event_source` to every channel in `channel_ids`
///
/// An empty channel list is a well-formed request; [`ActionRequest::validate`]
/// reports it before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendNotificationRequest {
    event_source: EventSource,
    channel_message: ChannelMessage,
    channel_ids: Vec<String>,
    thread_context: Option<String>,
}

impl SendNotificationRequest {
    /// Create a request
    ///
    /// `thread_context` carries the caller's serialized user context.
    pub fn new(
        event_source: EventSource,
        channel_message: ChannelMessage,
        channel_ids: Vec<String>,
        thread_context: Option<String>,
    ) -> Self {
        SendNotificationRequest {
            event_source,
            channel_message,
            channel_ids,
            thread_context,
        }
    }

    /// Event being notified about
    pub fn event_source(&self) -> &EventSource {
        &self.event_source
    }

    /// Message to deliver
    pub fn channel_message(&self) -> &ChannelMessage {
        &self.channel_message
    }

    /// Target channel config ids
    pub fn channel_ids(&self) -> &[String] {
        &self.channel_ids
    }

    /// Caller user context, if any
    pub fn thread_context(&self) -> Option<&str> {
        self.thread_context.as_deref()
    }
}

impl ActionRequest for SendNotificationRequest {
    fn validate(&self) -> Option<RequestValidationErrors> {
        let mut errors = None;
        if self.channel_ids.is_empty() {
            errors = RequestValidationErrors::add(errors, "channelIds is empty");
        }
        errors
    }
}

impl Writeable for SendNotificationRequest {
    fn write_to(&self, out: &mut WireOutput) {
        self.event_source.write_to(out);
        self.channel_message.write_to(out);
        out.write_string_list(&self.channel_ids);
        out.write_optional_string(self.thread_context.as_deref());
    }
}

impl Readable for SendNotificationRequest {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let event_source = EventSource::read_from(input)?;
        let channel_message = ChannelMessage::read_from(input)?;
        let channel_ids = input.read_string_list()?;
        let thread_context = input.read_optional_string()?;
        Ok(SendNotificationRequest::new(
            event_source,
            channel_message,
            channel_ids,
            thread_context,
        ))
    }
}

impl ToDocument for SendNotificationRequest {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .object(EVENT_SOURCE_TAG, &self.event_source)
            .object(CHANNEL_MESSAGE_TAG, &self.channel_message)
            .string_list(CHANNEL_ID_LIST_TAG, &self.channel_ids)
            .field_if_some(THREAD_CONTEXT_TAG, self.thread_context.as_deref())
            .build()
    }
}

impl FromDocument for SendNotificationRequest {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut event_source = None;
        let mut channel_message = None;
        let mut channel_ids = None;
        let mut thread_context = None;
        parse_object(stream, RECORD, |field, stream| {
            match field {
                EVENT_SOURCE_TAG => event_source = Some(EventSource::parse(stream)?),
                CHANNEL_MESSAGE_TAG => channel_message = Some(ChannelMessage::parse(stream)?),
                CHANNEL_ID_LIST_TAG => channel_ids = Some(string_list(stream)?),
                THREAD_CONTEXT_TAG => thread_context = stream.text_or_null()?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let event_source = required(event_source, RECORD, EVENT_SOURCE_TAG)?;
        let channel_message = required(channel_message, RECORD, CHANNEL_MESSAGE_TAG)?;
        let channel_ids = required(channel_ids, RECORD, CHANNEL_ID_LIST_TAG)?;
        Ok(SendNotificationRequest::new(
            event_source,
            channel_message,
            channel_ids,
            thread_context,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeverityType;
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};

    fn request(channel_ids: Vec<String>, context: Option<&str>) -> SendNotificationRequest {
        SendNotificationRequest::new(
            EventSource::new("title", "reference_id", SeverityType::High, vec![]).unwrap(),
            ChannelMessage::new("text", None, None).unwrap(),
            channel_ids,
            context.map(str::to_string),
        )
    }

    #[test]
    fn test_empty_channel_ids_fail_validation() {
        let errors = request(vec![], None).validate().unwrap();
        assert_eq!(errors.errors(), &["channelIds is empty".to_string()]);
    }

    #[test]
    fn test_round_trip_with_context() {
        let request = request(vec!["channel_1".to_string()], Some("user_context"));
        assert_eq!(request.validate(), None);

        let from_wire = from_bytes::<SendNotificationRequest>(&to_bytes(&request)).unwrap();
        assert_eq!(from_wire, request);
        assert_eq!(from_wire.thread_context(), Some("user_context"));

        let from_doc =
            from_json_str::<SendNotificationRequest>(&to_json_string(&request)).unwrap();
        assert_eq!(from_doc, request);
        assert_eq!(from_doc.thread_context(), Some("user_context"));
    }

    #[test]
    fn test_required_fields() {
        let full = request(vec!["c".to_string()], None).to_document();
        for tag in [EVENT_SOURCE_TAG, CHANNEL_MESSAGE_TAG, CHANNEL_ID_LIST_TAG] {
            let mut doc = full.clone();
            doc.as_object_mut().unwrap().remove(tag);
            let err = from_json_str::<SendNotificationRequest>(&doc.to_string()).unwrap_err();
            assert!(
                err.to_string().contains(&format!("{} field absent", tag)),
                "{}",
                err
            );
        }
    }

    #[test]
    fn test_context_is_optional() {
        let request = request(vec!["c".to_string()], None);
        assert!(!to_json_string(&request).contains("context"));
    }
}
