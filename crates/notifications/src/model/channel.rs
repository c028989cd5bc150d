//! Webhook-style channel configurations
//!
//! Slack, Chime and Microsoft Teams are a single URL each. [`Webhook`] adds
//! custom headers and an HTTP method.

use crate::constants::{HEADER_PARAMS_TAG, METHOD_TAG, URL_TAG};
use herald_core::dispatch::{TagRegistry, TaggedVariant};
use herald_core::document::{
    parse_object, required, string_map, DocumentBuilder, FieldAction, FromDocument, ToDocument,
    TokenStream,
};
use herald_core::validation::validate_url;
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

fn parse_url_only(stream: &mut TokenStream, record: &'static str) -> Result<String> {
    let mut url = None;
    parse_object(stream, record, |field, stream| {
        match field {
            URL_TAG => url = Some(stream.text()?),
            _ => return Ok(FieldAction::Skip),
        }
        Ok(FieldAction::Consumed)
    })?;
    Ok(required(url, record, URL_TAG)?)
}

fn url_document(url: &str) -> Value {
    DocumentBuilder::new().field(URL_TAG, url).build()
}

// ============================================================================
// Slack
// ============================================================================

/// Slack incoming webhook
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slack {
    url: String,
}

impl Slack {
    /// Create a Slack config for an http(s) webhook URL
    pub fn new(url: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let url = url.into();
        validate_url(&url, "Slack")?;
        Ok(Slack { url })
    }

    /// Webhook URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Writeable for Slack {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.url);
    }
}

impl Readable for Slack {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(Slack::new(input.read_string()?)?)
    }
}

impl ToDocument for Slack {
    fn to_document(&self) -> Value {
        url_document(&self.url)
    }
}

impl FromDocument for Slack {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        Ok(Slack::new(parse_url_only(stream, "Slack")?)?)
    }
}

// ============================================================================
// Chime
// ============================================================================

/// Amazon Chime webhook
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chime {
    url: String,
}

impl Chime {
    /// Create a Chime config for an http(s) webhook URL
    pub fn new(url: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let url = url.into();
        validate_url(&url, "Chime")?;
        Ok(Chime { url })
    }

    /// Webhook URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Writeable for Chime {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.url);
    }
}

impl Readable for Chime {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(Chime::new(input.read_string()?)?)
    }
}

impl ToDocument for Chime {
    fn to_document(&self) -> Value {
        url_document(&self.url)
    }
}

impl FromDocument for Chime {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        Ok(Chime::new(parse_url_only(stream, "Chime")?)?)
    }
}

// ============================================================================
// MicrosoftTeams
// ============================================================================

/// Microsoft Teams incoming webhook
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MicrosoftTeams {
    url: String,
}

impl MicrosoftTeams {
    /// Create a Teams config for an http(s) webhook URL
    pub fn new(url: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        let url = url.into();
        validate_url(&url, "MicrosoftTeams")?;
        Ok(MicrosoftTeams { url })
    }

    /// Webhook URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Writeable for MicrosoftTeams {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.url);
    }
}

impl Readable for MicrosoftTeams {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(MicrosoftTeams::new(input.read_string()?)?)
    }
}

impl ToDocument for MicrosoftTeams {
    fn to_document(&self) -> Value {
        url_document(&self.url)
    }
}

impl FromDocument for MicrosoftTeams {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        Ok(MicrosoftTeams::new(parse_url_only(stream, "MicrosoftTeams")?)?)
    }
}

// ============================================================================
// Webhook
// ============================================================================

/// HTTP method used by a [`Webhook`]
///
/// Unknown tags resolve to [`HttpMethodType::Post`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethodType {
    /// POST
    #[default]
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
}

/// Tag resolver for [`HttpMethodType`], falling back to POST
pub static HTTP_METHOD_TYPES: TagRegistry<HttpMethodType> =
    TagRegistry::with_fallback(HttpMethodType::Post);

impl TaggedVariant for HttpMethodType {
    const FAMILY: &'static str = "HttpMethodType";
    const ALL: &'static [Self] = &[HttpMethodType::Post, HttpMethodType::Put, HttpMethodType::Patch];

    fn tag(self) -> &'static str {
        match self {
            HttpMethodType::Post => "POST",
            HttpMethodType::Put => "PUT",
            HttpMethodType::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Generic HTTP webhook
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Webhook {
    url: String,
    header_params: BTreeMap<String, String>,
    method: HttpMethodType,
}

impl Webhook {
    /// Create a POST webhook with no custom headers
    pub fn new(url: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        Self::with_options(url, BTreeMap::new(), HttpMethodType::Post)
    }

    /// Create a webhook with headers and method
    pub fn with_options(
        url: impl Into<String>,
        header_params: BTreeMap<String, String>,
        method: HttpMethodType,
    ) -> std::result::Result<Self, ValidationError> {
        let url = url.into();
        validate_url(&url, "Webhook")?;
        Ok(Webhook {
            url,
            header_params,
            method,
        })
    }

    /// Target URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Extra request headers
    pub fn header_params(&self) -> &BTreeMap<String, String> {
        &self.header_params
    }

    /// HTTP method
    pub fn method(&self) -> HttpMethodType {
        self.method
    }
}

impl Writeable for Webhook {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.url);
        out.write_string_map(&self.header_params);
        out.write_enum(self.method);
    }
}

impl Readable for Webhook {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let url = input.read_string()?;
        let header_params = input.read_string_map()?;
        let method = input.read_enum()?;
        Ok(Webhook::with_options(url, header_params, method)?)
    }
}

impl ToDocument for Webhook {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(URL_TAG, self.url.as_str())
            .string_map(HEADER_PARAMS_TAG, &self.header_params)
            .field(METHOD_TAG, self.method.tag())
            .build()
    }
}

impl FromDocument for Webhook {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut url = None;
        let mut header_params = BTreeMap::new();
        let mut method = HttpMethodType::Post;
        parse_object(stream, "Webhook", |field, stream| {
            match field {
                URL_TAG => url = Some(stream.text()?),
                HEADER_PARAMS_TAG => header_params = string_map(stream, "Webhook.header_params")?,
                METHOD_TAG => method = HTTP_METHOD_TYPES.resolve_current(stream)?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let url = required(url, "Webhook", URL_TAG)?;
        Ok(Webhook::with_options(url, header_params, method)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};
    use herald_core::{DocumentError, Error};

    const SLACK_URL: &str = "https://domain.com/sample_slack_url#1234567890";

    #[test]
    fn test_slack_rejects_bad_url() {
        let err = Slack::new("domain.com/no-scheme").unwrap_err();
        assert_eq!(err.message, "Invalid URL or unsupported");
        assert!(Slack::new("ftp://domain.com").is_err());
    }

    #[test]
    fn test_slack_document() {
        let slack = Slack::new(SLACK_URL).unwrap();
        let text = to_json_string(&slack);
        assert_eq!(text, format!(r#"{{"url":"{}"}}"#, SLACK_URL));
        assert_eq!(from_json_str::<Slack>(&text).unwrap(), slack);
    }

    #[test]
    fn test_chime_missing_url() {
        let err = from_json_str::<Chime>(r#"{"uri":"https://x.com"}"#).unwrap_err();
        assert_eq!(
            err,
            Error::Document(DocumentError::MissingField {
                record: "Chime",
                field: "url"
            })
        );
    }

    #[test]
    fn test_teams_binary() {
        let teams = MicrosoftTeams::new("https://outlook.office.com/webhook/abc").unwrap();
        assert_eq!(from_bytes::<MicrosoftTeams>(&to_bytes(&teams)).unwrap(), teams);
    }

    #[test]
    fn test_webhook_defaults_when_only_url() {
        let webhook = from_json_str::<Webhook>(r#"{"url":"https://domain.com/hook"}"#).unwrap();
        assert_eq!(webhook.method(), HttpMethodType::Post);
        assert!(webhook.header_params().is_empty());
    }

    #[test]
    fn test_webhook_full_round_trip() {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("X-Token".to_string(), "secret".to_string());
        let webhook =
            Webhook::with_options("https://domain.com/hook", headers, HttpMethodType::Patch)
                .unwrap();

        assert_eq!(from_bytes::<Webhook>(&to_bytes(&webhook)).unwrap(), webhook);
        assert_eq!(
            from_json_str::<Webhook>(&to_json_string(&webhook)).unwrap(),
            webhook
        );
    }

    #[test]
    fn test_webhook_unknown_method_falls_back() {
        let webhook =
            from_json_str::<Webhook>(r#"{"url":"https://domain.com/hook","method":"DELETE"}"#)
                .unwrap();
        assert_eq!(webhook.method(), HttpMethodType::Post);
    }

    #[test]
    fn test_webhook_binary_rejects_bad_url() {
        let mut out = WireOutput::new();
        out.write_string("not a url");
        out.write_string_map(&BTreeMap::new());
        out.write_enum(HttpMethodType::Put);
        let err = from_bytes::<Webhook>(out.as_bytes()).unwrap_err();
        assert!(err.is_validation());
    }
}
