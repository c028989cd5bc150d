//! AWS-backed channels: SNS topics and SES sending accounts

use crate::constants::{FROM_ADDRESS_TAG, REGION_TAG, ROLE_ARN_TAG, TOPIC_ARN_TAG};
use herald_core::document::{
    parse_object, required, DocumentBuilder, FieldAction, FromDocument, ToDocument, TokenStream,
};
use herald_core::validation::{require_non_empty, validate_arn, validate_email};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::{Result, ValidationError};
use serde_json::Value;

fn validate_role_arn(role_arn: Option<&str>, record: &'static str) -> std::result::Result<(), ValidationError> {
    match role_arn {
        Some(arn) => validate_arn(arn, "iam", record),
        None => Ok(()),
    }
}

/// Amazon SNS topic
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sns {
    topic_arn: String,
    role_arn: Option<String>,
}

impl Sns {
    /// Create an SNS channel, optionally assuming `role_arn` to publish
    pub fn new(
        topic_arn: impl Into<String>,
        role_arn: Option<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let topic_arn = topic_arn.into();
        validate_arn(&topic_arn, "sns", "Sns")?;
        validate_role_arn(role_arn.as_deref(), "Sns")?;
        Ok(Sns {
            topic_arn,
            role_arn,
        })
    }

    /// Topic ARN
    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }

    /// IAM role to assume, if any
    pub fn role_arn(&self) -> Option<&str> {
        self.role_arn.as_deref()
    }
}

impl Writeable for Sns {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.topic_arn);
        out.write_optional_string(self.role_arn.as_deref());
    }
}

impl Readable for Sns {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let topic_arn = input.read_string()?;
        let role_arn = input.read_optional_string()?;
        Ok(Sns::new(topic_arn, role_arn)?)
    }
}

impl ToDocument for Sns {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(TOPIC_ARN_TAG, self.topic_arn.as_str())
            .field_if_some(ROLE_ARN_TAG, self.role_arn.as_deref())
            .build()
    }
}

impl FromDocument for Sns {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut topic_arn = None;
        let mut role_arn = None;
        parse_object(stream, "Sns", |field, stream| {
            match field {
                TOPIC_ARN_TAG => topic_arn = Some(stream.text()?),
                ROLE_ARN_TAG => role_arn = stream.text_or_null()?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let topic_arn = required(topic_arn, "Sns", TOPIC_ARN_TAG)?;
        Ok(Sns::new(topic_arn, role_arn)?)
    }
}

/// Amazon SES sending account
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SesAccount {
    region: String,
    role_arn: Option<String>,
    from_address: String,
}

impl SesAccount {
    /// Create an SES account
    pub fn new(
        region: impl Into<String>,
        role_arn: Option<String>,
        from_address: impl Into<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let region = region.into();
        let from_address = from_address.into();
        require_non_empty(&region, "SesAccount", "region")?;
        validate_role_arn(role_arn.as_deref(), "SesAccount")?;
        validate_email(&from_address, "SesAccount")?;
        Ok(SesAccount {
            region,
            role_arn,
            from_address,
        })
    }

    /// AWS region
    pub fn region(&self) -> &str {
        &self.region
    }

    /// IAM role to assume, if any
    pub fn role_arn(&self) -> Option<&str> {
        self.role_arn.as_deref()
    }

    /// Sender address
    pub fn from_address(&self) -> &str {
        &self.from_address
    }
}

impl Writeable for SesAccount {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.region);
        out.write_optional_string(self.role_arn.as_deref());
        out.write_string(&self.from_address);
    }
}

impl Readable for SesAccount {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        let region = input.read_string()?;
        let role_arn = input.read_optional_string()?;
        let from_address = input.read_string()?;
        Ok(SesAccount::new(region, role_arn, from_address)?)
    }
}

impl ToDocument for SesAccount {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(REGION_TAG, self.region.as_str())
            .field_if_some(ROLE_ARN_TAG, self.role_arn.as_deref())
            .field(FROM_ADDRESS_TAG, self.from_address.as_str())
            .build()
    }
}

impl FromDocument for SesAccount {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut region = None;
        let mut role_arn = None;
        let mut from_address = None;
        parse_object(stream, "SesAccount", |field, stream| {
            match field {
                REGION_TAG => region = Some(stream.text()?),
                ROLE_ARN_TAG => role_arn = stream.text_or_null()?,
                FROM_ADDRESS_TAG => from_address = Some(stream.text()?),
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        let region = required(region, "SesAccount", REGION_TAG)?;
        let from_address = required(from_address, "SesAccount", FROM_ADDRESS_TAG)?;
        Ok(SesAccount::new(region, role_arn, from_address)?)
    }
}
