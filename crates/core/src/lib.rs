//! Core codec machinery for herald data contracts
//!
//! This crate defines the pieces every herald record is built from:
//! - Error: structural (wire/document) and semantic (validation) failures
//! - Limits: decode size limits, loadable from TOML
//! - Wire: positional binary form (`Writeable` / `Readable`)
//! - Document: tolerant JSON form (`ToDocument` / `FromDocument`)
//! - Dispatch: tag enums and discriminator registries for record families
//! - Validation: shared construction-time checks (email, URL, ARN)
//! - Request: the pre-dispatch `validate()` surface

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dispatch;
pub mod document;
pub mod error;
pub mod limits;
pub mod request;
pub mod validation;
pub mod wire;

pub use dispatch::{TagRegistry, TaggedVariant, UnknownTagPolicy, VariantCodec, VariantRegistry};
pub use document::{DocumentBuilder, FromDocument, ToDocument, TokenStream};
pub use error::{DocumentError, Error, RequestValidationErrors, Result, ValidationError, WireError};
pub use limits::{Limits, LimitsConfigError};
pub use request::ActionRequest;
pub use wire::{Readable, WireInput, WireOutput, Writeable};
