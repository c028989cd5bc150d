//! Discriminator registries for polymorphic record families
//!
//! A family is a Rust enum of variant payloads plus a fieldless tag enum that
//! names them. Two tables drive decoding:
//!
//! - [`TagRegistry`] turns a tag *string* from a document into a tag value,
//!   applying the family's [`UnknownTagPolicy`].
//! - [`VariantRegistry`] maps a tag value to the functions that decode that
//!   variant's payload from either form.
//!
//! The binary form never consults the string table: it writes the tag's
//! ordinal explicitly and reads it back with [`TaggedVariant::from_ordinal`].
//!
//! ## Unknown Tags
//!
//! Families choose their policy individually. `Reject` turns an unknown tag
//! into [`DocumentError::UnknownTag`]; `Fallback(sentinel)` maps it to a
//! sentinel variant and logs at debug. Neither policy can produce a wrong
//! concrete variant.

use crate::document::{FromDocument, TokenStream};
use crate::error::{DocumentError, Result, WireError};
use crate::wire::{Readable, WireInput};
use std::fmt;
use tracing::debug;

/// A fieldless enum whose variants have stable string tags
///
/// `ALL` fixes the ordinal of each variant on the wire; append new variants
/// at the end.
pub trait TaggedVariant: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Family name used in errors and logs
    const FAMILY: &'static str;

    /// Every variant in ordinal order
    const ALL: &'static [Self];

    /// Document tag for this variant
    fn tag(self) -> &'static str;

    /// Wire ordinal for this variant
    fn ordinal(self) -> u32 {
        Self::ALL
            .iter()
            .position(|v| *v == self)
            .map_or(u32::MAX, |i| i as u32)
    }

    /// Variant for a wire ordinal
    fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Variant for an exact tag
    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.tag() == tag)
    }
}

/// What to do with a tag that is not registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownTagPolicy<T> {
    /// Fail the decode
    Reject,
    /// Map to a sentinel variant
    Fallback(T),
}

/// Tag string resolver for one family
#[derive(Debug, Clone, Copy)]
pub struct TagRegistry<T> {
    policy: UnknownTagPolicy<T>,
}

impl<T> TagRegistry<T> {
    /// Registry that fails on unknown tags
    pub const fn rejecting() -> Self {
        TagRegistry {
            policy: UnknownTagPolicy::Reject,
        }
    }

    /// Registry that maps unknown tags to `sentinel`
    pub const fn with_fallback(sentinel: T) -> Self {
        TagRegistry {
            policy: UnknownTagPolicy::Fallback(sentinel),
        }
    }
}

impl<T: TaggedVariant> TagRegistry<T> {
    /// The policy applied to unknown tags
    pub fn policy(&self) -> UnknownTagPolicy<T> {
        self.policy
    }

    /// Exact lookup, ignoring the policy
    pub fn lookup(&self, tag: &str) -> Option<T> {
        T::from_tag(tag)
    }

    /// Resolve a tag, applying the policy when it is unknown
    pub fn resolve(&self, tag: &str) -> std::result::Result<T, DocumentError> {
        if let Some(value) = T::from_tag(tag) {
            return Ok(value);
        }
        match self.policy {
            UnknownTagPolicy::Reject => Err(DocumentError::UnknownTag {
                family: T::FAMILY,
                tag: tag.to_string(),
            }),
            UnknownTagPolicy::Fallback(sentinel) => {
                debug!(target: "herald::dispatch", family = T::FAMILY, tag, fallback = sentinel.tag(), "Unrecognized tag, using sentinel");
                Ok(sentinel)
            }
        }
    }

    /// Resolve the text under the stream cursor
    pub fn resolve_current(&self, stream: &TokenStream) -> Result<T> {
        let tag = stream.text()?;
        Ok(self.resolve(&tag)?)
    }
}

/// Wire decoder for one variant
pub type ReadFn<V> = fn(&mut WireInput<'_>) -> Result<V>;

/// Document decoder for one variant
pub type ParseFn<V> = fn(&mut TokenStream) -> Result<V>;

/// Decoders for one variant of a family
pub struct VariantCodec<K, V> {
    /// Tag this entry serves
    pub key: K,
    /// Binary payload decoder
    pub read: ReadFn<V>,
    /// Document payload decoder
    pub parse: ParseFn<V>,
}

impl<K, V> VariantCodec<K, V> {
    /// Entry that decodes payload type `T` and wraps it into the family type
    pub const fn of<T>(key: K) -> Self
    where
        T: Readable + FromDocument + Into<V>,
    {
        VariantCodec {
            key,
            read: read_into::<T, V>,
            parse: parse_into::<T, V>,
        }
    }
}

fn read_into<T: Readable + Into<V>, V>(input: &mut WireInput<'_>) -> Result<V> {
    Ok(T::read_from(input)?.into())
}

fn parse_into<T: FromDocument + Into<V>, V>(stream: &mut TokenStream) -> Result<V> {
    Ok(T::parse(stream)?.into())
}

/// Tag → decoder table for one family
pub struct VariantRegistry<K: 'static, V: 'static> {
    family: &'static str,
    codecs: &'static [VariantCodec<K, V>],
}

impl<K, V> VariantRegistry<K, V> {
    /// Create a registry over a static table
    pub const fn new(family: &'static str, codecs: &'static [VariantCodec<K, V>]) -> Self {
        VariantRegistry { family, codecs }
    }
}

impl<K: TaggedVariant, V> VariantRegistry<K, V> {
    /// Family name
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Entry for a tag, if the family has a payload for it
    pub fn codec_for(&self, key: K) -> Option<&'static VariantCodec<K, V>> {
        self.codecs.iter().find(|c| c.key == key)
    }

    /// True if the tag carries a payload in this family
    pub fn contains(&self, key: K) -> bool {
        self.codec_for(key).is_some()
    }

    /// Registered tags in table order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.codecs.iter().map(|c| c.key)
    }

    /// Decode the payload for `key` from the wire form
    pub fn read(&self, key: K, input: &mut WireInput<'_>) -> Result<V> {
        match self.codec_for(key) {
            Some(codec) => (codec.read)(input),
            None => Err(WireError::UnknownOrdinal {
                family: self.family,
                ordinal: key.ordinal(),
            }
            .into()),
        }
    }

    /// Decode the payload for `key` from the document form
    pub fn parse(&self, key: K, stream: &mut TokenStream) -> Result<V> {
        match self.codec_for(key) {
            Some(codec) => (codec.parse)(stream),
            None => Err(DocumentError::UnknownTag {
                family: self.family,
                tag: key.tag().to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse_object, required, DocumentBuilder, FieldAction, ToDocument};
    use crate::error::Error;
    use crate::wire::{to_bytes, WireOutput, Writeable};
    use serde_json::Value;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Shape {
        Unknown,
        Circle,
        Square,
    }

    impl TaggedVariant for Shape {
        const FAMILY: &'static str = "Shape";
        const ALL: &'static [Self] = &[Shape::Unknown, Shape::Circle, Shape::Square];

        fn tag(self) -> &'static str {
            match self {
                Shape::Unknown => "unknown",
                Shape::Circle => "circle",
                Shape::Square => "square",
            }
        }
    }

    #[derive(Debug, PartialEq)]
    struct Circle {
        radius: i32,
    }

    #[derive(Debug, PartialEq)]
    enum Figure {
        Circle(Circle),
    }

    impl From<Circle> for Figure {
        fn from(c: Circle) -> Self {
            Figure::Circle(c)
        }
    }

    impl Writeable for Circle {
        fn write_to(&self, out: &mut WireOutput) {
            out.write_i32(self.radius);
        }
    }

    impl Readable for Circle {
        fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
            Ok(Circle {
                radius: input.read_i32()?,
            })
        }
    }

    impl ToDocument for Circle {
        fn to_document(&self) -> Value {
            DocumentBuilder::new().field("radius", self.radius).build()
        }
    }

    impl FromDocument for Circle {
        fn parse(stream: &mut TokenStream) -> Result<Self> {
            let mut radius = None;
            parse_object(stream, "Circle", |field, stream| {
                match field {
                    "radius" => radius = Some(stream.i32_value()?),
                    _ => return Ok(FieldAction::Skip),
                }
                Ok(FieldAction::Consumed)
            })?;
            Ok(Circle {
                radius: required(radius, "Circle", "radius")?,
            })
        }
    }

    static FIGURE_CODECS: [VariantCodec<Shape, Figure>; 1] =
        [VariantCodec::of::<Circle>(Shape::Circle)];

    static FIGURES: VariantRegistry<Shape, Figure> = VariantRegistry::new("Figure", &FIGURE_CODECS);

    #[test]
    fn test_ordinals_follow_all() {
        assert_eq!(Shape::Unknown.ordinal(), 0);
        assert_eq!(Shape::Square.ordinal(), 2);
        assert_eq!(Shape::from_ordinal(1), Some(Shape::Circle));
        assert_eq!(Shape::from_ordinal(3), None);
    }

    #[test]
    fn test_reject_policy() {
        let registry = TagRegistry::<Shape>::rejecting();
        assert_eq!(registry.resolve("circle").unwrap(), Shape::Circle);
        let err = registry.resolve("hexagon").unwrap_err();
        assert_eq!(
            err,
            DocumentError::UnknownTag {
                family: "Shape",
                tag: "hexagon".to_string()
            }
        );
    }

    #[test]
    fn test_fallback_policy() {
        let registry = TagRegistry::with_fallback(Shape::Unknown);
        assert_eq!(registry.resolve("hexagon").unwrap(), Shape::Unknown);
        assert_eq!(registry.lookup("hexagon"), None);
        assert_eq!(registry.policy(), UnknownTagPolicy::Fallback(Shape::Unknown));
    }

    #[test]
    fn test_variant_registry_binary() {
        let bytes = to_bytes(&Circle { radius: 7 });
        let mut input = WireInput::new(&bytes);
        let figure = FIGURES.read(Shape::Circle, &mut input).unwrap();
        assert_eq!(figure, Figure::Circle(Circle { radius: 7 }));
    }

    #[test]
    fn test_variant_registry_document() {
        let mut stream = TokenStream::from_json_str(r#"{"radius":3}"#).unwrap();
        let figure = FIGURES.parse(Shape::Circle, &mut stream).unwrap();
        assert_eq!(figure, Figure::Circle(Circle { radius: 3 }));
    }

    #[test]
    fn test_variant_registry_missing_entry() {
        assert!(!FIGURES.contains(Shape::Square));
        let mut stream = TokenStream::from_json_str(r#"{}"#).unwrap();
        let err = FIGURES.parse(Shape::Square, &mut stream).unwrap_err();
        assert!(matches!(
            err,
            Error::Document(DocumentError::UnknownTag { family: "Figure", .. })
        ));

        let err = FIGURES.read(Shape::Square, &mut WireInput::new(&[])).unwrap_err();
        assert!(matches!(
            err,
            Error::Wire(WireError::UnknownOrdinal { ordinal: 2, .. })
        ));
    }
}
