//! SMTP connection security method
//!
//! Unknown tags resolve to [`MethodType::None`].

use herald_core::dispatch::{TagRegistry, TaggedVariant};
use std::fmt;

/// How an SMTP connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodType {
    /// Plain connection
    None,
    /// Implicit TLS
    Ssl,
    /// STARTTLS upgrade
    StartTls,
}

/// Tag resolver for [`MethodType`], falling back to [`MethodType::None`]
pub static METHOD_TYPES: TagRegistry<MethodType> = TagRegistry::with_fallback(MethodType::None);

impl TaggedVariant for MethodType {
    const FAMILY: &'static str = "MethodType";
    const ALL: &'static [Self] = &[MethodType::None, MethodType::Ssl, MethodType::StartTls];

    fn tag(self) -> &'static str {
        match self {
            MethodType::None => "none",
            MethodType::Ssl => "ssl",
            MethodType::StartTls => "start_tls",
        }
    }
}

impl fmt::Display for MethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
