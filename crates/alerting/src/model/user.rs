//! Security identity attached to monitors and alerts

use herald_core::document::{
    parse_object, required, string_list, DocumentBuilder, FieldAction, FromDocument, ToDocument,
    TokenStream,
};
use herald_core::wire::{Readable, WireInput, WireOutput, Writeable};
use herald_core::Result;
use serde_json::Value;

const RECORD: &str = "User";

const NAME_TAG: &str = "name";
const BACKEND_ROLES_TAG: &str = "backend_roles";
const ROLES_TAG: &str = "roles";
const CUSTOM_ATTRIBUTE_NAMES_TAG: &str = "custom_attribute_names";
const REQUESTED_TENANT_TAG: &str = "user_requested_tenant";

/// The user a monitor runs as
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct User {
    name: String,
    backend_roles: Vec<String>,
    roles: Vec<String>,
    custom_attribute_names: Vec<String>,
    user_requested_tenant: Option<String>,
}

impl User {
    /// Create a user
    pub fn new(
        name: impl Into<String>,
        backend_roles: Vec<String>,
        roles: Vec<String>,
        custom_attribute_names: Vec<String>,
        user_requested_tenant: Option<String>,
    ) -> Self {
        User {
            name: name.into(),
            backend_roles,
            roles,
            custom_attribute_names,
            user_requested_tenant,
        }
    }

    /// User name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Roles mapped from the authentication backend
    pub fn backend_roles(&self) -> &[String] {
        &self.backend_roles
    }

    /// Security roles
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Names of custom attributes carried by the user
    pub fn custom_attribute_names(&self) -> &[String] {
        &self.custom_attribute_names
    }

    /// Tenant the user asked for, if any
    pub fn user_requested_tenant(&self) -> Option<&str> {
        self.user_requested_tenant.as_deref()
    }
}

impl Writeable for User {
    fn write_to(&self, out: &mut WireOutput) {
        out.write_string(&self.name);
        out.write_string_list(&self.backend_roles);
        out.write_string_list(&self.roles);
        out.write_string_list(&self.custom_attribute_names);
        out.write_optional_string(self.user_requested_tenant.as_deref());
    }
}

impl Readable for User {
    fn read_from(input: &mut WireInput<'_>) -> Result<Self> {
        Ok(User {
            name: input.read_string()?,
            backend_roles: input.read_string_list()?,
            roles: input.read_string_list()?,
            custom_attribute_names: input.read_string_list()?,
            user_requested_tenant: input.read_optional_string()?,
        })
    }
}

impl ToDocument for User {
    fn to_document(&self) -> Value {
        DocumentBuilder::new()
            .field(NAME_TAG, self.name.as_str())
            .string_list(BACKEND_ROLES_TAG, &self.backend_roles)
            .string_list(ROLES_TAG, &self.roles)
            .string_list(CUSTOM_ATTRIBUTE_NAMES_TAG, &self.custom_attribute_names)
            .field(
                REQUESTED_TENANT_TAG,
                self.user_requested_tenant.as_deref().map_or(Value::Null, Value::from),
            )
            .build()
    }
}

impl FromDocument for User {
    fn parse(stream: &mut TokenStream) -> Result<Self> {
        let mut name = None;
        let mut backend_roles = Vec::new();
        let mut roles = Vec::new();
        let mut custom_attribute_names = Vec::new();
        let mut user_requested_tenant = None;
        parse_object(stream, RECORD, |field, stream| {
            match field {
                NAME_TAG => name = Some(stream.text()?),
                BACKEND_ROLES_TAG => backend_roles = string_list(stream)?,
                ROLES_TAG => roles = string_list(stream)?,
                CUSTOM_ATTRIBUTE_NAMES_TAG => custom_attribute_names = string_list(stream)?,
                REQUESTED_TENANT_TAG => user_requested_tenant = stream.text_or_null()?,
                _ => return Ok(FieldAction::Skip),
            }
            Ok(FieldAction::Consumed)
        })?;
        Ok(User::new(
            required(name, RECORD, NAME_TAG)?,
            backend_roles,
            roles,
            custom_attribute_names,
            user_requested_tenant,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_core::document::{from_json_str, to_json_string};
    use herald_core::wire::{from_bytes, to_bytes};

    fn user() -> User {
        User::new(
            "admin",
            vec!["ops".to_string()],
            vec!["all_access".to_string()],
            vec![],
            Some("global".to_string()),
        )
    }

    #[test]
    fn test_round_trip_both_forms() {
        let user = user();
        assert_eq!(from_bytes::<User>(&to_bytes(&user)).unwrap(), user);
        assert_eq!(from_json_str::<User>(&to_json_string(&user)).unwrap(), user);
    }

    #[test]
    fn test_tenant_written_as_null() {
        let user = User::new("u", vec![], vec![], vec![], None);
        let doc = user.to_document();
        assert_eq!(doc["user_requested_tenant"], Value::Null);
        assert_eq!(from_json_str::<User>(&doc.to_string()).unwrap(), user);
    }

    #[test]
    fn test_lists_default_to_empty() {
        let user = from_json_str::<User>(r#"{"name":"u"}"#).unwrap();
        assert!(user.roles().is_empty());
        assert_eq!(user.user_requested_tenant(), None);
    }
}
