use crate::Result;
use crate::attributes::{AttributeType, keys};
use ohno::app_err;
use serde::Deserialize;
use std::collections::BTreeMap;

/// An administrator-declared extra attribute carried by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraAttribute {
    pub value_type: String,

    #[serde(default)]
    pub multi_valued: bool,
}

/// The LDAP attribute mapping from configuration.
///
/// Each field names the directory attribute a user detail is read from; an empty
/// mapping means the deployment does not populate that detail.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LdapAttributes {
    pub given_name: String,
    pub middle_name: String,
    pub family_name: String,
    pub nickname: String,
    pub profile: String,
    pub picture: String,
    pub website: String,
    pub gender: String,
    pub birthdate: String,
    pub zoneinfo: String,
    pub locale: String,
    pub phone_number: String,
    pub phone_extension: String,
    pub street_address: String,
    pub locality: String,
    pub region: String,
    pub postal_code: String,
    pub country: String,
    pub extra: BTreeMap<String, ExtraAttribute>,
}

/// An immutable snapshot of which optional attributes the active identity backend
/// populates, plus its extra attribute declarations.
///
/// Derived once from configuration before the resolver is built and never changed
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct BackendCapabilities {
    pub given_name: bool,
    pub middle_name: bool,
    pub family_name: bool,
    pub nickname: bool,
    pub profile: bool,
    pub picture: bool,
    pub website: bool,
    pub gender: bool,
    pub birthdate: bool,
    pub zoneinfo: bool,
    pub locale: bool,
    pub phone_number: bool,
    pub phone_extension: bool,
    pub street_address: bool,
    pub locality: bool,
    pub region: bool,
    pub postal_code: bool,
    pub country: bool,
    pub extra: BTreeMap<String, ExtraAttribute>,
}

impl BackendCapabilities {
    /// Capabilities of a flat-file backend: the full built-in set, unconditionally.
    #[must_use]
    pub fn all(extra: BTreeMap<String, ExtraAttribute>) -> Self {
        Self {
            given_name: true,
            middle_name: true,
            family_name: true,
            nickname: true,
            profile: true,
            picture: true,
            website: true,
            gender: true,
            birthdate: true,
            zoneinfo: true,
            locale: true,
            phone_number: true,
            phone_extension: true,
            street_address: true,
            locality: true,
            region: true,
            postal_code: true,
            country: true,
            extra,
        }
    }

    /// Capabilities of an LDAP backend: an optional attribute is populated exactly
    /// when its directory mapping is configured.
    #[must_use]
    pub fn from_ldap(attributes: &LdapAttributes) -> Self {
        Self {
            given_name: !attributes.given_name.is_empty(),
            middle_name: !attributes.middle_name.is_empty(),
            family_name: !attributes.family_name.is_empty(),
            nickname: !attributes.nickname.is_empty(),
            profile: !attributes.profile.is_empty(),
            picture: !attributes.picture.is_empty(),
            website: !attributes.website.is_empty(),
            gender: !attributes.gender.is_empty(),
            birthdate: !attributes.birthdate.is_empty(),
            zoneinfo: !attributes.zoneinfo.is_empty(),
            locale: !attributes.locale.is_empty(),
            phone_number: !attributes.phone_number.is_empty(),
            phone_extension: !attributes.phone_extension.is_empty(),
            street_address: !attributes.street_address.is_empty(),
            locality: !attributes.locality.is_empty(),
            region: !attributes.region.is_empty(),
            postal_code: !attributes.postal_code.is_empty(),
            country: !attributes.country.is_empty(),
            extra: attributes.extra.clone(),
        }
    }
}

/// A variable made available to attribute expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: AttributeType,
}

impl Declaration {
    fn new(name: &str, kind: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// Build the ordered set of variable declarations for a capability snapshot.
///
/// The core set (username, groups, display name, primary email, email list) is
/// always declared. Optional attributes are declared only when the backend
/// populates them. The composite `address` variable is declared when at least one
/// of its five constituent fields is configured, and `phone_number_rfc3966` when
/// the raw number or the extension is.
///
/// The result is deterministic: the same capabilities always produce the same
/// declaration list.
pub fn build_declarations(capabilities: &BackendCapabilities) -> Result<Vec<Declaration>> {
    let mut declarations = vec![
        Declaration::new(keys::USERNAME, AttributeType::String),
        Declaration::new(keys::GROUPS, AttributeType::StringList),
        Declaration::new(keys::DISPLAY_NAME, AttributeType::String),
        Declaration::new(keys::EMAIL, AttributeType::String),
        Declaration::new(keys::EMAILS, AttributeType::StringList),
    ];

    let optional = [
        (capabilities.given_name, keys::GIVEN_NAME),
        (capabilities.middle_name, keys::MIDDLE_NAME),
        (capabilities.family_name, keys::FAMILY_NAME),
        (capabilities.nickname, keys::NICKNAME),
        (capabilities.profile, keys::PROFILE),
        (capabilities.picture, keys::PICTURE),
        (capabilities.website, keys::WEBSITE),
        (capabilities.gender, keys::GENDER),
        (capabilities.birthdate, keys::BIRTHDATE),
        (capabilities.zoneinfo, keys::ZONEINFO),
        (capabilities.locale, keys::LOCALE),
        (capabilities.phone_number, keys::PHONE_NUMBER),
        (capabilities.phone_extension, keys::PHONE_EXTENSION),
    ];

    for (populated, name) in optional {
        if populated {
            declarations.push(Declaration::new(name, AttributeType::String));
        }
    }

    if capabilities.phone_number || capabilities.phone_extension {
        declarations.push(Declaration::new(keys::PHONE_NUMBER_RFC3966, AttributeType::String));
    }

    let postal = [
        (capabilities.street_address, keys::STREET_ADDRESS),
        (capabilities.locality, keys::LOCALITY),
        (capabilities.region, keys::REGION),
        (capabilities.postal_code, keys::POSTAL_CODE),
        (capabilities.country, keys::COUNTRY),
    ];

    for (populated, name) in postal {
        if populated {
            declarations.push(Declaration::new(name, AttributeType::String));
        }
    }

    if postal.iter().any(|(populated, _)| *populated) {
        declarations.push(Declaration::new(keys::ADDRESS, AttributeType::String));
    }

    for (name, extra) in &capabilities.extra {
        declarations.push(Declaration::new(name, extra_attribute_type(name, extra)?));
    }

    Ok(declarations)
}

fn extra_attribute_type(name: &str, extra: &ExtraAttribute) -> Result<AttributeType> {
    let kind = match (extra.value_type.as_str(), extra.multi_valued) {
        ("string", false) => AttributeType::String,
        ("string", true) => AttributeType::StringList,
        ("integer", false) => AttributeType::Integer,
        ("integer", true) => AttributeType::IntegerList,
        ("boolean", false) => AttributeType::Boolean,
        ("boolean", true) => AttributeType::BooleanList,
        (other, _) => {
            return Err(app_err!("unknown value type '{other}' declared for extra attribute '{name}'"));
        }
    };

    Ok(kind)
}
