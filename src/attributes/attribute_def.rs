use super::keys;
use super::{AttributeType, AttributeValue};
use crate::expr::Activation;

/// A built-in attribute: its canonical name, declared type, and typed accessor.
///
/// Built-in attributes are always resolvable; accessors return a value for every
/// user, defaulting to empty rather than absent.
#[derive(Debug)]
pub struct AttributeDef {
    pub name: &'static str,
    pub kind: AttributeType,
    pub extractor: fn(&Activation<'_>) -> AttributeValue,
}

macro_rules! attribute_def {
    ($name:expr, $kind:ident, $extractor:expr) => {
        AttributeDef {
            name: $name,
            kind: AttributeType::$kind,
            extractor: $extractor,
        }
    };
}

pub const ATTRIBUTE_DEFINITIONS: &[AttributeDef] = &[
    attribute_def!(keys::USERNAME, String, |a| a.detailer().username().into()),
    attribute_def!(keys::GROUPS, StringList, |a| AttributeValue::strings(a.detailer().groups())),
    attribute_def!(keys::DISPLAY_NAME, String, |a| a.detailer().display_name().into()),
    // The primary email is always found; users without any email resolve to "".
    attribute_def!(keys::EMAIL, String, |a| a
        .detailer()
        .emails()
        .first()
        .map_or_else(|| AttributeValue::from(""), |email| email.as_str().into())),
    attribute_def!(keys::EMAILS, StringList, |a| AttributeValue::strings(a.detailer().emails())),
    attribute_def!(keys::EMAIL_VERIFIED, Boolean, |a| AttributeValue::Boolean(
        !a.detailer().emails().is_empty()
    )),
    attribute_def!(keys::GIVEN_NAME, String, |a| a.detailer().given_name().into()),
    attribute_def!(keys::MIDDLE_NAME, String, |a| a.detailer().middle_name().into()),
    attribute_def!(keys::FAMILY_NAME, String, |a| a.detailer().family_name().into()),
    attribute_def!(keys::NICKNAME, String, |a| a.detailer().nickname().into()),
    attribute_def!(keys::PROFILE, String, |a| a.detailer().profile().into()),
    attribute_def!(keys::PICTURE, String, |a| a.detailer().picture().into()),
    attribute_def!(keys::WEBSITE, String, |a| a.detailer().website().into()),
    attribute_def!(keys::GENDER, String, |a| a.detailer().gender().into()),
    attribute_def!(keys::BIRTHDATE, String, |a| a.detailer().birthdate().into()),
    attribute_def!(keys::ZONEINFO, String, |a| a.detailer().zoneinfo().into()),
    attribute_def!(keys::LOCALE, String, |a| a.detailer().locale().into()),
    attribute_def!(keys::PHONE_NUMBER, String, |a| a.detailer().phone_number().into()),
    attribute_def!(keys::PHONE_EXTENSION, String, |a| a.detailer().phone_extension().into()),
    attribute_def!(keys::PHONE_NUMBER_RFC3966, String, |a| AttributeValue::String(
        a.rfc3966_phone_number()
    )),
    attribute_def!(keys::PHONE_NUMBER_VERIFIED, Boolean, |a| AttributeValue::Boolean(
        !a.detailer().phone_number().is_empty()
    )),
    attribute_def!(keys::STREET_ADDRESS, String, |a| a.detailer().street_address().into()),
    attribute_def!(keys::LOCALITY, String, |a| a.detailer().locality().into()),
    attribute_def!(keys::REGION, String, |a| a.detailer().region().into()),
    attribute_def!(keys::POSTAL_CODE, String, |a| a.detailer().postal_code().into()),
    attribute_def!(keys::COUNTRY, String, |a| a.detailer().country().into()),
    attribute_def!(keys::ADDRESS, String, |a| AttributeValue::String(a.formatted_address())),
    attribute_def!(keys::UPDATED_AT, Timestamp, |a| AttributeValue::Timestamp(a.updated_at())),
];

/// Look up a built-in attribute by its canonical name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static AttributeDef> {
    ATTRIBUTE_DEFINITIONS.iter().find(|def| def.name == name)
}
