//! Canonical names for the built-in user attributes

pub const USERNAME: &str = "username";
pub const GROUPS: &str = "groups";
pub const DISPLAY_NAME: &str = "display_name";
pub const EMAIL: &str = "email";
pub const EMAILS: &str = "emails";
pub const EMAIL_VERIFIED: &str = "email_verified";
pub const GIVEN_NAME: &str = "given_name";
pub const MIDDLE_NAME: &str = "middle_name";
pub const FAMILY_NAME: &str = "family_name";
pub const NICKNAME: &str = "nickname";
pub const PROFILE: &str = "profile";
pub const PICTURE: &str = "picture";
pub const WEBSITE: &str = "website";
pub const GENDER: &str = "gender";
pub const BIRTHDATE: &str = "birthdate";
pub const ZONEINFO: &str = "zoneinfo";
pub const LOCALE: &str = "locale";
pub const PHONE_NUMBER: &str = "phone_number";
pub const PHONE_EXTENSION: &str = "phone_extension";
pub const PHONE_NUMBER_RFC3966: &str = "phone_number_rfc3966";
pub const PHONE_NUMBER_VERIFIED: &str = "phone_number_verified";
pub const STREET_ADDRESS: &str = "street_address";
pub const LOCALITY: &str = "locality";
pub const REGION: &str = "region";
pub const POSTAL_CODE: &str = "postal_code";
pub const COUNTRY: &str = "country";
pub const ADDRESS: &str = "address";
pub const UPDATED_AT: &str = "updated_at";
