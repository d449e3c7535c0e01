use super::UserDetailer;
use crate::attributes::AttributeValue;
use std::collections::BTreeMap;

/// An owned, in-memory set of user details.
///
/// This is the record shape a flat-file backend produces after loading its user
/// database, and the fixture type used throughout the crate's tests.
#[derive(Debug, Clone, Default)]
pub struct StaticUserDetails {
    pub username: String,
    pub groups: Vec<String>,
    pub display_name: String,
    pub emails: Vec<String>,
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
    pub extra: BTreeMap<String, AttributeValue>,
}

impl UserDetailer for StaticUserDetails {
    fn username(&self) -> &str {
        &self.username
    }

    fn groups(&self) -> &[String] {
        &self.groups
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn emails(&self) -> &[String] {
        &self.emails
    }

    fn given_name(&self) -> &str {
        &self.given_name
    }

    fn middle_name(&self) -> &str {
        &self.middle_name
    }

    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn nickname(&self) -> &str {
        &self.nickname
    }

    fn profile(&self) -> &str {
        &self.profile
    }

    fn picture(&self) -> &str {
        &self.picture
    }

    fn website(&self) -> &str {
        &self.website
    }

    fn gender(&self) -> &str {
        &self.gender
    }

    fn birthdate(&self) -> &str {
        &self.birthdate
    }

    fn zoneinfo(&self) -> &str {
        &self.zoneinfo
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn phone_number(&self) -> &str {
        &self.phone_number
    }

    fn phone_extension(&self) -> &str {
        &self.phone_extension
    }

    fn street_address(&self) -> &str {
        &self.street_address
    }

    fn locality(&self) -> &str {
        &self.locality
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn postal_code(&self) -> &str {
        &self.postal_code
    }

    fn country(&self) -> &str {
        &self.country
    }

    fn extra(&self) -> &BTreeMap<String, AttributeValue> {
        &self.extra
    }
}
