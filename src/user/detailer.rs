use crate::attributes::AttributeValue;
use std::collections::BTreeMap;

/// Read-only access to the raw identity attributes of a single user.
///
/// Each identity backend implements this for whatever shape it holds user records
/// in. Attributes a backend does not track are reported as empty rather than
/// absent; whether an attribute participates in expression evaluation is decided
/// separately by the configured backend capabilities.
///
/// An implementation only needs to stay valid for the duration of one resolution
/// call.
pub trait UserDetailer {
    fn username(&self) -> &str;
    fn groups(&self) -> &[String];
    fn display_name(&self) -> &str;
    fn emails(&self) -> &[String];
    fn given_name(&self) -> &str;
    fn middle_name(&self) -> &str;
    fn family_name(&self) -> &str;
    fn nickname(&self) -> &str;
    fn profile(&self) -> &str;
    fn picture(&self) -> &str;
    fn website(&self) -> &str;
    fn gender(&self) -> &str;
    fn birthdate(&self) -> &str;
    fn zoneinfo(&self) -> &str;
    fn locale(&self) -> &str;
    fn phone_number(&self) -> &str;
    fn phone_extension(&self) -> &str;
    fn street_address(&self) -> &str;
    fn locality(&self) -> &str;
    fn region(&self) -> &str;
    fn postal_code(&self) -> &str;
    fn country(&self) -> &str;

    /// Administrator-declared extra attributes, keyed by attribute name.
    fn extra(&self) -> &BTreeMap<String, AttributeValue>;
}
