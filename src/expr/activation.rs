use crate::attributes::{self, AttributeValue};
use crate::user::UserDetailer;
use cel_interpreter::{Context, Value};
use chrono::{DateTime, Utc};
use core::fmt;
use std::sync::Arc;

/// A per-call binding of attribute names to values for one user.
///
/// An activation is the root binding scope for a single resolution call: it serves
/// direct catalog lookups and supplies variable values when a compiled expression
/// is evaluated. It borrows the caller's [`UserDetailer`] and carries the
/// `updated_at` timestamp the backend observed for this resolution, exposed as the
/// derived `updated_at` attribute.
///
/// Activations are transient and never shared across calls.
pub struct Activation<'a> {
    detailer: &'a dyn UserDetailer,
    updated_at: DateTime<Utc>,
}

impl<'a> Activation<'a> {
    #[must_use]
    pub const fn new(detailer: &'a dyn UserDetailer, updated_at: DateTime<Utc>) -> Self {
        Self { detailer, updated_at }
    }

    #[must_use]
    pub const fn detailer(&self) -> &'a dyn UserDetailer {
        self.detailer
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// The phone number in RFC 3966 form, appending the extension when one is set.
    #[must_use]
    pub fn rfc3966_phone_number(&self) -> String {
        let number = self.detailer.phone_number();
        let extension = self.detailer.phone_extension();

        if number.is_empty() || extension.is_empty() {
            number.to_string()
        } else {
            format!("{number};ext={extension}")
        }
    }

    /// The composite postal address, assembled from the non-empty sub-fields in
    /// street, locality, region, postal code, country order.
    #[must_use]
    pub fn formatted_address(&self) -> String {
        let fields = [
            self.detailer.street_address(),
            self.detailer.locality(),
            self.detailer.region(),
            self.detailer.postal_code(),
            self.detailer.country(),
        ];

        fields.iter().filter(|f| !f.is_empty()).copied().collect::<Vec<_>>().join(", ")
    }

    /// Resolve an attribute name to its value for this user.
    ///
    /// Built-in catalog names always resolve; unknown names fall back to the
    /// detailer's extra attributes and resolve to `None` when absent there too.
    #[must_use]
    pub fn resolve_name(&self, name: &str) -> Option<AttributeValue> {
        if let Some(def) = attributes::lookup(name) {
            return Some((def.extractor)(self));
        }

        self.detailer.extra().get(name).cloned()
    }

    /// Build a CEL evaluation context binding the given variables.
    ///
    /// Declared variables with no value for this user bind as CEL `null`, matching
    /// the catalog's always-found semantics for built-ins.
    #[must_use]
    pub fn cel_context(&self, variables: &[String]) -> Context<'_> {
        let mut context = Context::default();

        for name in variables {
            let value = self.resolve_name(name).map_or(Value::Null, to_cel_value);
            context.add_variable_from_value(name.as_str(), value);
        }

        context
    }
}

impl fmt::Debug for Activation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Activation")
            .field("username", &self.detailer.username())
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Convert an `AttributeValue` to a CEL value.
fn to_cel_value(value: AttributeValue) -> Value {
    match value {
        AttributeValue::String(s) => Value::String(Arc::new(s)),
        AttributeValue::Integer(i) => Value::Int(i),
        AttributeValue::Boolean(b) => Value::Bool(b),
        AttributeValue::Timestamp(ts) => Value::Timestamp(ts.fixed_offset()),
        AttributeValue::List(items) => Value::List(Arc::new(items.into_iter().map(to_cel_value).collect())),
    }
}

/// Unwrap a CEL result back to its native semantic type.
///
/// Values with no native attribute representation (maps, bytes, floats, null)
/// yield `None` and degrade to an absent attribute.
pub(super) fn from_cel_value(value: Value) -> Option<AttributeValue> {
    match value {
        Value::String(s) => Some(AttributeValue::String(s.as_str().to_string())),
        Value::Int(i) => Some(AttributeValue::Integer(i)),
        Value::UInt(u) => i64::try_from(u).ok().map(AttributeValue::Integer),
        Value::Bool(b) => Some(AttributeValue::Boolean(b)),
        Value::Timestamp(ts) => Some(AttributeValue::Timestamp(ts.with_timezone(&Utc))),
        Value::List(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for item in items.iter() {
                converted.push(from_cel_value(item.clone())?);
            }
            Some(AttributeValue::List(converted))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::keys;
    use crate::user::StaticUserDetails;
    use cel_interpreter::Program;

    fn postal_user() -> StaticUserDetails {
        StaticUserDetails {
            username: "ada".to_string(),
            street_address: "12 Analytical Way".to_string(),
            locality: "London".to_string(),
            postal_code: "W1".to_string(),
            country: "UK".to_string(),
            ..StaticUserDetails::default()
        }
    }

    #[test]
    fn test_rfc3966_phone_number_with_extension() {
        let user = StaticUserDetails {
            phone_number: "+441234567890".to_string(),
            phone_extension: "123".to_string(),
            ..StaticUserDetails::default()
        };
        let activation = Activation::new(&user, Utc::now());

        assert_eq!(activation.rfc3966_phone_number(), "+441234567890;ext=123");
    }

    #[test]
    fn test_rfc3966_phone_number_without_extension() {
        let user = StaticUserDetails {
            phone_number: "+441234567890".to_string(),
            ..StaticUserDetails::default()
        };
        let activation = Activation::new(&user, Utc::now());

        assert_eq!(activation.rfc3966_phone_number(), "+441234567890");
    }

    #[test]
    fn test_rfc3966_phone_number_empty() {
        let user = StaticUserDetails::default();
        let activation = Activation::new(&user, Utc::now());

        assert_eq!(activation.rfc3966_phone_number(), "");
    }

    #[test]
    fn test_formatted_address_skips_empty_fields() {
        let user = postal_user();
        let activation = Activation::new(&user, Utc::now());

        // region is unset and must not leave a gap
        assert_eq!(activation.formatted_address(), "12 Analytical Way, London, W1, UK");
    }

    #[test]
    fn test_formatted_address_empty() {
        let user = StaticUserDetails::default();
        let activation = Activation::new(&user, Utc::now());

        assert_eq!(activation.formatted_address(), "");
    }

    #[test]
    fn test_resolve_name_builtin() {
        let user = postal_user();
        let activation = Activation::new(&user, Utc::now());

        assert_eq!(activation.resolve_name(keys::USERNAME), Some(AttributeValue::from("ada")));
    }

    #[test]
    fn test_resolve_name_extra_fallback() {
        let mut user = StaticUserDetails::default();
        let _ = user.extra.insert("employee_id".to_string(), AttributeValue::Integer(42));
        let activation = Activation::new(&user, Utc::now());

        assert_eq!(activation.resolve_name("employee_id"), Some(AttributeValue::Integer(42)));
    }

    #[test]
    fn test_resolve_name_absent() {
        let user = StaticUserDetails::default();
        let activation = Activation::new(&user, Utc::now());

        assert_eq!(activation.resolve_name("employee_id"), None);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_cel_context_binds_declared_variables() {
        let user = postal_user();
        let activation = Activation::new(&user, Utc::now());
        let context = activation.cel_context(&[keys::USERNAME.to_string()]);

        let program = Program::compile("username == 'ada'").unwrap();
        assert_eq!(program.execute(&context).unwrap(), Value::Bool(true));
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_cel_context_binds_missing_extra_as_null() {
        let user = StaticUserDetails::default();
        let activation = Activation::new(&user, Utc::now());
        let context = activation.cel_context(&["department".to_string()]);

        let program = Program::compile("department == null").unwrap();
        assert_eq!(program.execute(&context).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_from_cel_value_round_trips_scalars() {
        assert_eq!(
            from_cel_value(Value::String(Arc::new("x".to_string()))),
            Some(AttributeValue::from("x"))
        );
        assert_eq!(from_cel_value(Value::Int(-3)), Some(AttributeValue::Integer(-3)));
        assert_eq!(from_cel_value(Value::UInt(3)), Some(AttributeValue::Integer(3)));
        assert_eq!(from_cel_value(Value::Bool(true)), Some(AttributeValue::Boolean(true)));
    }

    #[test]
    fn test_from_cel_value_rejects_unmappable() {
        assert_eq!(from_cel_value(Value::Null), None);
        assert_eq!(from_cel_value(Value::Float(1.5)), None);
    }

    #[test]
    fn test_from_cel_value_list() {
        let list = Value::List(Arc::new(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(
            from_cel_value(list),
            Some(AttributeValue::List(vec![
                AttributeValue::Integer(1),
                AttributeValue::Integer(2)
            ]))
        );
    }

    #[test]
    fn test_from_cel_value_list_with_unmappable_element() {
        let list = Value::List(Arc::new(vec![Value::Int(1), Value::Null]));
        assert_eq!(from_cel_value(list), None);
    }
}
