/// An administrator-authored attribute expression, identified by name.
///
/// The source text is kept verbatim for diagnostics; compilation happens exactly
/// once, during resolver initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedExpression {
    name: String,
    source: String,
}

impl NamedExpression {
    #[must_use]
    pub const fn new(name: String, source: String) -> Self {
        Self { name, source }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let expr = NamedExpression::new("full_name".to_string(), "given_name + ' ' + family_name".to_string());
        assert_eq!(expr.name(), "full_name");
        assert_eq!(expr.source(), "given_name + ' ' + family_name");
    }
}
