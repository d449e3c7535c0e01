//! Attribute resolution and expression-based custom attributes using CEL
//!
//! This module builds the typed evaluation environment for a configured identity
//! backend, compiles administrator-defined attribute expressions against it, and
//! resolves attribute names per request. It uses the CEL (Common Expression
//! Language) to provide a safe, sandboxed evaluation environment.
//!
//! # Implementation Model
//!
//! Resolution follows a two-tier model:
//!
//! 1. **Built-in attributes** resolve through the static catalog in
//!    [`attributes`](crate::attributes), dispatching directly to the backend's
//!    [`UserDetailer`](crate::user::UserDetailer). This fast path never involves
//!    expression evaluation, so a custom expression can never shadow a built-in.
//! 2. **Custom attributes** resolve through a table of [`NamedExpression`]s
//!    compiled exactly once during initialization. A compile failure for any one
//!    expression aborts initialization entirely.
//!
//! The set of variables an expression may reference is a strict function of the
//! [`BackendCapabilities`]: only attributes the active backend actually populates
//! are declared, and derived variables (the composite address, the RFC 3966 phone
//! number) are declared only when their constituents are configured.
//!
//! Each resolution call binds a transient [`Activation`] over the caller's
//! `UserDetailer`, so concurrent calls share no mutable state. Only the variables
//! a program actually references are bound into its evaluation context; unused
//! attributes are never computed.

mod activation;
mod environment;
mod expression;
mod resolver;

pub use activation::Activation;
pub use environment::{BackendCapabilities, Declaration, ExtraAttribute, LdapAttributes, build_declarations};
pub use expression::NamedExpression;
pub use resolver::{ExpressionResolver, PassthroughResolver, UserAttributeResolver};
