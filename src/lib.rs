//! Resolution of user identity attributes and administrator-defined claim expressions.
//!
//! # Overview
//!
//! This crate turns the raw identity attributes of a user (as supplied by an LDAP
//! directory or a flat-file backend) into the claim values a token issuer hands out.
//! Administrators may also define named CEL expressions that compute custom claims
//! from those attributes.
//!
//! # Module Organization
//!
//! - [`attributes`]: The catalog of built-in attribute names, types, and accessors
//! - [`user`]: The capability interface a backend implements to expose a user's details
//! - [`expr`]: Environment construction, expression compilation, and resolution
//! - [`config`]: Inbound configuration types for backends and attribute definitions
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8Path;
//! use claim_resolver::config::Config;
//! use claim_resolver::user::StaticUserDetails;
//! use chrono::Utc;
//!
//! # fn main() -> claim_resolver::Result<()> {
//! let config = Config::load(Utf8Path::new("attributes.toml"))?;
//! let resolver = config.resolver()?;
//!
//! let user = StaticUserDetails {
//!     username: "ada".to_string(),
//!     emails: vec!["ada@example.com".to_string()],
//!     ..StaticUserDetails::default()
//! };
//!
//! let email = resolver.resolve("email", &user, Utc::now());
//! # Ok(())
//! # }
//! ```

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod attributes;
pub mod config;
pub mod expr;
pub mod user;

pub use crate::attributes::{AttributeType, AttributeValue};
pub use crate::expr::{BackendCapabilities, NamedExpression, UserAttributeResolver};
pub use crate::user::UserDetailer;
