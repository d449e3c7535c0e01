//! Inbound configuration types for backends and attribute definitions
//!
//! The host process owns the full configuration pipeline; this module carries only
//! the typed slice of it the resolver consumes: which identity backend is active,
//! its attribute mappings, and the administrator's named attribute definitions.

mod config;

pub use config::{AuthenticationBackend, Config, FileBackend, LdapBackend, UserAttributeDefinition};
