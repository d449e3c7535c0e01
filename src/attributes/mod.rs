//! The catalog of built-in user attributes
//!
//! This module defines the canonical names, semantic types, and accessors of every
//! attribute the resolver knows about without administrator involvement. Each entry
//! pairs an attribute name with a typed extractor function that pulls the value out
//! of a per-call [`Activation`](crate::expr::Activation).
//!
//! The catalog covers attributes held directly by a backend (username, groups,
//! postal fields, and so on) and derived attributes computed from combinations of
//! raw ones (the RFC 3966 phone number, the composite postal address, verification
//! flags, and the per-call update timestamp).
//!
//! The catalog is a static table constructed at process start. It is never mutated
//! and is shared by reference everywhere it is consulted.

mod attribute_def;
mod attribute_type;
mod attribute_value;

pub mod keys;

pub use attribute_def::{ATTRIBUTE_DEFINITIONS, AttributeDef, lookup};
pub use attribute_type::AttributeType;
pub use attribute_value::AttributeValue;
