//! The capability interface through which a backend exposes a user's details
//!
//! Identity backends (LDAP, flat file) hand the resolver a [`UserDetailer`] for the
//! duration of a single resolution call. The resolver only ever reads through it;
//! ownership stays with the caller.

mod detailer;
mod details;

pub use detailer::UserDetailer;
pub use details::StaticUserDetails;
