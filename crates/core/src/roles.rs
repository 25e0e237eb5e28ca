//! Well-known role name constants.
//!
//! The admin role is carried in the `role` claim of access tokens issued by
//! the identity provider.

pub const ROLE_ADMIN: &str = "admin";
