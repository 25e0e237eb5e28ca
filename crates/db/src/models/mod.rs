//! Wire row structs for the database tables.

pub mod project;
