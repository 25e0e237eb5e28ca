//! Domain model and collaborator contracts for the portfolio service.
//!
//! - [`project`]: the `Project` entity and its attached documents.
//! - [`ordering`]: canonical list order and reorder helpers.
//! - [`locale`]: English/Korean read views and landing-page summary.
//! - [`upload`]: object-storage bucket rules and key generation.
//! - [`store`]: the remote store traits plus in-memory implementations.

pub mod error;
pub mod locale;
pub mod ordering;
pub mod project;
pub mod roles;
pub mod store;
pub mod types;
pub mod upload;
