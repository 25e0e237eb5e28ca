pub mod admin_project;
pub mod notifications;
pub mod project;
pub mod upload;
