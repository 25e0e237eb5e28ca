/// Project identifiers are opaque strings (UUID text in practice).
pub type ProjectId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh project identifier.
pub fn new_project_id() -> ProjectId {
    uuid::Uuid::new_v4().to_string()
}
