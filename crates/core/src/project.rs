//! Project entity, attached documents, and editing-surface defaults.
//!
//! A [`Project`] carries every text field twice (English and Korean) as
//! independent attributes. Mutation is always a full-record replace; there
//! is no field-level patch type.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{new_project_id, ProjectId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default English category for a new draft.
pub const DEFAULT_CATEGORY: &str = "Website";

/// Default Korean category for a new draft.
pub const DEFAULT_CATEGORY_KO: &str = "웹사이트";

/// Lowest completion percentage accepted by the editing surface.
pub const MIN_COMPLETION: i32 = 0;

/// Highest completion percentage accepted by the editing surface.
pub const MAX_COMPLETION: i32 = 100;

/// Number of stars shown on a project card.
pub const MAX_STARS: u8 = 5;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Badge color of a project's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    #[default]
    Green,
    Purple,
    Orange,
    Blue,
    Pink,
}

impl CategoryColor {
    /// Every color, in badge-picker order.
    pub const ALL: [CategoryColor; 5] = [
        Self::Green,
        Self::Purple,
        Self::Orange,
        Self::Blue,
        Self::Pink,
    ];

    /// Parse from the stored column value.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "green" => Ok(Self::Green),
            "purple" => Ok(Self::Purple),
            "orange" => Ok(Self::Orange),
            "blue" => Ok(Self::Blue),
            "pink" => Ok(Self::Pink),
            other => Err(CoreError::Validation(format!(
                "Unknown category color '{other}'. Must be one of: green, purple, orange, blue, pink"
            ))),
        }
    }

    /// Stored column value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Pink => "pink",
        }
    }
}

/// Kind of file a document points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Image,
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A named file reference attached to a project.
///
/// Identifiers are only unique within the owning project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
}

impl ProjectDocument {
    /// Build a document with a freshly generated identifier.
    pub fn new(name: impl Into<String>, url: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            id: new_document_id(),
            name: name.into(),
            url: url.into(),
            kind,
        }
    }
}

/// A portfolio entry.
///
/// `completion` is not bounded here: values outside 0..=100 written straight
/// to the store are carried through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub title_ko: String,
    pub description: String,
    pub description_ko: String,
    pub website_url: String,
    pub editor_url: String,
    pub github_url: String,
    pub thumbnail_url: String,
    pub category: String,
    pub category_ko: String,
    pub category_color: CategoryColor,
    pub completion: i32,
    #[serde(default)]
    pub documents: Vec<ProjectDocument>,
    #[serde(default)]
    pub display_order: i32,
}

impl Project {
    /// A blank draft as the editing surface opens it for "add project".
    ///
    /// Held only locally until saved; `display_order` is left at 0 for the
    /// repository to assign.
    pub fn new_draft() -> Self {
        Self {
            id: new_project_id(),
            title: String::new(),
            title_ko: String::new(),
            description: String::new(),
            description_ko: String::new(),
            website_url: String::new(),
            editor_url: String::new(),
            github_url: String::new(),
            thumbnail_url: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            category_ko: DEFAULT_CATEGORY_KO.to_string(),
            category_color: CategoryColor::default(),
            completion: 0,
            documents: Vec::new(),
            display_order: 0,
        }
    }

    /// Append a document, keeping insertion order.
    pub fn add_document(&mut self, document: ProjectDocument) {
        self.documents.push(document);
    }

    /// Remove a document by id. Returns `true` if one was removed.
    pub fn remove_document(&mut self, document_id: &str) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != document_id);
        self.documents.len() != before
    }

    /// Card star rating derived from completion.
    pub fn stars(&self) -> u8 {
        stars_for_completion(self.completion)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate a document identifier.
///
/// UUID v7 keeps identifiers time-ordered like the timestamp ids the web
/// client used, without colliding on rapid successive inserts.
pub fn new_document_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Validate a completion percentage entered through the editing surface.
pub fn validate_completion(completion: i32) -> Result<(), CoreError> {
    if (MIN_COMPLETION..=MAX_COMPLETION).contains(&completion) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Completion must be between {MIN_COMPLETION} and {MAX_COMPLETION}, got {completion}"
        )))
    }
}

/// Convert a completion percentage to a 0-5 star rating.
pub fn stars_for_completion(completion: i32) -> u8 {
    let clamped = completion.clamp(MIN_COMPLETION, MAX_COMPLETION) as f64;
    (clamped / MAX_COMPLETION as f64 * MAX_STARS as f64).round() as u8
}
