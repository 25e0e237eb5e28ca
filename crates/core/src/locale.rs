//! English/Korean read views over projects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::project::{CategoryColor, Project, ProjectDocument};
use crate::types::ProjectId;

/// Display language of the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl Language {
    /// Parse a language code (`en` or `ko`, case-insensitive).
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ko" => Ok(Self::Ko),
            other => Err(CoreError::Validation(format!(
                "Unsupported language '{other}'. Must be one of: en, ko"
            ))),
        }
    }

    /// Pick the text for this language. Korean falls back to English when
    /// the Korean text is empty.
    fn pick<'a>(self, en: &'a str, ko: &'a str) -> &'a str {
        match self {
            Self::Ko if !ko.trim().is_empty() => ko,
            _ => en,
        }
    }
}

/// A project card as rendered in one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedProject {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub category_color: CategoryColor,
    pub website_url: String,
    pub editor_url: String,
    pub github_url: String,
    pub thumbnail_url: String,
    pub completion: i32,
    pub stars: u8,
    pub documents: Vec<ProjectDocument>,
}

impl LocalizedProject {
    pub fn new(project: &Project, language: Language) -> Self {
        Self {
            id: project.id.clone(),
            title: language.pick(&project.title, &project.title_ko).to_string(),
            description: language
                .pick(&project.description, &project.description_ko)
                .to_string(),
            category: language
                .pick(&project.category, &project.category_ko)
                .to_string(),
            category_color: project.category_color,
            website_url: project.website_url.clone(),
            editor_url: project.editor_url.clone(),
            github_url: project.github_url.clone(),
            thumbnail_url: project.thumbnail_url.clone(),
            completion: project.completion,
            stars: project.stars(),
            documents: project.documents.clone(),
        }
    }
}

/// Landing-page figures computed from the project list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub total: usize,
    /// Number of projects per category color, keyed by color name.
    pub by_color: BTreeMap<&'static str, usize>,
    /// Mean completion, rounded; `None` for an empty list.
    pub average_completion: Option<i32>,
}

impl ProjectSummary {
    pub fn from_projects(projects: &[Project]) -> Self {
        let mut by_color = BTreeMap::new();
        for project in projects {
            *by_color.entry(project.category_color.name()).or_insert(0) += 1;
        }

        let average_completion = if projects.is_empty() {
            None
        } else {
            let sum: i64 = projects.iter().map(|p| i64::from(p.completion)).sum();
            Some((sum as f64 / projects.len() as f64).round() as i32)
        };

        Self {
            total: projects.len(),
            by_color,
            average_completion,
        }
    }
}
