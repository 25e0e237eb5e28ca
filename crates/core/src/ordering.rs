//! Canonical list order and reorder helpers.
//!
//! The canonical order is ascending `display_order`, ties broken by
//! ascending `id`. Display-order values need not be contiguous.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::project::Project;

/// Compare two projects by canonical order.
pub fn canonical_cmp(a: &Project, b: &Project) -> Ordering {
    a.display_order
        .cmp(&b.display_order)
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort projects into canonical order in place.
pub fn sort_canonical(projects: &mut [Project]) {
    projects.sort_by(canonical_cmp);
}

/// Display order for a project appended to `projects`.
///
/// One past the current maximum; an empty list starts from 0, so the first
/// project gets 1. `None` when the maximum is already `i32::MAX`.
pub fn next_display_order(projects: &[Project]) -> Option<i32> {
    projects
        .iter()
        .map(|p| p.display_order)
        .max()
        .unwrap_or(0)
        .checked_add(1)
}

/// Assign each project its 1-based position as display order.
pub fn renumber(mut projects: Vec<Project>) -> Vec<Project> {
    for (index, project) in projects.iter_mut().enumerate() {
        project.display_order = index as i32 + 1;
    }
    projects
}

/// Move the element at `from` to `to`, shifting the elements in between.
pub fn move_item<T>(mut items: Vec<T>, from: usize, to: usize) -> Result<Vec<T>, CoreError> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(CoreError::Validation(format!(
            "Move indexes out of range: from {from} to {to} in a list of {len}"
        )));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(items)
}

/// Rearrange `current` to follow `ids`.
///
/// `ids` must be a permutation of the ids in `current`: every project listed
/// exactly once and nothing unknown.
pub fn arrange_by_ids(current: &[Project], ids: &[String]) -> Result<Vec<Project>, CoreError> {
    if ids.len() != current.len() {
        return Err(CoreError::Validation(format!(
            "Order must list all {} projects, got {}",
            current.len(),
            ids.len()
        )));
    }

    let mut by_id: HashMap<&str, &Project> =
        current.iter().map(|p| (p.id.as_str(), p)).collect();
    let mut seen = HashSet::with_capacity(ids.len());
    let mut arranged = Vec::with_capacity(ids.len());

    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(CoreError::Validation(format!(
                "Project '{id}' appears more than once in the order"
            )));
        }
        let project = by_id.remove(id.as_str()).ok_or_else(|| {
            CoreError::Validation(format!("Unknown project '{id}' in the order"))
        })?;
        arranged.push(project.clone());
    }

    Ok(arranged)
}
