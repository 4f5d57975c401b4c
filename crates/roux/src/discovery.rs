// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Discovery of the ingredients in a pantry directory.
//!
//! Every directory holding an `ingredient.md` marker file is an ingredient,
//! unless it sits inside another ingredient's directory.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::pantry::Ingredient;
use crate::{Error, Result, INGREDIENT_MARKER_FILENAME};

#[cfg(test)]
#[path = "./discovery_test.rs"]
mod discovery_test;

/// Discover the ingredients under `root`, keyed by ingredient name.
///
/// Names are the ingredient directory relative to `root`, `/`-separated on
/// every platform. The returned ingredients have no entry points yet. A
/// `root` that does not exist has no ingredients.
pub async fn discover_ingredients(
    root: &Path,
    pantry_name: &str,
) -> Result<BTreeMap<String, Ingredient>> {
    let search_root = root.to_path_buf();
    let candidates = tokio::task::spawn_blocking(move || find_markers(&search_root)).await??;

    let ingredients = candidates
        .iter()
        .filter(|candidate| {
            !candidates
                .iter()
                .any(|other| is_nested_within(candidate, other))
        })
        .map(|path| {
            let name = ingredient_name(root, path);
            let ingredient = Ingredient {
                name: name.clone(),
                path: path.clone(),
                pantry_name: pantry_name.to_string(),
                entry_points: BTreeMap::new(),
            };
            (name, ingredient)
        })
        .collect::<BTreeMap<_, _>>();

    tracing::debug!(
        ?root,
        markers = candidates.len(),
        ingredients = ingredients.len(),
        "discovered ingredients"
    );

    Ok(ingredients)
}

/// Whether `path` lies strictly inside the directory `ancestor`.
///
/// Paths are compared component by component, so `path/to/foobar` is not
/// inside `path/to/foo`.
pub fn is_nested_within(path: &Path, ancestor: &Path) -> bool {
    path != ancestor && path.starts_with(ancestor)
}

/// Find the directories containing a marker file anywhere below `root`.
///
/// Hidden entries are skipped and symlinked directories are not entered.
fn find_markers(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    let mut directories = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|error| Error::MarkerSearchFailed {
            path: root.to_path_buf(),
            error,
        })?;
        if entry.file_name() != INGREDIENT_MARKER_FILENAME || !entry.path().is_file() {
            continue;
        }
        if let Some(parent) = entry.path().parent() {
            tracing::trace!(path = ?parent, "found ingredient marker");
            directories.push(parent.to_path_buf());
        }
    }

    Ok(directories)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// The `/`-separated name of the ingredient at `path` within `root`.
fn ingredient_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
