// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Pantry and ingredient types, and pantry initialization.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

use crate::detect::{detect_entry_points, EntryPoint};
use crate::discovery::discover_ingredients;
use crate::predicate::{merge_with_defaults, Predicate, Predicates};
use crate::{Error, Result, MANIFEST_FILENAME};

#[cfg(test)]
#[path = "./pantry_test.rs"]
mod pantry_test;

/// Ingredient directories being read at once while detecting entry points.
const MAX_CONCURRENT_DETECTIONS: usize = 16;

/// A named collection of ingredients rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pantry {
    pub name: String,

    /// Directory the ingredients live under, after any manifest remapping.
    pub path: PathBuf,

    /// Ingredients by name; every key is its ingredient's `name`.
    pub ingredients: BTreeMap<String, Ingredient>,
}

impl Pantry {
    /// Look up an ingredient by name.
    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(name)
    }
}

/// A unit within a pantry, identified by the marker file in its directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    /// `/`-separated path of the ingredient within its pantry.
    pub name: String,

    /// Absolute path to the ingredient directory.
    pub path: PathBuf,

    pub pantry_name: String,

    /// Detection outcome for every configured predicate, by predicate name.
    pub entry_points: BTreeMap<String, Option<EntryPoint>>,
}

impl Ingredient {
    /// The detected entry point of the given kind, if any.
    pub fn entry_point(&self, name: &str) -> Option<&EntryPoint> {
        self.entry_points.get(name).and_then(Option::as_ref)
    }

    /// Absolute path of the entry point of the given kind, if any.
    pub fn entry_point_path(&self, name: &str) -> Option<PathBuf> {
        self.entry_point(name)
            .map(|entry_point| self.path.join(&entry_point.filename))
    }
}

/// Configuration for initializing a single pantry.
#[derive(Debug, Clone)]
pub struct PantryConfig {
    pub name: String,
    pub path: PathBuf,

    /// Predicates layered over the defaults.
    pub predicates: Predicates,
}

impl PantryConfig {
    /// Configure a pantry using only the default predicates.
    pub fn new<N, P>(name: N, path: P) -> Self
    where
        N: Into<String>,
        P: Into<PathBuf>,
    {
        Self {
            name: name.into(),
            path: path.into(),
            predicates: Predicates::new(),
        }
    }

    /// Add or override an entry point predicate.
    pub fn with_predicate<N: Into<String>>(mut self, name: N, predicate: Predicate) -> Self {
        self.predicates.insert(name.into(), predicate);
        self
    }

    /// Add or override an entry point predicate given as a regular expression.
    pub fn with_pattern<N: Into<String>>(self, name: N, pattern: &str) -> Result<Self> {
        let name = name.into();
        let predicate = Predicate::regex(pattern).map_err(|error| Error::InvalidPredicate {
            name: name.clone(),
            error,
        })?;
        Ok(self.with_predicate(name, predicate))
    }
}

/// The fields of `package.json` that roux reads.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    roux: Option<ManifestRouxSection>,
}

#[derive(Debug, Deserialize)]
struct ManifestRouxSection {
    /// Any JSON value; only strings remap the ingredient root.
    #[serde(default, rename = "pantryRoot")]
    pantry_root: Option<serde_json::Value>,
}

/// Initialize a pantry: discover its ingredients and detect their entry points.
///
/// Fails if the path does not exist or is not a directory, or if any
/// ingredient directory cannot be read. A pantry is only returned once every
/// detection has completed.
pub async fn initialize(config: PantryConfig) -> Result<Pantry> {
    tracing::debug!(name = %config.name, path = ?config.path, "initializing pantry");

    let predicates = merge_with_defaults(config.predicates);
    let base_path = if config.path.as_os_str().is_empty() {
        std::env::current_dir()?
    } else {
        std::path::absolute(&config.path)?
    };

    match tokio::fs::metadata(&base_path).await {
        Err(_) => return Err(Error::PantryDoesNotExist(base_path)),
        Ok(metadata) if !metadata.is_dir() => return Err(Error::PantryNotADirectory(base_path)),
        Ok(_) => {}
    }

    let root = match read_pantry_root_prefix(&base_path).await {
        Some(prefix) => base_path.join(prefix),
        None => base_path,
    };

    let mut ingredients = discover_ingredients(&root, &config.name).await?;

    let detections: Vec<(String, BTreeMap<String, Option<EntryPoint>>)> =
        stream::iter(ingredients.values())
            .map(|ingredient| {
                let predicates = &predicates;
                async move {
                    let entry_points = detect_entry_points(&ingredient.path, predicates).await?;
                    Ok::<_, Error>((ingredient.name.clone(), entry_points))
                }
            })
            .buffer_unordered(MAX_CONCURRENT_DETECTIONS)
            .try_collect()
            .await?;

    for (ingredient_name, entry_points) in detections {
        if let Some(ingredient) = ingredients.get_mut(&ingredient_name) {
            ingredient.entry_points = entry_points;
        }
    }

    Ok(Pantry {
        name: config.name,
        path: root,
        ingredients,
    })
}

/// Initialize a pantry from synchronous code.
///
/// Runs [`initialize`] to completion on a private single-threaded runtime, so
/// it must not be called from within an async context.
pub fn initialize_blocking(config: PantryConfig) -> Result<Pantry> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(initialize(config))
}

/// Read the ingredient root declared in the pantry's manifest, if any.
///
/// The manifest is optional: any problem reading it means the pantry root
/// itself holds the ingredients.
async fn read_pantry_root_prefix(base_path: &Path) -> Option<PathBuf> {
    let manifest_path = base_path.join(MANIFEST_FILENAME);

    let bytes = match tokio::fs::read(&manifest_path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::trace!(?manifest_path, %err, "no manifest");
            return None;
        }
    };

    let manifest: Manifest = match serde_json::from_slice(&bytes) {
        Ok(manifest) => manifest,
        Err(err) => {
            tracing::debug!(?manifest_path, %err, "ignoring unreadable manifest");
            return None;
        }
    };

    let prefix = manifest.roux?.pantry_root?;
    let Some(prefix) = prefix.as_str() else {
        tracing::debug!(?manifest_path, "ignoring non-string roux.pantryRoot");
        return None;
    };

    // the prefix is always taken relative to the pantry root
    let relative = Path::new(prefix)
        .components()
        .filter(|component| !matches!(component, Component::RootDir | Component::Prefix(_)))
        .collect::<PathBuf>();
    if relative.as_os_str().is_empty() {
        return None;
    }
    tracing::debug!(?manifest_path, ?relative, "using pantry root from manifest");
    Some(relative)
}
