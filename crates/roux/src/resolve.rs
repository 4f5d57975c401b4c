// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Resolution of pantries, ingredients and entry points by name.

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};

use crate::cache::CacheEntry;
use crate::config::ResolutionConfig;
use crate::error::collapse_search_failures;
use crate::name::{is_valid_ingredient_name, is_valid_pantry_name, parse_ingredient_path};
use crate::pantry::{initialize, Ingredient, Pantry, PantryConfig};
use crate::{Error, Result};

#[cfg(test)]
#[path = "./resolve_test.rs"]
mod resolve_test;

/// A validated request for a pantry, an ingredient, or an entry point.
///
/// Names are checked when the request is built, before any filesystem
/// access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    pantry: String,
    ingredient: Option<String>,
    entry_point: Option<String>,
}

impl ResolveRequest {
    /// Request the pantry `pantry`.
    pub fn new<S: Into<String>>(pantry: S) -> Result<Self> {
        let pantry = pantry.into();
        if !is_valid_pantry_name(&pantry) {
            return Err(Error::InvalidPantryName(pantry));
        }
        Ok(Self {
            pantry,
            ingredient: None,
            entry_point: None,
        })
    }

    /// Request an ingredient given as `pantry/ingredient` or
    /// `@scope/pantry/ingredient`.
    pub fn parse(ingredient_path: &str) -> Result<Self> {
        let parsed = parse_ingredient_path(ingredient_path)
            .ok_or_else(|| Error::InvalidIngredientPath(ingredient_path.to_string()))?;
        Self::new(parsed.pantry)?.with_ingredient(parsed.ingredient)
    }

    /// Narrow the request to an ingredient of the pantry.
    pub fn with_ingredient<S: Into<String>>(mut self, ingredient: S) -> Result<Self> {
        let ingredient = ingredient.into();
        if !is_valid_ingredient_name(&ingredient) {
            return Err(Error::InvalidIngredientName(ingredient));
        }
        self.ingredient = Some(ingredient);
        Ok(self)
    }

    /// Narrow the request to an entry point of the ingredient.
    ///
    /// Ignored unless an ingredient is also requested.
    pub fn with_entry_point<S: Into<String>>(mut self, entry_point: S) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }

    pub fn pantry(&self) -> &str {
        &self.pantry
    }

    pub fn ingredient(&self) -> Option<&str> {
        self.ingredient.as_deref()
    }

    pub fn entry_point(&self) -> Option<&str> {
        self.entry_point.as_deref()
    }
}

/// The most specific thing a request resolved to.
#[derive(Debug, Clone)]
pub enum Resolved {
    Pantry(Arc<Pantry>),
    Ingredient(Ingredient),
    /// Absolute path to the entry point file.
    EntryPoint(PathBuf),
}

/// Resolve a request against the configured cache and search paths.
///
/// A pantry missing from `config.pantries` is looked for in every search
/// path at once; the first one found is used and cached. Pantries cached by
/// path are initialized and replaced in the cache by the result.
pub async fn resolve(request: &ResolveRequest, config: &ResolutionConfig) -> Result<Resolved> {
    let pantry = find_pantry(&request.pantry, config).await?;

    let Some(ingredient_name) = request.ingredient.as_deref() else {
        return Ok(Resolved::Pantry(pantry));
    };
    let ingredient = lookup_ingredient(&request.pantry, &pantry, ingredient_name)?;

    let Some(entry_point_name) = request.entry_point.as_deref() else {
        return Ok(Resolved::Ingredient(ingredient.clone()));
    };
    lookup_entry_point(&request.pantry, ingredient, entry_point_name).map(Resolved::EntryPoint)
}

/// Resolve a pantry by name.
pub async fn resolve_pantry(pantry: &str, config: &ResolutionConfig) -> Result<Arc<Pantry>> {
    let request = ResolveRequest::new(pantry)?;
    find_pantry(&request.pantry, config).await
}

/// Resolve an ingredient of a pantry by name.
pub async fn resolve_ingredient(
    pantry: &str,
    ingredient: &str,
    config: &ResolutionConfig,
) -> Result<Ingredient> {
    let request = ResolveRequest::new(pantry)?.with_ingredient(ingredient)?;
    let found = find_pantry(&request.pantry, config).await?;
    lookup_ingredient(pantry, &found, ingredient).cloned()
}

/// Resolve the absolute path of an ingredient's entry point.
pub async fn resolve_entry_point(
    pantry: &str,
    ingredient: &str,
    entry_point: &str,
    config: &ResolutionConfig,
) -> Result<PathBuf> {
    let request = ResolveRequest::new(pantry)?.with_ingredient(ingredient)?;
    let found = find_pantry(&request.pantry, config).await?;
    let ingredient = lookup_ingredient(pantry, &found, ingredient)?;
    lookup_entry_point(pantry, ingredient, entry_point)
}

fn lookup_ingredient<'a>(
    pantry_name: &str,
    pantry: &'a Pantry,
    name: &str,
) -> Result<&'a Ingredient> {
    pantry
        .ingredient(name)
        .ok_or_else(|| Error::IngredientDoesNotExist {
            pantry: pantry_name.to_string(),
            ingredient: name.to_string(),
        })
}

fn lookup_entry_point(pantry_name: &str, ingredient: &Ingredient, name: &str) -> Result<PathBuf> {
    ingredient
        .entry_point_path(name)
        .ok_or_else(|| Error::IngredientHasNoSuchEntrypoint {
            pantry: pantry_name.to_string(),
            ingredient: ingredient.name.clone(),
            entry_point: name.to_string(),
        })
}

/// Get a pantry from the cache, or find and cache it.
async fn find_pantry(name: &str, config: &ResolutionConfig) -> Result<Arc<Pantry>> {
    let cached = config
        .pantries
        .get_or_init(name, |path| initialize(pantry_config(name, path, config)))
        .await?;
    if let Some(pantry) = cached {
        return Ok(pantry);
    }

    let mut attempts = config
        .pantry_search_paths
        .iter()
        .enumerate()
        .map(|(index, search_path)| {
            let path = search_path.join(name);
            tracing::debug!(?search_path, %name, "searching for pantry");
            async move { (index, initialize(pantry_config(name, path, config)).await) }
        })
        .collect::<FuturesUnordered<_>>();

    let mut failures = Vec::new();
    while let Some((index, result)) = attempts.next().await {
        match result {
            Ok(pantry) => {
                let pantry = Arc::new(pantry);
                config
                    .pantries
                    .put(name, CacheEntry::Pantry(Arc::clone(&pantry)));
                return Ok(pantry);
            }
            Err(err) => {
                tracing::debug!(%name, %err, "pantry not usable from search path");
                failures.push((index, err));
            }
        }
    }

    failures.sort_by_key(|(index, _)| *index);
    let errors = failures.into_iter().map(|(_, err)| err).collect();
    Err(collapse_search_failures(name, errors))
}

fn pantry_config(name: &str, path: PathBuf, config: &ResolutionConfig) -> PantryConfig {
    PantryConfig {
        name: name.to_string(),
        path,
        predicates: config.predicates.clone(),
    }
}
