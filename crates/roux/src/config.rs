// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Configuration shared by every resolution.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cache::PantryCache;
use crate::predicate::Predicates;
use crate::{Error, Result, DEFAULT_SEARCH_DIRECTORY};

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

/// Where to find pantries when resolving by name.
#[derive(Debug, Clone)]
pub struct ResolutionConfig {
    /// Pantries by name, or their locations awaiting initialization.
    ///
    /// Resolution writes every pantry it initializes into this cache.
    pub pantries: PantryCache,

    /// Directories searched, in order, for pantries not in the cache.
    pub pantry_search_paths: Vec<PathBuf>,

    /// Predicates layered over the defaults when initializing pantries.
    pub predicates: Predicates,
}

impl ResolutionConfig {
    /// The search paths used when none are configured: `node_modules` under
    /// the current directory.
    pub fn default_search_paths() -> Result<Vec<PathBuf>> {
        Ok(vec![std::env::current_dir()?.join(DEFAULT_SEARCH_DIRECTORY)])
    }

    /// A configuration with an empty cache and the default search paths.
    pub fn new() -> Result<Self> {
        normalize_config(None, None)
    }
}

/// Partial resolution settings, as given by a caller or a config file.
///
/// Unset fields fall back to defaults in [`normalize_config`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOptions {
    /// Pantry locations by name.
    #[serde(default)]
    pub pantries: Option<BTreeMap<String, PathBuf>>,

    /// Directories searched, in order, for pantries by name.
    #[serde(default)]
    pub pantry_search_paths: Option<Vec<PathBuf>>,

    /// An existing cache to use instead of `pantries`.
    #[serde(skip)]
    pub cache: Option<PantryCache>,
}

impl ConfigOptions {
    /// Parse options from YAML (or JSON) text.
    pub fn from_yaml<S: AsRef<str>>(yaml: S) -> serde_yaml::Result<Self> {
        serde_yaml::from_str(yaml.as_ref())
    }

    /// Load options from a YAML or JSON file.
    ///
    /// Relative paths in the file are resolved against the file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|error| Error::ReadFailed {
            path: path.to_path_buf(),
            error,
        })?;

        let mut options = Self::from_yaml(yaml).map_err(|error| Error::InvalidConfig {
            path: path.to_path_buf(),
            error,
        })?;

        if let Some(base_dir) = path.parent() {
            options.resolve_relative_to(base_dir);
        }
        Ok(options)
    }

    /// Set the pantry cache, which takes precedence over `pantries`.
    pub fn with_cache(mut self, cache: PantryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the search paths.
    pub fn with_search_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.pantry_search_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    fn resolve_relative_to(&mut self, base_dir: &Path) {
        if let Some(pantries) = self.pantries.as_mut() {
            for path in pantries.values_mut() {
                *path = base_dir.join(&*path);
            }
        }
        if let Some(paths) = self.pantry_search_paths.as_mut() {
            for path in paths.iter_mut() {
                *path = base_dir.join(&*path);
            }
        }
    }

    fn take_pantries(&mut self) -> Option<PantryCache> {
        if let Some(cache) = self.cache.take() {
            return Some(cache);
        }
        self.pantries.take().map(|pantries| {
            let cache = PantryCache::new();
            for (name, path) in pantries {
                cache.insert_path(name, path);
            }
            cache
        })
    }
}

/// Build a complete resolution config from caller options and defaults.
///
/// Each setting is taken from `config`, else from `defaults`, else from the
/// built-in default (an empty cache; `node_modules` under the current
/// directory as the only search path). A cache given in the options is
/// shared, not copied, so the caller observes every pantry the resolver adds.
pub fn normalize_config(
    config: Option<ConfigOptions>,
    defaults: Option<ConfigOptions>,
) -> Result<ResolutionConfig> {
    let mut config = config.unwrap_or_default();
    let mut defaults = defaults.unwrap_or_default();

    let pantries = config
        .take_pantries()
        .or_else(|| defaults.take_pantries())
        .unwrap_or_default();

    let pantry_search_paths = match config
        .pantry_search_paths
        .take()
        .or_else(|| defaults.pantry_search_paths.take())
    {
        Some(paths) => paths,
        None => ResolutionConfig::default_search_paths()?,
    };

    Ok(ResolutionConfig {
        pantries,
        pantry_search_paths,
        predicates: Predicates::new(),
    })
}
