// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Caller-owned cache of resolved pantries.

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::pantry::Pantry;
use crate::Result;

#[cfg(test)]
#[path = "./cache_test.rs"]
mod cache_test;

/// A cached pantry, or the location of one not yet initialized.
#[derive(Debug, Clone)]
pub enum CacheEntry {
    Pantry(Arc<Pantry>),
    Path(PathBuf),
}

/// Shared cache of pantries by name.
///
/// Clones share the same entries: the resolver writes every pantry it
/// initializes into the cache it was given, and the caller sees those writes
/// through its own handle. Entries are only written once initialization has
/// fully completed.
#[derive(Debug, Clone, Default)]
pub struct PantryCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl PantryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for `name`, if any.
    pub fn get(&self, name: &str) -> Option<CacheEntry> {
        self.lock().get(name).cloned()
    }

    /// Set the entry for `name`, replacing any previous one.
    pub fn put<N: Into<String>>(&self, name: N, entry: CacheEntry) {
        self.lock().insert(name.into(), entry);
    }

    /// Cache an initialized pantry under its own name.
    pub fn insert_pantry(&self, pantry: Pantry) -> Arc<Pantry> {
        let pantry = Arc::new(pantry);
        self.put(pantry.name.clone(), CacheEntry::Pantry(Arc::clone(&pantry)));
        pantry
    }

    /// Record where the pantry `name` lives, to be initialized on first use.
    pub fn insert_path<N: Into<String>, P: Into<PathBuf>>(&self, name: N, path: P) {
        self.put(name, CacheEntry::Path(path.into()));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Names of all cached entries, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the pantry cached as `name`, initializing it if only its path is known.
    ///
    /// Returns `Ok(None)` when nothing is cached under `name`. When the entry
    /// is a path, `init` is called with it and the resulting pantry replaces
    /// the entry. Failures leave the entry untouched.
    pub async fn get_or_init<F, Fut>(&self, name: &str, init: F) -> Result<Option<Arc<Pantry>>>
    where
        F: FnOnce(PathBuf) -> Fut,
        Fut: Future<Output = Result<Pantry>>,
    {
        let path = match self.get(name) {
            None => return Ok(None),
            Some(CacheEntry::Pantry(pantry)) => return Ok(Some(pantry)),
            Some(CacheEntry::Path(path)) => path,
        };

        tracing::debug!(%name, ?path, "initializing cached pantry path");
        let pantry = Arc::new(init(path).await?);
        self.put(name, CacheEntry::Pantry(Arc::clone(&pantry)));
        Ok(Some(pantry))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        // entries are replaced whole, so a poisoned map is still consistent
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
