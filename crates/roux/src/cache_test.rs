// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

use rstest::rstest;

use super::*;
use crate::Error;

fn empty_pantry(name: &str, path: &str) -> Pantry {
    Pantry {
        name: name.to_string(),
        path: PathBuf::from(path),
        ingredients: BTreeMap::new(),
    }
}

async fn never_initialized(path: PathBuf) -> Result<Pantry> {
    panic!("should not initialize {path:?}")
}

#[rstest]
fn test_clones_share_entries() {
    let cache = PantryCache::new();
    let handle = cache.clone();

    handle.insert_path("pantry", "/pantries/pantry");

    assert!(cache.contains("pantry"));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.names(), vec!["pantry"]);
    match cache.get("pantry") {
        Some(CacheEntry::Path(path)) => assert_eq!(path, PathBuf::from("/pantries/pantry")),
        other => panic!("Expected Path entry, got: {:?}", other),
    }
}

#[rstest]
#[tokio::test]
async fn test_get_or_init_missing_name() {
    let cache = PantryCache::new();

    let result = cache
        .get_or_init("pantry", never_initialized)
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(cache.is_empty());
}

#[rstest]
#[tokio::test]
async fn test_get_or_init_returns_cached_pantry() {
    let cache = PantryCache::new();
    let cached = cache.insert_pantry(empty_pantry("pantry", "/pantries/pantry"));

    let result = cache
        .get_or_init("pantry", never_initialized)
        .await
        .unwrap()
        .expect("Should find cached pantry");

    assert!(Arc::ptr_eq(&result, &cached));
}

#[rstest]
#[tokio::test]
async fn test_get_or_init_replaces_path_with_pantry() {
    let cache = PantryCache::new();
    cache.insert_path("pantry", "/pantries/pantry");

    let result = cache
        .get_or_init("pantry", |path| async move {
            Ok(empty_pantry("pantry", path.to_str().unwrap()))
        })
        .await
        .unwrap()
        .expect("Should initialize pantry");

    assert_eq!(result.path, PathBuf::from("/pantries/pantry"));
    match cache.get("pantry") {
        Some(CacheEntry::Pantry(pantry)) => assert!(Arc::ptr_eq(&pantry, &result)),
        other => panic!("Expected Pantry entry, got: {:?}", other),
    }
}

#[rstest]
#[tokio::test]
async fn test_get_or_init_failure_keeps_path() {
    let cache = PantryCache::new();
    cache.insert_path("pantry", "/pantries/pantry");

    let result = cache
        .get_or_init("pantry", |path| async move { Err::<Pantry, _>(Error::PantryDoesNotExist(path)) })
        .await;

    assert!(matches!(result, Err(Error::PantryDoesNotExist(_))));
    assert!(matches!(cache.get("pantry"), Some(CacheEntry::Path(_))));
}
