// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Entry point detection within a single ingredient directory.

use std::collections::BTreeMap;
use std::path::Path;

use futures::future::join_all;
use serde::Serialize;

use crate::predicate::{Decision, Predicate, Predicates};
use crate::{Error, Result};

#[cfg(test)]
#[path = "./detect_test.rs"]
mod detect_test;

/// A file detected as an ingredient's entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPoint {
    /// Filename relative to the ingredient directory.
    pub filename: String,
}

/// Find the file in `directory` that satisfies `predicate`, if any.
///
/// Files are considered in sorted order. An immediate match ends the scan
/// without waiting on decisions still pending for earlier files; otherwise
/// every pending decision is awaited together and the first matching file
/// in scan order wins, whatever order the decisions completed in.
pub async fn detect_entry_point(
    directory: &Path,
    predicate: &Predicate,
) -> Result<Option<EntryPoint>> {
    let filenames = list_directory(directory).await?;
    Ok(detect_in_listing(directory, &filenames, predicate).await)
}

/// Detect every predicate's entry point in `directory`, reading it once.
///
/// Each predicate is decided exactly as by [`detect_entry_point`].
pub async fn detect_entry_points(
    directory: &Path,
    predicates: &Predicates,
) -> Result<BTreeMap<String, Option<EntryPoint>>> {
    let filenames = list_directory(directory).await?;

    let detections = predicates.iter().map(|(name, predicate)| {
        let filenames = &filenames;
        async move {
            let found = detect_in_listing(directory, filenames, predicate).await;
            (name.clone(), found)
        }
    });

    Ok(join_all(detections).await.into_iter().collect())
}

/// Pick the entry point for `predicate` among the sorted `filenames`.
async fn detect_in_listing(
    directory: &Path,
    filenames: &[String],
    predicate: &Predicate,
) -> Option<EntryPoint> {
    let mut pending = Vec::new();
    for (index, filename) in filenames.iter().enumerate() {
        match predicate.evaluate(filename) {
            Decision::Decided(true) => {
                tracing::trace!(?directory, %filename, "entry point decided immediately");
                return Some(EntryPoint {
                    filename: filename.clone(),
                });
            }
            Decision::Decided(false) => continue,
            Decision::Pending(decision) => {
                pending.push(async move { (index, decision.await) });
            }
        }
    }

    if pending.is_empty() {
        return None;
    }

    // join_all keeps input order, which is scan order
    join_all(pending)
        .await
        .into_iter()
        .find(|(_, matched)| *matched)
        .map(|(index, _)| EntryPoint {
            filename: filenames[index].clone(),
        })
}

/// List the names of the immediate entries of `directory`, sorted.
async fn list_directory(directory: &Path) -> Result<Vec<String>> {
    let read_dir_failed = |error| Error::ReadDirFailed {
        path: directory.to_path_buf(),
        error,
    };

    let mut entries = tokio::fs::read_dir(directory)
        .await
        .map_err(read_dir_failed)?;

    let mut filenames = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_dir_failed)? {
        match entry.file_name().into_string() {
            Ok(name) => filenames.push(name),
            Err(name) => tracing::debug!(?name, "skipping entry with non UTF-8 name"),
        }
    }
    filenames.sort();

    Ok(filenames)
}
