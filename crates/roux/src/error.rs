// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for roux operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with roux Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while initializing or resolving pantries.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Pantry name rejected by the package name rules
    #[error("\"{0}\" is not a valid pantry name")]
    #[diagnostic(
        code(roux::invalid_pantry_name),
        help("Pantry names follow npm package naming rules, e.g. 'my-pantry' or '@scope/my-pantry'")
    )]
    InvalidPantryName(String),

    /// Ingredient name rejected by the ingredient grammar
    #[error("\"{0}\" is not a valid ingredient name")]
    #[diagnostic(
        code(roux::invalid_ingredient_name),
        help("Ingredient names are '/'-separated tokens of letters, digits, '_' and '-'")
    )]
    InvalidIngredientName(String),

    /// Combined pantry/ingredient path could not be split
    #[error("\"{0}\" is not a valid ingredient path")]
    #[diagnostic(
        code(roux::invalid_ingredient_path),
        help("Use 'pantry/ingredient' or '@scope/pantry/ingredient'")
    )]
    InvalidIngredientPath(String),

    /// Regular expression predicate failed to compile
    #[error("Invalid pattern for entry point predicate \"{name}\"")]
    #[diagnostic(code(roux::invalid_predicate))]
    InvalidPredicate {
        name: String,
        #[source]
        error: regex::Error,
    },

    /// Nothing exists at the pantry path
    #[error("Pantry {0:?} does not exist.")]
    #[diagnostic(code(roux::pantry_does_not_exist))]
    PantryDoesNotExist(PathBuf),

    /// Something exists at the pantry path, but it is not a directory
    #[error("Invalid pantry {0:?}, not a directory")]
    #[diagnostic(code(roux::pantry_not_a_directory))]
    PantryNotADirectory(PathBuf),

    /// The pantry has no ingredient with the requested name
    #[error("Pantry \"{pantry}\" has no ingredient \"{ingredient}\"")]
    #[diagnostic(code(roux::ingredient_does_not_exist))]
    IngredientDoesNotExist { pantry: String, ingredient: String },

    /// The ingredient exists, but no file matched the requested entry point
    #[error("Ingredient \"{pantry}/{ingredient}\" has no \"{entry_point}\" entry point")]
    #[diagnostic(code(roux::no_such_entry_point))]
    IngredientHasNoSuchEntrypoint {
        pantry: String,
        ingredient: String,
        entry_point: String,
    },

    /// Every search path failed, for more than one reason
    #[error("Failed to find pantry \"{pantry}\" in any search path")]
    #[diagnostic(
        code(roux::search_failed),
        help("Each search path failed differently, see the related errors")
    )]
    SearchFailed {
        pantry: String,
        #[related]
        errors: Vec<Error>,
    },

    /// Failed to list an ingredient directory
    #[error("Failed to read directory: {path:?}")]
    #[diagnostic(code(roux::read_dir_failed))]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed while walking a pantry for ingredient markers
    #[error("Failed to search for ingredients under {path:?}")]
    #[diagnostic(code(roux::marker_search_failed))]
    MarkerSearchFailed {
        path: PathBuf,
        #[source]
        error: walkdir::Error,
    },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(roux::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Invalid YAML or JSON in a configuration file
    #[error("Invalid configuration file: {path:?}")]
    #[diagnostic(
        code(roux::invalid_config),
        help("Expected a mapping with optional 'pantries' and 'pantrySearchPaths' keys")
    )]
    InvalidConfig {
        path: PathBuf,
        #[source]
        error: serde_yaml::Error,
    },

    /// Background filesystem task panicked or was cancelled
    #[error(transparent)]
    #[diagnostic(code(roux::task_failed))]
    TaskFailed(#[from] tokio::task::JoinError),

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(roux::io_error))]
    Io(#[from] std::io::Error),
}

/// Reduce the failures of a search-path race to the error reported to the caller.
///
/// `errors` must be in search-path order. When every path failed the same way
/// (all missing, or all not directories) the first failure stands for the
/// rest; otherwise all of them are kept.
pub fn collapse_search_failures(pantry: &str, mut errors: Vec<Error>) -> Error {
    let uniform = match errors.first() {
        Some(Error::PantryDoesNotExist(_)) => errors
            .iter()
            .all(|e| matches!(e, Error::PantryDoesNotExist(_))),
        Some(Error::PantryNotADirectory(_)) => errors
            .iter()
            .all(|e| matches!(e, Error::PantryNotADirectory(_))),
        _ => false,
    };

    if uniform {
        return errors.swap_remove(0);
    }

    Error::SearchFailed {
        pantry: pantry.to_string(),
        errors,
    }
}
