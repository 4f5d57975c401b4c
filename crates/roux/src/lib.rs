// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! roux - pantry and ingredient resolution
//!
//! This crate finds *ingredients* inside *pantries* by convention, and
//! resolves them by name.
//!
//! # Overview
//!
//! A pantry is a directory, usually an installed package. Every directory
//! under it that contains an `ingredient.md` file is an ingredient, named by
//! its path within the pantry; ingredients nested inside other ingredients
//! belong to their parent and are not listed. Each ingredient is checked
//! against a set of named predicates to detect its entry points, such as
//! `index.js` for `javaScript` or `index.scss` for `sass`.
//!
//! A pantry can keep its ingredients in a sub-directory by declaring it in
//! its `package.json`:
//!
//! ```json
//! { "name": "@scope/pantry", "roux": { "pantryRoot": "src/ingredients" } }
//! ```
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> roux::Result<()> {
//! let config = roux::normalize_config(None, None)?;
//! let script = roux::resolve_entry_point("@scope/pantry", "button", "javaScript", &config).await?;
//! println!("{}", script.display());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod detect;
pub mod discovery;
pub mod error;
pub mod name;
pub mod pantry;
pub mod predicate;
pub mod resolve;

pub use cache::{CacheEntry, PantryCache};
pub use config::{normalize_config, ConfigOptions, ResolutionConfig};
pub use detect::{detect_entry_point, detect_entry_points, EntryPoint};
pub use discovery::{discover_ingredients, is_nested_within};
pub use error::{collapse_search_failures, Error, Result};
pub use name::{is_valid_ingredient_name, is_valid_pantry_name, parse_ingredient_path, IngredientPath};
pub use pantry::{initialize, initialize_blocking, Ingredient, Pantry, PantryConfig};
pub use predicate::{default_predicates, merge_with_defaults, Decision, Predicate, Predicates};
pub use resolve::{
    resolve, resolve_entry_point, resolve_ingredient, resolve_pantry, ResolveRequest, Resolved,
};

/// Well-known filename marking a directory as an ingredient.
pub const INGREDIENT_MARKER_FILENAME: &str = "ingredient.md";

/// Well-known filename of the pantry manifest.
pub const MANIFEST_FILENAME: &str = "package.json";

/// Directory under the current directory searched for pantries by default.
pub const DEFAULT_SEARCH_DIRECTORY: &str = "node_modules";
