// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Naming rules for pantries and ingredients.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[cfg(test)]
#[path = "./name_test.rs"]
mod name_test;

/// Longest pantry name accepted, matching the npm registry limit.
const MAX_PANTRY_NAME_LENGTH: usize = 214;

/// Names that are never allowed, regardless of case.
const BLACKLISTED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js core modules, which new packages may not shadow.
const CORE_MODULE_NAMES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

static INGREDIENT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("ingredient token pattern is valid"));

/// A combined `pantry/ingredient` reference split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientPath {
    /// The (possibly scoped) pantry name.
    pub pantry: String,
    /// The ingredient name within the pantry.
    pub ingredient: String,
}

/// Check whether `name` may be used as a pantry name.
///
/// Pantries are installable packages, so this applies the rules a new npm
/// package name must satisfy, including the `@scope/name` form.
pub fn is_valid_pantry_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_PANTRY_NAME_LENGTH {
        return false;
    }
    if name.starts_with('.') || name.starts_with('_') {
        return false;
    }
    if name.trim() != name {
        return false;
    }

    let lower = name.to_lowercase();
    if BLACKLISTED_NAMES.contains(&lower.as_str()) || CORE_MODULE_NAMES.contains(&lower.as_str())
    {
        return false;
    }
    if lower != name {
        return false;
    }

    // the last path segment may not contain characters npm considers special
    let last = name.rsplit('/').next().unwrap_or(name);
    if last.contains(['~', '\'', '!', '(', ')', '*']) {
        return false;
    }

    if is_url_safe(name) {
        return true;
    }

    match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((scope, package)) => {
            !scope.is_empty()
                && !package.is_empty()
                && !package.contains('/')
                && is_url_safe(scope)
                && is_url_safe(package)
        }
        None => false,
    }
}

/// Characters left untouched by JavaScript's `encodeURIComponent`.
fn is_url_safe(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
    })
}

/// Check whether `name` may be used as an ingredient name.
///
/// Ingredient names are one or more `/`-separated tokens, each made of word
/// characters and dashes. The empty string is not a name.
pub fn is_valid_ingredient_name(name: &str) -> bool {
    name.split('/').all(|token| INGREDIENT_TOKEN.is_match(token))
}

/// Split a combined ingredient path into pantry and ingredient names.
///
/// The first segment is tried as the pantry name; when that is not a valid
/// pantry name the first two segments are joined as a scoped name instead.
/// Returns `None` unless both resulting names are valid.
pub fn parse_ingredient_path(path: &str) -> Option<IngredientPath> {
    let split: Vec<&str> = path.split('/').collect();

    let (pantry, ingredient) = if is_valid_pantry_name(split[0]) {
        (split[0].to_string(), split[1..].join("/"))
    } else {
        let boundary = split.len().min(2);
        (split[..boundary].join("/"), split[boundary..].join("/"))
    };

    if !is_valid_pantry_name(&pantry) || !is_valid_ingredient_name(&ingredient) {
        return None;
    }

    Some(IngredientPath {
        pantry,
        ingredient,
    })
}
