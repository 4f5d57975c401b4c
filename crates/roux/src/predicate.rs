// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Entry point predicates.
//!
//! A predicate decides whether a filename in an ingredient directory is the
//! entry point of a given kind. Predicates may be regular expressions, plain
//! functions, async functions, or functions that answer some filenames right
//! away and defer others. Every form is evaluated through
//! [`Predicate::evaluate`], which yields a [`Decision`] per filename.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use once_cell::sync::Lazy;
use regex::Regex;

#[cfg(test)]
#[path = "./predicate_test.rs"]
mod predicate_test;

/// Predicates by entry point name.
pub type Predicates = BTreeMap<String, Predicate>;

type SyncFn = dyn Fn(&str) -> bool + Send + Sync;
type AsyncFn = dyn Fn(String) -> BoxFuture<'static, bool> + Send + Sync;
type DecidingFn = dyn Fn(&str) -> Decision + Send + Sync;

/// The outcome of evaluating a predicate against one filename.
pub enum Decision {
    /// The predicate answered immediately.
    Decided(bool),
    /// The predicate will answer later.
    Pending(BoxFuture<'static, bool>),
}

impl Decision {
    /// Defer a decision to the given future.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = bool> + Send + 'static,
    {
        Self::Pending(future.boxed())
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decided(value) => f.debug_tuple("Decided").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// A rule deciding whether a filename is an entry point.
#[derive(Clone)]
pub enum Predicate {
    /// Matches filenames against a regular expression.
    Regex(Regex),
    /// Decides synchronously.
    Sync(Arc<SyncFn>),
    /// Decides asynchronously for every filename.
    Async(Arc<AsyncFn>),
    /// Decides synchronously for some filenames and defers the rest.
    Deciding(Arc<DecidingFn>),
}

impl Predicate {
    /// Build a predicate from a regular expression pattern.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Regex)
    }

    /// Build a predicate from a synchronous function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Sync(Arc::new(f))
    }

    /// Build a predicate from an async function.
    pub fn from_async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self::Async(Arc::new(move |filename: String| -> BoxFuture<'static, bool> {
            f(filename).boxed()
        }))
    }

    /// Build a predicate from a function that may defer its decision.
    pub fn deciding<F>(f: F) -> Self
    where
        F: Fn(&str) -> Decision + Send + Sync + 'static,
    {
        Self::Deciding(Arc::new(f))
    }

    /// Evaluate this predicate for a single filename.
    pub fn evaluate(&self, filename: &str) -> Decision {
        match self {
            Self::Regex(regex) => Decision::Decided(regex.is_match(filename)),
            Self::Sync(f) => Decision::Decided(f(filename)),
            Self::Async(f) => Decision::Pending(f(filename.to_string())),
            Self::Deciding(f) => f(filename),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex(regex) => f.debug_tuple("Regex").field(&regex.as_str()).finish(),
            Self::Sync(_) => f.write_str("Sync"),
            Self::Async(_) => f.write_str("Async"),
            Self::Deciding(_) => f.write_str("Deciding"),
        }
    }
}

impl From<Regex> for Predicate {
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

/// Conventional entry point patterns, by entry point name.
const DEFAULT_PATTERNS: &[(&str, &str)] = &[
    ("assets", r"^assets$"),
    ("handlebars", r"^index.hbs$"),
    ("javaScript", r"^index.js$"),
    ("model", r"^model.js$"),
    ("preview", r"^preview.hbs$"),
    ("previewScript", r"^preview.js$"),
    ("sass", r"^index.scss$"),
];

static DEFAULT_PREDICATES: Lazy<Predicates> = Lazy::new(|| {
    DEFAULT_PATTERNS
        .iter()
        .map(|(name, pattern)| {
            let regex = Regex::new(pattern).expect("default entry point patterns are valid");
            (name.to_string(), Predicate::Regex(regex))
        })
        .collect()
});

/// The predicates every pantry is initialized with unless overridden.
pub fn default_predicates() -> Predicates {
    DEFAULT_PREDICATES.clone()
}

/// Layer `overrides` on top of the default predicates.
///
/// Same-named predicates replace the defaults, new names extend the set.
pub fn merge_with_defaults(overrides: Predicates) -> Predicates {
    let mut predicates = default_predicates();
    predicates.extend(overrides);
    predicates
}
