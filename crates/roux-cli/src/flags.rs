// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Command line flags shared between commands.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use miette::Result;

#[cfg(test)]
#[path = "./flags_test.rs"]
mod flags_test;

/// Where to look for pantries
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigFlags {
    /// Load pantries and search paths from a YAML or JSON file
    #[clap(long, env = "ROUX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Search for pantries in PATH, in order (replaces the configured paths)
    #[clap(
        long = "search-path",
        value_name = "PATH",
        env = "ROUX_PANTRY_PATH",
        value_delimiter = ':'
    )]
    pub search_paths: Vec<PathBuf>,

    /// Use the pantry at PATH for NAME (name=path)
    #[clap(long = "pantry", value_name = "NAME=PATH", value_parser = parse_key_value)]
    pub pantries: Vec<(String, String)>,
}

impl ConfigFlags {
    /// Build the resolution config from the config file, then the flags.
    pub fn resolution_config(&self) -> Result<roux::ResolutionConfig> {
        let mut options = match &self.config {
            Some(path) => roux::ConfigOptions::load(path)?,
            None => roux::ConfigOptions::default(),
        };

        if !self.search_paths.is_empty() {
            options = options.with_search_paths(self.search_paths.iter().cloned());
        }

        if !self.pantries.is_empty() {
            let pantries = options.pantries.get_or_insert_with(BTreeMap::new);
            for (name, path) in &self.pantries {
                pantries.insert(name.clone(), PathBuf::from(path));
            }
        }

        Ok(roux::normalize_config(Some(options), None)?)
    }
}

/// Parse a `key=value` argument.
pub fn parse_key_value(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() && !value.is_empty() => {
            Ok((key.to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{arg}'")),
    }
}
