// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `roux show` command.

use std::path::PathBuf;

use clap::Args;
use miette::Result;

use crate::flags::parse_key_value;
use crate::output::{print_pantry, Format};

/// Initialize a pantry and list its ingredients
#[derive(Debug, Args)]
pub struct CmdShow {
    /// Pantry directory
    path: PathBuf,

    /// Pantry name (defaults to the directory name)
    #[clap(long)]
    name: Option<String>,

    /// Detect an additional entry point, or override a default one (name=regex)
    #[clap(short, long = "predicate", value_name = "NAME=REGEX", value_parser = parse_key_value)]
    predicates: Vec<(String, String)>,

    /// Output format
    #[clap(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

impl CmdShow {
    pub async fn run(&mut self) -> Result<i32> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "pantry".to_string()),
        };

        let mut config = roux::PantryConfig::new(name, &self.path);
        for (name, pattern) in &self.predicates {
            config = config.with_pattern(name.as_str(), pattern)?;
        }

        let pantry = roux::initialize(config).await?;
        tracing::info!(name = %pantry.name, ingredients = pantry.ingredients.len(), "pantry initialized");

        print_pantry(&pantry, self.format)?;
        Ok(0)
    }
}
