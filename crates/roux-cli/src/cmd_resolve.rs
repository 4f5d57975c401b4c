// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `roux resolve` command.

use clap::Args;
use miette::Result;

use crate::flags::ConfigFlags;
use crate::output::{print_entry_point, print_ingredient, print_pantry, Format};

/// Resolve a pantry, ingredient or entry point by name
#[derive(Debug, Args)]
pub struct CmdResolve {
    /// Pantry name, or ingredient path (pantry/ingredient, @scope/pantry/ingredient)
    target: String,

    /// Print the path of this entry point of the ingredient
    #[clap(short, long)]
    entry_point: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    #[clap(flatten)]
    config: ConfigFlags,
}

impl CmdResolve {
    pub async fn run(&mut self) -> Result<i32> {
        let mut request = if roux::is_valid_pantry_name(&self.target) {
            roux::ResolveRequest::new(self.target.as_str())?
        } else {
            roux::ResolveRequest::parse(&self.target)?
        };

        if let Some(entry_point) = &self.entry_point {
            if request.ingredient().is_none() {
                return Err(miette::miette!(
                    help = "Use pantry/ingredient to name the ingredient",
                    "--entry-point requires an ingredient, got pantry \"{}\"",
                    self.target
                ));
            }
            request = request.with_entry_point(entry_point.as_str());
        }

        let config = self.config.resolution_config()?;
        tracing::debug!(search_paths = ?config.pantry_search_paths, "resolving {}", self.target);

        match roux::resolve(&request, &config).await? {
            roux::Resolved::Pantry(pantry) => print_pantry(&pantry, self.format)?,
            roux::Resolved::Ingredient(ingredient) => print_ingredient(&ingredient, self.format)?,
            roux::Resolved::EntryPoint(path) => print_entry_point(&path, self.format)?,
        }
        Ok(0)
    }
}
