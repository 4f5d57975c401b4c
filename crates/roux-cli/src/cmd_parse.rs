// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `roux parse` command.

use clap::Args;
use colored::Colorize;
use miette::Result;

/// Split an ingredient path into pantry and ingredient
#[derive(Debug, Args)]
pub struct CmdParse {
    /// Ingredient path (pantry/ingredient, @scope/pantry/ingredient)
    ingredient_path: String,
}

impl CmdParse {
    pub async fn run(&mut self) -> Result<i32> {
        let Some(parsed) = roux::parse_ingredient_path(&self.ingredient_path) else {
            eprintln!(
                "{} \"{}\" is not a valid ingredient path",
                "Error:".red(),
                self.ingredient_path
            );
            return Ok(1);
        };

        println!("{} {}", "Pantry:".bold(), parsed.pantry.cyan());
        println!("{} {}", "Ingredient:".bold(), parsed.ingredient.green());
        Ok(0)
    }
}
