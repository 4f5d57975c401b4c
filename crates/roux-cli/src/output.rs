// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! Printing of pantries, ingredients and entry points.

use std::path::Path;

use colored::Colorize;
use miette::Result;
use serde::Serialize;

/// Output format: table, yaml, json
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Table,
    Yaml,
    Json,
}

pub fn print_pantry(pantry: &roux::Pantry, format: Format) -> Result<()> {
    match format {
        Format::Table => {
            println!("{} {}", "Pantry:".bold(), pantry.name.cyan());
            println!("{} {}", "Path:".bold(), pantry.path.display());
            println!();
            println!("{}", "Ingredients:".bold());
            println!();

            if pantry.ingredients.is_empty() {
                println!("  {}", "(no ingredients)".dimmed());
            }
            for (i, ingredient) in pantry.ingredients.values().enumerate() {
                println!("  {}. {}", i + 1, ingredient.name.green());
                print_entry_points(ingredient, "     ");
            }

            println!();
            println!("Total: {} ingredient(s)", pantry.ingredients.len());
            Ok(())
        }
        Format::Yaml => print_yaml(pantry),
        Format::Json => print_json(pantry),
    }
}

pub fn print_ingredient(ingredient: &roux::Ingredient, format: Format) -> Result<()> {
    match format {
        Format::Table => {
            println!(
                "{} {}/{}",
                "Ingredient:".bold(),
                ingredient.pantry_name.cyan(),
                ingredient.name.green()
            );
            println!("{} {}", "Path:".bold(), ingredient.path.display());
            println!();
            print_entry_points(ingredient, "  ");
            Ok(())
        }
        Format::Yaml => print_yaml(ingredient),
        Format::Json => print_json(ingredient),
    }
}

pub fn print_entry_point(path: &Path, format: Format) -> Result<()> {
    #[derive(Serialize)]
    struct Output<'a> {
        path: &'a Path,
    }

    match format {
        Format::Table => {
            println!("{}", path.display());
            Ok(())
        }
        Format::Yaml => print_yaml(&Output { path }),
        Format::Json => print_json(&Output { path }),
    }
}

fn print_entry_points(ingredient: &roux::Ingredient, indent: &str) {
    let mut found = 0;
    for (name, entry_point) in &ingredient.entry_points {
        if let Some(entry_point) = entry_point {
            println!("{indent}{}: {}", name.yellow(), entry_point.filename);
            found += 1;
        }
    }
    if found == 0 {
        println!("{indent}{}", "(no entry points)".dimmed());
    }
}

fn print_yaml<T: Serialize>(value: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(value)
        .map_err(|e| miette::miette!("Failed to serialize output: {e}"))?;
    print!("{yaml}");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| miette::miette!("Failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}
