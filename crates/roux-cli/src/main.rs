// Copyright (c) Contributors to the Roux project.
// SPDX-License-Identifier: Apache-2.0

//! roux - Pantry and Ingredient Resolution CLI

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_parse;
mod cmd_resolve;
mod cmd_show;
mod flags;
mod output;

use cmd_parse::CmdParse;
use cmd_resolve::CmdResolve;
use cmd_show::CmdShow;

#[derive(Parser)]
#[clap(
    name = "roux",
    about = "Pantry and Ingredient Resolution",
    version,
    long_about = "Discover ingredients in pantries and resolve them by name"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a pantry and list its ingredients
    Show(CmdShow),

    /// Resolve a pantry, ingredient or entry point by name
    Resolve(CmdResolve),

    /// Split an ingredient path into pantry and ingredient
    Parse(CmdParse),
}

impl Opt {
    async fn run(self) -> Result<i32> {
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        match self.cmd {
            Command::Show(mut cmd) => cmd.run().await,
            Command::Resolve(mut cmd) => cmd.run().await,
            Command::Parse(mut cmd) => cmd.run().await,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run().await?;
    std::process::exit(code);
}
