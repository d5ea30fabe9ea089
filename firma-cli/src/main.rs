//! Firma — HTML email signature generator CLI.
//!
//! # Usage
//!
//! ```text
//! firma generate --profile <id> --name "..." --position "..." --mail "..."
//!                [--phone ...] [--optional <field>]... [--template <tag>]
//!                [--fragment] [--stdout] [--output <path>]
//! firma generate --profile-file <path> ...
//! firma profile list [--json]
//! firma profile add <file>
//! firma profile check <file>
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{generate::GenerateArgs, profile::ProfileCommand};
use firma_renderer::OptionalField;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "firma",
    version,
    about = "Generate email-client-safe HTML signatures from organization profiles",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a signature for one person against an organization profile.
    Generate(GenerateArgs),

    /// Manage stored organization profiles.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

// ---------------------------------------------------------------------------
// Shared OptionalField argument — parsed from CLI strings, converts to the
// renderer's override-set type
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse [`OptionalField`] from CLI args.
#[derive(Debug, Clone, Copy)]
pub struct OptionalFieldArg(pub OptionalField);

impl FromStr for OptionalFieldArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match OptionalField::from_id(&s.to_ascii_lowercase()) {
            Some(field) => Ok(Self(field)),
            None => {
                let valid: Vec<&str> = OptionalField::all().iter().map(|f| f.id()).collect();
                Err(format!(
                    "unknown optional field '{s}'; expected one of: {}",
                    valid.join(", ")
                ))
            }
        }
    }
}

impl fmt::Display for OptionalFieldArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.id())
    }
}

impl From<OptionalFieldArg> for OptionalField {
    fn from(arg: OptionalFieldArg) -> Self {
        arg.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Profile { command } => commands::profile::run(command),
    }
}
