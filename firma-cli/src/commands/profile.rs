//! `firma profile list|add|check` — the stored profile collection.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use firma_core::{profiles, types::OrganizationConfig};

/// Manage organization profiles under ~/.firma/profiles/.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List stored profiles.
    List(ListArgs),

    /// Validate a profile file and copy it into the store.
    Add(AddArgs),

    /// Validate a profile file without storing it.
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Path to the profile YAML file.
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the profile YAML file.
    pub file: PathBuf,
}

pub fn run(cmd: ProfileCommand) -> Result<()> {
    match cmd {
        ProfileCommand::List(args) => list(args),
        ProfileCommand::Add(args) => add(args),
        ProfileCommand::Check(args) => check(args),
    }
}

#[derive(Serialize)]
struct ProfileJson {
    id: String,
    template: String,
    organization: String,
    color: String,
    links: usize,
    sponsors: usize,
    supporters: usize,
}

#[derive(Tabled)]
struct ProfileTableRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "template")]
    template: String,
    #[tabled(rename = "organization")]
    organization: String,
    #[tabled(rename = "color")]
    color: String,
    #[tabled(rename = "links")]
    links: usize,
    #[tabled(rename = "sponsors")]
    sponsors: usize,
}

fn summarize(profile: &OrganizationConfig) -> ProfileJson {
    ProfileJson {
        id: profile.id.to_string(),
        template: profile.template.to_string(),
        organization: profile.organization.clone(),
        color: profile.color.to_lowercase(),
        links: profile.links.len(),
        sponsors: profile.sponsors.len(),
        supporters: profile.supporters.len(),
    }
}

fn list(args: ListArgs) -> Result<()> {
    let stored = profiles::list_profiles().context("failed to read profile store")?;

    if args.json {
        let payload: Vec<ProfileJson> = stored.iter().map(summarize).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).context("failed to serialize profile JSON")?
        );
        return Ok(());
    }

    if stored.is_empty() {
        println!("No profiles stored.");
        println!("Run: firma profile add <file>");
        return Ok(());
    }

    let rows: Vec<ProfileTableRow> = stored
        .iter()
        .map(|profile| ProfileTableRow {
            id: profile.id.to_string(),
            template: profile.template.to_string(),
            organization: profile.organization.clone(),
            color: profile.color.to_lowercase(),
            links: profile.links.len(),
            sponsors: profile.sponsors.len() + profile.supporters.len(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn add(args: AddArgs) -> Result<()> {
    let profile = profiles::load_profile_file(&args.file)
        .with_context(|| format!("invalid profile file {}", args.file.display()))?;
    profiles::save_profile(&profile)
        .with_context(|| format!("failed to store profile '{}'", profile.id))?;
    println!(
        "{} Added profile '{}' ({})",
        "✓".green().bold(),
        profile.id,
        profile.organization
    );
    Ok(())
}

fn check(args: CheckArgs) -> Result<()> {
    match profiles::load_profile_file(&args.file) {
        Ok(profile) => {
            println!(
                "{} {} is a valid '{}' profile for {}",
                "✓".green().bold(),
                args.file.display(),
                profile.template,
                profile.organization
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("{} {}: {err}", "✗".red().bold(), args.file.display());
            Err(err).with_context(|| format!("profile check failed for {}", args.file.display()))
        }
    }
}
