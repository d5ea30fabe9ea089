//! `firma generate` — render one signature to a file or stdout.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use colored::Colorize;

use firma_core::{
    profiles,
    types::{ProfileId, TemplateVariant, UserSignatureData},
};
use firma_renderer::{extract_signature_fragment, OptionalField, SignatureRenderer, TemplateData};

use super::super::OptionalFieldArg;

/// Arguments for `firma generate`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["profile", "profile_file"])))]
pub struct GenerateArgs {
    /// Profile id to load from the store (~/.firma/profiles/<id>.yaml).
    #[arg(long, short = 'p')]
    pub profile: Option<String>,

    /// Load the profile from an arbitrary YAML file instead of the store.
    #[arg(long, value_name = "PATH")]
    pub profile_file: Option<PathBuf>,

    /// Full name shown in the signature.
    #[arg(long, default_value = "")]
    pub name: String,

    /// Position or role line.
    #[arg(long, default_value = "")]
    pub position: String,

    /// Primary mail address.
    #[arg(long, default_value = "")]
    pub mail: String,

    /// Personal phone number (display form; spaces allowed).
    #[arg(long)]
    pub phone: Option<String>,

    /// Country code prefix for the tel: link, e.g. "+34".
    #[arg(long)]
    pub phone_country_code: Option<String>,

    /// Internal extension, shown in parentheses after the phone.
    #[arg(long)]
    pub internal_phone: Option<String>,

    /// Secondary mail address.
    #[arg(long)]
    pub opt_mail: Option<String>,

    /// Extra organization line, rendered in italics.
    #[arg(long)]
    pub organization_extra: Option<String>,

    /// Override the profile's body font.
    #[arg(long)]
    pub main_font: Option<String>,

    /// Override the profile's name font.
    #[arg(long)]
    pub name_font: Option<String>,

    /// Override the profile's maximum signature width, in pixels.
    #[arg(long)]
    pub max_width: Option<u32>,

    /// Override the profile's name image URL.
    #[arg(long)]
    pub name_image: Option<String>,

    /// Treat a field as personally controlled: use the given value or omit
    /// it entirely, never falling back to the profile. Repeatable.
    #[arg(long = "optional", value_name = "FIELD")]
    pub optional: Vec<OptionalFieldArg>,

    /// Render a specific layout tag instead of the profile's default.
    /// Unknown tags render the original layout.
    #[arg(long, value_name = "TAG")]
    pub template: Option<String>,

    /// Load layout overrides (.tera files) from this directory.
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Emit only the signature fragment (no <html>/<head>/<body> wrapper),
    /// ready to paste into a mail client.
    #[arg(long)]
    pub fragment: bool,

    /// Write to stdout instead of a file.
    #[arg(long)]
    pub stdout: bool,

    /// Output file path. Defaults to firma-<profile>-<name>.html.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let profile = match (&self.profile, &self.profile_file) {
            (Some(id), _) => profiles::load_profile(&ProfileId::from(id.as_str()))
                .with_context(|| format!("failed to load profile '{id}'"))?,
            (None, Some(path)) => profiles::load_profile_file(path)
                .with_context(|| format!("failed to load profile file {}", path.display()))?,
            (None, None) => unreachable!("clap group requires one source"),
        };

        let user = UserSignatureData {
            name: self.name,
            position: self.position,
            mail: self.mail,
            output: self
                .output
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            phone: self.phone,
            phone_country_code: self.phone_country_code,
            internal_phone: self.internal_phone,
            opt_mail: self.opt_mail,
            organization_extra: self.organization_extra,
            main_font: self.main_font,
            name_font: self.name_font,
            max_width: self.max_width,
            name_image: self.name_image,
        };
        user.validate().context("invalid signature data")?;

        let enabled: Option<HashSet<OptionalField>> = if self.optional.is_empty() {
            None
        } else {
            Some(self.optional.iter().map(|arg| arg.0).collect())
        };

        let renderer = SignatureRenderer::with_template_dir(self.template_dir.as_deref())
            .context("failed to load templates")?;
        let data = TemplateData::resolve(&user, &profile, enabled.as_ref());
        let variant = match &self.template {
            Some(tag) => TemplateVariant::from_tag(tag),
            None => profile.template,
        };
        let html = renderer
            .render_variant(&data, variant)
            .with_context(|| format!("failed to render '{variant}' layout"))?;

        let content = if self.fragment {
            extract_signature_fragment(&html)
        } else {
            html.as_str()
        };

        if self.stdout {
            println!("{content}");
            return Ok(());
        }

        let path = output_path(&user, &profile.id, &data.name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "{} Wrote {} signature to {}",
            "✓".green().bold(),
            variant,
            path.display()
        );
        Ok(())
    }
}

/// The signature data's own `output` field wins; without it the file name is
/// derived from the profile id and the resolved name.
fn output_path(user: &UserSignatureData, profile_id: &ProfileId, name: &str) -> PathBuf {
    match user.output.as_deref().filter(|o| !o.is_empty()) {
        Some(output) => PathBuf::from(output),
        None => PathBuf::from(default_file_name(profile_id, name)),
    }
}

/// `firma-<profile>-<slug>.html`, where the slug is the lowercased name with
/// whitespace runs collapsed to single hyphens.
fn default_file_name(profile_id: &ProfileId, name: &str) -> String {
    format!("firma-{}-{}.html", profile_id, slugify(name))
}

fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
