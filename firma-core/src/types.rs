//! Domain types for firma profiles and user signature data.
//!
//! All types are serializable/deserializable via serde + serde_yaml. Field
//! names on the wire use `snake_case`, matching the profile YAML files.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed identifier for an organization profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProfileId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProfileId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The layout variant a profile renders with.
///
/// Closed two-case choice. Profile YAML is restricted to the two valid tags
/// by serde; free-form tags (CLI input, stored strings from older versions)
/// go through [`TemplateVariant::from_tag`], which maps anything unrecognized
/// to `Original`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateVariant {
    #[default]
    Original,
    WideLogo,
}

impl TemplateVariant {
    /// Parse a free-form template tag. Unrecognized tags fall back to
    /// `Original` — this fallback policy is load-bearing and must be kept.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "wide-logo" => TemplateVariant::WideLogo,
            _ => TemplateVariant::Original,
        }
    }

    /// The wire tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            TemplateVariant::Original => "original",
            TemplateVariant::WideLogo => "wide-logo",
        }
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// One individual's signature inputs, as submitted per render.
///
/// Never persisted. Empty strings are treated the same as absent values by
/// the resolver, so CLI flags can default to `None` freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserSignatureData {
    pub name: String,
    pub position: String,
    pub mail: String,
    /// Output file name override; consumers derive a default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_extra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_image: Option<String>,
}

/// The profile's name-image asset. Only the image URL is user-overridable;
/// alt, description and link url always come from the profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameImage {
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A social link rendered as a circular badge in the links bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub url: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A sponsor or supporter logo. Renders as a non-linked `<span>` when `url`
/// is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Organization-level configuration: branding defaults and shared assets.
///
/// Read-only input to the renderer — never mutated by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationConfig {
    pub id: ProfileId,
    #[serde(default)]
    pub template: TemplateVariant,
    pub main_font: String,
    pub name_font: String,
    pub name_image: NameImage,
    /// Six-hex-digit color with leading `#`. Case-insensitive on input;
    /// always lowercased when emitted into CSS.
    pub color: String,
    pub organization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_extra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opt_mail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub links: Vec<LinkItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsor_text: Option<String>,
    #[serde(default)]
    pub sponsors: Vec<SponsorItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supporter_text: Option<String>,
    #[serde(default)]
    pub supporters: Vec<SponsorItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, reason: &str) -> ProfileError {
    ProfileError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// `^#[0-9A-Fa-f]{6}$`
fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_mail_shaped(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

fn is_url_shaped(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn require_nonempty(field: &str, value: &str) -> Result<(), ProfileError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

fn require_url(field: &str, value: &str) -> Result<(), ProfileError> {
    if !is_url_shaped(value) {
        return Err(invalid(field, "must be an http(s) URL"));
    }
    Ok(())
}

fn require_positive(field: &str, value: u32) -> Result<(), ProfileError> {
    if value == 0 {
        return Err(invalid(field, "must be a positive pixel count"));
    }
    Ok(())
}

fn validate_sponsor_items(field: &str, items: &[SponsorItem]) -> Result<(), ProfileError> {
    for item in items {
        require_url(field, &item.image)?;
        if let Some(url) = &item.url {
            require_url(field, url)?;
        }
        if let Some(w) = item.width {
            require_positive(field, w)?;
        }
        if let Some(h) = item.height {
            require_positive(field, h)?;
        }
    }
    Ok(())
}

impl OrganizationConfig {
    /// Schema-style validation, applied on every load and save.
    ///
    /// Mirrors what the upstream schema layer enforced: required fields,
    /// hex color shape, mail shape, http(s) URL shape, positive dimensions.
    pub fn validate(&self) -> Result<(), ProfileError> {
        require_nonempty("id", &self.id.0)?;
        require_nonempty("organization", &self.organization)?;
        require_nonempty("main_font", &self.main_font)?;
        require_nonempty("name_font", &self.name_font)?;

        if !is_hex_color(&self.color) {
            return Err(invalid("color", "must match #rrggbb (6 hex digits)"));
        }

        require_url("name_image.image", &self.name_image.image)?;
        if let Some(url) = &self.name_image.url {
            require_url("name_image.url", url)?;
        }

        if let Some(mail) = self.opt_mail.as_deref().filter(|m| !m.is_empty()) {
            if !is_mail_shaped(mail) {
                return Err(invalid("opt_mail", "must be a mail address"));
            }
        }
        if let Some(w) = self.max_width {
            require_positive("max_width", w)?;
        }

        for link in &self.links {
            require_url("links.url", &link.url)?;
            require_url("links.image", &link.image)?;
        }
        validate_sponsor_items("sponsors", &self.sponsors)?;
        validate_sponsor_items("supporters", &self.supporters)?;
        Ok(())
    }
}

impl UserSignatureData {
    /// Shape checks on user-supplied values. Empty strings pass — the
    /// resolver treats them as absent and substitutes placeholders.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if !self.mail.is_empty() && !is_mail_shaped(&self.mail) {
            return Err(invalid("mail", "must be a mail address"));
        }
        if let Some(mail) = self.opt_mail.as_deref().filter(|m| !m.is_empty()) {
            if !is_mail_shaped(mail) {
                return Err(invalid("opt_mail", "must be a mail address"));
            }
        }
        if let Some(image) = self.name_image.as_deref().filter(|i| !i.is_empty()) {
            require_url("name_image", image)?;
        }
        if let Some(w) = self.max_width {
            require_positive("max_width", w)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
