//! Rendering context — the resolved, flattened payload built from a user
//! record and an organization profile.
//!
//! Resolution is a pure merge keyed by [`OptionalField`]: each
//! optional-overridable field goes through the same rule, so the override-set
//! semantics stay auditable in one place. Every field of [`TemplateData`]
//! serializes (no `skip_serializing_if`) so templates never see an undefined
//! variable.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use firma_core::types::{LinkItem, OrganizationConfig, SponsorItem, UserSignatureData};

// ---------------------------------------------------------------------------
// Optional-overridable fields
// ---------------------------------------------------------------------------

/// The fields a render call can switch into "user value or nothing" mode.
///
/// When a field is in the enabled set, the profile's value is ignored even if
/// the user left the field empty. Outside the set the classic fallback
/// applies: non-empty user value, else the profile's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionalField {
    Phone,
    PhoneCountryCode,
    InternalPhone,
    OptMail,
    OrganizationExtra,
    MainFont,
    NameFont,
    MaxWidth,
    NameImage,
}

impl OptionalField {
    /// All overridable fields in a stable order.
    pub fn all() -> &'static [OptionalField] {
        &[
            OptionalField::Phone,
            OptionalField::PhoneCountryCode,
            OptionalField::InternalPhone,
            OptionalField::OptMail,
            OptionalField::OrganizationExtra,
            OptionalField::MainFont,
            OptionalField::NameFont,
            OptionalField::MaxWidth,
            OptionalField::NameImage,
        ]
    }

    /// Stable string id, as used in override sets and CLI flags.
    pub fn id(&self) -> &'static str {
        match self {
            OptionalField::Phone => "phone",
            OptionalField::PhoneCountryCode => "phone_country_code",
            OptionalField::InternalPhone => "internal_phone",
            OptionalField::OptMail => "opt_mail",
            OptionalField::OrganizationExtra => "organization_extra",
            OptionalField::MainFont => "main_font",
            OptionalField::NameFont => "name_font",
            OptionalField::MaxWidth => "max_width",
            OptionalField::NameImage => "name_image",
        }
    }

    /// Inverse of [`OptionalField::id`].
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.id() == id)
    }
}

// ---------------------------------------------------------------------------
// Context structs
// ---------------------------------------------------------------------------

/// Social link entry as the templates see it. Empty alt/description are
/// normalized to `None` during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCtx {
    pub url: String,
    pub image: String,
    pub alt: Option<String>,
    pub description: Option<String>,
}

impl From<&LinkItem> for LinkCtx {
    fn from(link: &LinkItem) -> Self {
        LinkCtx {
            url: link.url.clone(),
            image: link.image.clone(),
            alt: non_empty(link.alt.as_deref()),
            description: non_empty(link.description.as_deref()),
        }
    }
}

/// Sponsor/supporter entry as the templates see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorCtx {
    pub url: Option<String>,
    pub image: String,
    pub alt: Option<String>,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl From<&SponsorItem> for SponsorCtx {
    fn from(item: &SponsorItem) -> Self {
        SponsorCtx {
            url: non_empty(item.url.as_deref()),
            image: item.image.clone(),
            alt: non_empty(item.alt.as_deref()),
            description: non_empty(item.description.as_deref()),
            width: item.width,
            height: item.height,
        }
    }
}

/// Fully-resolved rendering payload — the sole input to HTML generation.
///
/// Constructed fresh per render call; carries no identity beyond the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    pub name: String,
    pub position: String,
    pub mail: String,
    pub phone: Option<String>,
    pub phone_country_code: Option<String>,
    /// Dialing href for the contact line: country code prepended, whitespace
    /// stripped from the number. Display text keeps the user's spacing.
    pub phone_href: Option<String>,
    pub internal_phone: Option<String>,
    pub opt_mail: Option<String>,
    pub organization_extra: Option<String>,
    pub name_image: String,
    pub name_image_alt: Option<String>,
    pub name_image_description: Option<String>,
    pub name_image_url: Option<String>,
    pub main_font: String,
    pub name_font: String,
    pub color: String,
    pub organization: String,
    pub max_width: Option<u32>,
    /// Local calendar date at resolve time, `YYYY-MM-DD`. A "last generated"
    /// stamp only — no business logic reads it.
    pub date: String,
    pub links: Vec<LinkCtx>,
    pub sponsors: Vec<SponsorCtx>,
    pub supporters: Vec<SponsorCtx>,
    pub sponsor_text: Option<String>,
    pub supporter_text: Option<String>,
    pub footer_address: Option<String>,
    pub footer_text: Option<String>,
}

impl TemplateData {
    /// Merge `user` and `profile` into a fully-resolved context, stamped with
    /// today's local date. Total — never fails.
    pub fn resolve(
        user: &UserSignatureData,
        profile: &OrganizationConfig,
        enabled: Option<&HashSet<OptionalField>>,
    ) -> Self {
        Self::resolve_on(user, profile, enabled, Local::now().date_naive())
    }

    /// [`TemplateData::resolve`] with an explicit date, for deterministic
    /// callers and tests.
    pub fn resolve_on(
        user: &UserSignatureData,
        profile: &OrganizationConfig,
        enabled: Option<&HashSet<OptionalField>>,
        date: NaiveDate,
    ) -> Self {
        let text = |field: OptionalField, u: Option<&str>, p: Option<&str>| {
            resolve_optional(field, u, p, enabled)
        };

        let phone = text(
            OptionalField::Phone,
            user.phone.as_deref(),
            profile.phone.as_deref(),
        );
        let phone_country_code = text(
            OptionalField::PhoneCountryCode,
            user.phone_country_code.as_deref(),
            profile.phone_country_code.as_deref(),
        );
        let phone_href = phone.as_deref().map(|number| {
            let digits: String = number.chars().filter(|c| !c.is_whitespace()).collect();
            match phone_country_code.as_deref() {
                Some(code) => format!("{code}{digits}"),
                None => digits,
            }
        });

        // Only the image URL is overridable, and it still falls back to the
        // profile's URL in override mode — both layouts require an image.
        let name_image = text(
            OptionalField::NameImage,
            user.name_image.as_deref(),
            Some(&profile.name_image.image),
        )
        .unwrap_or_else(|| profile.name_image.image.clone());

        let max_width = if is_enabled(enabled, OptionalField::MaxWidth) {
            user.max_width
        } else {
            user.max_width.or(profile.max_width)
        };

        TemplateData {
            name: placeholder_or(&user.name, "Nombre"),
            position: placeholder_or(&user.position, "Puesto"),
            mail: placeholder_or(&user.mail, "email@ejemplo.com"),
            phone,
            phone_country_code,
            phone_href,
            internal_phone: text(
                OptionalField::InternalPhone,
                user.internal_phone.as_deref(),
                profile.internal_phone.as_deref(),
            ),
            opt_mail: text(
                OptionalField::OptMail,
                user.opt_mail.as_deref(),
                profile.opt_mail.as_deref(),
            ),
            organization_extra: text(
                OptionalField::OrganizationExtra,
                user.organization_extra.as_deref(),
                profile.organization_extra.as_deref(),
            ),
            name_image,
            name_image_alt: non_empty(profile.name_image.alt.as_deref()),
            name_image_description: non_empty(profile.name_image.description.as_deref()),
            name_image_url: non_empty(profile.name_image.url.as_deref()),
            main_font: text(
                OptionalField::MainFont,
                user.main_font.as_deref(),
                Some(&profile.main_font),
            )
            .unwrap_or_else(|| "Arial".to_string()),
            name_font: text(
                OptionalField::NameFont,
                user.name_font.as_deref(),
                Some(&profile.name_font),
            )
            .unwrap_or_else(|| "Arial".to_string()),
            color: profile.color.clone(),
            organization: profile.organization.clone(),
            max_width,
            date: date.format("%Y-%m-%d").to_string(),
            links: profile.links.iter().map(LinkCtx::from).collect(),
            sponsors: profile.sponsors.iter().map(SponsorCtx::from).collect(),
            supporters: profile.supporters.iter().map(SponsorCtx::from).collect(),
            sponsor_text: non_empty(profile.sponsor_text.as_deref()),
            supporter_text: non_empty(profile.supporter_text.as_deref()),
            footer_address: non_empty(profile.footer_address.as_deref()),
            footer_text: non_empty(profile.footer_text.as_deref()),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution rules
// ---------------------------------------------------------------------------

fn is_enabled(enabled: Option<&HashSet<OptionalField>>, field: OptionalField) -> bool {
    enabled.map(|set| set.contains(&field)).unwrap_or(false)
}

/// The single rule every optional-overridable text field goes through.
fn resolve_optional(
    field: OptionalField,
    user: Option<&str>,
    profile: Option<&str>,
    enabled: Option<&HashSet<OptionalField>>,
) -> Option<String> {
    let user = non_empty(user);
    if is_enabled(enabled, field) {
        user
    } else {
        user.or_else(|| non_empty(profile))
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_owned)
}

fn placeholder_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
