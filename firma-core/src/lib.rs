//! Firma core library — domain types, profile persistence, errors.
//!
//! Public API surface:
//! - [`types`] — user data, organization profiles, template variants
//! - [`error`] — [`ProfileError`]
//! - [`profiles`] — load / save / list profiles under `~/.firma/profiles/`

pub mod error;
pub mod profiles;
pub mod types;

pub use error::ProfileError;
pub use types::{
    LinkItem, NameImage, OrganizationConfig, ProfileId, SponsorItem, TemplateVariant,
    UserSignatureData,
};
