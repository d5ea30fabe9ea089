//! # firma-renderer
//!
//! Tera-based engine that renders email-client-safe HTML signatures from a
//! user record merged with an organization profile.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use firma_core::types::{OrganizationConfig, UserSignatureData};
//! use firma_renderer::{extract_signature_fragment, SignatureRenderer};
//!
//! fn generate(user: &UserSignatureData, profile: &OrganizationConfig) {
//!     if let Ok(renderer) = SignatureRenderer::new() {
//!         if let Ok(html) = renderer.render_signature(user, profile, None) {
//!             let fragment = extract_signature_fragment(&html);
//!             println!("{} bytes, fragment {} bytes", html.len(), fragment.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod extract;

pub use context::{LinkCtx, OptionalField, SponsorCtx, TemplateData};
pub use engine::SignatureRenderer;
pub use error::RenderError;
pub use extract::extract_signature_fragment;
