//! Tera rendering engine — [`SignatureRenderer`] and template dispatch.
//!
//! # Layouts
//!
//! | Variant     | Template                        | Shape                                        |
//! |-------------|---------------------------------|----------------------------------------------|
//! | `original`  | `signature/original.html.tera`  | round avatar + name, horizontal bar, footer  |
//! | `wide-logo` | `signature/wide_logo.html.tera` | wide logo, vertical bar, sponsors/supporters |
//!
//! Unrecognized template tags render the original layout. The footer only
//! exists in the original layout and sponsors only in wide-logo; that
//! asymmetry is intentional.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use firma_core::types::{OrganizationConfig, TemplateVariant, UserSignatureData};

use crate::context::{OptionalField, TemplateData};
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("shared/_head.html.tera", include_str!("templates/_partials/head.html.tera")),
    ("shared/_macros.html.tera", include_str!("templates/_partials/macros.html.tera")),
    ("signature/original.html.tera", include_str!("templates/original.html.tera")),
    ("signature/wide_logo.html.tera", include_str!("templates/wide_logo.html.tera")),
];

fn template_name(variant: TemplateVariant) -> &'static str {
    match variant {
        TemplateVariant::Original => "signature/original.html.tera",
        TemplateVariant::WideLogo => "signature/wide_logo.html.tera",
    }
}

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path
            .strip_prefix(dir)
            .unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// SignatureRenderer
// ---------------------------------------------------------------------------

/// Tera-based renderer for both signature layouts.
///
/// Create once with [`SignatureRenderer::new`] and reuse — each render call
/// is independent and idempotent given identical inputs and calendar date.
/// An organization can override the embedded layouts by pointing
/// [`SignatureRenderer::with_template_dir`] at a directory of `.tera` files
/// using the same relative names.
pub struct SignatureRenderer {
    tera: Tera,
}

impl SignatureRenderer {
    /// Construct a renderer with the embedded templates only.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_template_dir(None)
    }

    /// Construct a renderer, loading embedded templates plus any overrides
    /// found in `user_template_dir`. Names are normalized to lowercase
    /// forward-slash relative paths.
    pub fn with_template_dir(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(SignatureRenderer { tera })
    }

    /// Render a full HTML document from resolved data and a free-form
    /// template tag. Only `"wide-logo"` selects the wide layout; anything
    /// else — including `"original"` and unknown tags — renders original.
    pub fn render(&self, data: &TemplateData, template_tag: &str) -> Result<String, RenderError> {
        self.render_variant(data, TemplateVariant::from_tag(template_tag))
    }

    /// Render a full HTML document for a known [`TemplateVariant`].
    pub fn render_variant(
        &self,
        data: &TemplateData,
        variant: TemplateVariant,
    ) -> Result<String, RenderError> {
        let ctx = tera::Context::from_serialize(data)?;
        Ok(self.tera.render(template_name(variant), &ctx)?)
    }

    /// Resolve `user` against `profile` and render with the profile's own
    /// template variant — the everyday entry point.
    pub fn render_signature(
        &self,
        user: &UserSignatureData,
        profile: &OrganizationConfig,
        enabled: Option<&std::collections::HashSet<OptionalField>>,
    ) -> Result<String, RenderError> {
        let data = TemplateData::resolve(user, profile, enabled);
        self.render_variant(&data, profile.template)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use firma_core::types::{NameImage, ProfileId};

    fn make_profile() -> OrganizationConfig {
        OrganizationConfig {
            id: ProfileId::from("acme"),
            template: TemplateVariant::Original,
            main_font: "Lato".to_string(),
            name_font: "Georgia".to_string(),
            name_image: NameImage {
                image: "https://acme.example/logo.png".to_string(),
                alt: None,
                description: None,
                url: None,
            },
            color: "#AB12CD".to_string(),
            organization: "ACME".to_string(),
            organization_extra: None,
            phone: None,
            phone_country_code: None,
            internal_phone: None,
            opt_mail: None,
            max_width: None,
            links: vec![],
            sponsor_text: None,
            sponsors: vec![],
            supporter_text: None,
            supporters: vec![],
            footer_address: None,
            footer_text: None,
        }
    }

    fn make_data() -> TemplateData {
        TemplateData::resolve_on(
            &UserSignatureData::default(),
            &make_profile(),
            None,
            NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
        )
    }

    #[test]
    fn renderer_new_succeeds() {
        SignatureRenderer::new().expect("embedded templates must parse");
    }

    #[test]
    fn renders_complete_document() {
        let renderer = SignatureRenderer::new().unwrap();
        let html = renderer.render(&make_data(), "original").unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert!(html.contains(r#"<meta name="last-modified" content="2026-01-09" />"#));
    }

    #[test]
    fn unknown_tag_renders_original_layout() {
        let renderer = SignatureRenderer::new().unwrap();
        let data = make_data();
        let fallback = renderer.render(&data, "nonexistent").unwrap();
        let original = renderer.render(&data, "original").unwrap();
        assert_eq!(fallback, original);
    }

    #[test]
    fn wide_logo_tag_selects_wide_layout() {
        let renderer = SignatureRenderer::new().unwrap();
        let data = make_data();
        let wide = renderer.render(&data, "wide-logo").unwrap();
        let original = renderer.render(&data, "original").unwrap();
        assert_ne!(wide, original);
        assert!(wide.contains("min-width: 120px"), "wide logo image missing");
    }

    #[test]
    fn user_template_dir_overrides_embedded_layout() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("signature");
        std::fs::create_dir_all(&custom).unwrap();
        std::fs::write(
            custom.join("original.html.tera"),
            "<!DOCTYPE html>\n<html>\n  <body><div>{{ name }} custom</div></body>\n</html>\n",
        )
        .unwrap();

        let renderer = SignatureRenderer::with_template_dir(Some(dir.path())).unwrap();
        let html = renderer.render(&make_data(), "original").unwrap();
        assert!(html.contains("Nombre custom"));
    }

    #[test]
    fn render_signature_uses_profile_variant() {
        let renderer = SignatureRenderer::new().unwrap();
        let mut profile = make_profile();
        profile.template = TemplateVariant::WideLogo;
        let html = renderer
            .render_signature(&UserSignatureData::default(), &profile, None)
            .unwrap();
        assert!(html.contains("min-width: 120px"));
    }
}
