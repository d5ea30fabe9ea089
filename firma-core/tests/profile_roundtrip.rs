//! Roundtrip serialisation tests for `firma-core` profile types.
//!
//! Each `#[case]` is isolated — no shared state.

use firma_core::types::{
    LinkItem, NameImage, OrganizationConfig, ProfileId, SponsorItem, TemplateVariant,
};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn minimal_profile() -> OrganizationConfig {
    OrganizationConfig {
        id: ProfileId::from("acme"),
        template: TemplateVariant::Original,
        main_font: "Arial".to_string(),
        name_font: "Georgia".to_string(),
        name_image: NameImage {
            image: "https://acme.example/logo.png".to_string(),
            alt: None,
            description: None,
            url: None,
        },
        color: "#1a2b3c".to_string(),
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

fn full_profile() -> OrganizationConfig {
    OrganizationConfig {
        id: ProfileId::from("federacion"),
        template: TemplateVariant::WideLogo,
        main_font: "Lato".to_string(),
        name_font: "Merriweather".to_string(),
        name_image: NameImage {
            image: "https://org.example/assets/logo.png".to_string(),
            alt: Some("Federación".to_string()),
            description: Some("Logotipo de la federación".to_string()),
            url: Some("https://org.example".to_string()),
        },
        color: "#AB12CD".to_string(),
        organization: "Federación de Ejemplo".to_string(),
        organization_extra: Some("Entidad declarada de utilidad pública".to_string()),
        phone: Some("912 345 678".to_string()),
        phone_country_code: Some("+34".to_string()),
        internal_phone: Some("210".to_string()),
        opt_mail: Some("info@org.example".to_string()),
        max_width: Some(600),
        links: vec![LinkItem {
            url: "https://social.example/org".to_string(),
            image: "https://org.example/assets/social.png".to_string(),
            alt: Some("Mastodon".to_string()),
            description: Some("Perfil en Mastodon".to_string()),
        }],
        sponsor_text: Some("Con el patrocinio de:".to_string()),
        sponsors: vec![SponsorItem {
            url: Some("https://sponsor.example".to_string()),
            image: "https://org.example/assets/sponsor.png".to_string(),
            alt: Some("Sponsor".to_string()),
            description: None,
            width: Some(140),
            height: Some(48),
        }],
        supporter_text: Some("Con el apoyo de:".to_string()),
        supporters: vec![SponsorItem {
            url: None,
            image: "https://org.example/assets/supporter.png".to_string(),
            alt: None,
            description: None,
            width: None,
            height: Some(40),
        }],
        footer_address: Some("Calle Falsa 123, 28080 Madrid".to_string()),
        footer_text: Some("Este mensaje puede contener información confidencial.".to_string()),
    }
}

fn unicode_profile() -> OrganizationConfig {
    let mut profile = minimal_profile();
    profile.id = ProfileId::from("организация-组织");
    profile.organization = "Asociación de Niños & Niñas <con> \"acentos\"".to_string();
    profile.organization_extra = Some("日本語・한국어・العربية".to_string());
    profile
}

// ---------------------------------------------------------------------------
// Parameterised roundtrip test
// ---------------------------------------------------------------------------

#[rstest]
#[case("minimal", minimal_profile())]
#[case("all_fields", full_profile())]
#[case("unicode_strings", unicode_profile())]
fn profile_roundtrip(#[case] label: &str, #[case] profile: OrganizationConfig) {
    let yaml = serde_yaml::to_string(&profile)
        .unwrap_or_else(|e| panic!("[{label}] serialize failed: {e}"));
    let back: OrganizationConfig = serde_yaml::from_str(&yaml)
        .unwrap_or_else(|e| panic!("[{label}] deserialize failed: {e}"));
    assert_eq!(profile, back, "[{label}] roundtrip");
}

// ---------------------------------------------------------------------------
// Hand-written YAML, the way profile files are actually authored
// ---------------------------------------------------------------------------

const HAND_WRITTEN: &str = r##"
id: colectivo
template: wide-logo
main_font: Lato
name_font: Georgia
name_image:
  image: https://colectivo.example/logo.png
  alt: Colectivo
  url: https://colectivo.example
color: "#0F7B58"
organization: Colectivo de Ejemplo
phone: "911 222 333"
phone_country_code: "+34"
opt_mail: hola@colectivo.example
max_width: 550
links:
  - url: https://social.example/colectivo
    image: https://colectivo.example/social.png
    alt: Mastodon
sponsors:
  - image: https://colectivo.example/sponsor.png
    width: 120
    height: 40
supporter_text: "Con el apoyo de:"
supporters:
  - url: https://supporter.example
    image: https://colectivo.example/supporter.png
"##;

#[test]
fn hand_written_yaml_parses_and_validates() {
    let profile: OrganizationConfig = serde_yaml::from_str(HAND_WRITTEN).expect("parse");
    profile.validate().expect("validate");
    assert_eq!(profile.id, ProfileId::from("colectivo"));
    assert_eq!(profile.template, TemplateVariant::WideLogo);
    assert_eq!(profile.max_width, Some(550));
    assert_eq!(profile.links.len(), 1);
    assert_eq!(profile.sponsors[0].width, Some(120));
    assert_eq!(profile.supporters[0].url.as_deref(), Some("https://supporter.example"));
    // Omitted optional sections come back as defaults, not parse errors.
    assert!(profile.organization_extra.is_none());
    assert!(profile.footer_address.is_none());
    assert!(profile.sponsor_text.is_none());
}

#[test]
fn omitted_template_defaults_to_original() {
    let yaml = HAND_WRITTEN.replace("template: wide-logo\n", "");
    let profile: OrganizationConfig = serde_yaml::from_str(&yaml).expect("parse");
    assert_eq!(profile.template, TemplateVariant::Original);
}

#[test]
fn absent_optionals_are_not_serialized() {
    let yaml = serde_yaml::to_string(&minimal_profile()).expect("serialize");
    assert!(!yaml.contains("phone"), "absent phone must not appear:\n{yaml}");
    assert!(!yaml.contains("footer_address"));
    assert!(!yaml.contains("sponsor_text"));
}

// ---------------------------------------------------------------------------
// Variant tags on the wire
// ---------------------------------------------------------------------------

#[rstest]
#[case(TemplateVariant::Original, "original")]
#[case(TemplateVariant::WideLogo, "wide-logo")]
fn variant_tag_roundtrip(#[case] variant: TemplateVariant, #[case] tag: &str) {
    let yaml = serde_yaml::to_string(&variant).expect("serialize");
    assert_eq!(yaml.trim(), tag);
    let back: TemplateVariant = serde_yaml::from_str(tag).expect("deserialize");
    assert_eq!(back, variant);
}
