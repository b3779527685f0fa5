//! Integration tests for renderer escaping.
//!
//! The reader only ever hands out normalized colors, but these tests feed the
//! renderers records that could only come from direct storage tampering and
//! check that nothing markup-special survives unescaped.

use topbar_core::{render_bar_style, render_form, render_theme_color, FormContext, SettingsRecord};

const PAYLOAD: &str = r#""><script>alert('x')</script><style>"#;

fn tampered() -> SettingsRecord {
    SettingsRecord {
        background_color: PAYLOAD.to_string(),
        foreground_color: format!("red}} body {{ display:none }} {PAYLOAD}"),
    }
}

fn assert_payload_neutralized(html: &str) {
    assert!(!html.contains("<script>"), "raw <script> leaked: {html}");
    assert!(!html.contains("</script>"), "raw </script> leaked: {html}");
    assert!(!html.contains(r#""><"#), "attribute breakout leaked: {html}");
    assert!(!html.contains("'x'"), "raw quotes leaked: {html}");
}

#[test]
fn test_theme_color_escapes_tampered_value() {
    let html = render_theme_color(&tampered()).expect("render");

    assert_payload_neutralized(&html);
    assert!(html.starts_with(r#"<meta name="theme-color" content=""#));
}

#[test]
fn test_bar_style_escapes_tampered_value() {
    let html = render_bar_style(&tampered()).expect("render");

    assert_payload_neutralized(&html);
    // Exactly the template's own style element, never one from the payload.
    assert_eq!(html.matches("<style").count(), 1);
    assert_eq!(html.matches("</style>").count(), 1);
}

#[test]
fn test_form_escapes_tampered_value() {
    let ctx = FormContext {
        page_title: "WP Top Bar Control",
        option_name: "wtbc_settings",
        option_group: "wtbc_settings",
        action: "options.php",
        nonce: None,
    };

    let html = render_form(&tampered(), &ctx).expect("render");

    assert_payload_neutralized(&html);
}

#[test]
fn test_clean_record_renders_verbatim() {
    let record = SettingsRecord::default();

    let meta = render_theme_color(&record).expect("render");
    let style = render_bar_style(&record).expect("render");

    assert!(meta.contains(r##"content="#23282d""##));
    assert!(style.contains("background-color: #23282d !important;"));
    assert!(style.contains("color: #ffffff !important;"));
}
