//! Markup renderers.
//!
//! Every renderer is a pure function from a [`SettingsRecord`] to a markup
//! string.  The host decides when to call them and where the output goes.
//!
//! Values are interpolated through askama templates, which HTML-escape them.
//! The reader already guarantees normalized hex colors, so escaping is a
//! second, independent layer against tampered storage.

use askama::Template;

/// Error produced when a template fails to render.
pub use askama::Error as RenderError;

use crate::domain::settings::{ColorField, SettingsRecord};

/// Root selector of the navigation bar being restyled.
pub const BAR_SELECTOR: &str = "#wpadminbar";

/// CSS class the color-picker widget attaches to.
pub const PICKER_CLASS: &str = "wtbc-color-picker";

/// Host-supplied values the settings form needs besides the colors.
#[derive(Debug, Clone)]
pub struct FormContext<'a> {
    /// Heading shown above the form.
    pub page_title: &'a str,
    /// Settings name; prefixes every input name (`name[background_color]`).
    pub option_name: &'a str,
    /// Option group the host validates on submit.
    pub option_group: &'a str,
    /// URL the form posts to.
    pub action: &'a str,
    /// Anti-forgery token issued by the host, if it uses one.
    pub nonce: Option<&'a str>,
}

#[derive(Debug, Clone)]
struct FormField<'a> {
    id: &'a str,
    label: &'a str,
    description: &'a str,
    value: &'a str,
}

#[derive(Template)]
#[template(path = "theme_color.html")]
struct ThemeColorTemplate<'a> {
    color: &'a str,
}

#[derive(Template)]
#[template(path = "bar_style.html")]
struct BarStyleTemplate<'a> {
    bar: &'a str,
    background: &'a str,
    foreground: &'a str,
}

#[derive(Template)]
#[template(path = "settings_form.html")]
struct SettingsFormTemplate<'a> {
    page_title: &'a str,
    action: &'a str,
    option_group: &'a str,
    option_name: &'a str,
    nonce: Option<&'a str>,
    picker_class: &'a str,
    submit_label: &'a str,
    fields: Vec<FormField<'a>>,
}

/// Renders the `<meta name="theme-color">` tag carrying the background color.
pub fn render_theme_color(record: &SettingsRecord) -> Result<String, RenderError> {
    ThemeColorTemplate {
        color: &record.background_color,
    }
    .render()
}

/// Renders the `<style>` block that recolors the bar.
///
/// Callers are responsible for only emitting it while the bar is displayed.
pub fn render_bar_style(record: &SettingsRecord) -> Result<String, RenderError> {
    BarStyleTemplate {
        bar: BAR_SELECTOR,
        background: &record.background_color,
        foreground: &record.foreground_color,
    }
    .render()
}

/// Renders the settings form pre-filled with the current colors.
///
/// Read-only with respect to `record`: submission is processed by the host,
/// which hands the payload back to the sanitizer.
pub fn render_form(
    record: &SettingsRecord,
    ctx: &FormContext<'_>,
) -> Result<String, RenderError> {
    let fields = ColorField::ALL
        .into_iter()
        .map(|field| FormField {
            id: field.key(),
            label: field_label(field),
            description: field_description(field),
            value: record.get(field),
        })
        .collect();

    SettingsFormTemplate {
        page_title: ctx.page_title,
        action: ctx.action,
        option_group: ctx.option_group,
        option_name: ctx.option_name,
        nonce: ctx.nonce,
        picker_class: PICKER_CLASS,
        submit_label: "Save Colors",
        fields,
    }
    .render()
}

fn field_label(field: ColorField) -> &'static str {
    match field {
        ColorField::Background => "Background Color",
        ColorField::Foreground => "Foreground Color",
    }
}

fn field_description(field: ColorField) -> &'static str {
    match field {
        ColorField::Background => {
            "This color will be applied to the admin bar background and theme-color meta tag."
        }
        ColorField::Foreground => "This color will be applied to the admin bar text.",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bg: &str, fg: &str) -> SettingsRecord {
        SettingsRecord {
            background_color: bg.to_string(),
            foreground_color: fg.to_string(),
        }
    }

    fn form_ctx() -> FormContext<'static> {
        FormContext {
            page_title: "WP Top Bar Control",
            option_name: "wtbc_settings",
            option_group: "wtbc_settings",
            action: "options.php",
            nonce: None,
        }
    }

    #[test]
    fn test_theme_color_carries_background() {
        // Arrange
        let rec = record("#112233", "#445566");

        // Act
        let html = render_theme_color(&rec).unwrap();

        // Assert
        assert!(html.contains(r##"<meta name="theme-color" content="#112233">"##));
        assert!(!html.contains("#445566"));
    }

    #[test]
    fn test_bar_style_applies_both_colors() {
        let html = render_bar_style(&record("#112233", "#445566")).unwrap();

        assert!(html.starts_with("<style"));
        assert!(html.contains("#wpadminbar {"));
        assert!(html.contains("background-color: #112233 !important;"));
        assert!(html.contains("color: #445566 !important;"));
        assert!(html.contains("#wpadminbar .ab-submenu .ab-item"));
    }

    #[test]
    fn test_form_prefills_both_inputs() {
        let html = render_form(&SettingsRecord::default(), &form_ctx()).unwrap();

        assert!(html.contains(r#"name="wtbc_settings[background_color]""#));
        assert!(html.contains(r#"name="wtbc_settings[foreground_color]""#));
        assert!(html.contains(r##"value="#23282d""##));
        assert!(html.contains(r##"value="#ffffff""##));
        assert!(html.contains(r#"class="wtbc-color-picker""#));
        assert!(html.contains("Background Color"));
        assert!(html.contains(r#"value="Save Colors""#));
        assert!(html.contains(r#"action="options.php""#));
    }

    #[test]
    fn test_form_includes_nonce_only_when_given() {
        let without = render_form(&SettingsRecord::default(), &form_ctx()).unwrap();
        assert!(!without.contains("_wpnonce"));

        let ctx = FormContext {
            nonce: Some("abc123"),
            ..form_ctx()
        };
        let with = render_form(&SettingsRecord::default(), &ctx).unwrap();
        assert!(with.contains(r#"name="_wpnonce" value="abc123""#));
    }
}
