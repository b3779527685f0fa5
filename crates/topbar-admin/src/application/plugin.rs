//! `TopBarControl`: the panel as seen by the host.
//!
//! The host owns the page lifecycle.  It calls [`TopBarControl::register`]
//! once, then invokes [`TopBarControl::on_hook`] (and the asset / settings
//! page helpers) at the points the panel subscribed to, placing the returned
//! markup wherever that hook point belongs.
//!
//! Output for public pages must never break rendering: a failing template is
//! logged and replaced with empty output, and a failing store resolves to
//! default colors.

use topbar_core::{
    render::PICKER_CLASS, render_bar_style, render_form, render_theme_color, FormContext, RenderError,
    SettingsRecord, StoredSettings,
};
use tracing::error;

use super::ports::{
    AssetRequest, HookPoint, HostRegistrar, OptionsPage, SettingRegistration, SettingsStore,
};
use super::read_settings::read_settings;
use super::sanitize_settings::{sanitize, SubmittedPayload};
use super::save_settings::{save_settings, MergePolicy, SaveError, SaveOutcome};

/// Host asset handle of the color-picker widget.
pub const COLOR_PICKER_HANDLE: &str = "wp-color-picker";

/// Script that attaches the picker widget to the form's color inputs.
fn color_picker_init() -> String {
    format!(
        "jQuery(document).ready(function($) {{\n    $(\".{PICKER_CLASS}\").wpColorPicker();\n}});\n"
    )
}

/// Identity and behaviour of one panel instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginOptions {
    /// Name of the single settings slot (also the option group).
    pub option_name: String,
    pub page_title: String,
    pub menu_title: String,
    pub menu_slug: String,
    /// Capability the host must require for the settings page.
    pub capability: String,
    pub merge_policy: MergePolicy,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            option_name: "wtbc_settings".to_string(),
            page_title: "WP Top Bar Control".to_string(),
            menu_title: "Top Bar Control".to_string(),
            menu_slug: "wp-top-bar-control".to_string(),
            capability: "manage_options".to_string(),
            merge_policy: MergePolicy::default(),
        }
    }
}

/// Per-request facts only the host knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Whether the navigation bar is displayed on this page.
    pub bar_showing: bool,
    /// Whether the current user holds [`PluginOptions::capability`].
    pub user_can_manage: bool,
    /// Anti-forgery token for the settings form, if the host issues one.
    pub nonce: Option<String>,
}

/// The admin panel, parameterised over its settings store.
#[derive(Debug)]
pub struct TopBarControl<S> {
    options: PluginOptions,
    store: S,
}

impl<S: SettingsStore> TopBarControl<S> {
    /// Hook points the panel needs the host to call back at.
    pub const HOOKS: [HookPoint; 5] = [
        HookPoint::AdminMenu,
        HookPoint::AdminInit,
        HookPoint::PublicHead,
        HookPoint::AdminHead,
        HookPoint::AdminEnqueueScripts,
    ];

    pub fn new(options: PluginOptions, store: S) -> Self {
        Self { options, store }
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Declares the panel's hooks, settings page and settings slot to the host.
    pub fn register(&self, host: &mut dyn HostRegistrar) {
        for hook in Self::HOOKS {
            host.subscribe(hook);
        }
        host.add_options_page(&self.options_page());
        host.register_setting(&SettingRegistration {
            option_group: self.options.option_name.clone(),
            option_name: self.options.option_name.clone(),
        });
    }

    /// The settings page descriptor handed to the host's menu registrar.
    pub fn options_page(&self) -> OptionsPage {
        OptionsPage {
            page_title: self.options.page_title.clone(),
            menu_title: self.options.menu_title.clone(),
            capability: self.options.capability.clone(),
            menu_slug: self.options.menu_slug.clone(),
        }
    }

    /// Hook identifier the host passes when our settings page is loading.
    pub fn settings_page_hook(&self) -> String {
        format!("settings_page_{}", self.options.menu_slug)
    }

    /// The transform registered for the settings slot.
    pub fn sanitize(&self, payload: &SubmittedPayload) -> StoredSettings {
        sanitize(payload)
    }

    /// Sanitizes and persists a submission using the configured merge policy.
    ///
    /// # Errors
    ///
    /// See [`save_settings`].  The host should show a failure notice.
    pub fn handle_submission(&self, payload: &SubmittedPayload) -> Result<SaveOutcome, SaveError> {
        save_settings(
            &self.store,
            &self.options.option_name,
            payload,
            self.options.merge_policy,
        )
    }

    /// Current settings, defaults applied.
    pub fn read(&self) -> SettingsRecord {
        read_settings(&self.store, &self.options.option_name)
    }

    /// Markup for a head hook.  Hooks that produce no markup return `""`.
    pub fn on_hook(&self, hook: HookPoint, ctx: &PageContext) -> String {
        match hook {
            HookPoint::PublicHead => {
                let record = self.read();
                let mut out = self.theme_color_meta_for(&record);
                out.push_str(&self.bar_styles_for(&record, ctx));
                out
            }
            HookPoint::AdminHead => self.bar_styles_for(&self.read(), ctx),
            HookPoint::AdminMenu | HookPoint::AdminInit | HookPoint::AdminEnqueueScripts => {
                String::new()
            }
        }
    }

    /// The `theme-color` meta tag, newline-terminated.
    pub fn theme_color_meta(&self) -> String {
        self.theme_color_meta_for(&self.read())
    }

    /// The bar style block, or `""` when the bar is not displayed.
    pub fn bar_styles(&self, ctx: &PageContext) -> String {
        if !ctx.bar_showing {
            return String::new();
        }
        self.bar_styles_for(&self.read(), ctx)
    }

    /// Assets to load for the admin screen identified by `hook_suffix`.
    ///
    /// Only our own settings page gets the color picker.
    pub fn enqueue_assets(&self, hook_suffix: &str) -> Option<AssetRequest> {
        if hook_suffix != self.settings_page_hook() {
            return None;
        }

        Some(AssetRequest {
            styles: vec![COLOR_PICKER_HANDLE.to_string()],
            scripts: vec![COLOR_PICKER_HANDLE.to_string()],
            inline_scripts: vec![(
                COLOR_PICKER_HANDLE.to_string(),
                color_picker_init(),
            )],
        })
    }

    /// The settings page body, or `None` when the user lacks the capability.
    pub fn settings_page(&self, ctx: &PageContext) -> Option<String> {
        if !ctx.user_can_manage {
            return None;
        }

        let record = self.read();
        let form_ctx = FormContext {
            page_title: &self.options.page_title,
            option_name: &self.options.option_name,
            option_group: &self.options.option_name,
            action: "options.php",
            nonce: ctx.nonce.as_deref(),
        };
        Some(render_or_empty(render_form(&record, &form_ctx), "settings form"))
    }

    fn theme_color_meta_for(&self, record: &SettingsRecord) -> String {
        let mut out = render_or_empty(render_theme_color(record), "theme-color meta tag")
            .trim_end()
            .to_string();
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }

    fn bar_styles_for(&self, record: &SettingsRecord, ctx: &PageContext) -> String {
        if !ctx.bar_showing {
            return String::new();
        }
        render_or_empty(render_bar_style(record), "bar style block")
    }
}

fn render_or_empty(result: Result<String, RenderError>, what: &str) -> String {
    result.unwrap_or_else(|e| {
        error!("failed to render {what}: {e}");
        String::new()
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockHostRegistrar, MockSettingsStore, StoreError};
    use topbar_core::HexColor;

    fn color(raw: &str) -> HexColor {
        raw.parse().unwrap()
    }

    fn store_with(stored: Option<StoredSettings>) -> MockSettingsStore {
        let mut store = MockSettingsStore::new();
        store.expect_get().returning(move |_| Ok(stored.clone()));
        store
    }

    fn visible() -> PageContext {
        PageContext {
            bar_showing: true,
            user_can_manage: true,
            nonce: None,
        }
    }

    // ── Registration ──────────────────────────────────────────────────────────

    #[test]
    fn test_register_declares_page_setting_and_hooks() {
        // Arrange
        let plugin = TopBarControl::new(PluginOptions::default(), MockSettingsStore::new());
        let mut host = MockHostRegistrar::new();
        host.expect_subscribe().times(5).return_const(());
        host.expect_add_options_page()
            .withf(|page| {
                page.capability == "manage_options"
                    && page.menu_slug == "wp-top-bar-control"
                    && page.page_title == "WP Top Bar Control"
            })
            .times(1)
            .return_const(());
        host.expect_register_setting()
            .withf(|s| s.option_group == "wtbc_settings" && s.option_name == "wtbc_settings")
            .times(1)
            .return_const(());

        // Act / Assert (expectations are verified on drop)
        plugin.register(&mut host);
    }

    #[test]
    fn test_register_subscribes_each_hook_once() {
        let plugin = TopBarControl::new(PluginOptions::default(), MockSettingsStore::new());
        let mut host = MockHostRegistrar::new();
        for hook in TopBarControl::<MockSettingsStore>::HOOKS {
            host.expect_subscribe()
                .withf(move |h| *h == hook)
                .times(1)
                .return_const(());
        }
        host.expect_add_options_page().return_const(());
        host.expect_register_setting().return_const(());

        plugin.register(&mut host);
    }

    // ── Head hooks ────────────────────────────────────────────────────────────

    #[test]
    fn test_public_head_emits_meta_and_style() {
        let plugin = TopBarControl::new(
            PluginOptions::default(),
            store_with(Some(StoredSettings {
                background_color: Some(color("#112233")),
                foreground_color: Some(color("#445566")),
            })),
        );

        let out = plugin.on_hook(HookPoint::PublicHead, &visible());

        assert!(out.starts_with(r##"<meta name="theme-color" content="#112233">"##));
        assert!(out.contains("<style"));
        assert!(out.contains("color: #445566 !important;"));
    }

    #[test]
    fn test_public_head_without_bar_emits_meta_only() {
        let plugin = TopBarControl::new(PluginOptions::default(), store_with(None));
        let ctx = PageContext {
            bar_showing: false,
            ..visible()
        };

        let out = plugin.on_hook(HookPoint::PublicHead, &ctx);

        assert!(out.contains(r##"content="#23282d""##));
        assert!(!out.contains("<style"));
    }

    #[test]
    fn test_admin_head_emits_style_only() {
        let plugin = TopBarControl::new(PluginOptions::default(), store_with(None));

        let out = plugin.on_hook(HookPoint::AdminHead, &visible());

        assert!(out.starts_with("<style"));
        assert!(!out.contains("theme-color"));
    }

    #[test]
    fn test_bar_styles_hidden_bar_does_not_touch_store() {
        let mut store = MockSettingsStore::new();
        store.expect_get().never();
        let plugin = TopBarControl::new(PluginOptions::default(), store);

        let out = plugin.bar_styles(&PageContext::default());

        assert!(out.is_empty());
    }

    #[test]
    fn test_registration_hooks_emit_nothing() {
        let plugin = TopBarControl::new(PluginOptions::default(), MockSettingsStore::new());
        assert!(plugin.on_hook(HookPoint::AdminMenu, &visible()).is_empty());
        assert!(plugin.on_hook(HookPoint::AdminInit, &visible()).is_empty());
    }

    #[test]
    fn test_theme_color_meta_survives_store_failure() {
        let mut store = MockSettingsStore::new();
        store
            .expect_get()
            .returning(|_| Err(StoreError::Unavailable("offline".to_string())));
        let plugin = TopBarControl::new(PluginOptions::default(), store);

        let out = plugin.theme_color_meta();

        assert_eq!(out, "<meta name=\"theme-color\" content=\"#23282d\">\n");
    }

    // ── Assets ────────────────────────────────────────────────────────────────

    #[test]
    fn test_enqueue_assets_only_on_own_settings_page() {
        let plugin = TopBarControl::new(PluginOptions::default(), MockSettingsStore::new());

        assert!(plugin.enqueue_assets("index.php").is_none());
        assert!(plugin.enqueue_assets("settings_page_other-plugin").is_none());

        let assets = plugin
            .enqueue_assets("settings_page_wp-top-bar-control")
            .expect("own page must get the picker");
        assert_eq!(assets.styles, vec!["wp-color-picker".to_string()]);
        assert_eq!(assets.scripts, vec!["wp-color-picker".to_string()]);
        assert!(assets.inline_scripts[0].1.contains(".wtbc-color-picker"));
    }

    #[test]
    fn test_default_options_use_installed_identifiers() {
        // Arrange
        let mut store = MockSettingsStore::new();
        store
            .expect_get()
            .withf(|name| name == "wtbc_settings")
            .times(1)
            .returning(|_| Ok(None));
        let plugin = TopBarControl::new(PluginOptions::default(), store);

        // Act
        let page = plugin.options_page();
        let assets = plugin.enqueue_assets("settings_page_wp-top-bar-control");

        // Assert
        assert_eq!(page.page_title, "WP Top Bar Control");
        assert_eq!(page.menu_title, "Top Bar Control");
        assert_eq!(plugin.settings_page_hook(), "settings_page_wp-top-bar-control");
        assert!(assets.is_some());
        assert_eq!(plugin.read(), SettingsRecord::default());
    }

    #[test]
    fn test_settings_page_hook_follows_menu_slug() {
        let options = PluginOptions {
            menu_slug: "bar-colors".to_string(),
            ..PluginOptions::default()
        };
        let plugin = TopBarControl::new(options, MockSettingsStore::new());

        assert_eq!(plugin.settings_page_hook(), "settings_page_bar-colors");
        assert!(plugin.enqueue_assets("settings_page_bar-colors").is_some());
    }

    // ── Settings page ─────────────────────────────────────────────────────────

    #[test]
    fn test_settings_page_requires_capability() {
        let mut store = MockSettingsStore::new();
        store.expect_get().never();
        let plugin = TopBarControl::new(PluginOptions::default(), store);

        assert!(plugin.settings_page(&PageContext::default()).is_none());
    }

    #[test]
    fn test_settings_page_prefills_current_values() {
        let plugin = TopBarControl::new(
            PluginOptions::default(),
            store_with(Some(StoredSettings {
                background_color: None,
                foreground_color: Some(color("#abcdef")),
            })),
        );
        let ctx = PageContext {
            nonce: Some("n0nce".to_string()),
            ..visible()
        };

        let html = plugin.settings_page(&ctx).expect("page must render");

        assert!(html.contains(r##"value="#23282d""##));
        assert!(html.contains(r##"value="#abcdef""##));
        assert!(html.contains(r#"name="option_page" value="wtbc_settings""#));
        assert!(html.contains(r#"value="n0nce""#));
    }

    // ── Submission ────────────────────────────────────────────────────────────

    #[test]
    fn test_handle_submission_uses_configured_name_and_policy() {
        let mut store = MockSettingsStore::new();
        store.expect_get().never();
        store
            .expect_put()
            .withf(|name, record| name == "custom_slot" && record.foreground_color.is_none())
            .times(1)
            .returning(|_, _| Ok(()));
        let options = PluginOptions {
            option_name: "custom_slot".to_string(),
            merge_policy: MergePolicy::Replace,
            ..PluginOptions::default()
        };
        let plugin = TopBarControl::new(options, store);
        let payload: SubmittedPayload =
            [("background_color", Some("#123456"))].into_iter().collect();

        let outcome = plugin.handle_submission(&payload).unwrap();

        assert_eq!(outcome.record.background_color, "#123456");
        assert_eq!(outcome.record.foreground_color, "#ffffff");
    }

    #[test]
    fn test_sanitize_transform_matches_free_function() {
        let plugin = TopBarControl::new(PluginOptions::default(), MockSettingsStore::new());
        let payload: SubmittedPayload = [
            ("background_color", Some("#FFF")),
            ("foreground_color", Some("white")),
        ]
        .into_iter()
        .collect();

        assert_eq!(plugin.sanitize(&payload), sanitize(&payload));
    }
}
