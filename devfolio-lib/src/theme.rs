use crate::model::{AppSettings, ColorOverrides, CustomColors, ThemeType};
use std::collections::BTreeMap;

/// The five customizable color slots and their CSS custom properties
pub const COLOR_VARIABLES: [&str; 5] = [
    "--primary",
    "--bg-main",
    "--text-main",
    "--card-bg",
    "--border-color",
];

/// A theme's built-in color values for one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub bg_main: &'static str,
    pub text_main: &'static str,
    pub card_bg: &'static str,
    pub border: &'static str,
}

const MINIMAL_LIGHT: Palette = Palette {
    primary: "#2563eb",
    bg_main: "#f8fafc",
    text_main: "#0f172a",
    card_bg: "#ffffff",
    border: "#e2e8f0",
};
const MINIMAL_DARK: Palette = Palette {
    primary: "#3b82f6",
    bg_main: "#09090b",
    text_main: "#e2e8f0",
    card_bg: "#18181b",
    border: "#27272a",
};
const CYBERPUNK_LIGHT: Palette = Palette {
    primary: "#d946ef",
    bg_main: "#faf5ff",
    text_main: "#3b0764",
    card_bg: "#ffffff",
    border: "#e9d5ff",
};
const CYBERPUNK_DARK: Palette = Palette {
    primary: "#f0abfc",
    bg_main: "#0a0014",
    text_main: "#e9d5ff",
    card_bg: "#1a0b2e",
    border: "#4a1772",
};
const ELEGANT_LIGHT: Palette = Palette {
    primary: "#b45309",
    bg_main: "#fffbeb",
    text_main: "#292524",
    card_bg: "#fefce8",
    border: "#e7e5e4",
};
const ELEGANT_DARK: Palette = Palette {
    primary: "#d97706",
    bg_main: "#1c1917",
    text_main: "#e7e5e4",
    card_bg: "#292524",
    border: "#44403c",
};

impl ThemeType {
    /// Built-in default palette for the given mode
    pub fn palette(&self, dark_mode: bool) -> &'static Palette {
        match (self, dark_mode) {
            (ThemeType::Minimal, false) => &MINIMAL_LIGHT,
            (ThemeType::Minimal, true) => &MINIMAL_DARK,
            (ThemeType::Cyberpunk, false) => &CYBERPUNK_LIGHT,
            (ThemeType::Cyberpunk, true) => &CYBERPUNK_DARK,
            (ThemeType::Elegant, false) => &ELEGANT_LIGHT,
            (ThemeType::Elegant, true) => &ELEGANT_DARK,
        }
    }
}

/// Colors ultimately in effect after resolving per-mode overrides against the
/// theme's built-in palette. Resolution is pure and idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveColors {
    pub primary: String,
    pub bg_main: String,
    pub text_main: String,
    pub card_bg: String,
    pub border: String,
}

impl EffectiveColors {
    /// Per slot: a present, non-empty override for the active mode wins;
    /// everything else inherits the theme default.
    pub fn resolve(
        theme: ThemeType,
        dark_mode: bool,
        custom_colors: Option<&CustomColors>,
    ) -> Self {
        let palette = theme.palette(dark_mode);
        let overrides = active_overrides(custom_colors, dark_mode);
        let pick = |slot: fn(&ColorOverrides) -> Option<&str>, default: &str| {
            overrides
                .and_then(slot)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        };
        Self {
            primary: pick(|o| o.primary.as_deref(), palette.primary),
            bg_main: pick(|o| o.bg_main.as_deref(), palette.bg_main),
            text_main: pick(|o| o.text_main.as_deref(), palette.text_main),
            card_bg: pick(|o| o.card_bg.as_deref(), palette.card_bg),
            border: pick(|o| o.border.as_deref(), palette.border),
        }
    }
}

fn active_overrides(custom: Option<&CustomColors>, dark_mode: bool) -> Option<&ColorOverrides> {
    let custom = custom?;
    if dark_mode {
        custom.dark.as_ref()
    } else {
        custom.light.as_ref()
    }
}

/// The style state derived from settings, computed once and handed to the
/// rendering layer instead of mutated onto an ambient global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleContext {
    pub theme: ThemeType,
    pub dark_mode: bool,
    pub effective: EffectiveColors,
    /// CSS custom-property overrides to set on the document root; slots not
    /// present here inherit from the theme's stylesheet.
    pub overrides: BTreeMap<&'static str, String>,
}

impl StyleContext {
    pub fn resolve(settings: &AppSettings) -> Self {
        let effective = EffectiveColors::resolve(
            settings.theme,
            settings.dark_mode,
            settings.custom_colors.as_ref(),
        );
        let active = active_overrides(settings.custom_colors.as_ref(), settings.dark_mode);

        let mut overrides = BTreeMap::new();
        if let Some(colors) = active {
            let slots: [(&'static str, Option<&str>); 5] = [
                ("--primary", colors.primary.as_deref()),
                ("--bg-main", colors.bg_main.as_deref()),
                ("--text-main", colors.text_main.as_deref()),
                ("--card-bg", colors.card_bg.as_deref()),
                ("--border-color", colors.border.as_deref()),
            ];
            for (variable, value) in slots {
                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    overrides.insert(variable, value.to_string());
                }
            }
        }

        Self {
            theme: settings.theme,
            dark_mode: settings.dark_mode,
            effective,
            overrides,
        }
    }

    /// Apply this context to a style scope: overridden slots are set,
    /// non-overridden slot variables are removed entirely so the theme's own
    /// rules take over (never set to an empty string). Idempotent.
    pub fn apply_to(&self, scope: &mut StyleScope) {
        for variable in COLOR_VARIABLES {
            match self.overrides.get(variable) {
                Some(value) => scope.set_property(variable, value),
                None => scope.remove_property(variable),
            }
        }
    }

    /// Undo any application of a portfolio style context on the scope
    pub fn clear(scope: &mut StyleScope) {
        for variable in COLOR_VARIABLES {
            scope.remove_property(variable);
        }
    }
}

/// Custom properties on a document-root style scope; the seam the rendering
/// layer implements against the real DOM.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleScope {
    properties: BTreeMap<String, String>,
}

impl StyleScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    pub fn remove_property(&mut self, name: &str) {
        self.properties.remove(name);
    }

    pub fn get_property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortfolioData;

    fn settings_with_dark_primary(value: &str) -> AppSettings {
        let mut settings = PortfolioData::initial().settings;
        settings.theme = ThemeType::Minimal;
        settings.dark_mode = true;
        let custom = settings.custom_colors.as_mut().unwrap();
        custom.dark.as_mut().unwrap().primary = Some(value.to_string());
        settings
    }

    #[test]
    fn custom_slot_wins_and_rest_inherit_theme_defaults() {
        let settings = settings_with_dark_primary("#123456");
        let effective =
            EffectiveColors::resolve(settings.theme, true, settings.custom_colors.as_ref());

        assert_eq!(effective.primary, "#123456");
        assert_eq!(effective.bg_main, MINIMAL_DARK.bg_main);
        assert_eq!(effective.text_main, MINIMAL_DARK.text_main);
        assert_eq!(effective.card_bg, MINIMAL_DARK.card_bg);
        assert_eq!(effective.border, MINIMAL_DARK.border);
    }

    #[test]
    fn empty_string_slot_means_inherit() {
        let settings = settings_with_dark_primary("");
        let effective =
            EffectiveColors::resolve(settings.theme, true, settings.custom_colors.as_ref());
        assert_eq!(effective.primary, MINIMAL_DARK.primary);
    }

    #[test]
    fn mode_selects_its_own_override_set() {
        let mut settings = settings_with_dark_primary("#123456");
        settings.dark_mode = false;
        let effective =
            EffectiveColors::resolve(settings.theme, false, settings.custom_colors.as_ref());
        // Light mode must not see the dark override
        assert_eq!(effective.primary, MINIMAL_LIGHT.primary);
    }

    #[test]
    fn resolution_is_idempotent() {
        let settings = settings_with_dark_primary("#123456");
        assert_eq!(
            StyleContext::resolve(&settings),
            StyleContext::resolve(&settings)
        );
    }

    #[test]
    fn apply_sets_overrides_and_removes_inherited_slots() {
        let settings = settings_with_dark_primary("#123456");
        let context = StyleContext::resolve(&settings);

        let mut scope = StyleScope::new();
        // Stale override from a previous context must disappear
        scope.set_property("--bg-main", "#000000");
        context.apply_to(&mut scope);

        assert_eq!(scope.get_property("--primary"), Some("#123456"));
        assert_eq!(scope.get_property("--bg-main"), None);

        // Re-application changes nothing
        let snapshot = scope.clone();
        context.apply_to(&mut scope);
        assert_eq!(scope, snapshot);
    }

    #[test]
    fn clearing_a_slot_removes_its_variable_on_next_apply() {
        let settings = settings_with_dark_primary("#123456");
        let mut scope = StyleScope::new();
        StyleContext::resolve(&settings).apply_to(&mut scope);
        assert!(scope.get_property("--primary").is_some());

        let reverted = settings_with_dark_primary("");
        StyleContext::resolve(&reverted).apply_to(&mut scope);
        assert!(scope.is_empty());
    }
}
