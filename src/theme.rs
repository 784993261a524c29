use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeFamily {
    Brutalist,
    Skeuomorphic,
    Glassmorphic,
}

impl ThemeFamily {
    pub const ALL: [ThemeFamily; 3] = [
        ThemeFamily::Brutalist,
        ThemeFamily::Skeuomorphic,
        ThemeFamily::Glassmorphic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeFamily::Brutalist => "brutalist",
            ThemeFamily::Skeuomorphic => "skeuomorphic",
            ThemeFamily::Glassmorphic => "glassmorphic",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeFamily::Brutalist => "Brutalist",
            ThemeFamily::Skeuomorphic => "Skeuomorphic",
            ThemeFamily::Glassmorphic => "Glassmorphic",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.as_str() == name)
    }
}

/// Persisted theme selection, e.g. `light` or `skeuomorphic-dark`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
    BrutalistLight,
    BrutalistDark,
    SkeuomorphicLight,
    SkeuomorphicDark,
    GlassmorphicLight,
    GlassmorphicDark,
}

impl ThemeName {
    /// Unknown names resolve to `glassmorphic-dark`.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "light" => ThemeName::Light,
            "dark" => ThemeName::Dark,
            "brutalist-light" => ThemeName::BrutalistLight,
            "brutalist-dark" => ThemeName::BrutalistDark,
            "skeuomorphic-light" => ThemeName::SkeuomorphicLight,
            "skeuomorphic-dark" => ThemeName::SkeuomorphicDark,
            "glassmorphic-light" => ThemeName::GlassmorphicLight,
            _ => ThemeName::GlassmorphicDark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
            ThemeName::BrutalistLight => "brutalist-light",
            ThemeName::BrutalistDark => "brutalist-dark",
            ThemeName::SkeuomorphicLight => "skeuomorphic-light",
            ThemeName::SkeuomorphicDark => "skeuomorphic-dark",
            ThemeName::GlassmorphicLight => "glassmorphic-light",
            ThemeName::GlassmorphicDark => "glassmorphic-dark",
        }
    }

    pub fn compose(family: Option<ThemeFamily>, mode: ThemeMode) -> Self {
        match (family, mode) {
            (None, ThemeMode::Light) => ThemeName::Light,
            (None, ThemeMode::Dark) => ThemeName::Dark,
            (Some(ThemeFamily::Brutalist), ThemeMode::Light) => ThemeName::BrutalistLight,
            (Some(ThemeFamily::Brutalist), ThemeMode::Dark) => ThemeName::BrutalistDark,
            (Some(ThemeFamily::Skeuomorphic), ThemeMode::Light) => ThemeName::SkeuomorphicLight,
            (Some(ThemeFamily::Skeuomorphic), ThemeMode::Dark) => ThemeName::SkeuomorphicDark,
            (Some(ThemeFamily::Glassmorphic), ThemeMode::Light) => ThemeName::GlassmorphicLight,
            (Some(ThemeFamily::Glassmorphic), ThemeMode::Dark) => ThemeName::GlassmorphicDark,
        }
    }

    pub fn family(self) -> Option<ThemeFamily> {
        match self {
            ThemeName::Light | ThemeName::Dark => None,
            ThemeName::BrutalistLight | ThemeName::BrutalistDark => Some(ThemeFamily::Brutalist),
            ThemeName::SkeuomorphicLight | ThemeName::SkeuomorphicDark => {
                Some(ThemeFamily::Skeuomorphic)
            }
            ThemeName::GlassmorphicLight | ThemeName::GlassmorphicDark => {
                Some(ThemeFamily::Glassmorphic)
            }
        }
    }

    pub fn mode(self) -> ThemeMode {
        match self {
            ThemeName::Light
            | ThemeName::BrutalistLight
            | ThemeName::SkeuomorphicLight
            | ThemeName::GlassmorphicLight => ThemeMode::Light,
            _ => ThemeMode::Dark,
        }
    }

    /// Switch family from the dropdown, keeping the current mode.
    pub fn with_family(self, family: ThemeFamily) -> Self {
        Self::compose(Some(family), self.mode())
    }

    /// Switch mode from the light/dark toggle, keeping the current family.
    pub fn with_mode(self, mode: ThemeMode) -> Self {
        Self::compose(self.family(), mode)
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeDefinition {
    pub css: String,
    pub root_class: &'static str,
}

/// Palette first, then the family's shape rules. Dark variants swap only the palette.
pub fn theme_definition(name: ThemeName) -> ThemeDefinition {
    let palette = match name.mode() {
        ThemeMode::Light => LIGHT_PALETTE,
        ThemeMode::Dark => DARK_PALETTE,
    };
    let (shape, root_class) = match name.family() {
        None => ("", "theme-plain"),
        Some(ThemeFamily::Brutalist) => (BRUTALIST_SHAPE, "theme-brutalist"),
        Some(ThemeFamily::Skeuomorphic) => (SKEUOMORPHIC_SHAPE, "theme-skeuomorphic"),
        Some(ThemeFamily::Glassmorphic) => (GLASSMORPHIC_SHAPE, "theme-glassmorphic"),
    };
    ThemeDefinition {
        css: format!("{palette}{BASE_RULES}{shape}"),
        root_class,
    }
}

const LIGHT_PALETTE: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-text-primary: #111111;
    --color-input-bg: #ffffff;
    --color-input-border: #c2c2c2;
    --color-button-bg: #111111;
    --color-button-text: #ffffff;
    --color-button-hover: #333333;
    --color-sent-bg: #d8ecff;
    --color-received-bg: #f0f0f0;
    --color-conversation-active: #e6e6e6;
    --color-conversation-hover: #f3f3f3;
    --color-error: #b00020;
}
"#;

const DARK_PALETTE: &str = r#"
:root {
    --color-bg-primary: #121212;
    --color-text-primary: #f2f2f2;
    --color-input-bg: #1e1e1e;
    --color-input-border: #3a3a3a;
    --color-button-bg: #f2f2f2;
    --color-button-text: #121212;
    --color-button-hover: #cfcfcf;
    --color-sent-bg: #1f4b7a;
    --color-received-bg: #2a2a2a;
    --color-conversation-active: #2f2f2f;
    --color-conversation-hover: #242424;
    --color-error: #ff6b81;
}
"#;

const BASE_RULES: &str = r#"
body { background: var(--color-bg-primary); color: var(--color-text-primary); margin: 0; }
.app { display: flex; flex-direction: column; height: 100vh; }
.conversation-list { width: 200px; border-right: 1px solid var(--color-input-border); padding: 10px; overflow-y: auto; }
.conversation-item { padding: 8px; cursor: pointer; }
.conversation-item:hover { background: var(--color-conversation-hover); }
.conversation-item.active { background: var(--color-conversation-active); }
.messages { flex: 1; overflow-y: auto; padding: 10px; display: flex; flex-direction: column; }
.message { padding: 8px; margin-bottom: 8px; border-radius: 8px; max-width: 70%; word-wrap: break-word; }
.message.sent { align-self: flex-end; background: var(--color-sent-bg); }
.message.received { align-self: flex-start; background: var(--color-received-bg); }
.composer { display: flex; padding: 10px; border-top: 1px solid var(--color-input-border); }
.composer input, .config-form input, .theme-select { flex: 1; padding: 8px; margin-right: 10px; border: 1px solid var(--color-input-border); border-radius: 4px; background: var(--color-input-bg); color: var(--color-text-primary); }
.btn { padding: 10px 15px; border: none; border-radius: 4px; cursor: pointer; background: var(--color-button-bg); color: var(--color-button-text); }
.btn:hover { background: var(--color-button-hover); }
.status-error { color: var(--color-error); padding: 4px 10px; }
"#;

const BRUTALIST_SHAPE: &str = r#"
body { font-family: "Courier New", monospace; }
.message, .btn, .composer input, .config-form input { border-radius: 0; border: 3px solid var(--color-text-primary); }
.btn { text-transform: uppercase; font-weight: 700; }
"#;

const SKEUOMORPHIC_SHAPE: &str = r#"
body { font-family: Georgia, serif; }
.message { box-shadow: inset 0 1px 0 rgba(255, 255, 255, 0.4), 0 2px 4px rgba(0, 0, 0, 0.25); border-radius: 14px; }
.btn { background-image: linear-gradient(to bottom, rgba(255, 255, 255, 0.25), rgba(0, 0, 0, 0.15)); box-shadow: 0 2px 3px rgba(0, 0, 0, 0.3); }
"#;

const GLASSMORPHIC_SHAPE: &str = r#"
body { font-family: "Helvetica Neue", Arial, sans-serif; }
.message, .composer, .conversation-list { backdrop-filter: blur(12px); background-clip: padding-box; }
.message { border: 1px solid rgba(255, 255, 255, 0.3); border-radius: 16px; opacity: 0.92; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_known_names() {
        for name in [
            ThemeName::Light,
            ThemeName::Dark,
            ThemeName::BrutalistLight,
            ThemeName::BrutalistDark,
            ThemeName::SkeuomorphicLight,
            ThemeName::SkeuomorphicDark,
            ThemeName::GlassmorphicLight,
            ThemeName::GlassmorphicDark,
        ] {
            assert_eq!(ThemeName::parse(name.as_str()), name);
        }
    }

    #[test]
    fn unknown_name_falls_back_to_glassmorphic_dark() {
        assert_eq!(ThemeName::parse("neon"), ThemeName::GlassmorphicDark);
        assert_eq!(ThemeName::parse(""), ThemeName::GlassmorphicDark);
    }

    #[test]
    fn family_and_mode_switches_keep_the_other_axis() {
        let theme = ThemeName::Dark.with_family(ThemeFamily::Skeuomorphic);
        assert_eq!(theme, ThemeName::SkeuomorphicDark);
        assert_eq!(theme.with_mode(ThemeMode::Light), ThemeName::SkeuomorphicLight);
        assert_eq!(ThemeName::Light.with_mode(ThemeMode::Dark), ThemeName::Dark);
    }

    #[test]
    fn dark_variant_keeps_family_shape() {
        let light = theme_definition(ThemeName::BrutalistLight);
        let dark = theme_definition(ThemeName::BrutalistDark);
        assert_eq!(light.root_class, dark.root_class);
        assert!(dark.css.contains("Courier New"));
        assert!(dark.css.contains("#121212"));
        assert!(!light.css.contains("#121212"));
    }
}
