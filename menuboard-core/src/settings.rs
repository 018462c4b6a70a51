//! Branding, theme and language settings of a menu installation.

use serde::{Deserialize, Serialize};

use crate::models::Language;

/// Colour and font tokens applied to the public page and the admin screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub bg_primary: String,
    pub bg_header: String,
    pub accent_pink: String,
    pub accent_teal: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub font_heading: String,
    pub font_body: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_primary: "#1a1a1a".to_string(),
            bg_header: "#262626".to_string(),
            accent_pink: "#e74c3c".to_string(),
            accent_teal: "#f39c12".to_string(),
            text_primary: "#ffffff".to_string(),
            text_secondary: "#cccccc".to_string(),
            font_heading: "'Outfit', sans-serif".to_string(),
            font_body: "'Outfit', sans-serif".to_string(),
        }
    }
}

impl Theme {
    /// CSS custom properties, in declaration order.
    pub fn css_variables(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("--bg-primary", self.bg_primary.as_str()),
            ("--bg-header", self.bg_header.as_str()),
            ("--accent-pink", self.accent_pink.as_str()),
            ("--accent-teal", self.accent_teal.as_str()),
            ("--text-primary", self.text_primary.as_str()),
            ("--text-secondary", self.text_secondary.as_str()),
            ("--font-heading", self.font_heading.as_str()),
            ("--font-body", self.font_body.as_str()),
        ]
    }

    /// A `:root { ... }` block declaring every variable.
    pub fn root_css(&self) -> String {
        let body: String = self
            .css_variables()
            .into_iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ");
        format!(":root {{ {} }}", body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub restaurant_name: String,
    pub tagline: String,
    pub meta_description: String,
    pub footer_text: String,
    pub theme: Theme,
    /// Storage proxy endpoint. Without one the editor only works locally.
    pub proxy_url: Option<String>,
    /// Key under which the chosen language is remembered.
    pub storage_key: String,
    pub languages: Vec<Language>,
    pub default_lang: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            restaurant_name: "Restaurant".to_string(),
            tagline: String::new(),
            meta_description: String::new(),
            footer_text: String::new(),
            theme: Theme::default(),
            proxy_url: None,
            storage_key: "menu_lang".to_string(),
            languages: vec![Language::De, Language::En],
            default_lang: Language::De,
        }
    }
}

impl Settings {
    /// Page title, "Name | Tagline" when a tagline is set.
    pub fn page_title(&self) -> String {
        if self.tagline.is_empty() {
            self.restaurant_name.clone()
        } else {
            format!("{} | {}", self.restaurant_name, self.tagline)
        }
    }

    /// Configured languages; never empty.
    pub fn offered_languages(&self) -> Vec<Language> {
        if self.languages.is_empty() {
            vec![self.default_lang]
        } else {
            self.languages.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.storage_key, "menu_lang");
        assert_eq!(settings.default_lang, Language::De);
        assert_eq!(settings.languages, vec![Language::De, Language::En]);
        assert!(settings.proxy_url.is_none());
    }

    #[test]
    fn test_root_css() {
        let css = Theme::default().root_css();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--bg-primary: #1a1a1a;"));
        assert!(css.contains("--font-body: 'Outfit', sans-serif;"));
    }

    #[test]
    fn test_page_title() {
        let mut settings = Settings {
            restaurant_name: "TORIKO".into(),
            ..Settings::default()
        };
        assert_eq!(settings.page_title(), "TORIKO");
        settings.tagline = "Korean Fried Chicken".into();
        assert_eq!(settings.page_title(), "TORIKO | Korean Fried Chicken");
    }

    #[test]
    fn test_offered_languages_never_empty() {
        let settings = Settings {
            languages: vec![],
            default_lang: Language::Tr,
            ..Settings::default()
        };
        assert_eq!(settings.offered_languages(), vec![Language::Tr]);
    }

    #[test]
    fn test_partial_deserialize() {
        let settings: Settings =
            serde_json::from_str(r#"{"restaurant_name": "T O R I K O", "languages": ["de", "tr"]}"#)
                .unwrap();
        assert_eq!(settings.restaurant_name, "T O R I K O");
        assert_eq!(settings.languages, vec![Language::De, Language::Tr]);
        assert_eq!(settings.theme, Theme::default());
    }
}
