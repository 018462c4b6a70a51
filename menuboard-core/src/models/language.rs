use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages a menu can be written in.
///
/// German is the fallback: every name map must carry a `de` entry and any
/// other language resolves to it when its own text is missing or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    De,
    En,
    Tr,
    Es,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::De, Language::En, Language::Tr, Language::Es];

    /// The language every lookup falls back to.
    pub const FALLBACK: Language = Language::De;

    pub fn code(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Tr => "tr",
            Language::Es => "es",
        }
    }

    /// Parse from a language code, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "de" => Some(Language::De),
            "en" => Some(Language::En),
            "tr" => Some(Language::Tr),
            "es" => Some(Language::Es),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::parse(s).ok_or_else(|| format!("Unknown language code: {}", s))
    }
}

/// Display text in every supported language.
///
/// Missing languages deserialize as empty strings and empty strings are
/// skipped on output, so `{"de": "Suppe"}` stays `{"de": "Suppe"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub de: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub en: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tr: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub es: String,
}

impl LocalizedText {
    /// Creates a text with only the fallback language set.
    pub fn new(de: impl Into<String>) -> Self {
        Self {
            de: de.into(),
            ..Self::default()
        }
    }

    pub fn with(mut self, language: Language, text: impl Into<String>) -> Self {
        self.set(language, text);
        self
    }

    /// Raw value for a language, without fallback.
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::De => &self.de,
            Language::En => &self.en,
            Language::Tr => &self.tr,
            Language::Es => &self.es,
        }
    }

    pub fn set(&mut self, language: Language, text: impl Into<String>) {
        let slot = match language {
            Language::De => &mut self.de,
            Language::En => &mut self.en,
            Language::Tr => &mut self.tr,
            Language::Es => &mut self.es,
        };
        *slot = text.into();
    }

    /// Display text for `language`, falling back to German when the
    /// requested text is absent or empty.
    pub fn text(&self, language: Language) -> &str {
        let value = self.get(language);
        if value.is_empty() {
            &self.de
        } else {
            value
        }
    }

    /// True when no language carries any text.
    pub fn is_empty(&self) -> bool {
        Language::ALL.iter().all(|l| self.get(*l).is_empty())
    }

    /// Returns a copy with surrounding whitespace removed from every entry.
    pub fn trimmed(&self) -> Self {
        let mut out = Self::default();
        for language in Language::ALL {
            out.set(language, self.get(language).trim());
        }
        out
    }
}
