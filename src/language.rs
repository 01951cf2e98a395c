// src/language.rs

use std::fmt;

use serde::{Deserialize, Serialize};

// two letters language codes (ISO 639-1)
pub const ENGLISH_LANGUAGE_CODE: &str = "en";
pub const FRENCH_LANGUAGE_CODE: &str = "fr";
pub const CHINESE_LANGUAGE_CODE: &str = "zh";
pub const JAPANESE_LANGUAGE_CODE: &str = "ja";
pub const THAI_LANGUAGE_CODE: &str = "th";
pub const ARABIC_LANGUAGE_CODE: &str = "ar";
/// Sentinel produced when language identification gives up.
pub const UNKNOWN_LANGUAGE: &str = "un";

/// A language tag. Codes without a dedicated variant are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    English,
    French,
    Chinese,
    Japanese,
    Thai,
    Arabic,
    Unknown,
    Other(String),
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            ENGLISH_LANGUAGE_CODE => Language::English,
            FRENCH_LANGUAGE_CODE => Language::French,
            CHINESE_LANGUAGE_CODE => Language::Chinese,
            JAPANESE_LANGUAGE_CODE => Language::Japanese,
            THAI_LANGUAGE_CODE => Language::Thai,
            ARABIC_LANGUAGE_CODE => Language::Arabic,
            UNKNOWN_LANGUAGE => Language::Unknown,
            other => Language::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Language::English => ENGLISH_LANGUAGE_CODE,
            Language::French => FRENCH_LANGUAGE_CODE,
            Language::Chinese => CHINESE_LANGUAGE_CODE,
            Language::Japanese => JAPANESE_LANGUAGE_CODE,
            Language::Thai => THAI_LANGUAGE_CODE,
            Language::Arabic => ARABIC_LANGUAGE_CODE,
            Language::Unknown => UNKNOWN_LANGUAGE,
            Language::Other(code) => code,
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Language::Unknown
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Language::from_code(code)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
