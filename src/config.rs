// src/config.rs

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::ActionSpec;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::normalize;
use crate::pattern::DEFAULT_BACKTRACK_LIMIT;

/// Which tokenizer `parse_text` runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerChoice {
    #[default]
    SocialMedia,
    /// Whitespace splitting.
    Naive,
    Weibo,
    WeiboSegmentHashtag,
    Chinese,
    Japanese,
    Thai,
}

impl TokenizerChoice {
    pub const ALL: [TokenizerChoice; 7] = [
        TokenizerChoice::SocialMedia,
        TokenizerChoice::Naive,
        TokenizerChoice::Weibo,
        TokenizerChoice::WeiboSegmentHashtag,
        TokenizerChoice::Chinese,
        TokenizerChoice::Japanese,
        TokenizerChoice::Thai,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenizerChoice::SocialMedia => "social_media",
            TokenizerChoice::Naive => "naive",
            TokenizerChoice::Weibo => "weibo",
            TokenizerChoice::WeiboSegmentHashtag => "weibo_segment_hashtag",
            TokenizerChoice::Chinese => "chinese",
            TokenizerChoice::Japanese => "japanese",
            TokenizerChoice::Thai => "thai",
        }
    }
}

impl FromStr for TokenizerChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TokenizerChoice::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownTokenizer(s.to_string()))
    }
}

impl fmt::Display for TokenizerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for one `parse_text` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Target encoding label. `None` skips the encoding pass.
    pub encoding: Option<String>,

    /// Replace unencodable glyphs by spaces instead of squeezing their runs.
    pub remove_unencodable_char: bool,

    pub to_lower: bool,
    pub strip_accents: bool,

    /// Collapse runs of 3+ identical characters to 3.
    pub reduce_len: bool,

    /// Tokens dropped before classification (exact, case sensitive).
    pub filters: HashSet<String>,

    pub tokenizer: TokenizerChoice,

    /// Language attached to every token. Only stop-word lookup reads it.
    pub language: Option<String>,

    /// Budget for the backtracking regex engine.
    pub backtrack_limit: usize,

    pub actions: ActionSpec,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            encoding: Some("utf-8".to_string()),
            remove_unencodable_char: false,
            to_lower: true,
            strip_accents: false,
            reduce_len: false,
            filters: HashSet::new(),
            tokenizer: TokenizerChoice::default(),
            language: None,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
            actions: ActionSpec::default(),
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every configuration error, before any text is touched.
    pub fn validate(&self) -> Result<()> {
        if let Some(label) = &self.encoding {
            normalize::lookup_encoding(label)?;
        }
        if self.backtrack_limit == 0 {
            return Err(Error::InvalidPattern("backtrack limit must be positive".to_string()));
        }
        self.actions.validate()?;
        if self.actions.stop_words.is_some() {
            if let Some(lang) = self.language() {
                if !lang.is_unknown() {
                    crate::stop_words::stop_words_for(&lang)?;
                }
            }
        }
        Ok(())
    }

    pub fn language(&self) -> Option<Language> {
        self.language.as_deref().map(Language::from_code)
    }

    pub fn with_actions(mut self, actions: ActionSpec) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: TokenizerChoice) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language = Some(code.into());
        self
    }

    pub fn with_filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters = filters.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionName;

    #[test]
    fn test_defaults() {
        let config = ParseConfig::default();
        assert_eq!(config.encoding.as_deref(), Some("utf-8"));
        assert!(config.to_lower);
        assert!(!config.strip_accents);
        assert!(!config.reduce_len);
        assert!(!config.remove_unencodable_char);
        assert_eq!(config.tokenizer, TokenizerChoice::SocialMedia);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tokenizer_choice_from_str() {
        assert_eq!("naive".parse::<TokenizerChoice>().unwrap(), TokenizerChoice::Naive);
        assert_eq!(
            "weibo_segment_hashtag".parse::<TokenizerChoice>().unwrap(),
            TokenizerChoice::WeiboSegmentHashtag
        );
        assert!(matches!("xxx".parse::<TokenizerChoice>(), Err(Error::UnknownTokenizer(_))));
        for choice in TokenizerChoice::ALL {
            assert_eq!(choice.to_string().parse::<TokenizerChoice>().unwrap(), choice);
        }
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let config = ParseConfig {
            encoding: Some("klingon".to_string()),
            ..ParseConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::UnknownEncoding(_))));

        let mut config = ParseConfig::default().with_language("fr");
        config.actions.stop_words = Some(ActionName::Remove);
        assert!(matches!(config.validate(), Err(Error::UnsupportedStopWords(_))));

        let mut config = ParseConfig::default();
        config.actions.html_tags = Some(ActionName::Tag);
        assert!(matches!(config.validate(), Err(Error::IllegalAction { .. })));
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "to_lower": false,
            "tokenizer": "weibo",
            "filters": ["rt"],
            "actions": {"emojis": "demojize", "urls": "remove"}
        }"#;
        let config: ParseConfig = serde_json::from_str(json).unwrap();
        assert!(!config.to_lower);
        assert_eq!(config.tokenizer, TokenizerChoice::Weibo);
        assert!(config.filters.contains("rt"));
        assert_eq!(config.actions.emojis, Some(ActionName::Demojize));
        assert_eq!(config.actions.urls, Some(ActionName::Remove));
        assert_eq!(config.encoding.as_deref(), Some("utf-8"));
    }

    #[test]
    fn test_unknown_action_key_is_rejected() {
        let json = r#"{"actions": {"emoji": "tag"}}"#;
        assert!(serde_json::from_str::<ParseConfig>(json).is_err());
    }
}
