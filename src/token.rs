// src/token.rs

use std::fmt;
use std::str::FromStr;

use crate::emoji;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::pattern::{
    check_flag, HashtagStyle, DIGIT_PATTERN, EMAIL_PATTERN, EMOTICONS_PATTERN, HASHTAG_PATTERN, HTML_TAG_PATTERN,
    MENTION_PATTERN, NOT_A_HASHTAG_PATTERN, URL_PATTERN, WEIBO_HASHTAG_PATTERN,
};
use crate::punctuation::is_single_punctuation;
use crate::stop_words;

// Tags for the `tag` action
pub const MENTION_TAG: &str = "<MENTION>";
pub const HASHTAG_TAG: &str = "<HASHTAG>";
pub const URL_TAG: &str = "<URL>";
pub const DIGIT_TAG: &str = "<DIGIT>";
pub const EMOJI_TAG: &str = "<EMOJI>";
pub const EMOTICON_TAG: &str = "<EMOTICON>";
pub const PUNCTUATION_TAG: &str = "<PUNCT>";
pub const EMAIL_TAG: &str = "<EMAIL>";

/// The closed set of token categories an action can be conditioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Mention,
    Hashtag,
    Url,
    Digit,
    Emoji,
    Emoticon,
    Punct,
    Email,
    StopWord,
    HtmlTag,
}

impl Category {
    /// Order in which a processing pass tries the per-category actions.
    pub const PROCESS_ORDER: [Category; 10] = [
        Category::Mention,
        Category::Hashtag,
        Category::Url,
        Category::Digit,
        Category::Emoji,
        Category::Emoticon,
        Category::Punct,
        Category::Email,
        Category::StopWord,
        Category::HtmlTag,
    ];

    pub fn predicate_name(self) -> &'static str {
        match self {
            Category::Mention => "is_mention",
            Category::Hashtag => "is_hashtag",
            Category::Url => "is_url",
            Category::Digit => "is_digit",
            Category::Emoji => "is_emoji",
            Category::Emoticon => "is_emoticon",
            Category::Punct => "is_punct",
            Category::Email => "is_email",
            Category::StopWord => "is_stop_word",
            Category::HtmlTag => "is_html_tag",
        }
    }

    /// Key under which the category's action is configured.
    pub fn config_key(self) -> &'static str {
        match self {
            Category::Mention => "mentions",
            Category::Hashtag => "hashtags",
            Category::Url => "urls",
            Category::Digit => "digits",
            Category::Emoji => "emojis",
            Category::Emoticon => "emoticons",
            Category::Punct => "puncts",
            Category::Email => "emails",
            Category::StopWord => "stop_words",
            Category::HtmlTag => "html_tags",
        }
    }

    /// Replacement for the `tag` action. HTML tags and stop words have none.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Category::Mention => Some(MENTION_TAG),
            Category::Hashtag => Some(HASHTAG_TAG),
            Category::Url => Some(URL_TAG),
            Category::Digit => Some(DIGIT_TAG),
            Category::Emoji => Some(EMOJI_TAG),
            Category::Emoticon => Some(EMOTICON_TAG),
            Category::Punct => Some(PUNCTUATION_TAG),
            Category::Email => Some(EMAIL_TAG),
            Category::StopWord | Category::HtmlTag => None,
        }
    }

    pub fn from_config_key(key: &str) -> Result<Self> {
        Category::PROCESS_ORDER
            .iter()
            .copied()
            .find(|c| c.config_key() == key)
            .ok_or_else(|| Error::UnknownCategory(key.to_string()))
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts the predicate name (`is_hashtag`).
    fn from_str(s: &str) -> Result<Self> {
        Category::PROCESS_ORDER
            .iter()
            .copied()
            .find(|c| c.predicate_name() == s)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.predicate_name())
    }
}

/// A string-like classified unit of text.
///
/// Classification is never cached: every predicate re-evaluates the current
/// value, so a token that has been transformed may stop matching its old
/// category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    value: String,
    lang: Option<Language>,
    hashtag_style: HashtagStyle,
}

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Token {
            value: value.into(),
            lang: None,
            hashtag_style: HashtagStyle::Prefixed,
        }
    }

    /// A token whose hashtags are `#...#` delimited (Weibo).
    pub fn weibo(value: impl Into<String>) -> Self {
        Token::new(value).with_hashtag_style(HashtagStyle::Delimited)
    }

    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = Some(lang);
        self
    }

    pub fn with_hashtag_style(mut self, style: HashtagStyle) -> Self {
        self.hashtag_style = style;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn into_value(self) -> String {
        self.value
    }

    pub fn lang(&self) -> Option<&Language> {
        self.lang.as_ref()
    }

    pub fn set_lang(&mut self, lang: Option<Language>) {
        self.lang = lang;
    }

    pub fn hashtag_style(&self) -> HashtagStyle {
        self.hashtag_style
    }

    /// Length in code points.
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_hashtag(&self) -> bool {
        match self.hashtag_style {
            HashtagStyle::Prefixed => {
                !check_flag(&NOT_A_HASHTAG_PATTERN, &self.value) && check_flag(&HASHTAG_PATTERN, &self.value)
            }
            HashtagStyle::Delimited => {
                check_flag(&WEIBO_HASHTAG_PATTERN, &self.value)
                    && !self.value[1..self.value.len() - 1].chars().all(|c| c.is_numeric())
            }
        }
    }

    pub fn is_url(&self) -> bool {
        check_flag(&URL_PATTERN, &self.value)
    }

    pub fn is_mention(&self) -> bool {
        check_flag(&MENTION_PATTERN, &self.value)
    }

    pub fn is_emoticon(&self) -> bool {
        check_flag(&EMOTICONS_PATTERN, &self.value)
    }

    /// Unicode emoji or its textual alias (`:joy:`).
    pub fn is_emoji(&self) -> bool {
        emoji::is_emoji(&self.value)
    }

    pub fn is_digit(&self) -> bool {
        check_flag(&DIGIT_PATTERN, &self.value)
    }

    pub fn is_punct(&self) -> bool {
        is_single_punctuation(&self.value)
    }

    pub fn is_email(&self) -> bool {
        check_flag(&EMAIL_PATTERN, &self.value)
    }

    /// False without a language or with the unknown sentinel; an error for
    /// languages that have no stop list.
    pub fn is_stop_word(&self) -> Result<bool> {
        match &self.lang {
            None => Ok(false),
            Some(lang) if lang.is_unknown() => Ok(false),
            Some(lang) => stop_words::is_stop_word(&self.value, lang),
        }
    }

    pub fn is_html_tag(&self) -> bool {
        check_flag(&HTML_TAG_PATTERN, &self.value)
    }

    pub fn is(&self, category: Category) -> Result<bool> {
        Ok(match category {
            Category::Mention => self.is_mention(),
            Category::Hashtag => self.is_hashtag(),
            Category::Url => self.is_url(),
            Category::Digit => self.is_digit(),
            Category::Emoji => self.is_emoji(),
            Category::Emoticon => self.is_emoticon(),
            Category::Punct => self.is_punct(),
            Category::Email => self.is_email(),
            Category::StopWord => return self.is_stop_word(),
            Category::HtmlTag => self.is_html_tag(),
        })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::new(value)
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::new(value)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
