// src/tokenizer.rs

use fancy_regex::Regex;
use log::{debug, warn};
use once_cell::sync::Lazy;

use crate::error::Result;
use crate::pattern::{self, HashtagStyle, DEFAULT_BACKTRACK_LIMIT};
use crate::token::Token;

/// Anything that turns a string into an ordered token sequence.
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Single left-to-right scan over the ordered alternation of the pattern
/// library. The earliest alternative matching at a position wins.
pub struct SocialMediaTokenizer {
    scanner: Regex,
    hashtag_style: HashtagStyle,
}

impl SocialMediaTokenizer {
    pub fn new() -> Result<Self> {
        Self::with_options(HashtagStyle::Prefixed, DEFAULT_BACKTRACK_LIMIT)
    }

    /// The `#...#` hashtag variant used for Weibo posts.
    pub fn weibo() -> Result<Self> {
        Self::with_options(HashtagStyle::Delimited, DEFAULT_BACKTRACK_LIMIT)
    }

    pub fn with_options(hashtag_style: HashtagStyle, backtrack_limit: usize) -> Result<Self> {
        let pattern_str = pattern::get_social_media_pattern_str(hashtag_style);
        let scanner = pattern::compile_with_limit(&pattern_str, backtrack_limit)?;
        debug!(
            "social media tokenizer ready ({:?} hashtags, backtrack limit {})",
            hashtag_style, backtrack_limit
        );
        Ok(SocialMediaTokenizer { scanner, hashtag_style })
    }

    pub fn hashtag_style(&self) -> HashtagStyle {
        self.hashtag_style
    }

    /// The raw matched spans, after HTML unescaping.
    pub fn spans(&self, text: &str) -> Vec<String> {
        let unescaped = html_escape::decode_html_entities(text);
        let text = unescaped.as_ref();
        let mut spans = Vec::new();
        let mut scanned_to = 0;

        for found in self.scanner.find_iter(text) {
            match found {
                Ok(mat) => {
                    spans.push(mat.as_str().to_string());
                    scanned_to = mat.end();
                }
                Err(e) => {
                    // keep every remaining character rather than dropping the tail
                    warn!(
                        "tokenizer scan aborted at byte {} ({}), splitting the rest on whitespace",
                        scanned_to, e
                    );
                    spans.extend(text[scanned_to..].split_whitespace().map(str::to_string));
                    break;
                }
            }
        }
        spans
    }
}

impl Tokenize for SocialMediaTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let style = self.hashtag_style;
        self.spans(text)
            .into_iter()
            .map(|span| Token::new(span).with_hashtag_style(style))
            .collect()
    }
}

/// Whitespace splitting with trimming.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhiteSpaceTokenizer;

impl Tokenize for WhiteSpaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        white_space_tokenize(text)
    }
}

static DEFAULT_SOCIAL_MEDIA_TOKENIZER: Lazy<SocialMediaTokenizer> = Lazy::new(|| {
    SocialMediaTokenizer::new().unwrap_or_else(|e| panic!("Social media tokenizer compile error: {}", e))
});

/// Tokenize with the shared default social media tokenizer.
pub fn social_media_tokenize(text: &str) -> Vec<Token> {
    DEFAULT_SOCIAL_MEDIA_TOKENIZER.tokenize(text)
}

pub fn white_space_tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace().map(Token::new).collect()
}
