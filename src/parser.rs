// src/parser.rs

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use log::debug;
use once_cell::sync::Lazy;

use crate::config::{ParseConfig, TokenizerChoice};
use crate::error::Result;
use crate::normalize;
use crate::parsed_text::ParsedText;
use crate::pattern::{HashtagStyle, DEFAULT_BACKTRACK_LIMIT};
use crate::segmentation::SegmenterRegistry;
use crate::splitter;
use crate::token::Token;
use crate::tokenizer::{white_space_tokenize, SocialMediaTokenizer, Tokenize};

struct Tokenizers {
    social: SocialMediaTokenizer,
    weibo: SocialMediaTokenizer,
}

impl Tokenizers {
    fn new(backtrack_limit: usize) -> Result<Self> {
        Ok(Tokenizers {
            social: SocialMediaTokenizer::with_options(HashtagStyle::Prefixed, backtrack_limit)?,
            weibo: SocialMediaTokenizer::with_options(HashtagStyle::Delimited, backtrack_limit)?,
        })
    }
}

/// Shared context for parsing: compiled tokenizers plus the segmenter registry.
///
/// Everything inside is read-only after construction, so one parser can serve
/// any number of threads.
pub struct TextParser {
    tokenizers: Arc<Tokenizers>,
    backtrack_limit: usize,
    // scanners compiled for other budgets, kept for later calls
    by_limit: RwLock<HashMap<usize, Arc<Tokenizers>>>,
    registry: SegmenterRegistry,
}

impl TextParser {
    pub fn new() -> Result<Self> {
        Self::with_registry(SegmenterRegistry::new())
    }

    pub fn with_registry(registry: SegmenterRegistry) -> Result<Self> {
        Self::with_options(registry, DEFAULT_BACKTRACK_LIMIT)
    }

    pub fn with_options(registry: SegmenterRegistry, backtrack_limit: usize) -> Result<Self> {
        let init_start = Instant::now();
        let tokenizers = Tokenizers::new(backtrack_limit)?;
        debug!("text parser initialized (took {:?})", init_start.elapsed());
        Ok(TextParser {
            tokenizers: Arc::new(tokenizers),
            backtrack_limit,
            by_limit: RwLock::new(HashMap::new()),
            registry,
        })
    }

    fn tokenizers_for(&self, backtrack_limit: usize) -> Result<Arc<Tokenizers>> {
        if backtrack_limit == self.backtrack_limit {
            return Ok(Arc::clone(&self.tokenizers));
        }
        let cached = self.by_limit.read().unwrap_or_else(PoisonError::into_inner).get(&backtrack_limit).cloned();
        if let Some(tokenizers) = cached {
            return Ok(tokenizers);
        }
        let mut by_limit = self.by_limit.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(tokenizers) = by_limit.get(&backtrack_limit) {
            return Ok(Arc::clone(tokenizers));
        }
        debug!("compiling tokenizers for backtrack limit {}", backtrack_limit);
        let tokenizers = Arc::new(Tokenizers::new(backtrack_limit)?);
        by_limit.insert(backtrack_limit, Arc::clone(&tokenizers));
        Ok(tokenizers)
    }

    pub fn registry(&self) -> &SegmenterRegistry {
        &self.registry
    }

    /// Tokenize without any preprocessing pass.
    pub fn tokenize(&self, text: &str, choice: TokenizerChoice) -> Vec<Token> {
        self.tokenize_with(&self.tokenizers, text, choice)
    }

    fn tokenize_with(&self, tokenizers: &Tokenizers, text: &str, choice: TokenizerChoice) -> Vec<Token> {
        let social = &tokenizers.social;
        match choice {
            TokenizerChoice::SocialMedia => social.tokenize(text),
            TokenizerChoice::Naive => white_space_tokenize(text),
            TokenizerChoice::Weibo => splitter::weibo_tokenize(text, false, &self.registry, &tokenizers.weibo, social),
            TokenizerChoice::WeiboSegmentHashtag => {
                splitter::weibo_tokenize(text, true, &self.registry, &tokenizers.weibo, social)
            }
            TokenizerChoice::Chinese => splitter::chinese_tokenize(text, &self.registry, social),
            TokenizerChoice::Japanese => splitter::japanese_tokenize(text, &self.registry, social),
            TokenizerChoice::Thai => splitter::thai_tokenize(text, &self.registry, social),
        }
    }

    /// Run the preprocessing passes, tokenize, filter, apply the configured
    /// actions and normalize whitespace.
    ///
    /// Every configuration error surfaces before the text is touched.
    pub fn parse_text(&self, text: &str, config: &ParseConfig) -> Result<ParsedText> {
        config.validate()?;

        let tokenizers = self.tokenizers_for(config.backtrack_limit)?;

        let text = self.normalize(text, config)?;

        let lang = config.language();
        let tokens: Vec<Token> = self
            .tokenize_with(&tokenizers, &text, config.tokenizer)
            .into_iter()
            .filter(|token| !config.filters.contains(token.value()))
            .map(|mut token| {
                token.set_lang(lang.clone());
                token
            })
            .collect();
        debug!("{} token(s) before processing", tokens.len());

        let mut parsed = ParsedText::new(tokens);
        parsed.process(&config.actions)?;
        parsed.post_process();
        Ok(parsed)
    }

    /// Like [`TextParser::parse_text`] on raw bytes. Invalid UTF-8 becomes U+FFFD.
    pub fn parse_bytes(&self, bytes: &[u8], config: &ParseConfig) -> Result<ParsedText> {
        let text = String::from_utf8_lossy(bytes);
        self.parse_text(&text, config)
    }

    /// The processed text as a single string.
    pub fn prep(&self, text: &str, config: &ParseConfig) -> Result<String> {
        Ok(self.parse_text(text, config)?.value())
    }

    fn normalize(&self, text: &str, config: &ParseConfig) -> Result<String> {
        let mut text = text.to_string();
        if let Some(label) = &config.encoding {
            let encoding = normalize::lookup_encoding(label)?;
            text = normalize::replace_unencodable(&text, encoding);
            text = normalize::handle_unencodable(&text, config.remove_unencodable_char);
        }
        if config.to_lower {
            text = text.to_lowercase();
        }
        if config.strip_accents {
            text = normalize::strip_accents(&text);
        }
        if config.reduce_len {
            text = normalize::reduce_lengthening(&text);
        }
        text = normalize::remove_variation_selectors(&text);
        text = normalize::split_attached_urls(&text).into_owned();
        text = normalize::fix_question_apostrophe(&text).into_owned();
        Ok(normalize::unescape_html(&text).into_owned())
    }
}

static DEFAULT_PARSER: Lazy<TextParser> =
    Lazy::new(|| TextParser::new().unwrap_or_else(|e| panic!("Default text parser init error: {}", e)));

/// The process-wide default parser (built-in segmenters, default budget).
pub fn default_parser() -> &'static TextParser {
    &DEFAULT_PARSER
}

pub fn parse_text(text: &str, config: &ParseConfig) -> Result<ParsedText> {
    DEFAULT_PARSER.parse_text(text, config)
}

pub fn prep(text: &str, config: &ParseConfig) -> Result<String> {
    DEFAULT_PARSER.prep(text, config)
}
