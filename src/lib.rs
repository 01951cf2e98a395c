// src/lib.rs

//! Normalization and tokenization of social media text.
//!
//! Raw posts are normalized, split into classified [`Token`]s, transformed
//! per category by an [`ActionSpec`] and joined back into a clean string:
//!
//! ```no_run
//! use tweetprep::{prep, ActionName, ParseConfig};
//!
//! let mut config = ParseConfig::default();
//! config.actions.emojis = Some(ActionName::Tag);
//! assert_eq!(prep("cool 😰", &config).unwrap(), "cool <EMOJI>");
//! ```

pub mod action;
pub mod config;
pub mod emoji;
pub mod error;
pub mod language;
pub mod normalize;
pub mod parsed_text;
pub mod parser;
pub mod pattern;
pub mod prep;
pub mod punctuation;
pub mod segmentation;
pub mod splitter;
pub mod stop_words;
pub mod token;
pub mod tokenizer;

pub use action::{Action, ActionName, ActionSpec};
pub use config::{ParseConfig, TokenizerChoice};
pub use error::{Error, Result};
pub use language::Language;
pub use parsed_text::ParsedText;
pub use parser::{parse_text, prep, TextParser};
pub use pattern::HashtagStyle;
pub use prep::{prep_file, prep_lines};
pub use segmentation::{Detokenizer, DictionarySegmenter, Segmenter, SegmenterRegistry};
pub use splitter::{is_chinese, is_japanese, is_thai};
pub use token::{Category, Token};
pub use tokenizer::{social_media_tokenize, white_space_tokenize, SocialMediaTokenizer, Tokenize, WhiteSpaceTokenizer};

#[cfg(feature = "jieba")]
pub use segmentation::JiebaSegmenter;
