// src/splitter.rs

use std::ops::Range;

use crate::language::Language;
use crate::segmentation::SegmenterRegistry;
use crate::tokenizer::{SocialMediaTokenizer, Tokenize};
use crate::token::Token;

// Unicode code point ranges (half open)
const CJK_RANGES: [Range<u32>; 8] = [
    0x4E00..0xA000,
    0x3400..0x4DC0,
    0x20000..0x2A6E0,
    0x2A700..0x2B740,
    0x2B740..0x2B820,
    0xF900..0xFB00,
    0x2F800..0x2FA20,
    0x9FA6..0x9FCC,
];

// Japanese-style punctuation, Hiragana, Katakana, then full-width roman and
// half-width katakana
const JP_RANGES: [Range<u32>; 2] = [0x3000..0x3100, 0xFF00..0xFFF0];

const THAI_RANGE: Range<u32> = 0x0E00..0x0E80;

pub fn is_chinese(ch: char) -> bool {
    let cp = ch as u32;
    CJK_RANGES.iter().any(|range| range.contains(&cp))
}

/// Kana, Japanese punctuation and full-width forms, plus every Han character.
pub fn is_japanese(ch: char) -> bool {
    let cp = ch as u32;
    JP_RANGES.iter().any(|range| range.contains(&cp)) || is_chinese(ch)
}

pub fn is_thai(ch: char) -> bool {
    THAI_RANGE.contains(&(ch as u32))
}

/// Segment every maximal run of `in_script` characters, leave the rest of the
/// text as is, then tokenize the rebuilt string.
pub fn asian_language_tokenize<F>(
    text: &str,
    lang: &Language,
    in_script: F,
    registry: &SegmenterRegistry,
    tokenizer: &SocialMediaTokenizer,
) -> Vec<Token>
where
    F: Fn(char) -> bool,
{
    let mut output = String::with_capacity(text.len() * 2);
    let mut run = String::new();

    for ch in text.chars() {
        if in_script(ch) {
            run.push(ch);
            continue;
        }
        if !run.is_empty() {
            output.push_str(&registry.segment(lang, &run));
            run.clear();
        }
        output.push(ch);
    }
    if !run.is_empty() {
        output.push_str(&registry.segment(lang, &run));
    }

    tokenizer.tokenize(&output)
}

pub fn chinese_tokenize(text: &str, registry: &SegmenterRegistry, tokenizer: &SocialMediaTokenizer) -> Vec<Token> {
    asian_language_tokenize(text, &Language::Chinese, is_chinese, registry, tokenizer)
}

pub fn japanese_tokenize(text: &str, registry: &SegmenterRegistry, tokenizer: &SocialMediaTokenizer) -> Vec<Token> {
    asian_language_tokenize(text, &Language::Japanese, is_japanese, registry, tokenizer)
}

pub fn thai_tokenize(text: &str, registry: &SegmenterRegistry, tokenizer: &SocialMediaTokenizer) -> Vec<Token> {
    asian_language_tokenize(text, &Language::Thai, is_thai, registry, tokenizer)
}

/// Weibo posts: `#...#` hashtags, Chinese segmentation everywhere else.
///
/// `weibo_tokenizer` must use the delimited hashtag style and `tokenizer`
/// the prefixed one. With `segment_hashtag`, a hashtag becomes `#`, the
/// segmented interior, `#`.
pub fn weibo_tokenize(
    text: &str,
    segment_hashtag: bool,
    registry: &SegmenterRegistry,
    weibo_tokenizer: &SocialMediaTokenizer,
    tokenizer: &SocialMediaTokenizer,
) -> Vec<Token> {
    let mut output = Vec::new();
    let rewrap = |tokens: Vec<Token>| tokens.into_iter().map(|t| Token::weibo(t.into_value()));

    for token in weibo_tokenizer.tokenize(text) {
        let token = Token::weibo(token.into_value());
        if token.is_mention() {
            output.push(token);
        } else if token.is_hashtag() {
            if segment_hashtag {
                let value = token.value();
                let interior = &value[1..value.len() - 1];
                output.push(Token::weibo("#"));
                output.extend(rewrap(chinese_tokenize(interior, registry, tokenizer)));
                output.push(Token::weibo("#"));
            } else {
                output.push(token);
            }
        } else {
            output.extend(rewrap(chinese_tokenize(token.value(), registry, tokenizer)));
        }
    }
    output
}
