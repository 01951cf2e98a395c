// src/normalize.rs

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};
use log::warn;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::pattern::{
    ATTACHED_URL_PAT, QUESTION_APOSTROPHE_PAT, UNENCODABLE_CHAR, UNENCODABLE_RUN_PAT, WHITESPACE_RUN_PAT,
};
use crate::punctuation::{is_nonspacing_mark, is_variation_selector};

/// Runs longer than this collapse to exactly this many characters.
pub const MAX_CHAR_RUN: usize = 3;

pub fn lookup_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

/// Replace every character the target encoding cannot represent with U+FFFD.
pub fn replace_unencodable(text: &str, encoding: &'static Encoding) -> String {
    // UTF-16 encoders in encoding_rs write UTF-8, and every scalar value round-trips
    if encoding.output_encoding() == UTF_8 {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut replaced = 0usize;
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        let (_, _, had_errors) = encoding.encode(ch.encode_utf8(&mut buf));
        if had_errors {
            out.push(UNENCODABLE_CHAR);
            replaced += 1;
        } else {
            out.push(ch);
        }
    }
    if replaced > 0 {
        warn!("{} character(s) not representable in {}", replaced, encoding.name());
    }
    out
}

/// Drop lone replacement glyphs (as spaces) or squeeze runs of them into one.
pub fn handle_unencodable(text: &str, remove: bool) -> String {
    if remove {
        text.replace(UNENCODABLE_CHAR, " ")
    } else {
        UNENCODABLE_RUN_PAT
            .replace_all(text, UNENCODABLE_CHAR.to_string().as_str())
            .into_owned()
    }
}

/// NFD, then drop combining marks (category Mn).
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|ch| !is_nonspacing_mark(*ch)).collect()
}

/// `waaaaay` -> `waaay`. Newlines are never collapsed.
pub fn reduce_lengthening(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;
    for ch in text.chars() {
        if Some(ch) == prev {
            run += 1;
        } else {
            prev = Some(ch);
            run = 1;
        }
        if ch == '\n' || run <= MAX_CHAR_RUN {
            out.push(ch);
        }
    }
    out
}

pub fn remove_variation_selectors(text: &str) -> String {
    text.chars().filter(|ch| !is_variation_selector(*ch)).collect()
}

/// `seeker:http://t.co` -> `seeker: http://t.co`
pub fn split_attached_urls(text: &str) -> Cow<'_, str> {
    ATTACHED_URL_PAT.replace_all(text, "${1} ${2}")
}

/// `c?est` -> `c'est`. Also hits a genuine `?` glued between two words.
pub fn fix_question_apostrophe(text: &str) -> Cow<'_, str> {
    QUESTION_APOSTROPHE_PAT.replace_all(text, "${1}'${2}")
}

/// `&pound;100` -> `£100`
pub fn unescape_html(text: &str) -> Cow<'_, str> {
    html_escape::decode_html_entities(text)
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN_PAT.replace_all(text, " ").trim().to_string()
}
