// src/pattern.rs

use fancy_regex::{Regex, RegexBuilder};
use once_cell::sync::Lazy;

use crate::error::{Error, Result};

// ----- CONSTANTS -----

/// Default budget handed to fancy-regex's backtracking VM.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Replacement glyph for characters that cannot be represented in the target encoding.
pub const UNENCODABLE_CHAR: char = '\u{FFFD}';

// ----- CATEGORY PATTERNS -----
// Modified from the ekphrasis expression generator and NLTK's casual tokenizer.

// Letters, numbers and '_' only; combining marks such as the keycap U+20E3 end a tag.
pub const HASHTAG: &str = r"#[\p{L}\p{N}_](?:[\p{L}\p{N}_-]*[\p{L}\p{N}_])?";
pub const WEIBO_HASHTAG: &str = r"#[^#]+#";
pub const NOT_A_HASHTAG: &str = r"#\b\d+\b";
// Thai vowels (U+0E00..U+0E7F) are allowed inside a word.
pub const WORD: &str = r"(?:[^\W\d_](?:[^\W\d_]|['_-]|[\x{0E00}-\x{0E7F}])+[^\W\d_]?)";
pub const MENTION: &str = r"@\w+";

const LTR_EMOTICON: &[&str] = &[
    // optional hat
    r"(?:(?<![a-zA-Z])[DPO]|(?<!\d)[03]|[|}><=])?",
    // eyes
    r"(?:(?<![a-zA-Z(])[xXB](?![a-ce-oq-zA-CE-OQ-Z,./])|(?<!:)[:=|](?!\.)|(?<![%#\d])[%#](?![%#\d])|(?<![\d$])\$(?![\d.,$])|;(?!\()|(?<![\d(+-])8(?![\da-ce-zA-CE-Z\\/])|\*(?![*\d,.]))",
    // optional tears
    r#"(?:['",])?"#,
    // optional nose
    r"(?:(?<![\w*])[oc](?![a-zA-Z])|[-‑^])?",
    // mouth
    r"(?:[(){}\[\]<>|/\\]+|[Þ×þ]|(?<!\d)[30](?!\d)|(?<![\d*])[*,.@#&](?![*\d,.])|(?<![\d$])\$(?![\d.,$])|[DOosSJLxXpPbc](?![a-zA-Z]))",
];

const RTL_EMOTICON: &[&str] = &[
    r"(?<!\w)",
    // mouth
    r"(?:[(){}\[\]<>|/\\]+|(?<![\d.,])0(?![\d.])|(?![\d*,.@#&])[*,.@#&]|\$|(?<![a-zA-Z])[DOosSxX])",
    // optional nose
    r"(?:[-‑^])?",
    // optional tears
    r#"(?:['",])?"#,
    // eyes
    r"(?:[xX]|[:=|]|[%#]|[$8](?![\d.])|;|\*)",
    // optional hat
    r"(?:[O0]|[|{><=])?",
    r"(?![a-zA-Z])",
];

// Face characters are anything but letters and numbers, so U+203F and other
// connector punctuation count.
const EASTERN_EMOTICONS: &str = r"(?<![\p{L}\p{N}_])(?:(?:[<>]?[\^;](?:[^\p{L}\p{N}]|m)[;^][;<>]?)|(?:[^\s()]?m?\((?:[^\p{L}\p{N}]|[oTOJ]){1,3}\s?(?:[^\p{L}\p{N}]|[oTOJ]){1,3}\)m?[^\s()]?)|(?:\*?[v>/\\-][o0O_.][v</\\-]\*?)|(?:[oO0>][/oO.\\_-]{1,2}[oO0>])|(?:\^\^))(?![\p{L}\p{N}_])";
const REST_EMOTICONS: &str = r"(?<![A-Za-z0-9/()])(?:\^5|<3)(?![\[A-Za-z0-9/()])";

pub const EMAIL: &str = r"(?:^|(?<=[^\w@.)]))(?:[\w+-](?:\.(?!\.))?)*?[\w+-]@(?:\w-?)*?\w+(?:\.(?:[a-z]{2,})){1,3}(?:$|\b)";
pub const URL: &str = r"(?:https?://(?:www\.|(?!www))[^\s.]+\.\S{2,}|www\.\S+\.\S{2,})";
pub const HTML_TAG: &str = r"<[^>\s]+>";
pub const ASCII_ARROW: &str = r"-+>|<-+";
pub const DIGIT: &str = r"(?:[+-]?\d+[,/.:-]?\d*[+-]?)";
pub const ELLIPSIS_DOTS: &str = r"(?:\.(?:\s*\.)+)";
pub const EMOJI_STRING: &str = r"(?::\w+:)";
pub const ANY_NON_SPACE: &str = r"\S";

// Built once on first use.
static EMOTICONS_REGEX_STR: Lazy<String> = Lazy::new(|| {
    let faces = [
        LTR_EMOTICON.concat(),
        RTL_EMOTICON.concat(),
        EASTERN_EMOTICONS.to_string(),
        REST_EMOTICONS.to_string(),
    ];
    faces
        .iter()
        .map(|face| format!("(?:{})", face))
        .collect::<Vec<_>>()
        .join("|")
});

pub fn get_emoticons_pattern_str() -> &'static str {
    EMOTICONS_REGEX_STR.as_str()
}

/// How a hashtag is delimited in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HashtagStyle {
    /// `#word`, as on Twitter.
    #[default]
    Prefixed,
    /// `#any text#`, as on Weibo where hashtags may contain unsegmented script.
    Delimited,
}

impl HashtagStyle {
    pub fn pattern_str(self) -> &'static str {
        match self {
            HashtagStyle::Prefixed => HASHTAG,
            HashtagStyle::Delimited => WEIBO_HASHTAG,
        }
    }
}

// ----- TOKENIZER RULE PATTERNS -----

/// The ordered alternatives of the master scan. Position is precedence: at any
/// starting offset the first alternative that matches wins.
pub fn get_social_media_pipeline(hashtag: HashtagStyle) -> Vec<&'static str> {
    vec![
        URL,
        EMAIL,
        MENTION,
        hashtag.pattern_str(),
        get_emoticons_pattern_str(),
        HTML_TAG,
        ASCII_ARROW,
        DIGIT,
        ELLIPSIS_DOTS,
        EMOJI_STRING,
        WORD,
        ANY_NON_SPACE,
    ]
}

pub fn get_social_media_pattern_str(hashtag: HashtagStyle) -> String {
    get_social_media_pipeline(hashtag)
        .iter()
        .map(|p| format!("(?:{})", p))
        .collect::<Vec<_>>()
        .join("|")
}

/// Anchor a category pattern so it must cover the whole token value.
pub fn full_match_pattern_str(pattern: &str) -> String {
    format!("^(?:{})$", pattern)
}

pub fn compile_with_limit(pattern: &str, backtrack_limit: usize) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .backtrack_limit(backtrack_limit)
        .build()
        .map_err(|e| Error::InvalidPattern(format!("'{}': {}", pattern, e)))
}

fn compile_full(pattern: &str) -> Regex {
    let anchored = full_match_pattern_str(pattern);
    compile_with_limit(&anchored, DEFAULT_BACKTRACK_LIMIT)
        .unwrap_or_else(|e| panic!("Category pattern compile error: {}", e))
}

// ----- COMPILED CATEGORY PREDICATES -----

pub static HASHTAG_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(HASHTAG));
pub static WEIBO_HASHTAG_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(WEIBO_HASHTAG));
pub static NOT_A_HASHTAG_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(NOT_A_HASHTAG));
pub static URL_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(URL));
pub static MENTION_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(MENTION));
pub static EMOTICONS_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(get_emoticons_pattern_str()));
pub static DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(DIGIT));
pub static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(EMAIL));
pub static HTML_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| compile_full(HTML_TAG));

/// Whole-value match. A regex runtime failure counts as "no match".
pub fn check_flag(pattern: &Regex, value: &str) -> bool {
    match pattern.is_match(value) {
        Ok(matched) => matched,
        Err(e) => {
            log::warn!("pattern check gave up on {:?}: {}", value, e);
            false
        }
    }
}

// ----- REWRITE PATTERNS (no lookaround, plain regex crate) -----

pub static ATTACHED_URL_PAT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"([^ ])(https?://)").unwrap_or_else(|e| panic!("{}", e)));
pub static QUESTION_APOSTROPHE_PAT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"(\w+)\?(\w+)").unwrap_or_else(|e| panic!("{}", e)));
pub static WHITESPACE_RUN_PAT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"\s+").unwrap_or_else(|e| panic!("{}", e)));
pub static UNENCODABLE_RUN_PAT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new("\u{FFFD}{2,}").unwrap_or_else(|e| panic!("{}", e)));
pub static QUOTES_PAT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new("[“”«»]").unwrap_or_else(|e| panic!("{}", e)));
pub static APOSTROPHES_PAT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new("[‘’]").unwrap_or_else(|e| panic!("{}", e)));
pub static REDUNDANT_SPACES_PAT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"[ \t]{2,}").unwrap_or_else(|e| panic!("{}", e)));
pub static RT_MENTION_PAT: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"^RT @\w+: ").unwrap_or_else(|e| panic!("{}", e)));

/// Unanchored URL scan, for stripping links out of running text.
pub static URL_SCAN_PAT: Lazy<Regex> = Lazy::new(|| {
    compile_with_limit(URL, DEFAULT_BACKTRACK_LIMIT).unwrap_or_else(|e| panic!("URL compile error: {}", e))
});
