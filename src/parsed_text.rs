// src/parsed_text.rs

use std::collections::HashSet;
use std::fmt;
use std::ops::Index;

use crate::action::ActionSpec;
use crate::error::Result;
use crate::language::Language;
use crate::normalize;
use crate::segmentation::Detokenizer;
use crate::token::{Category, Token};

pub const DEFAULT_SPLIT: &str = " ";

/// An ordered token sequence with its joined, normalized string form.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedText {
    tokens: Vec<Token>,
    split: String,
    value: Option<String>,
}

impl ParsedText {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_split(tokens, DEFAULT_SPLIT)
    }

    pub fn with_split(tokens: Vec<Token>, split: impl Into<String>) -> Self {
        ParsedText {
            tokens,
            split: split.into(),
            value: None,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Replace the value of the token at `index`. Returns false when out of range.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.tokens.get_mut(index) {
            Some(token) => {
                token.set_value(value);
                self.value = None;
                true
            }
            None => false,
        }
    }

    /// Apply at most one action per token, trying categories in processing
    /// order, then drop the tokens left empty.
    ///
    /// On error the sequence is left untouched.
    pub fn process(&mut self, spec: &ActionSpec) -> Result<()> {
        let actions = spec.actions()?;
        if actions.iter().any(|action| action.is_valid() && action.condition() == Some(Category::StopWord)) {
            for token in &self.tokens {
                token.is_stop_word()?;
            }
        }
        for token in self.tokens.iter_mut() {
            for action in &actions {
                if action.apply(token)? {
                    break;
                }
            }
        }
        self.tokens.retain(|token| !token.is_empty());
        self.value = None;
        Ok(())
    }

    /// Collapse whitespace runs in the joined value and trim it.
    pub fn post_process(&mut self) {
        let collapsed = normalize::collapse_whitespace(&self.value());
        self.value = Some(collapsed);
    }

    /// Natural text rebuilt from the current token values.
    pub fn detokenize(&self, detokenizer: &dyn Detokenizer, lang: &Language) -> String {
        let tokens: Vec<&str> = self.tokens.iter().map(Token::value).collect();
        detokenizer.detokenize(&tokens, lang)
    }

    pub fn value(&self) -> String {
        match &self.value {
            Some(value) => value.clone(),
            None => self.join(),
        }
    }

    /// Joined value, computing and caching it on first access.
    pub fn value_ref(&mut self) -> &str {
        if self.value.is_none() {
            self.value = Some(self.join());
        }
        self.value.as_deref().unwrap_or_default()
    }

    fn join(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.value())
            .collect::<Vec<_>>()
            .join(&self.split)
    }

    /// Distinct hashtags, in no particular order.
    pub fn hashtags(&self) -> Vec<String> {
        let unique: HashSet<&str> = self.tokens.iter().filter(|t| t.is_hashtag()).map(|t| t.value()).collect();
        unique.into_iter().map(str::to_string).collect()
    }

    pub fn mentions(&self) -> Vec<String> {
        self.collect_values(Token::is_mention)
    }

    pub fn emoticons(&self) -> Vec<String> {
        self.collect_values(Token::is_emoticon)
    }

    pub fn emojis(&self) -> Vec<String> {
        self.collect_values(Token::is_emoji)
    }

    pub fn digits(&self) -> Vec<String> {
        self.collect_values(Token::is_digit)
    }

    pub fn emails(&self) -> Vec<String> {
        self.collect_values(Token::is_email)
    }

    pub fn urls(&self) -> Vec<String> {
        self.collect_values(Token::is_url)
    }

    fn collect_values(&self, pred: fn(&Token) -> bool) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| pred(t))
            .map(|t| t.value().to_string())
            .collect()
    }
}

impl fmt::Display for ParsedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", token.value())?;
        }
        f.write_str("]")
    }
}

impl Index<usize> for ParsedText {
    type Output = Token;

    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a ParsedText {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for ParsedText {
    fn from(tokens: Vec<Token>) -> Self {
        ParsedText::new(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionName;
    use crate::tokenizer::social_media_tokenize;

    const RAW: [&str; 22] = [
        "#hashtag",
        "@mention",
        "https://buff.ly/2Uclr2A",
        "tutu@gmail.com",
        "😰",
        ":)",
        "60",
        ",",
        "the",
        "<p>",
        "cool",
        "#hashtag",
        "www.google.fr",
        "12.34",
        ":joy:",
        ":(",
        "!",
        "a",
        "</p>",
        "@other",
        "-5",
        ".",
    ];

    fn parsed() -> ParsedText {
        ParsedText::new(RAW.iter().map(|v| Token::new(*v).with_lang(Language::English)).collect())
    }

    fn process(pairs: &[(&str, &str)]) -> ParsedText {
        let mut text = parsed();
        text.process(&ActionSpec::from_pairs(pairs).unwrap()).unwrap();
        text
    }

    #[test]
    fn test_value_joins_with_split() {
        let text = ParsedText::with_split(vec![Token::new("a"), Token::new("b")], "|");
        assert_eq!(text.value(), "a|b");
        assert_eq!(ParsedText::new(vec![]).value(), "");
    }

    #[test]
    fn test_process_without_actions_keeps_everything() {
        let text = process(&[]);
        assert_eq!(text.len(), 22);
        assert_eq!(text.value(), RAW.join(" "));
    }

    #[test]
    fn test_process_remove_hashtags_and_mentions() {
        let text = process(&[("hashtags", "remove"), ("mentions", "remove")]);
        assert_eq!(text.len(), 18);
        assert!(text.hashtags().is_empty());
        assert!(text.mentions().is_empty());
    }

    #[test]
    fn test_process_tag() {
        let text = process(&[("urls", "tag"), ("emojis", "tag"), ("digits", "tag"), ("puncts", "tag")]);
        assert_eq!(text[2].value(), "<URL>");
        assert_eq!(text[4].value(), "<EMOJI>");
        assert_eq!(text[6].value(), "<DIGIT>");
        assert_eq!(text[7].value(), "<PUNCT>");
        assert_eq!(text[12].value(), "<URL>");
        assert_eq!(text[14].value(), "<EMOJI>");
        assert_eq!(text[20].value(), "<DIGIT>");
    }

    #[test]
    fn test_first_matching_category_wins() {
        // "<URL>" is an HTML tag once tagged but must not be processed twice
        let text = process(&[("urls", "tag"), ("html_tags", "remove")]);
        assert_eq!(text.urls().len(), 0);
        assert_eq!(text.len(), 20);
        assert_eq!(text[2].value(), "<URL>");
    }

    #[test]
    fn test_process_stop_words_and_html() {
        let text = process(&[("stop_words", "remove"), ("html_tags", "remove")]);
        let values: Vec<&str> = text.iter().map(|t| t.value()).collect();
        assert!(!values.contains(&"the"));
        assert!(!values.contains(&"a"));
        assert!(!values.contains(&"<p>"));
        assert!(!values.contains(&"</p>"));
        assert_eq!(text.len(), 18);
    }

    #[test]
    fn test_process_demojize() {
        let text = process(&[("emojis", "demojize")]);
        assert_eq!(text[4].value(), ":anxious_face_with_sweat:");
        assert_eq!(text[14].value(), ":joy:");
    }

    #[test]
    fn test_no_empty_token_after_process() {
        let spec = ActionSpec::new()
            .with(Category::Punct, ActionName::Remove)
            .and_then(|s| s.with(Category::Emoticon, ActionName::Remove))
            .unwrap();
        let mut text = parsed();
        text.process(&spec).unwrap();
        assert!(text.iter().all(|t| !t.is_empty()));
        assert!(text.emoticons().is_empty());
    }

    #[test]
    fn test_views() {
        let text = parsed();
        assert_eq!(text.hashtags(), vec!["#hashtag".to_string()]);
        assert_eq!(text.mentions(), vec!["@mention", "@other"]);
        assert_eq!(text.emoticons(), vec![":)", ":("]);
        assert_eq!(text.emojis(), vec!["😰", ":joy:"]);
        assert_eq!(text.digits(), vec!["60", "12.34", "-5"]);
        assert_eq!(text.emails(), vec!["tutu@gmail.com"]);
        assert_eq!(text.urls(), vec!["https://buff.ly/2Uclr2A", "www.google.fr"]);
    }

    #[test]
    fn test_post_process_and_set() {
        let mut text = ParsedText::new(vec![Token::new(" a "), Token::new("b\t"), Token::new("c")]);
        text.post_process();
        assert_eq!(text.value(), "a b c");
        text.post_process();
        assert_eq!(text.value(), "a b c");

        assert!(text.set(1, "x"));
        assert!(!text.set(9, "x"));
        assert_eq!(text.value(), " a  x c");
        assert_eq!(text.value_ref(), " a  x c");
    }

    #[test]
    fn test_display() {
        let text = ParsedText::new(vec![Token::new("a"), Token::new("b")]);
        assert_eq!(text.to_string(), "['a', 'b']");
        assert_eq!(ParsedText::new(vec![]).to_string(), "[]");
    }

    #[test]
    fn test_failed_stop_word_check_leaves_tokens_untouched() {
        let tokens = vec![
            Token::new("#tag").with_lang(Language::French),
            Token::new("le").with_lang(Language::French),
        ];
        let mut text = ParsedText::new(tokens);
        let spec = ActionSpec::from_pairs(&[("hashtags", "remove"), ("stop_words", "remove")]).unwrap();
        assert!(text.process(&spec).is_err());
        assert_eq!(text.len(), 2);
        assert_eq!(text[0].value(), "#tag");
        assert_eq!(text.value(), "#tag le");
    }

    /// Attaches closing punctuation to the previous word.
    struct AttachPunct;

    impl Detokenizer for AttachPunct {
        fn detokenize(&self, tokens: &[&str], _lang: &Language) -> String {
            let mut out = String::new();
            for token in tokens {
                let closing = matches!(*token, "," | "." | "!" | "?" | ";" | ":");
                if !out.is_empty() && !closing {
                    out.push(' ');
                }
                out.push_str(token);
            }
            out
        }
    }

    #[test]
    fn test_detokenize_round_trip() {
        for original in ["Hello, world! This is fine.", "Is it raining? Yes, a lot."] {
            let text = ParsedText::new(social_media_tokenize(original));
            let rebuilt = text.detokenize(&AttachPunct, &Language::English);
            assert_eq!(rebuilt, original);

            let again = ParsedText::new(crate::tokenizer::white_space_tokenize(&text.value()));
            assert_eq!(again.detokenize(&AttachPunct, &Language::English), original);
        }
    }
}
