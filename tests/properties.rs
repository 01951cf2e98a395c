//! Property-based tests for the pipeline.
//!
//! Key invariants:
//! - post_process is idempotent
//! - no token is empty after process, whatever the actions
//! - the whitespace tokenizer keeps every non-space span verbatim
//! - the social media tokenizer never loses a non-space character

use proptest::prelude::*;
use tweetprep::{social_media_tokenize, white_space_tokenize, ActionName, ActionSpec, Category, ParsedText, Token};

fn post_like_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z]{1,8}",
            "#[a-z0-9]{1,6}",
            "@[a-z_]{1,6}",
            "[0-9]{1,4}",
            prop::sample::select(vec![":)", "😰", ":joy:", "<p>", "www.google.fr"]).prop_map(String::from),
            "[!?.,]",
            "[ \t\n]{1,3}",
        ],
        0..20,
    )
    .prop_map(|parts| parts.join(" "))
}

fn action_for(category: Category) -> impl Strategy<Value = Option<ActionName>> {
    let names: Vec<Option<ActionName>> = std::iter::once(None)
        .chain(tweetprep::action::allowed_actions(category).iter().copied().map(Some))
        .collect();
    prop::sample::select(names)
}

fn action_spec() -> impl Strategy<Value = ActionSpec> {
    (
        action_for(Category::Mention),
        action_for(Category::Hashtag),
        action_for(Category::Url),
        action_for(Category::Digit),
        action_for(Category::Emoji),
        action_for(Category::Emoticon),
        action_for(Category::Punct),
        action_for(Category::Email),
        action_for(Category::HtmlTag),
    )
        .prop_map(|(mentions, hashtags, urls, digits, emojis, emoticons, puncts, emails, html_tags)| ActionSpec {
            mentions,
            hashtags,
            urls,
            digits,
            emojis,
            emoticons,
            puncts,
            emails,
            html_tags,
            stop_words: None,
        })
}

proptest! {
    #[test]
    fn post_process_is_idempotent(text in post_like_text()) {
        let mut parsed = ParsedText::new(white_space_tokenize(&text));
        parsed.post_process();
        let once = parsed.value();
        parsed.post_process();
        prop_assert_eq!(parsed.value(), once);
    }

    #[test]
    fn no_empty_token_after_process(text in post_like_text(), spec in action_spec()) {
        let mut parsed = ParsedText::new(social_media_tokenize(&text));
        parsed.process(&spec).unwrap();
        prop_assert!(parsed.iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn white_space_tokenizer_keeps_spans_verbatim(text in post_like_text()) {
        let tokens: Vec<String> = white_space_tokenize(&text).into_iter().map(Token::into_value).collect();
        let expected: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        prop_assert_eq!(tokens, expected);
    }

    #[test]
    fn social_media_tokenizer_keeps_every_character(text in post_like_text()) {
        // ellipsis spans such as ". ." carry inner spaces
        let joined: String = social_media_tokenize(&text)
            .iter()
            .flat_map(|t| t.value().chars())
            .filter(|c| !c.is_whitespace())
            .collect();
        let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(joined, expected);
    }
}
