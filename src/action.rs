// src/action.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::emoji;
use crate::error::{Error, Result};
use crate::token::{Category, Token};

/// What to do with a token of a given category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionName {
    Remove,
    Tag,
    Demojize,
    Emojize,
}

impl ActionName {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionName::Remove => "remove",
            ActionName::Tag => "tag",
            ActionName::Demojize => "demojize",
            ActionName::Emojize => "emojize",
        }
    }
}

impl FromStr for ActionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "remove" => Ok(ActionName::Remove),
            "tag" => Ok(ActionName::Tag),
            "demojize" => Ok(ActionName::Demojize),
            "emojize" => Ok(ActionName::Emojize),
            other => Err(Error::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const REMOVE_OR_TAG: &[ActionName] = &[ActionName::Remove, ActionName::Tag];
const EMOJI_ACTIONS: &[ActionName] = &[
    ActionName::Remove,
    ActionName::Tag,
    ActionName::Demojize,
    ActionName::Emojize,
];
const REMOVE_ONLY: &[ActionName] = &[ActionName::Remove];

pub fn allowed_actions(category: Category) -> &'static [ActionName] {
    match category {
        Category::Emoji => EMOJI_ACTIONS,
        Category::HtmlTag | Category::StopWord => REMOVE_ONLY,
        _ => REMOVE_OR_TAG,
    }
}

fn check_allowed(name: ActionName, category: Category) -> Result<()> {
    let allowed = allowed_actions(category);
    if allowed.contains(&name) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(|a| a.as_str()).collect();
    Err(Error::illegal_action(name.as_str(), category.config_key(), &names))
}

/// A transform conditioned on a token category.
///
/// An action missing its name or its condition is inert: it never fires.
/// Illegal name/condition pairs are rejected when the action is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    name: Option<ActionName>,
    condition: Option<Category>,
}

impl Action {
    pub fn new(name: Option<ActionName>, condition: Category) -> Result<Self> {
        if let Some(name) = name {
            check_allowed(name, condition)?;
        }
        Ok(Action {
            name,
            condition: Some(condition),
        })
    }

    pub fn inert() -> Self {
        Action {
            name: None,
            condition: None,
        }
    }

    /// Build from the string configuration surface. `None` or empty strings give an inert action.
    pub fn parse(name: Option<&str>, condition: Option<&str>) -> Result<Self> {
        let name = name.filter(|n| !n.is_empty());
        let condition = condition.filter(|c| !c.is_empty());
        match (name, condition) {
            (Some(name), Some(condition)) => {
                let category: Category = condition.parse()?;
                Action::new(Some(name.parse()?), category)
            }
            (None, Some(condition)) => Ok(Action {
                name: None,
                condition: Some(condition.parse()?),
            }),
            _ => Ok(Action::inert()),
        }
    }

    pub fn name(&self) -> Option<ActionName> {
        self.name
    }

    pub fn condition(&self) -> Option<Category> {
        self.condition
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_some() && self.condition.is_some()
    }

    /// Apply on `token` if its condition currently holds. Returns whether the action fired.
    pub fn apply(&self, token: &mut Token) -> Result<bool> {
        let (name, condition) = match (self.name, self.condition) {
            (Some(name), Some(condition)) => (name, condition),
            _ => return Ok(false),
        };
        if !token.is(condition)? {
            return Ok(false);
        }
        match name {
            ActionName::Remove => token.set_value(""),
            ActionName::Tag => {
                // legality was checked at construction, every taggable category has a tag
                if let Some(tag) = condition.tag() {
                    token.set_value(tag);
                }
            }
            ActionName::Demojize => {
                let alias = emoji::demojize(token.value());
                token.set_value(alias);
            }
            ActionName::Emojize => {
                let unicode = emoji::emojize(token.value());
                token.set_value(unicode);
            }
        }
        Ok(true)
    }
}

/// One optional action per category, keyed the way callers configure them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionSpec {
    pub mentions: Option<ActionName>,
    pub hashtags: Option<ActionName>,
    pub urls: Option<ActionName>,
    pub digits: Option<ActionName>,
    pub emojis: Option<ActionName>,
    pub emoticons: Option<ActionName>,
    pub puncts: Option<ActionName>,
    pub emails: Option<ActionName>,
    pub html_tags: Option<ActionName>,
    pub stop_words: Option<ActionName>,
}

impl ActionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<ActionName> {
        match category {
            Category::Mention => self.mentions,
            Category::Hashtag => self.hashtags,
            Category::Url => self.urls,
            Category::Digit => self.digits,
            Category::Emoji => self.emojis,
            Category::Emoticon => self.emoticons,
            Category::Punct => self.puncts,
            Category::Email => self.emails,
            Category::StopWord => self.stop_words,
            Category::HtmlTag => self.html_tags,
        }
    }

    fn slot(&mut self, category: Category) -> &mut Option<ActionName> {
        match category {
            Category::Mention => &mut self.mentions,
            Category::Hashtag => &mut self.hashtags,
            Category::Url => &mut self.urls,
            Category::Digit => &mut self.digits,
            Category::Emoji => &mut self.emojis,
            Category::Emoticon => &mut self.emoticons,
            Category::Punct => &mut self.puncts,
            Category::Email => &mut self.emails,
            Category::StopWord => &mut self.stop_words,
            Category::HtmlTag => &mut self.html_tags,
        }
    }

    pub fn set(&mut self, category: Category, name: Option<ActionName>) -> Result<()> {
        if let Some(name) = name {
            check_allowed(name, category)?;
        }
        *self.slot(category) = name;
        Ok(())
    }

    /// Builder form of [`ActionSpec::set`].
    pub fn with(mut self, category: Category, name: ActionName) -> Result<Self> {
        self.set(category, Some(name))?;
        Ok(self)
    }

    /// From `("emojis", "tag")`-style pairs. Unknown keys and names fail fast.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        let mut spec = ActionSpec::default();
        for (key, name) in pairs {
            let category = Category::from_config_key(key)?;
            let name = if name.is_empty() { None } else { Some(name.parse()?) };
            spec.set(category, name)?;
        }
        Ok(spec)
    }

    /// Re-check every slot; needed after deserialization, which bypasses `set`.
    pub fn validate(&self) -> Result<()> {
        for category in Category::PROCESS_ORDER {
            if let Some(name) = self.get(category) {
                check_allowed(name, category)?;
            }
        }
        Ok(())
    }

    /// The configured actions in processing order.
    pub fn actions(&self) -> Result<Vec<Action>> {
        Category::PROCESS_ORDER
            .iter()
            .map(|&category| Action::new(self.get(category), category))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        Category::PROCESS_ORDER.iter().all(|&c| self.get(c).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{EMOJI_TAG, HASHTAG_TAG};

    fn action(name: &str, condition: &str) -> Action {
        Action::parse(Some(name), Some(condition)).unwrap()
    }

    #[test]
    fn test_token_do_action_remove() {
        let mut token = Token::new("#hashtag");
        assert!(action("remove", "is_hashtag").apply(&mut token).unwrap());
        assert_eq!(token.value(), "");
    }

    #[test]
    fn test_token_do_action_tag() {
        let mut token = Token::new("#hashtag");
        action("tag", "is_hashtag").apply(&mut token).unwrap();
        assert_eq!(token.value(), HASHTAG_TAG);

        let mut token = Token::new("😰");
        action("tag", "is_emoji").apply(&mut token).unwrap();
        assert_eq!(token.value(), EMOJI_TAG);
    }

    #[test]
    fn test_token_do_action_none() {
        let mut token = Token::new("#hashtag");
        let inert = Action::parse(None, Some("is_hashtag")).unwrap();
        assert!(!inert.apply(&mut token).unwrap());
        assert_eq!(token.value(), "#hashtag");
    }

    #[test]
    fn test_token_do_action_demojize_and_emojize() {
        let mut token = Token::new("😰");
        action("demojize", "is_emoji").apply(&mut token).unwrap();
        assert_eq!(token.value(), ":anxious_face_with_sweat:");

        let mut token = Token::new(":joy:");
        action("emojize", "is_emoji").apply(&mut token).unwrap();
        assert_eq!(token.value(), "😂");
    }

    #[test]
    fn test_unknown_condition_fails() {
        assert!(matches!(
            Action::parse(Some("demojize"), Some("is_ijome")),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_unknown_or_illegal_action_fails() {
        assert!(matches!(
            Action::parse(Some("ezijomed"), Some("is_emoji")),
            Err(Error::UnknownAction(_))
        ));
        assert!(matches!(
            Action::parse(Some("demojize"), Some("is_hashtag")),
            Err(Error::IllegalAction { .. })
        ));
        assert!(matches!(
            Action::new(Some(ActionName::Tag), Category::StopWord),
            Err(Error::IllegalAction { .. })
        ));
    }

    #[test]
    fn test_action_validity() {
        assert!(!Action::parse(Some(""), Some("is_hashtag")).unwrap().is_valid());
        assert!(!Action::parse(None, Some("is_hashtag")).unwrap().is_valid());
        assert!(!Action::parse(Some("tag"), Some("")).unwrap().is_valid());
        assert!(!Action::parse(Some("tag"), None).unwrap().is_valid());
        assert!(action("remove", "is_hashtag").is_valid());
        assert!(action("tag", "is_hashtag").is_valid());
    }

    #[test]
    fn test_apply_reports_whether_it_fired() {
        let remove = action("remove", "is_hashtag");
        assert!(remove.apply(&mut Token::new("#hashtag")).unwrap());
        assert!(!remove.apply(&mut Token::new("@hashtag")).unwrap());
    }

    #[test]
    fn test_emojize_on_non_alias_is_a_no_op() {
        let mut token = Token::new("😂");
        assert!(action("emojize", "is_emoji").apply(&mut token).unwrap());
        assert_eq!(token.value(), "😂");
    }

    #[test]
    fn test_allowed_actions() {
        assert_eq!(allowed_actions(Category::Emoji).len(), 4);
        assert_eq!(allowed_actions(Category::HtmlTag), &[ActionName::Remove]);
        assert_eq!(allowed_actions(Category::Url), &[ActionName::Remove, ActionName::Tag]);
    }

    #[test]
    fn test_spec_from_pairs() {
        let spec = ActionSpec::from_pairs(&[("emojis", "demojize"), ("urls", "tag"), ("digits", "")]).unwrap();
        assert_eq!(spec.emojis, Some(ActionName::Demojize));
        assert_eq!(spec.urls, Some(ActionName::Tag));
        assert_eq!(spec.digits, None);
        assert!(matches!(ActionSpec::from_pairs(&[("emoji", "tag")]), Err(Error::UnknownCategory(_))));
        assert!(matches!(
            ActionSpec::from_pairs(&[("html_tags", "tag")]),
            Err(Error::IllegalAction { .. })
        ));
    }

    #[test]
    fn test_spec_actions_follow_process_order() {
        let spec = ActionSpec::new().with(Category::HtmlTag, ActionName::Remove).unwrap();
        let actions = spec.actions().unwrap();
        let order: Vec<Category> = actions.iter().filter_map(|a| a.condition()).collect();
        assert_eq!(order, Category::PROCESS_ORDER.to_vec());
        assert_eq!(actions[9].name(), Some(ActionName::Remove));
        assert!(!spec.is_empty());
        assert!(ActionSpec::new().is_empty());
    }

    #[test]
    fn test_spec_validate_catches_deserialized_illegal_pairs() {
        let spec = ActionSpec {
            stop_words: Some(ActionName::Tag),
            ..ActionSpec::default()
        };
        assert!(spec.validate().is_err());
    }
}
