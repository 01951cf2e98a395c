// src/emoji.rs

use std::collections::HashMap;

use emojis::Emoji;
use once_cell::sync::Lazy;

/// `:anxious_face_with_sweat:`-style aliases built from the CLDR names.
static ALIAS_INDEX: Lazy<HashMap<String, &'static Emoji>> = Lazy::new(|| {
    emojis::iter()
        .map(|emoji| (alias_body(emoji.name()), emoji))
        .collect()
});

/// Reduce a CLDR name to word characters joined by `_`, so the alias
/// survives re-tokenization as a single `:\w+:` span.
fn alias_body(name: &str) -> String {
    let mut body = String::with_capacity(name.len());
    for ch in name.chars() {
        // keycap: # and keycap: * would otherwise collide
        let spelled = match ch {
            '#' => "number_sign",
            '*' => "asterisk",
            _ => "",
        };
        if ch.is_alphanumeric() {
            body.push(ch);
        } else if !spelled.is_empty() {
            if !body.is_empty() && !body.ends_with('_') {
                body.push('_');
            }
            body.push_str(spelled);
        } else if !body.is_empty() && !body.ends_with('_') && (ch == ' ' || ch == '-' || ch == ':' || ch == ',') {
            body.push('_');
        }
    }
    while body.ends_with('_') {
        body.pop();
    }
    body
}

fn lookup_unicode(value: &str) -> Option<&'static Emoji> {
    if value.is_empty() {
        return None;
    }
    // Variation selectors are stripped upstream; the tables store the fully-qualified form.
    emojis::get(value).or_else(|| emojis::get(&format!("{}\u{FE0F}", value)))
}

fn lookup_alias(value: &str) -> Option<&'static Emoji> {
    let inner = value.strip_prefix(':')?.strip_suffix(':')?;
    if inner.is_empty() {
        return None;
    }
    ALIAS_INDEX
        .get(inner)
        .copied()
        .or_else(|| emojis::get_by_shortcode(inner))
}

/// The textual alias of a unicode emoji, e.g. `:anxious_face_with_sweat:`.
pub fn alias_of(emoji: &Emoji) -> String {
    format!(":{}:", alias_body(emoji.name()))
}

/// Exactly one known emoji, in unicode or alias form.
pub fn is_emoji(value: &str) -> bool {
    lookup_unicode(value).is_some() || lookup_alias(value).is_some()
}

/// Unicode form to alias form. Anything else is returned unchanged.
pub fn demojize(value: &str) -> String {
    match lookup_unicode(value) {
        Some(emoji) => alias_of(emoji),
        None => value.to_string(),
    }
}

/// Alias form to unicode form. Anything else is returned unchanged.
pub fn emojize(value: &str) -> String {
    match lookup_alias(value) {
        Some(emoji) => emoji.as_str().to_string(),
        None => value.to_string(),
    }
}
