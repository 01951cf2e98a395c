// src/stop_words.rs

use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::error::{Error, Result};
use crate::language::Language;

// English stop words from the Glasgow Information Retrieval Group list.
static ENGLISH_STOP_WORDS_LIST: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
    "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
    "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
    "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
    "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
    "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
    "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
    "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
    "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
    "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
    "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
    "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its",
    "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many",
    "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most",
    "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
    "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
    "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
    "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
    "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
    "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

lazy_static! {
    /// Lowercase English stop words.
    pub static ref ENGLISH_STOP_WORDS: HashSet<&'static str> =
        ENGLISH_STOP_WORDS_LIST.iter().copied().collect();
}

/// The stop list for `lang`. Only English ships built in.
pub fn stop_words_for(lang: &Language) -> Result<&'static HashSet<&'static str>> {
    match lang {
        Language::English => Ok(&ENGLISH_STOP_WORDS),
        other => Err(Error::UnsupportedStopWords(other.code().to_string())),
    }
}

/// Case-insensitive membership test.
pub fn is_stop_word(word: &str, lang: &Language) -> Result<bool> {
    let stop_words = stop_words_for(lang)?;
    Ok(stop_words.contains(word.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list_size() {
        assert_eq!(ENGLISH_STOP_WORDS.len(), 318);
    }

    #[test]
    fn test_lookup_ignores_case() {
        assert!(is_stop_word("the", &Language::English).unwrap());
        assert!(is_stop_word("The", &Language::English).unwrap());
        assert!(!is_stop_word("season", &Language::English).unwrap());
    }

    #[test]
    fn test_unsupported_language_fails() {
        let err = stop_words_for(&Language::French).unwrap_err();
        assert!(matches!(err, Error::UnsupportedStopWords(ref code) if code == "fr"));
        assert_eq!(err.to_string(), "unknown stop list: fr");
    }
}
