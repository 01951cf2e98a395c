// src/segmentation.rs

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use log::{debug, warn};
use once_cell::sync::OnceCell;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};
use crate::language::Language;

/// Inserts word boundaries into a run of unsegmented script.
///
/// Implementations return the words joined by single spaces and must map
/// the empty string to the empty string.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> String;
}

/// Rebuilds natural text from a token sequence, undoing the spacing the
/// tokenizer introduced. Attachment rules are up to the implementation.
pub trait Detokenizer: Send + Sync {
    fn detokenize(&self, tokens: &[&str], lang: &Language) -> String;
}

// ----- JIEBA (Chinese) -----

#[cfg(feature = "jieba")]
pub struct JiebaSegmenter {
    jieba: jieba_rs::Jieba,
}

#[cfg(feature = "jieba")]
impl JiebaSegmenter {
    /// Loads the bundled dictionary, which takes a noticeable moment.
    pub fn new() -> Self {
        JiebaSegmenter {
            jieba: jieba_rs::Jieba::new(),
        }
    }
}

#[cfg(feature = "jieba")]
impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "jieba")]
impl Segmenter for JiebaSegmenter {
    fn segment(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        // exact mode with HMM for unknown words
        self.jieba
            .cut(text, true)
            .into_iter()
            .filter(|word| !word.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ----- DICTIONARY (forward maximum matching) -----

/// Forward maximum matching over a fixed word list. Text no word covers is
/// emitted one grapheme cluster at a time, so combining vowels stay attached.
pub struct DictionarySegmenter {
    matcher: AhoCorasick,
    word_count: usize,
}

impl DictionarySegmenter {
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        let matcher = AhoCorasickBuilder::new()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&words)
            .map_err(|e| Error::InvalidPattern(format!("dictionary: {}", e)))?;
        Ok(DictionarySegmenter {
            matcher,
            word_count: words.len(),
        })
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

impl Segmenter for DictionarySegmenter {
    fn segment(&self, text: &str) -> String {
        let mut words: Vec<&str> = Vec::new();
        let mut last_end = 0;
        for mat in self.matcher.find_iter(text) {
            if mat.start() > last_end {
                words.extend(text[last_end..mat.start()].graphemes(true));
            }
            words.push(&text[mat.start()..mat.end()]);
            last_end = mat.end();
        }
        if last_end < text.len() {
            words.extend(text[last_end..].graphemes(true));
        }
        words.retain(|w| !w.trim().is_empty());
        words.join(" ")
    }
}

impl fmt::Debug for DictionarySegmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionarySegmenter")
            .field("word_count", &self.word_count)
            .finish()
    }
}

// ----- REGISTRY -----

type SegmenterFactory = Box<dyn Fn() -> Arc<dyn Segmenter> + Send + Sync>;

struct Slot {
    instance: OnceCell<Arc<dyn Segmenter>>,
    factory: Option<SegmenterFactory>,
}

impl Slot {
    fn get(&self, lang: &Language) -> Option<&Arc<dyn Segmenter>> {
        if let Some(instance) = self.instance.get() {
            return Some(instance);
        }
        let factory = self.factory.as_ref()?;
        Some(self.instance.get_or_init(|| {
            debug!("constructing segmenter for '{}'", lang);
            factory()
        }))
    }
}

/// Per-language segmenters, each built once on first use and then shared.
pub struct SegmenterRegistry {
    slots: HashMap<Language, Slot>,
}

impl SegmenterRegistry {
    /// A registry with no segmenter at all: every run passes through.
    pub fn empty() -> Self {
        SegmenterRegistry { slots: HashMap::new() }
    }

    /// The built-in segmenters (jieba for Chinese when the feature is on).
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut registry = Self::empty();
        #[cfg(feature = "jieba")]
        registry.register(Language::Chinese, || Arc::new(JiebaSegmenter::new()) as Arc<dyn Segmenter>);
        registry
    }

    /// Register a factory that runs the first time `lang` is segmented.
    pub fn register<F>(&mut self, lang: Language, factory: F)
    where
        F: Fn() -> Arc<dyn Segmenter> + Send + Sync + 'static,
    {
        self.slots.insert(
            lang,
            Slot {
                instance: OnceCell::new(),
                factory: Some(Box::new(factory)),
            },
        );
    }

    /// Register an already built segmenter.
    pub fn with_segmenter(mut self, lang: Language, segmenter: Arc<dyn Segmenter>) -> Self {
        self.slots.insert(
            lang,
            Slot {
                instance: OnceCell::with_value(segmenter),
                factory: None,
            },
        );
        self
    }

    pub fn supports(&self, lang: &Language) -> bool {
        self.slots.contains_key(lang)
    }

    pub fn languages(&self) -> Vec<&Language> {
        self.slots.keys().collect()
    }

    pub fn get(&self, lang: &Language) -> Option<&Arc<dyn Segmenter>> {
        self.slots.get(lang).and_then(|slot| slot.get(lang))
    }

    /// Segment `text` as `lang`. An unsupported language is not an error:
    /// the text comes back unchanged.
    pub fn segment(&self, lang: &Language, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.get(lang) {
            Some(segmenter) => segmenter.segment(text),
            None => {
                let mut supported: Vec<&str> = self.slots.keys().map(|l| l.code()).collect();
                supported.sort_unstable();
                warn!(
                    "language '{}' not supported for segmentation, supported languages: {:?}",
                    lang, supported
                );
                text.to_string()
            }
        }
    }
}

impl Default for SegmenterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SegmenterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmenterRegistry")
            .field("languages", &self.languages())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_dictionary_prefers_longest_word() {
        let seg = DictionarySegmenter::new(["星期", "星期六", "工作", "这个"]).unwrap();
        assert_eq!(seg.segment("我这个星期六工作"), "我 这个 星期六 工作");
        assert_eq!(seg.word_count(), 4);
    }

    #[test]
    fn test_dictionary_keeps_grapheme_clusters() {
        let seg = DictionarySegmenter::new(["ทำงาน"]).unwrap();
        // "นี้" is one base letter plus two combining marks
        assert_eq!(seg.segment("ทำงานนี้"), "ทำงาน นี้");
    }

    #[test]
    fn test_dictionary_empty_input_and_empty_words() {
        let seg = DictionarySegmenter::new(["", "ab"]).unwrap();
        assert_eq!(seg.segment(""), "");
        assert_eq!(seg.word_count(), 1);
        assert_eq!(seg.segment("xaby"), "x ab y");
    }

    #[test]
    fn test_registry_passes_unsupported_languages_through() {
        let registry = SegmenterRegistry::empty();
        assert_eq!(registry.segment(&Language::Thai, "ฉันทำงาน"), "ฉันทำงาน");
        assert_eq!(registry.segment(&Language::Thai, ""), "");
        assert!(!registry.supports(&Language::Thai));
    }

    #[test]
    fn test_registry_constructs_once() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);
        let mut registry = SegmenterRegistry::empty();
        registry.register(Language::Japanese, || {
            BUILT.fetch_add(1, Ordering::SeqCst);
            Arc::new(DictionarySegmenter::new(["土曜日"]).unwrap()) as Arc<dyn Segmenter>
        });
        assert_eq!(BUILT.load(Ordering::SeqCst), 0);
        assert_eq!(registry.segment(&Language::Japanese, "土曜日に"), "土曜日 に");
        assert_eq!(registry.segment(&Language::Japanese, "土曜日"), "土曜日");
        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_with_segmenter() {
        let seg: Arc<dyn Segmenter> = Arc::new(DictionarySegmenter::new(["ab"]).unwrap());
        let registry = SegmenterRegistry::empty().with_segmenter(Language::Thai, seg);
        assert!(registry.supports(&Language::Thai));
        assert_eq!(registry.segment(&Language::Thai, "abab"), "ab ab");
    }

    #[cfg(feature = "jieba")]
    #[test]
    fn test_jieba_segmenter() {
        let seg = JiebaSegmenter::new();
        assert_eq!(seg.segment("我这个星期六工作"), "我 这个 星期六 工作");
        assert_eq!(seg.segment(""), "");
    }
}
