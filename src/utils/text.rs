//! Word form normalization for NENA transcriptions
//!
//! Transcribed word nodes carry stress and length marks (acute, grave, macron,
//! breve, tilde, diaeresis) and a trailing end-of-word string (space, hyphen,
//! punctuation). Stripping both gives a canonical form for grouping words.
//! Other combining marks, e.g. the dot below in `ṭ`, are kept.

use rustc_hash::FxHashMap;
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Combining accents removed after NFD decomposition
const ACCENTS: [char; 6] = [
    '\u{0300}', // grave
    '\u{0301}', // acute
    '\u{0303}', // tilde
    '\u{0304}', // macron
    '\u{0306}', // breve
    '\u{0308}', // diaeresis
];

/// Corpus lookup for word nodes
pub trait WordFeatures {
    /// Transcribed text of the node, including its end-of-word string
    fn text(&self, node: u32) -> Option<&str>;

    /// End-of-word string appended to the text (space, hyphen, ...)
    fn end(&self, node: u32) -> Option<&str>;
}

/// Strip the end-of-word string and accents from `text`
///
/// Every occurrence of `end` is removed, the rest is decomposed (NFD), the
/// accents above are dropped and the result is recomposed (NFC).
pub fn normalize_text(text: &str, end: &str) -> String {
    let without_end = if end.is_empty() {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.replace(end, ""))
    };

    without_end
        .nfd()
        .filter(|c| !ACCENTS.contains(c))
        .nfc()
        .collect()
}

/// Normalized text of a word node, `None` when the node has no text
///
/// A node without an `end` feature is treated as having an empty one.
pub fn normalize_word<F: WordFeatures + ?Sized>(node: u32, features: &F) -> Option<String> {
    let text = features.text(node)?;
    let end = features.end(node).unwrap_or("");
    Some(normalize_text(text, end))
}

/// In-memory word features keyed by node
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    words: FxHashMap<u32, (String, String)>,
}

impl WordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: u32, text: impl Into<String>, end: impl Into<String>) {
        self.words.insert(node, (text.into(), end.into()));
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordFeatures for WordTable {
    fn text(&self, node: u32) -> Option<&str> {
        self.words.get(&node).map(|(text, _)| text.as_str())
    }

    fn end(&self, node: u32) -> Option<&str> {
        self.words.get(&node).map(|(_, end)| end.as_str())
    }
}
