//! Multi-pattern search of dictionary words inside a line.

use super::dictionary::Dictionary;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use tracing::instrument;

/// One dictionary word found at a position in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence<'d> {
    word: &'d str,
    start: usize,
    rank: usize,
}

impl<'d> Occurrence<'d> {
    /// Creates an occurrence of `word` (dictionary entry `rank`) at `start`.
    pub fn new(word: &'d str, start: usize, rank: usize) -> Self {
        Self { word, start, rank }
    }

    /// The matched dictionary word.
    pub fn word(&self) -> &'d str {
        self.word
    }

    /// Byte offset of the first letter.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Position of the word in the dictionary.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.word.len()
    }

    /// Always false; dictionary words have at least two letters.
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Line positions covered by the word.
    pub fn covers(&self) -> Range<usize> {
        self.start..self.start + self.len()
    }

    /// Checks whether two occurrences share a line position.
    pub fn overlaps(&self, other: &Occurrence<'_>) -> bool {
        self.start < other.start + other.len() && other.start < self.start + self.len()
    }
}

/// Finds every occurrence of every dictionary word in a line.
///
/// Matching is ASCII case-insensitive and reports repeated and overlapping
/// occurrences. Results are ordered by start offset, then by length.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns all occurrences in `line`.
    fn find<'m>(&'m self, line: &str) -> Vec<Occurrence<'m>>;

    /// The dictionary this matcher searches for.
    fn dictionary(&self) -> &Dictionary;

    /// Returns the matched words in occurrence order.
    fn match_words(&self, line: &str) -> Vec<String> {
        self.find(line)
            .into_iter()
            .map(|o| o.word().to_string())
            .collect()
    }
}

/// Available matcher implementations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MatcherKind {
    /// Prefix trie walked from every start offset.
    #[default]
    Trie,
    /// Hash lookup of every substring up to the longest word.
    Substring,
}

impl MatcherKind {
    /// Builds a matcher of this kind over `dictionary`.
    #[instrument(skip(dictionary), fields(words = dictionary.len()))]
    pub fn build(self, dictionary: Dictionary) -> Box<dyn Matcher> {
        match self {
            MatcherKind::Trie => Box::new(TrieMatcher::new(dictionary)),
            MatcherKind::Substring => Box::new(SubstringMatcher::new(dictionary)),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Trie
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<u8, usize>,
    /// Dictionary index of the word ending here.
    word: Option<usize>,
}

/// Prefix trie over the dictionary.
#[derive(Debug, Clone)]
pub struct TrieMatcher {
    dictionary: Dictionary,
    nodes: Vec<TrieNode>,
}

impl TrieMatcher {
    /// Builds the trie.
    #[instrument(skip(dictionary), fields(words = dictionary.len()))]
    pub fn new(dictionary: Dictionary) -> Self {
        let mut nodes = vec![TrieNode::default()];
        for (index, word) in dictionary.words().iter().enumerate() {
            let mut node = 0;
            for byte in word.bytes() {
                node = match nodes[node].children.get(&byte) {
                    Some(&next) => next,
                    None => {
                        nodes.push(TrieNode::default());
                        let next = nodes.len() - 1;
                        nodes[node].children.insert(byte, next);
                        next
                    }
                };
            }
            nodes[node].word = Some(index);
        }
        Self { dictionary, nodes }
    }
}

impl Matcher for TrieMatcher {
    fn find<'m>(&'m self, line: &str) -> Vec<Occurrence<'m>> {
        let bytes = line.as_bytes();
        let words = self.dictionary.words();
        let mut found = Vec::new();
        for start in 0..bytes.len() {
            let mut node = 0;
            for byte in &bytes[start..] {
                match self.nodes[node].children.get(&byte.to_ascii_uppercase()) {
                    Some(&next) => node = next,
                    None => break,
                }
                if let Some(index) = self.nodes[node].word {
                    found.push(Occurrence::new(&words[index], start, index));
                }
            }
        }
        found
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

// ─────────────────────────────────────────────────────────────
//  Substring index
// ─────────────────────────────────────────────────────────────

/// Hash index tested against every substring of the line.
#[derive(Debug, Clone)]
pub struct SubstringMatcher {
    dictionary: Dictionary,
    index: HashMap<String, usize>,
    longest: usize,
}

impl SubstringMatcher {
    /// Builds the index.
    #[instrument(skip(dictionary), fields(words = dictionary.len()))]
    pub fn new(dictionary: Dictionary) -> Self {
        let index = dictionary
            .words()
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        let longest = dictionary.longest_word();
        Self {
            dictionary,
            index,
            longest,
        }
    }
}

impl Matcher for SubstringMatcher {
    fn find<'m>(&'m self, line: &str) -> Vec<Occurrence<'m>> {
        let upper = line.to_ascii_uppercase();
        let words = self.dictionary.words();
        let mut found = Vec::new();
        for start in 0..upper.len() {
            let last = upper.len().min(start + self.longest);
            for end in (start + 2)..=last {
                let Some(candidate) = upper.get(start..end) else {
                    continue;
                };
                if let Some(&index) = self.index.get(candidate) {
                    found.push(Occurrence::new(&words[index], start, index));
                }
            }
        }
        found
    }

    fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn matchers(words: &[&str]) -> Vec<Box<dyn Matcher>> {
        MatcherKind::iter()
            .map(|kind| kind.build(Dictionary::from_words(words)))
            .collect()
    }

    #[test]
    fn test_repeated_word_found_twice() {
        for matcher in matchers(&["to"]) {
            assert_eq!(matcher.match_words("totoa"), vec!["TO", "TO"], "{matcher:?}");
        }
    }

    #[test]
    fn test_self_overlapping_occurrences_reported() {
        for matcher in matchers(&["tt"]) {
            let starts: Vec<_> = matcher.find("TTTAA").iter().map(|o| o.start()).collect();
            assert_eq!(starts, vec![0, 1]);
        }
    }

    #[test]
    fn test_order_by_start_then_length() {
        for matcher in matchers(&["cargo", "go", "car"]) {
            let found: Vec<_> = matcher
                .find("cargo")
                .iter()
                .map(|o| (o.word(), o.start(), o.rank()))
                .collect();
            assert_eq!(found, vec![("CAR", 0, 2), ("CARGO", 0, 0), ("GO", 3, 1)]);
        }
    }

    #[test]
    fn test_empty_cells_break_words() {
        for matcher in matchers(&["cat"]) {
            assert!(matcher.find("CA.T").is_empty());
            assert_eq!(matcher.find(".CAT").len(), 1);
        }
    }

    #[test]
    fn test_no_matches() {
        for matcher in matchers(&[]) {
            assert!(matcher.find("HELLO").is_empty());
        }
        for matcher in matchers(&["apple", "banana"]) {
            assert!(matcher.find("").is_empty());
            assert!(matcher.find("HELLO").is_empty());
        }
    }

    #[test]
    fn test_matchers_agree() {
        let words = ["to", "tot", "at", "tat", "ott", "a", "toot"];
        let lines = ["TOTOA", "TATTOOT", "AAAAA", "OTTOTAT", "T.T.T"];
        let built = matchers(&words);
        for line in lines {
            let expected = built[0].find(line);
            for matcher in &built[1..] {
                assert_eq!(matcher.find(line), expected, "line {line}");
            }
        }
    }

    #[test]
    fn test_overlaps() {
        let a = Occurrence::new("CAN", 0, 0);
        let b = Occurrence::new("NGO", 2, 1);
        let c = Occurrence::new("GO", 3, 2);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert_eq!(b.covers(), 2..5);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("substring".parse::<MatcherKind>().unwrap(), MatcherKind::Substring);
        assert_eq!(MatcherKind::default().to_string(), "trie");
    }
}
