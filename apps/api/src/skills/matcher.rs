//! Vocabulary matcher: finds which skill terms occur in a piece of text.
//!
//! Every vocabulary entry is matched by exactly one strategy:
//! - phrase terms (`machine learning`, `c++`, `node.js`): normalization would
//!   split or strip them, so they are searched in the raw text, case-insensitive,
//!   with internal whitespace matching any whitespace run and zero-width
//!   boundary anchors. A trailing punctuation character needs no anchor, so
//!   `c++` is found in `C++17`.
//! - token terms (`go`, `python`): the entry survives normalization as a single
//!   token, so it is compared against whole normalized tokens. `go` never
//!   matches inside `good`.
//!
//! Phrases run first and their spans are blanked before tokenizing, so `C#`
//! does not also count as `c`.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::{Regex, RegexSet};

use crate::skills::normalizer::normalize;
use crate::skills::vocabulary::SkillVocabulary;
use crate::skills::SkillHit;

/// Words joined by `&` (`R&D`, `AT&T`) read as one abbreviation.
static AMPERSAND_COMPOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:&\w+)+").expect("valid regex"));

#[derive(Debug)]
struct Phrase {
    term: String,
    pattern: Regex,
}

/// Matches text against an injected, immutable vocabulary.
#[derive(Debug)]
pub struct VocabularyMatcher {
    vocabulary: Arc<SkillVocabulary>,
    tokens: HashSet<String>,
    /// Indexed like the patterns in `phrase_set`.
    phrases: Vec<Phrase>,
    phrase_set: RegexSet,
}

impl VocabularyMatcher {
    pub fn new(vocabulary: Arc<SkillVocabulary>) -> Result<Self, regex::Error> {
        let mut tokens = HashSet::new();
        let mut phrases = Vec::new();
        let mut patterns = Vec::new();

        for term in vocabulary.terms() {
            if is_token_term(term) {
                tokens.insert(term.clone());
            } else {
                let pattern = phrase_pattern(term);
                phrases.push(Phrase {
                    term: term.clone(),
                    pattern: Regex::new(&pattern)?,
                });
                patterns.push(pattern);
            }
        }

        let phrase_set = RegexSet::new(&patterns)?;

        Ok(Self {
            vocabulary,
            tokens,
            phrases,
            phrase_set,
        })
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Returns the vocabulary terms present in `text`. Empty or absent text
    /// yields an empty set.
    pub fn matches(&self, text: Option<&str>) -> SkillHit {
        let mut hit = SkillHit::new();
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return hit;
        };

        let mut remainder = Cow::Borrowed(text);
        for index in self.phrase_set.matches(text).iter() {
            let phrase = &self.phrases[index];
            hit.insert(phrase.term.clone());
            remainder = Cow::Owned(phrase.pattern.replace_all(&remainder, " ").into_owned());
        }

        let remainder = AMPERSAND_COMPOUND.replace_all(&remainder, |caps: &regex::Captures| {
            caps[0].replace('&', "")
        });
        for token in normalize(Some(&remainder)).split_whitespace() {
            if let Some(term) = self.tokens.get(token) {
                hit.insert(term.clone());
            }
        }

        hit
    }
}

/// A term is a token term when normalizing it leaves it unchanged as one token.
fn is_token_term(term: &str) -> bool {
    let normalized = normalize(Some(term));
    let mut parts = normalized.split_whitespace();
    matches!((parts.next(), parts.next()), (Some(only), None) if only == term)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn phrase_pattern(phrase: &str) -> String {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let leading = match phrase.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"\B",
    };
    let trailing = match phrase.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    };
    format!(r"(?i){leading}{body}{trailing}")
}
