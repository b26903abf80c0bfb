//! Word → weight table used by the scorer.
//!
//! The built-in English table is AFINN-165, shipped as `data/afinn-165.tsv`;
//! each entry carries a non-zero integer weight in `-5..=5`. It is materialized once per process behind a
//! [`LazyLock`] and only ever read. A [`Lexicon`] can layer caller-supplied
//! extras over it; extras win on conflict.

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

use crate::tokenize::tokenize;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("invalid lexicon extras: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty word in lexicon extras")]
    EmptyWord,

    #[error("lexicon extra {0:?} is not a single token and would never match")]
    NotAToken(String),

    #[error("lexicon extra {word:?} has weight {weight}; weights must be non-zero and within -5..=5")]
    WeightOutOfRange { word: String, weight: i32 },
}

/// AFINN-165, one `word<TAB>weight` pair per line, sorted by word.
/// Multi-word phrases are left out since the tokenizer never produces them.
const AFINN_165: &str = include_str!("../data/afinn-165.tsv");

/// Inclusive bound on the magnitude of any lexicon weight.
pub const MAX_WEIGHT: i32 = 5;

static BUILT_IN: LazyLock<HashMap<&'static str, i32>> =
    LazyLock::new(|| parse_table(AFINN_165).collect());

fn parse_table(raw: &str) -> impl Iterator<Item = (&str, i32)> {
    raw.lines().filter_map(|line| {
        let (word, weight) = line.split_once('\t')?;
        Some((word, weight.trim().parse().ok()?))
    })
}

/// Sentiment lexicon: the built-in table plus optional extras.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    extras: HashMap<String, i32>,
}

impl Lexicon {
    /// The built-in table with no extras.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table with `extras` layered on top. Words are lower-cased
    /// to match tokenizer output. Each word must survive tokenization as a
    /// single token and carry a non-zero weight in `-5..=5`.
    pub fn with_extras<I, S>(extras: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (word, weight) in extras {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                return Err(LexiconError::EmptyWord);
            }
            if tokenize(&word) != [word.as_str()] {
                return Err(LexiconError::NotAToken(word));
            }
            if weight == 0 || weight.abs() > MAX_WEIGHT {
                return Err(LexiconError::WeightOutOfRange { word, weight });
            }
            map.insert(word, weight);
        }
        Ok(Self { extras: map })
    }

    /// Parse extras from a JSON object of `{"word": weight}` pairs.
    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let extras: HashMap<String, i32> = serde_json::from_str(json)?;
        Self::with_extras(extras)
    }

    /// Weight of a token, or `None` if the token carries no sentiment.
    pub fn weight(&self, token: &str) -> Option<i32> {
        self.extras
            .get(token)
            .or_else(|| BUILT_IN.get(token))
            .copied()
    }

    /// Number of distinct words known to this lexicon.
    pub fn word_count(&self) -> usize {
        let added = self
            .extras
            .keys()
            .filter(|w| !BUILT_IN.contains_key(w.as_str()))
            .count();
        BUILT_IN.len() + added
    }

    /// Number of caller-supplied extras.
    pub fn extras_len(&self) -> usize {
        self.extras.len()
    }
}
