//! Sentiment engine: lexical scoring of review text and aggregation of scored reviews.

mod aggregator;
mod lexicon;
mod scorer;
mod tokenize;

pub use aggregator::aggregate;
pub use lexicon::{Lexicon, LexiconError};
pub use scorer::{Analysis, SATURATION_HITS, Scorer, classify, normalize};
pub use tokenize::tokenize;
