//! Lexical sentiment scoring.
//!
//! The raw score of a text is the sum of the lexicon weights of its tokens.
//! [`normalize`] maps that unbounded integer onto a label and a score in
//! `[-1, 1]`, saturating at [`SATURATION_HITS`].

use revsent_core::{Sentiment, SentimentLabel};
use serde::Serialize;

use crate::lexicon::Lexicon;
use crate::tokenize::tokenize;

/// Calibration divisor: a raw score of ±5 saturates the normalized score to ±1.
pub const SATURATION_HITS: f64 = 5.0;

/// Token-level breakdown of a scored text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Sum of the weights of every matched token.
    pub raw_score: i64,
    /// `raw_score` divided by the token count (0 for no tokens).
    pub comparative: f64,
    pub tokens: Vec<String>,
    /// Matched tokens, in text order.
    pub words: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Analysis {
    pub fn sentiment(&self) -> Sentiment {
        normalize(self.raw_score)
    }
}

/// Scores review text against a fixed [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    lexicon: Lexicon,
}

impl Scorer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        let tokens = tokenize(text);
        let mut raw_score: i64 = 0;
        let mut words = Vec::new();
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for token in &tokens {
            let Some(weight) = self.lexicon.weight(token) else {
                continue;
            };
            raw_score = raw_score.saturating_add(i64::from(weight));
            words.push(token.clone());
            if weight > 0 {
                positive.push(token.clone());
            } else if weight < 0 {
                negative.push(token.clone());
            }
        }

        let comparative = if tokens.is_empty() {
            0.0
        } else {
            raw_score as f64 / tokens.len() as f64
        };

        Analysis {
            raw_score,
            comparative,
            tokens,
            words,
            positive,
            negative,
        }
    }

    /// Label and normalized score for `text`. Never fails; text with no
    /// lexicon hits (including empty text) is Neutral with score 0.
    pub fn classify(&self, text: &str) -> Sentiment {
        self.analyze(text).sentiment()
    }
}

/// Classify `text` against the built-in lexicon.
pub fn classify(text: &str) -> Sentiment {
    Scorer::default().classify(text)
}

/// Map a raw lexical score onto a label and a score in `[-1, 1]`.
pub fn normalize(raw: i64) -> Sentiment {
    let label = SentimentLabel::from_sign(raw as f64);
    let score = match label {
        SentimentLabel::Positive => (raw as f64 / SATURATION_HITS).min(1.0),
        SentimentLabel::Negative => (raw as f64 / SATURATION_HITS).max(-1.0),
        SentimentLabel::Neutral => 0.0,
    };
    Sentiment { label, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "ok",
        "This is a product",
        "This product is great and amazing",
        "This product is terrible and awful",
        "Good, bad, and ugly.",
        "great great great great great great great great",
        "awful awful awful awful awful awful awful",
        "I LOVE IT!!! Best purchase ever, would recommend.",
        "Broken on arrival. Complete waste, a fraud and a scam.",
        "Fine.",
        "\n\t  ",
    ];

    #[test]
    fn scenario_positive() {
        let s = classify("This product is great and amazing");
        assert_eq!(s.label, SentimentLabel::Positive);
        assert!(s.score > 0.0);
    }

    #[test]
    fn scenario_negative() {
        let s = classify("This product is terrible and awful");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert!(s.score < 0.0);
    }

    #[test]
    fn everyday_complaint_is_negative() {
        let text = "This kettle sucks, I lost the lid on day one";
        // sucks -3, lost -3
        assert_eq!(Scorer::default().analyze(text).raw_score, -6);
        let s = classify(text);
        assert_eq!(s.label, SentimentLabel::Negative);
        assert_eq!(s.score, -1.0);
    }

    #[test]
    fn scenario_no_hits_is_neutral() {
        let s = classify("This is a product");
        assert_eq!(s, Sentiment::NEUTRAL);
    }

    #[test]
    fn short_and_empty_text_do_not_fail() {
        assert_eq!(classify(""), Sentiment::NEUTRAL);
        assert_eq!(classify("ok"), Sentiment::NEUTRAL);
        assert_eq!(classify("bad").label, SentimentLabel::Negative);
    }

    #[test]
    fn score_always_in_range() {
        for text in SAMPLES {
            let s = classify(text);
            assert!(
                (-1.0..=1.0).contains(&s.score),
                "{text:?} scored {}",
                s.score
            );
        }
    }

    #[test]
    fn label_follows_raw_sign() {
        let scorer = Scorer::default();
        for text in SAMPLES {
            let analysis = scorer.analyze(text);
            let s = analysis.sentiment();
            assert_eq!(s.label, SentimentLabel::from_sign(analysis.raw_score as f64));
            if analysis.raw_score == 0 {
                assert_eq!(s.score, 0.0);
            }
        }
    }

    #[test]
    fn raw_score_is_sum_of_weights() {
        let a = Scorer::default().analyze("Good, bad, and ugly.");
        // good 3, bad -3, ugly -3
        assert_eq!(a.raw_score, -3);
        assert_eq!(a.words, ["good", "bad", "ugly"]);
        assert_eq!(a.positive, ["good"]);
        assert_eq!(a.negative, ["bad", "ugly"]);
        assert_eq!(a.tokens.len(), 4);
        assert!((a.comparative - (-0.75)).abs() < 1e-12);
    }

    #[test]
    fn divides_by_five() {
        // fine = 2
        assert_eq!(classify("fine").score, 0.4);
        // good = 3
        assert_eq!(classify("good").score, 0.6);
        // sorry = -1
        assert_eq!(classify("sorry").score, -0.2);
    }

    #[test]
    fn saturates_at_five_hits() {
        // superb = 5
        assert_eq!(classify("superb").score, 1.0);
        assert_eq!(classify("This product is great and amazing").score, 1.0);
        // fraud -4, waste -1
        assert_eq!(classify("fraud waste").score, -1.0);
        assert_eq!(classify("awful awful awful awful awful awful awful").score, -1.0);
        assert_eq!(normalize(1_000).score, 1.0);
        assert_eq!(normalize(-1_000).score, -1.0);
    }

    #[test]
    fn more_positive_tokens_never_lower_score() {
        let mut previous = classify("the kettle").score;
        let mut text = String::from("the kettle");
        for _ in 0..8 {
            text.push_str(" good");
            let current = classify(&text).score;
            assert!(current >= previous, "{text:?}: {current} < {previous}");
            previous = current;
        }
    }

    #[test]
    fn classify_is_idempotent() {
        let scorer = Scorer::default();
        for text in SAMPLES {
            assert_eq!(scorer.classify(text), scorer.classify(text));
            assert_eq!(scorer.analyze(text), scorer.analyze(text));
        }
    }

    #[test]
    fn normalize_zero_is_neutral() {
        assert_eq!(normalize(0), Sentiment::NEUTRAL);
    }

    #[test]
    fn empty_text_comparative_is_zero() {
        let a = Scorer::default().analyze("");
        assert_eq!(a.raw_score, 0);
        assert_eq!(a.comparative, 0.0);
        assert!(a.tokens.is_empty());
    }

    #[test]
    fn extras_change_classification() {
        let scorer = Scorer::new(Lexicon::with_extras([("flimsy", -2)]).unwrap());
        let s = scorer.classify("The handle is flimsy");
        assert_eq!(s.label, SentimentLabel::Negative);
        assert_eq!(s.score, -0.4);
        // Built-in scorer does not know the word.
        assert_eq!(classify("The handle is flimsy"), Sentiment::NEUTRAL);
    }

    #[test]
    fn scorer_shared_across_threads() {
        let scorer = std::sync::Arc::new(Scorer::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let scorer = scorer.clone();
                std::thread::spawn(move || scorer.classify("great and amazing"))
            })
            .collect();
        for h in handles {
            let s = h.join().unwrap();
            assert_eq!(s.label, SentimentLabel::Positive);
            assert_eq!(s.score, 1.0);
        }
    }
}
