//! Per-label statistics over a user's scored reviews.

use std::collections::BTreeMap;

use revsent_core::{ScoredReview, SentimentLabel, SentimentStatBucket, SentimentStats};

/// Group `records` by sentiment label and average score and rating per group.
///
/// Only labels present in the input get a bucket. Buckets come out sorted by
/// label name. Empty input yields `total_count = 0` and no buckets.
pub fn aggregate(records: &[ScoredReview]) -> SentimentStats {
    // label → (count, score sum, rating sum)
    let mut accum: BTreeMap<SentimentLabel, (usize, f64, u64)> = BTreeMap::new();

    for record in records {
        let entry = accum.entry(record.sentiment_label()).or_insert((0, 0.0, 0));
        entry.0 += 1;
        entry.1 += record.score();
        entry.2 += u64::from(record.rating());
    }

    SentimentStats {
        total_count: records.len(),
        buckets: finalize_buckets(accum),
    }
}

fn finalize_buckets(
    accum: BTreeMap<SentimentLabel, (usize, f64, u64)>,
) -> Vec<SentimentStatBucket> {
    accum
        .into_iter()
        .map(|(label, (count, score_sum, rating_sum))| SentimentStatBucket {
            label,
            count,
            average_score: score_sum / count as f64,
            average_rating: rating_sum as f64 / count as f64,
        })
        .collect()
}
