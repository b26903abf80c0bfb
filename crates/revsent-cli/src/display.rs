//! Terminal rendering for reviews, sentiment statistics, and text analyses.
//!
//! Text mode prints vertical cards and compact tables. JSON mode prints the
//! same payloads wrapped in a `{"message": ..., ...}` envelope.

use revsent_core::{Review, SentimentStats};
use revsent_sentiment::Analysis;
use serde_json::{Map, Value, json};

const MAX_TEXT_WIDTH: usize = 48;

// ── JSON ──

/// Print `{"message": message, key: value, ...}` as pretty JSON.
pub fn print_envelope(message: &str, fields: Vec<(&str, Value)>) -> anyhow::Result<()> {
    let mut map = Map::new();
    map.insert("message".into(), Value::String(message.into()));
    for (key, value) in fields {
        map.insert(key.into(), value);
    }
    println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
    Ok(())
}

pub fn reviews_json(message: &str, reviews: &[Review]) -> anyhow::Result<()> {
    print_envelope(
        message,
        vec![
            ("count", json!(reviews.len())),
            ("reviews", serde_json::to_value(reviews)?),
        ],
    )
}

pub fn stats_json(stats: &SentimentStats) -> anyhow::Result<()> {
    print_envelope(
        "Sentiment statistics retrieved successfully",
        vec![
            ("total_reviews", json!(stats.total_count)),
            ("stats", serde_json::to_value(&stats.buckets)?),
        ],
    )
}

// ── Text ──

/// Print one review as a vertical card.
pub fn print_review_card(review: &Review) {
    println!("=== Review #{} ===", review.id);
    println!("  {:<14} {}", "product", review.product_name);
    println!("  {:<14} {}", "owner", review.user_id);
    println!("  {:<14} {}", "rating", stars(review.rating));
    println!("  {:<14} {} ({:+.2})", "sentiment", review.sentiment, review.score);
    println!("  {:<14} {}", "created", review.created_at);
    if review.updated_at != review.created_at {
        println!("  {:<14} {}", "updated", review.updated_at);
    }
    println!();
    println!("  {}", review.review_text);
}

/// Print reviews as one line each.
pub fn print_review_table(reviews: &[Review]) {
    if reviews.is_empty() {
        println!("No reviews found");
        return;
    }
    println!(
        "{:>6}  {:<20} {:<6} {:<9} {:>6}  {}",
        "id", "product", "rating", "sentiment", "score", "text"
    );
    for r in reviews {
        println!(
            "{:>6}  {:<20} {:<6} {:<9} {:>+6.2}  {}",
            r.id,
            truncate(&r.product_name, 20),
            stars(r.rating),
            r.sentiment.as_str(),
            r.score,
            truncate(&r.review_text, MAX_TEXT_WIDTH)
        );
    }
    println!("{} review(s)", reviews.len());
}

pub fn print_stats(stats: &SentimentStats) {
    println!("Total reviews: {}", stats.total_count);
    if stats.buckets.is_empty() {
        return;
    }
    println!();
    println!(
        "  {:<9} {:>5} {:>10} {:>11}",
        "sentiment", "count", "avg score", "avg rating"
    );
    for b in &stats.buckets {
        println!(
            "  {:<9} {:>5} {:>+10.3} {:>11.2}",
            b.label.as_str(),
            b.count,
            b.average_score,
            b.average_rating
        );
    }
}

pub fn print_analysis(analysis: &Analysis) {
    let sentiment = analysis.sentiment();
    println!("{} ({:+.2})", sentiment.label, sentiment.score);
    println!("  {:<12} {}", "raw score", analysis.raw_score);
    println!("  {:<12} {:.3}", "comparative", analysis.comparative);
    println!("  {:<12} {}", "tokens", analysis.tokens.len());
    if !analysis.positive.is_empty() {
        println!("  {:<12} {}", "positive", analysis.positive.join(", "));
    }
    if !analysis.negative.is_empty() {
        println!("  {:<12} {}", "negative", analysis.negative.join(", "));
    }
}

fn stars(rating: u8) -> String {
    "*".repeat(usize::from(rating))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
