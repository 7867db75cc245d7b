//! Reading-time estimation at ~200 words per minute.

const WORDS_PER_MINUTE: usize = 200;

/// Estimated minutes to read `body`, always at least 1. Recomputed on every
/// save; no history is kept.
pub fn estimate_minutes(body: &str) -> i32 {
    let words = body.split_whitespace().count();
    (words / WORDS_PER_MINUTE).max(1) as i32
}
