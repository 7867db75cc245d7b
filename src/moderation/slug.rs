//! Date-scoped slug generation.
//!
//! A slug is derived once, when the field is empty at save time, and never
//! recomputed afterward even if the title changes. Uniqueness is scoped to
//! the calendar date of `published_at`; posts without a published date share
//! their own "no date yet" bucket.

use chrono::NaiveDate;

/// Maximum length of the slug column.
pub const SLUG_MAX_LEN: usize = 120;

/// Maximum length of the title-derived portion, before the date suffix.
const BASE_MAX_LEN: usize = 100;

/// Normalize a title into a URL-safe lowercase token sequence.
///
/// Non-alphanumeric runs collapse into single hyphens. An empty result
/// falls back to "post".
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
            if out.len() >= BASE_MAX_LEN {
                break;
            }
        } else {
            pending_hyphen = true;
        }
    }
    if out.is_empty() {
        out.push_str("post");
    }
    out
}

/// Truncate to `max` bytes and strip trailing hyphens. Input is ASCII, so
/// byte truncation is safe.
fn truncate_clean(slug: &str, max: usize) -> String {
    let cut = slug.len().min(max);
    slug[..cut].trim_end_matches('-').to_string()
}

/// Build a unique slug for a title within one date bucket.
///
/// `taken` reports whether a candidate slug is already used in the bucket,
/// excluding the post's own row. Collisions append `-2`, `-3`, ... with the
/// base re-truncated so the result never exceeds [`SLUG_MAX_LEN`].
pub fn unique_slug(title: &str, reference_date: NaiveDate, taken: impl Fn(&str) -> bool) -> String {
    let base = format!("{}-{}", slugify(title), reference_date.format("%Y-%m-%d"));
    let base = truncate_clean(&base, SLUG_MAX_LEN);

    if !taken(&base) {
        return base;
    }

    let mut counter: u32 = 2;
    loop {
        let suffix = format!("-{}", counter);
        let allowed = SLUG_MAX_LEN.saturating_sub(suffix.len()).max(1);
        let mut trimmed = truncate_clean(&base, allowed);
        if trimmed.is_empty() {
            // A base made entirely of hyphens after truncation; keep a stub.
            trimmed = base.get(..1).unwrap_or("post").to_string();
        }
        let candidate = format!("{}{}", trimmed, suffix);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
