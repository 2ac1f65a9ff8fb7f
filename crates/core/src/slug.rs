//! Article slug derivation and collision resolution.
//!
//! A slug is derived once, when the article is created. The loop here only
//! pre-checks against known slugs; the `uq_articles_slug` constraint is what
//! actually guarantees uniqueness, and the repository retries on a lost race.

use unicode_normalization::UnicodeNormalization;

/// Maximum length of the base slug before any `-N` suffix is appended.
pub const MAX_BASE_SLUG_LEN: usize = 50;

/// Base used when a title contains nothing slug-worthy (e.g. `"!!!"`).
pub const FALLBACK_SLUG: &str = "article";

/// Derive the base slug for a title.
///
/// The title is NFKD-decomposed first so accented letters keep their ASCII
/// base (`é` becomes `e`). Then ASCII letters are lowercased, digits and `_`
/// kept, whitespace and `-` become separators, and every other character is
/// dropped. Separator runs collapse to a single hyphen and leading/trailing
/// hyphens are trimmed.
pub fn base_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.nfkd() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        }
    }

    // Only ASCII is ever pushed, so byte truncation stays on a char boundary.
    if slug.len() > MAX_BASE_SLUG_LEN {
        slug.truncate(MAX_BASE_SLUG_LEN);
        let trimmed_len = slug.trim_end_matches('-').len();
        slug.truncate(trimmed_len);
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Return `base` if it is free, otherwise the first free `base-N` for N = 1, 2, ...
pub fn next_free_slug(base: &str, mut is_taken: impl FnMut(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }

    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Derive a unique slug for `title`, asking `is_taken` about each candidate.
pub fn allocate_slug(title: &str, is_taken: impl FnMut(&str) -> bool) -> String {
    next_free_slug(&base_slug(title), is_taken)
}

/// Whether `slug` is `base` itself or `base-N` for some positive integer N.
///
/// Used to filter the rows returned by a `LIKE 'base-%'` prefix query, which
/// also matches unrelated slugs such as `base-ball`.
pub fn is_candidate_of(base: &str, slug: &str) -> bool {
    if slug == base {
        return true;
    }
    match slug.strip_prefix(base).and_then(|rest| rest.strip_prefix('-')) {
        Some(n) => !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
