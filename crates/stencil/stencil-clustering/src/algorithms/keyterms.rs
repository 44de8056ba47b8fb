//! Distinguishing terms of a cluster: word-level TF-IDF over member texts.

use super::tfidf::TfidfVectorizer;

/// Score every word of `documents` by its TF-IDF weight summed across the
/// documents and return the top `limit`, highest first.
///
/// The vocabulary is capped at the `max_features` most frequent words before
/// weighting. Equal scores are ordered alphabetically.
pub fn top_terms(documents: &[&str], limit: usize, max_features: usize) -> Vec<(String, f64)> {
    if documents.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matrix = TfidfVectorizer::words()
        .with_max_features(max_features)
        .fit_transform(documents);
    let sums = matrix.column_sums();

    let mut scored: Vec<(String, f64)> = matrix.features.into_iter().zip(sums).collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.truncate(limit);
    scored
}
