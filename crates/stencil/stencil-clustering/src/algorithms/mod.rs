//! Clustering algorithms: TF-IDF vectorization, cosine distances, average
//! linkage, and word-level key terms.

pub mod keyterms;
pub mod linkage;
pub mod similarity;
pub mod tfidf;
