//! Sparse TF-IDF vectorization over character n-grams or word tokens.
//!
//! Weighting follows the classical vectorizer: raw term counts, smoothed idf
//! `ln((1 + N) / (1 + df)) + 1`, and L2-normalized rows. A document with no
//! terms becomes the zero vector.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static WHITE_SPACES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s\s+").ok());

static WORD_TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\b\w+\b").ok());

/// How documents are split into terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analyzer {
    /// Overlapping character n-grams, `min_n..=max_n`, over code points.
    Char { min_n: usize, max_n: usize },
    /// Word tokens (`\b\w+\b`).
    Word,
}

/// A sparse row: parallel index/value arrays sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Build from unsorted `(index, value)` pairs. Indices must be unique.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_by_key(|&(i, _)| i);
        let (indices, values) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Sparse dot product by merging the two sorted index lists.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for v in &mut self.values {
                *v /= norm;
            }
        }
    }
}

/// Output of [`TfidfVectorizer::fit_transform`].
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    /// One row per input document, same order.
    pub rows: Vec<SparseVector>,
    /// Feature names; a row index refers into this list.
    pub features: Vec<String>,
}

impl TfidfMatrix {
    /// Sum each feature's weight over every row.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.features.len()];
        for row in &self.rows {
            for (i, v) in row.iter() {
                sums[i] += v;
            }
        }
        sums
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    analyzer: Analyzer,
    max_features: Option<usize>,
}

impl TfidfVectorizer {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            max_features: None,
        }
    }

    pub fn char_ngrams(min_n: usize, max_n: usize) -> Self {
        Self::new(Analyzer::Char { min_n, max_n })
    }

    pub fn words() -> Self {
        Self::new(Analyzer::Word)
    }

    /// Keep only the `limit` most frequent terms across the corpus; ties go
    /// to the alphabetically smaller term.
    pub fn with_max_features(mut self, limit: usize) -> Self {
        self.max_features = Some(limit);
        self
    }

    /// Split one document into terms.
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        let lowered = doc.to_lowercase();
        match self.analyzer {
            Analyzer::Char { min_n, max_n } => match WHITE_SPACES.as_ref() {
                Some(re) => char_ngrams(&re.replace_all(&lowered, " "), min_n, max_n),
                None => char_ngrams(&lowered, min_n, max_n),
            },
            Analyzer::Word => WORD_TOKEN
                .as_ref()
                .map(|re| {
                    re.find_iter(&lowered)
                        .map(|m| m.as_str().to_string())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Learn the vocabulary and idf from `docs` and return their weighted rows.
    pub fn fit_transform(&self, docs: &[&str]) -> TfidfMatrix {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut features: Vec<String> = Vec::new();
        let mut totals: Vec<usize> = Vec::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        let counts: Vec<HashMap<usize, usize>> = docs
            .iter()
            .map(|doc| {
                let mut counts: HashMap<usize, usize> = HashMap::new();
                for term in self.analyze(doc) {
                    let idx = match vocabulary.get(&term) {
                        Some(&idx) => idx,
                        None => {
                            let idx = features.len();
                            vocabulary.insert(term.clone(), idx);
                            features.push(term);
                            totals.push(0);
                            doc_freq.push(0);
                            idx
                        }
                    };
                    *counts.entry(idx).or_insert(0) += 1;
                    totals[idx] += 1;
                }
                for &idx in counts.keys() {
                    doc_freq[idx] += 1;
                }
                counts
            })
            .collect();

        // Old index -> kept index.
        let remap: Vec<Option<usize>> = match self.max_features {
            Some(limit) if features.len() > limit => {
                let mut order: Vec<usize> = (0..features.len()).collect();
                order.sort_by(|&a, &b| {
                    totals[b]
                        .cmp(&totals[a])
                        .then_with(|| features[a].cmp(&features[b]))
                });
                let mut remap = vec![None; features.len()];
                for (new_idx, &old_idx) in order.iter().take(limit).enumerate() {
                    remap[old_idx] = Some(new_idx);
                }
                remap
            }
            _ => (0..features.len()).map(Some).collect(),
        };

        let kept = remap.iter().flatten().count();
        let mut kept_features = vec![String::new(); kept];
        let mut kept_df = vec![0usize; kept];
        for (old_idx, new_idx) in remap.iter().enumerate() {
            if let Some(new_idx) = *new_idx {
                kept_features[new_idx] = std::mem::take(&mut features[old_idx]);
                kept_df[new_idx] = doc_freq[old_idx];
            }
        }

        let n = docs.len() as f64;
        let idf: Vec<f64> = kept_df
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .into_iter()
            .map(|doc_counts| {
                let pairs = doc_counts
                    .into_iter()
                    .filter_map(|(old_idx, tf)| {
                        remap[old_idx].map(|new_idx| (new_idx, tf as f64 * idf[new_idx]))
                    })
                    .collect();
                let mut row = SparseVector::from_pairs(pairs);
                row.l2_normalize();
                row
            })
            .collect();

        TfidfMatrix {
            rows,
            features: kept_features,
        }
    }
}

/// Overlapping n-grams of `text` for every `n` in `min_n..=max_n`, in
/// order of `n` then position. Texts shorter than `n` contribute none.
fn char_ngrams(text: &str, min_n: usize, max_n: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut grams = Vec::new();
    for n in min_n.max(1)..=max_n.min(chars.len()) {
        for window in chars.windows(n) {
            grams.push(window.iter().collect());
        }
    }
    grams
}
