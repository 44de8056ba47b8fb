//! Property tests for stencil-clustering: partition, coarsening, and
//! monotonicity over random skeleton corpora.

use std::collections::HashMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use stencil_clustering::algorithms::linkage::average_linkage;
use stencil_clustering::algorithms::similarity::CondensedDistances;
use stencil_clustering::{assemble, group_by_skeleton, AssemblyOptions, SimilarityMerger};
use stencil_core::models::{Message, NormalizedMessage};

const VOCAB: [&str; 8] = [
    "purchase of <AMOUNT>",
    "at <NUM>",
    "your otp is <CODE>",
    "card <ACCT>",
    "on <DATE>",
    "balance",
    "transfer to <IBAN>",
    ".",
];

fn messages(picks: &[Vec<usize>]) -> Vec<NormalizedMessage> {
    let at = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    picks
        .iter()
        .enumerate()
        .map(|(i, words)| {
            let skeleton = words.iter().map(|&w| VOCAB[w]).collect::<Vec<_>>().join(" ");
            NormalizedMessage::new(
                Message::new(format!("m{i}"), "SAB", at, skeleton.clone()),
                skeleton.clone(),
                skeleton,
            )
        })
        .collect()
}

fn corpus_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..VOCAB.len(), 1..4), 1..25)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_message_lands_in_exactly_one_cluster(
        picks in corpus_strategy(),
        threshold in 0.0f64..=1.0
    ) {
        let msgs = messages(&picks);
        let n = msgs.len();
        let clusters = SimilarityMerger::default().merge(group_by_skeleton(msgs), threshold);
        let set = assemble(clusters, AssemblyOptions::default());
        let rows = set.membership();
        prop_assert_eq!(rows.len(), n);
        let mut seen: Vec<String> = rows.into_iter().map(|r| r.message_id).collect();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), n);
    }

    #[test]
    fn clusters_never_split_a_skeleton(
        picks in corpus_strategy(),
        threshold in 0.0f64..=1.0
    ) {
        let clusters = SimilarityMerger::default()
            .merge(group_by_skeleton(messages(&picks)), threshold);
        let mut owner: HashMap<String, usize> = HashMap::new();
        for cluster in &clusters {
            for member in &cluster.members {
                let previous = *owner.entry(member.text_skeleton.clone()).or_insert(cluster.id);
                prop_assert_eq!(previous, cluster.id);
            }
        }
    }

    #[test]
    fn cluster_count_is_monotone_in_threshold(
        picks in corpus_strategy(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let groups = group_by_skeleton(messages(&picks));
        let prepared = SimilarityMerger::default().prepare(&groups);
        prop_assert!(prepared.cluster_count(high) <= prepared.cluster_count(low));
    }

    #[test]
    fn higher_threshold_only_coarsens(
        picks in corpus_strategy(),
        a in 0.0f64..=1.0,
        b in 0.0f64..=1.0
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let groups = group_by_skeleton(messages(&picks));
        let prepared = SimilarityMerger::default().prepare(&groups);
        let fine = prepared.labels(low);
        let coarse = prepared.labels(high);
        // Groups together at the low threshold stay together at the high one.
        for i in 0..fine.len() {
            for j in (i + 1)..fine.len() {
                if fine[i] == fine[j] {
                    prop_assert_eq!(coarse[i], coarse[j]);
                }
            }
        }
    }

    #[test]
    fn dendrogram_has_n_minus_one_sorted_merges(
        data in prop::collection::vec(0.0f64..=1.0, 0..=45)
    ) {
        // Largest n with n(n-1)/2 <= len.
        let mut n = 0usize;
        while (n + 1) * n / 2 <= data.len() {
            n += 1;
        }
        let len = n * n.saturating_sub(1) / 2;
        let distances = CondensedDistances::from_vec(n, data[..len].to_vec()).unwrap();
        let dendrogram = average_linkage(&distances);
        prop_assert_eq!(dendrogram.merges().len(), n.saturating_sub(1));
        prop_assert!(dendrogram.merges().windows(2).all(|w| w[0].distance <= w[1].distance));
        if n > 0 {
            prop_assert_eq!(dendrogram.cut(f64::INFINITY).iter().max().copied(), Some(0));
        }
    }
}
