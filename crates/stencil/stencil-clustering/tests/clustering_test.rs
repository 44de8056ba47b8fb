//! Integration tests for stencil-clustering: discovery end to end, partition
//! and coarsening invariants, threshold monotonicity, and the golden corpus.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use stencil_clustering::{
    group_by_skeleton, SimilarityMerger, TemplateDiscovery, ThresholdExplorer,
};
use stencil_core::config::ClusteringConfig;
use stencil_core::errors::{StencilError, StencilErrorCode};
use stencil_core::models::{Message, NormalizedMessage};
use stencil_skeleton::{annotate_all, SkeletonExtractor};
use test_fixtures::load_fixture_value;

fn raw(id: &str, text: &str) -> Message {
    let at = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    Message::new(id, "SAB", at, text)
}

fn normalized(messages: Vec<Message>) -> Vec<NormalizedMessage> {
    annotate_all(messages, SkeletonExtractor::standard().unwrap())
}

fn corpus() -> Vec<NormalizedMessage> {
    normalized(vec![
        raw("m01", "Purchase of SAR 40.00 at 4411 using card ***1234"),
        raw("m02", "Your OTP is 482913"),
        raw("m03", "Purchase of SAR 12.50 at 9001 using card ***9876"),
        raw("m04", "Purchase of SAR 7.00 at 5555 using card ***1111."),
        raw("m05", "Your OTP is 100200"),
        raw("m06", "Transfer of SAR 500.00 to sa03****************12345678 completed"),
        raw("m07", "Your OTP for transfer is 734001. Do not share it"),
        raw("m08", "Balance after purchase: SAR 1,250.50"),
        raw("m09", "Balance after transfer: SAR 90.00"),
        raw("m10", "Welcome to SAB mobile banking"),
    ])
}

fn discover(messages: Vec<NormalizedMessage>, threshold: f64) -> stencil_clustering::Discovery {
    let config = ClusteringConfig {
        threshold: Some(threshold),
        ..Default::default()
    };
    TemplateDiscovery::from_config(&config).discover(messages).unwrap()
}

fn cluster_of(discovery: &stencil_clustering::Discovery) -> HashMap<String, usize> {
    discovery
        .clusters
        .membership()
        .into_iter()
        .map(|row| (row.message_id, row.cluster_id))
        .collect()
}

// ── End to end ─────────────────────────────────────────────────────────────

#[test]
fn five_messages_two_skeletons_merge_at_high_threshold() {
    let messages = normalized(vec![
        raw("msg_000001", "Your OTP is 482913"),
        raw("msg_000002", "Your OTP is 111111."),
        raw("msg_000003", "Your OTP is 222222"),
        raw("msg_000004", "Your OTP is 333333."),
        raw("msg_000005", "Your OTP is 444444"),
    ]);
    let skeletons: HashSet<&str> = messages.iter().map(|m| m.text_skeleton.as_str()).collect();
    assert_eq!(skeletons.len(), 2);

    let discovery = discover(messages, 0.9);
    assert_eq!(discovery.distinct_skeletons, 2);
    assert_eq!(discovery.clusters.len(), 1);

    let cluster = &discovery.clusters.clusters()[0];
    assert_eq!(cluster.count(), 5);
    assert_eq!(cluster.representative().unwrap().id(), "msg_000001");
    // Members are grouped by skeleton in first-seen order.
    let ids: Vec<&str> = cluster.members.iter().map(|m| m.id()).collect();
    assert_eq!(
        ids,
        vec!["msg_000001", "msg_000003", "msg_000005", "msg_000002", "msg_000004"]
    );
}

#[test]
fn zero_threshold_separates_the_two_skeletons() {
    let messages = normalized(vec![
        raw("a", "Your OTP is 482913"),
        raw("b", "Your OTP is 111111."),
        raw("c", "Your OTP is 222222"),
    ]);
    let discovery = discover(messages, 0.0);
    assert_eq!(discovery.clusters.len(), 2);
    let summaries = discovery.clusters.summaries();
    assert_eq!(summaries[0].count, 2);
    assert_eq!(summaries[0].representative_id, "a");
    assert_eq!(summaries[1].representative_id, "b");
}

#[test]
fn single_skeleton_is_one_cluster_at_any_threshold() {
    for threshold in [0.0, 0.3, 1.0] {
        let messages = normalized(vec![
            raw("a", "Your OTP is 482913"),
            raw("b", "Your OTP is 000001"),
        ]);
        let discovery = discover(messages, threshold);
        assert_eq!(discovery.clusters.len(), 1);
        assert_eq!(discovery.clusters.clusters()[0].id, 0);
    }
}

#[test]
fn empty_corpus_is_empty_result() {
    let err = TemplateDiscovery::default().discover(Vec::new()).unwrap_err();
    assert!(matches!(err, StencilError::EmptyResult { .. }));
    assert_eq!(err.error_code(), "EMPTY_RESULT");
}

#[test]
fn min_size_filter_removing_everything_is_empty_result() {
    let config = ClusteringConfig {
        min_cluster_size: Some(5),
        ..Default::default()
    };
    let messages = normalized(vec![raw("a", "hello there")]);
    let err = TemplateDiscovery::from_config(&config)
        .discover(messages)
        .unwrap_err();
    assert!(matches!(err, StencilError::EmptyResult { .. }));
}

// ── Invariants ────────────────────────────────────────────────────────────

#[test]
fn clusters_partition_the_corpus() {
    let messages = corpus();
    let all_ids: HashSet<String> = messages.iter().map(|m| m.id().to_string()).collect();

    for threshold in [0.0, 0.3, 0.6, 0.95] {
        let discovery = discover(messages.clone(), threshold);
        let rows = discovery.clusters.membership();
        assert_eq!(rows.len(), all_ids.len(), "threshold {threshold}");
        let seen: HashSet<String> = rows.into_iter().map(|r| r.message_id).collect();
        assert_eq!(seen, all_ids, "threshold {threshold}");
        assert_eq!(discovery.clusters.retained_messages(), all_ids.len());
    }
}

#[test]
fn clusters_are_unions_of_whole_skeleton_groups() {
    let messages = corpus();
    let skeleton_of: HashMap<String, String> = messages
        .iter()
        .map(|m| (m.id().to_string(), m.text_skeleton.clone()))
        .collect();

    for threshold in [0.3, 0.6, 0.95] {
        let discovery = discover(messages.clone(), threshold);
        let clusters = cluster_of(&discovery);
        let mut cluster_of_skeleton: HashMap<&str, usize> = HashMap::new();
        for (id, cluster) in &clusters {
            let skeleton = skeleton_of[id].as_str();
            let previous = *cluster_of_skeleton.entry(skeleton).or_insert(*cluster);
            assert_eq!(previous, *cluster, "skeleton split across clusters: {skeleton}");
        }
    }
}

#[test]
fn cluster_count_never_increases_with_threshold() {
    let groups = group_by_skeleton(corpus());
    let merger = SimilarityMerger::default();
    let prepared = merger.prepare(&groups);
    let mut previous = usize::MAX;
    for step in 0..=20 {
        let t = step as f64 * 0.05;
        let count = prepared.cluster_count(t);
        assert!(count <= previous, "count rose at threshold {t}");
        previous = count;
    }
    assert_eq!(prepared.cluster_count(0.0), groups.len());
}

#[test]
fn explorer_matches_independent_runs() {
    let groups = group_by_skeleton(corpus());
    let explorer = ThresholdExplorer::new(vec![0.3, 0.5, 0.7, 0.9], (2, 4));
    let exploration = explorer.explore(&groups, &SimilarityMerger::default());
    assert_eq!(exploration.total_messages, 10);
    assert_eq!(exploration.distinct_skeletons, groups.len());

    for row in &exploration.rows {
        let discovery = discover(corpus(), row.threshold);
        assert_eq!(row.cluster_count, discovery.clusters.len());
        let sizes = row.sizes.as_ref().unwrap();
        assert_eq!(sizes.max, discovery.clusters.clusters()[0].count());
        assert!(row.top_sizes.len() <= 5);
    }
}

// ── Golden corpus ─────────────────────────────────────────────────────────

#[test]
fn golden_small_corpus() {
    let fixture = load_fixture_value("golden/clustering/corpus_small.json");
    let messages: Vec<Message> = fixture["input"]["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| raw(m["id"].as_str().unwrap(), m["text_raw"].as_str().unwrap()))
        .collect();
    let messages = normalized(messages);

    let groups = group_by_skeleton(messages.clone());
    let expected_skeletons: Vec<&str> = fixture["expected"]["skeletons_in_order"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s.as_str().unwrap())
        .collect();
    assert_eq!(groups.skeletons(), expected_skeletons);

    let discovery = discover(messages, 0.5);
    let clusters = cluster_of(&discovery);

    for together in fixture["expected"]["same_cluster_at_0_5"].as_array().unwrap() {
        let ids: Vec<&str> = together.as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
        let first = clusters[ids[0]];
        for id in &ids[1..] {
            assert_eq!(clusters[*id], first, "{id} not with {}", ids[0]);
        }
    }
    for apart in fixture["expected"]["separate_at_0_5"].as_array().unwrap() {
        let pair: Vec<&str> = apart.as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
        assert_ne!(clusters[pair[0]], clusters[pair[1]]);
    }
}
