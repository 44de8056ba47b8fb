//! Property tests for stencil-ingest: export parsing and de-duplication.

use proptest::prelude::*;
use stencil_ingest::{filter_messages, parse_export, IngestOptions};

fn block_strategy() -> impl Strategy<Value = (u32, u32, String, String)> {
    (
        1u32..=28,
        1u32..=12,
        prop::sample::select(vec!["SAB".to_string(), "sab".to_string(), "STC".to_string()]),
        "[a-z0-9 ]{1,30}[a-z0-9]",
    )
}

fn render(blocks: &[(u32, u32, String, String)]) -> String {
    blocks
        .iter()
        .map(|(day, hour, sender, body)| format!("Feb {day}, 2024 {hour}:00:00 PM\n{sender}\n{body}\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn parse_never_panics(content in "(\\PC|\n){0,400}") {
        let _ = parse_export(&content);
    }

    #[test]
    fn well_formed_blocks_all_parse(blocks in prop::collection::vec(block_strategy(), 1..20)) {
        let loaded = parse_export(&render(&blocks));
        prop_assert!(loaded.is_clean());
        prop_assert_eq!(loaded.records.len(), blocks.len());
        for (i, message) in loaded.records.iter().enumerate() {
            prop_assert_eq!(&message.id, &format!("msg_{:06}", i + 1));
        }
    }

    #[test]
    fn dedupe_leaves_unique_event_ids(blocks in prop::collection::vec(block_strategy(), 1..20)) {
        // Repeat the whole export so every event appears at least twice.
        let content = format!("{}\n{}", render(&blocks), render(&blocks));
        let options = IngestOptions { sender: None, dedupe: true };
        let outcome = filter_messages(parse_export(&content), &options).unwrap();

        let mut ids: Vec<String> = outcome.messages.iter().map(|m| m.event_id()).collect();
        let kept = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), kept);
        prop_assert!(outcome.duplicates >= blocks.len());
        prop_assert_eq!(outcome.duplicates + kept, outcome.parsed);
    }
}
