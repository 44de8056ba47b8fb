//! Phone-message export parsing.
//!
//! An export is a sequence of blocks separated by blank lines:
//!
//! ```text
//! Jan 15, 2024  9:05:07 AM (Read by you after 2 minutes)
//! SAB
//! SAR 40.00 was debited on 2024-01-15 10:30:00 from ***1234
//! ```
//!
//! Line 1 carries the timestamp, optionally followed by a parenthesized
//! annotation. Line 2 is the sender. Every remaining line is the body.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use stencil_core::config::IngestConfig;
use stencil_core::errors::{Loaded, StencilError, StencilResult};
use stencil_core::models::Message;
use stencil_core::traits::IMessageSource;
use tracing::{debug, info, warn};

/// Timestamp layout after whitespace runs are collapsed.
pub const TIMESTAMP_FORMAT: &str = "%b %d, %Y %I:%M:%S %p";

/// Parse a timestamp line. Anything from the first ` (` on is ignored.
pub fn parse_timestamp(line: &str) -> Option<NaiveDateTime> {
    let head = line.split_once(" (").map_or(line, |(head, _)| head);
    let collapsed = head.split_whitespace().collect::<Vec<_>>().join(" ");
    NaiveDateTime::parse_from_str(&collapsed, TIMESTAMP_FORMAT).ok()
}

/// Format a message id from its 1-based position among accepted records.
pub fn message_id(seq: usize) -> String {
    format!("msg_{seq:06}")
}

/// Parse an export into messages. Malformed blocks are skipped and recorded
/// against the line the block starts on.
pub fn parse_export(content: &str) -> Loaded<Message> {
    let content = content.replace("\r\n", "\n");
    let mut loaded = Loaded::default();

    for (start_line, block) in blocks(&content) {
        match parse_block(&block) {
            Ok((received_at, sender, body)) => {
                let id = message_id(loaded.records.len() + 1);
                loaded.records.push(Message::new(id, sender, received_at, body));
            }
            Err(reason) => {
                warn!(line = start_line, %reason, "skipping malformed export block");
                loaded.skip(start_line, reason);
            }
        }
    }

    loaded
}

/// Split on blank lines, yielding each block with its 1-based start line.
fn blocks(content: &str) -> Vec<(usize, Vec<&str>)> {
    let mut out = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut start = 0;

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push((start, std::mem::take(&mut current)));
            }
            continue;
        }
        if current.is_empty() {
            start = idx + 1;
        }
        current.push(line);
    }
    if !current.is_empty() {
        out.push((start, current));
    }
    out
}

fn parse_block(lines: &[&str]) -> Result<(NaiveDateTime, String, String), String> {
    if lines.len() < 2 {
        return Err("block has fewer than 2 lines".to_string());
    }
    let timestamp_line = lines[0].trim();
    let received_at = parse_timestamp(timestamp_line)
        .ok_or_else(|| format!("unparseable timestamp '{timestamp_line}'"))?;

    let sender = lines[1].trim();
    if sender.is_empty() {
        return Err("empty sender".to_string());
    }

    let body = lines[2..].join("\n");
    let body = body.trim();
    if body.is_empty() {
        return Err("empty message body".to_string());
    }

    Ok((received_at, sender.to_string(), body.to_string()))
}

/// Sender filter and de-duplication applied after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Keep only this sender, compared case-insensitively. `None` keeps all.
    pub sender: Option<String>,
    /// Drop repeated deliveries sharing an event id.
    pub dedupe: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self::from_config(&IngestConfig::default())
    }
}

impl IngestOptions {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            sender: config.effective_sender().map(str::to_string),
            dedupe: config.effective_dedupe(),
        }
    }
}

/// Messages kept by ingest, with what happened to the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    /// Blocks that parsed into messages.
    pub parsed: usize,
    /// Blocks skipped as malformed.
    pub malformed: usize,
    /// Parsed messages from other senders.
    pub filtered_out: usize,
    /// Repeat deliveries dropped by event id.
    pub duplicates: usize,
    pub messages: Vec<Message>,
}

/// Apply the sender filter and de-duplication to a parse result.
///
/// Zero messages left is an `EmptyResult`.
pub fn filter_messages(loaded: Loaded<Message>, options: &IngestOptions) -> StencilResult<IngestOutcome> {
    let parsed = loaded.records.len();
    let malformed = loaded.skipped_count();

    let mut filtered_out = 0;
    let mut duplicates = 0;
    let mut seen: HashSet<String> = HashSet::new();
    let mut messages = Vec::with_capacity(parsed);

    for message in loaded.records {
        if let Some(sender) = options.sender.as_deref() {
            if !message.sender.eq_ignore_ascii_case(sender) {
                filtered_out += 1;
                continue;
            }
        }
        if options.dedupe && !seen.insert(message.event_id()) {
            debug!(id = %message.id, "duplicate delivery dropped");
            duplicates += 1;
            continue;
        }
        messages.push(message);
    }

    info!(
        parsed,
        malformed,
        filtered_out,
        duplicates,
        kept = messages.len(),
        "ingest filter applied"
    );

    if messages.is_empty() {
        let stage = match options.sender.as_deref() {
            Some(sender) => format!("sender filter '{sender}'"),
            None => "ingest".to_string(),
        };
        return Err(StencilError::empty(stage));
    }

    Ok(IngestOutcome {
        parsed,
        malformed,
        filtered_out,
        duplicates,
        messages,
    })
}

/// A phone-message export file.
#[derive(Debug, Clone)]
pub struct ExportSource {
    path: PathBuf,
}

impl ExportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IMessageSource for ExportSource {
    fn describe(&self) -> String {
        format!("export {}", self.path.display())
    }

    fn load(&self) -> StencilResult<Loaded<Message>> {
        if !self.path.exists() {
            return Err(StencilError::missing_input(&self.path));
        }
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| StencilError::io(&self.path, e))?;
        Ok(parse_export(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn timestamp_single_and_double_space() {
        assert_eq!(
            parse_timestamp("Jan 15, 2024 9:05:07 AM"),
            Some(at(2024, 1, 15, 9, 5, 7))
        );
        assert_eq!(
            parse_timestamp("Jan 15, 2024  9:05:07 PM"),
            Some(at(2024, 1, 15, 21, 5, 7))
        );
    }

    #[test]
    fn timestamp_annotation_is_ignored() {
        assert_eq!(
            parse_timestamp("Mar 02, 2024 12:00:01 AM (Read by you after 5 seconds)"),
            Some(at(2024, 3, 2, 0, 0, 1))
        );
    }

    #[test]
    fn timestamp_narrow_space_before_meridiem() {
        assert_eq!(
            parse_timestamp("Jan 15, 2024 9:05:07\u{202f}AM"),
            Some(at(2024, 1, 15, 9, 5, 7))
        );
    }

    #[test]
    fn timestamp_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn blocks_track_start_lines() {
        let b = blocks("a\nb\n\n\nc\nd\ne\n");
        assert_eq!(b.len(), 2);
        assert_eq!(b[0], (1, vec!["a", "b"]));
        assert_eq!(b[1], (5, vec!["c", "d", "e"]));
    }

    #[test]
    fn multi_line_body_is_joined() {
        let loaded = parse_export("Jan 1, 2024 1:00:00 PM\nSAB\nline one\nline two\n");
        assert!(loaded.is_clean());
        assert_eq!(loaded.records[0].text_raw, "line one\nline two");
        assert_eq!(loaded.records[0].id, "msg_000001");
    }

    #[test]
    fn crlf_exports_parse() {
        let loaded = parse_export("Jan 1, 2024 1:00:00 PM\r\nSAB\r\nhello\r\n\r\nJan 2, 2024 1:00:00 PM\r\nSAB\r\nagain\r\n");
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[1].text_raw, "again");
    }

    #[test]
    fn ids_count_only_accepted_blocks() {
        let loaded = parse_export("bad\n\nJan 1, 2024 1:00:00 PM\nSAB\nhello\n");
        assert_eq!(loaded.skipped_count(), 1);
        assert_eq!(loaded.records[0].id, "msg_000001");
        assert!(matches!(
            loaded.skipped[0],
            StencilError::MalformedRecord { line: 1, .. }
        ));
    }

    #[test]
    fn sender_filter_is_case_insensitive() {
        let loaded = parse_export(
            "Jan 1, 2024 1:00:00 PM\nsab\na\n\nJan 1, 2024 1:00:01 PM\nSTC\nb\n",
        );
        let outcome = filter_messages(loaded, &IngestOptions::default()).unwrap();
        assert_eq!(outcome.messages.len(), 1);
        assert_eq!(outcome.filtered_out, 1);
    }

    #[test]
    fn disabled_filter_keeps_every_sender() {
        let loaded = parse_export(
            "Jan 1, 2024 1:00:00 PM\nsab\na\n\nJan 1, 2024 1:00:01 PM\nSTC\nb\n",
        );
        let options = IngestOptions {
            sender: None,
            dedupe: true,
        };
        assert_eq!(filter_messages(loaded, &options).unwrap().messages.len(), 2);
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let block = "Jan 1, 2024 1:00:00 PM\nSAB\nsame\n";
        let loaded = parse_export(&format!("{block}\n{block}"));
        let outcome = filter_messages(loaded, &IngestOptions::default()).unwrap();
        assert_eq!(outcome.duplicates, 1);
        assert_eq!(outcome.messages[0].id, "msg_000001");

        let loaded = parse_export(&format!("{block}\n{block}"));
        let options = IngestOptions {
            dedupe: false,
            ..IngestOptions::default()
        };
        assert_eq!(filter_messages(loaded, &options).unwrap().messages.len(), 2);
    }

    #[test]
    fn nothing_left_is_empty_result() {
        let loaded = parse_export("Jan 1, 2024 1:00:00 PM\nSTC\nb\n");
        let err = filter_messages(loaded, &IngestOptions::default()).unwrap_err();
        assert!(matches!(err, StencilError::EmptyResult { .. }));
    }

    #[test]
    fn missing_export_is_missing_input() {
        let err = ExportSource::new("/nonexistent/export.txt").load().unwrap_err();
        assert!(matches!(err, StencilError::MissingInput { .. }));
    }
}
