//! The export loop
//!
//! One loop per target: fetch a page at the current cursor, format every
//! node, write it to both sinks, then follow `endCursor` until the API
//! reports no next page. Page fetches retry transient transport failures;
//! anything else surfaces as a typed error so a stuck target fails loudly
//! instead of hanging.

use crate::config::ExporterConfig;
use crate::error::{Error, Result};
use crate::format::{self, csv_row};
use crate::graphql::{
    extract_page, EventNode, GraphqlClient, Page, ProposalNode, ReplyNode, UserNode, EVENTS_QUERY,
    PROPOSALS_QUERY, REPLIES_QUERY, USERS_QUERY,
};
use crate::output::SinkPair;
use crate::progress::ProgressReporter;
use crate::targets::{ExportTarget, TargetKind};
use crate::types::{FormattedRecord, JsonValue};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info};

/// A node kind that can be paged out of the API and flattened into records
pub trait ExportNode: DeserializeOwned {
    /// The query document fetching one page of this kind
    fn query() -> &'static str;

    /// Path from the response data root to the connection object
    fn page_path() -> &'static [&'static str];

    /// Variables for one page fetch
    fn variables(target: &ExportTarget, count: u32, cursor: Option<&str>) -> JsonValue;

    /// Flatten this node into an output record
    fn format(&self, anonymize: bool) -> FormattedRecord;
}

impl ExportNode for UserNode {
    fn query() -> &'static str {
        USERS_QUERY.as_str()
    }

    fn page_path() -> &'static [&'static str] {
        &["users"]
    }

    fn variables(_target: &ExportTarget, count: u32, cursor: Option<&str>) -> JsonValue {
        json!({ "count": count, "cursor": cursor })
    }

    fn format(&self, anonymize: bool) -> FormattedRecord {
        format::format_user(self, anonymize)
    }
}

impl ExportNode for EventNode {
    fn query() -> &'static str {
        EVENTS_QUERY.as_str()
    }

    fn page_path() -> &'static [&'static str] {
        &["events"]
    }

    fn variables(_target: &ExportTarget, count: u32, cursor: Option<&str>) -> JsonValue {
        json!({ "count": count, "cursor": cursor })
    }

    fn format(&self, anonymize: bool) -> FormattedRecord {
        format::format_event(self, anonymize)
    }
}

impl ExportNode for ProposalNode {
    fn query() -> &'static str {
        PROPOSALS_QUERY.as_str()
    }

    fn page_path() -> &'static [&'static str] {
        &["node", "proposals"]
    }

    fn variables(target: &ExportTarget, count: u32, cursor: Option<&str>) -> JsonValue {
        json!({
            "id": target.source_id,
            "count": count,
            "cursor": cursor,
            "orderBy": { "field": "PUBLISHED_AT", "direction": "ASC" },
        })
    }

    fn format(&self, anonymize: bool) -> FormattedRecord {
        format::format_proposal(self, anonymize)
    }
}

impl ExportNode for ReplyNode {
    fn query() -> &'static str {
        REPLIES_QUERY.as_str()
    }

    fn page_path() -> &'static [&'static str] {
        &["node", "replies"]
    }

    fn variables(target: &ExportTarget, count: u32, cursor: Option<&str>) -> JsonValue {
        json!({ "id": target.source_id, "count": count, "cursor": cursor })
    }

    fn format(&self, anonymize: bool) -> FormattedRecord {
        format::format_reply(self, anonymize)
    }
}

/// Counters for one completed export
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Records written to both sinks
    pub records: u64,
    /// Pages fetched
    pub pages: u32,
    /// Total count reported by the first page
    pub total_count: u64,
    /// Wall-clock duration
    pub duration_ms: u64,
}

/// Export every page of one target into its sink pair
pub async fn export_target<T: ExportNode>(
    client: &GraphqlClient,
    target: &ExportTarget,
    mut sinks: SinkPair,
    progress: &ProgressReporter,
    config: &ExporterConfig,
) -> Result<ExportStats> {
    let start = Instant::now();
    let anonymize = config.anonymize();
    let mut stats = ExportStats::default();
    let mut cursor: Option<String> = None;
    let mut bar = None;

    info!("Starting export: {}", target.key);

    loop {
        let variables = T::variables(target, config.page_size, cursor.as_deref());
        let data = client.execute_with_retry(T::query(), variables).await?;
        let page: Page<T> = extract_page(&data, T::page_path())?;

        let bar = bar.get_or_insert_with(|| {
            stats.total_count = page.total_count;
            progress.add_target(&target.key, page.total_count)
        });
        stats.pages += 1;

        for edge in &page.edges {
            let record = edge.node.format(anonymize);
            let row = csv_row(&record);
            sinks.json.write(&record)?;
            sinks.csv.push(&row)?;
            bar.inc(1);
            stats.records += 1;
        }

        debug!(
            "{}: page {} carried {} nodes",
            target.key,
            stats.pages,
            page.edges.len()
        );

        if !page.page_info.has_next_page {
            break;
        }
        match page.page_info.end_cursor {
            Some(next) => cursor = Some(next),
            None => {
                return Err(Error::missing_data(format!(
                    "{}.pageInfo.endCursor",
                    T::page_path().join(".")
                )))
            }
        }
    }

    if let Some(bar) = bar {
        bar.finish();
    }
    sinks.finish()?;

    stats.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Completed {}: {} records in {} pages",
        target.key, stats.records, stats.pages
    );
    Ok(stats)
}

/// Dispatch a target to the export loop for its node kind
pub async fn run_target(
    client: &GraphqlClient,
    target: &ExportTarget,
    sinks: SinkPair,
    progress: &ProgressReporter,
    config: &ExporterConfig,
) -> Result<ExportStats> {
    match target.kind {
        TargetKind::Users => {
            export_target::<UserNode>(client, target, sinks, progress, config).await
        }
        TargetKind::Events => {
            export_target::<EventNode>(client, target, sinks, progress, config).await
        }
        TargetKind::Proposals => {
            export_target::<ProposalNode>(client, target, sinks, progress, config).await
        }
        TargetKind::Replies => {
            export_target::<ReplyNode>(client, target, sinks, progress, config).await
        }
    }
}
