// Copyright 2025 Martin Pool

//! Read log streams and events from a log group.

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::Result;
use crate::cloud::{LogEvent, LogStream, LogsApi, MergedLogEvent};
use crate::paginate::collect_pages;

/// Largest page DescribeLogStreams accepts.
pub static MAX_STREAM_PAGE_SIZE: usize = 50;

/// List up to `limit` streams of a log group, most recent event first.
pub async fn list_log_streams(
    api: &dyn LogsApi,
    log_group: &str,
    limit: usize,
) -> Result<Vec<LogStream>> {
    debug!(?log_group, limit, "Listing log streams");
    let streams = collect_pages(Some(limit), move |request| {
        let page_size = request
            .remaining
            .unwrap_or(MAX_STREAM_PAGE_SIZE)
            .min(MAX_STREAM_PAGE_SIZE);
        api.describe_log_streams(log_group, page_size, request.cursor)
    })
    .await?;
    debug!(?log_group, n_streams = streams.len(), "Listed log streams");
    Ok(streams)
}

/// Read every event in a stream, oldest first.
///
/// The whole stream is held in memory.
pub async fn list_log_events(
    api: &dyn LogsApi,
    log_group: &str,
    log_stream: &str,
) -> Result<Vec<LogEvent>> {
    let events = collect_pages(None, move |request| {
        api.get_log_events(log_group, log_stream, request.cursor)
    })
    .await?;
    debug!(?log_group, ?log_stream, n_events = events.len(), "Read log events");
    Ok(events)
}

/// Read several streams concurrently and merge their events by timestamp.
///
/// If any stream fails to read, the whole merge fails. Events with equal timestamps stay in
/// the order of `log_streams`, then in their order within the stream.
pub async fn merge_log_streams(
    api: &dyn LogsApi,
    log_group: &str,
    log_streams: &[String],
) -> Result<Vec<MergedLogEvent>> {
    info!(?log_group, n_streams = log_streams.len(), "Merging log streams");
    let fetches = log_streams.iter().map(|log_stream| async move {
        let events = list_log_events(api, log_group, log_stream).await?;
        Ok::<_, crate::Error>(
            events
                .into_iter()
                .map(|event| MergedLogEvent::new(log_stream, event))
                .collect::<Vec<_>>(),
        )
    });
    let mut merged: Vec<MergedLogEvent> = try_join_all(fetches)
        .await?
        .into_iter()
        .flatten()
        .collect();
    // sort_by_key is stable.
    merged.sort_by_key(|event| event.timestamp);
    Ok(merged)
}
