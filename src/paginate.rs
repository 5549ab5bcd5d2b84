// Copyright 2025 Martin Pool

//! Drive cursor-paginated APIs to completion.

use std::future::Future;

use tracing::trace;

use crate::Result;
use crate::cloud::{Cursor, Page};

/// Arguments for fetching one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// The cursor returned by the previous page, or None for the first page.
    pub cursor: Option<Cursor>,
    /// How many more items are wanted, if there is a limit.
    pub remaining: Option<usize>,
}

/// Fetch pages until the cursor runs out, stops advancing, or `limit` items are collected.
///
/// A cursor identical to the one just sent means there is no more data: CloudWatch Logs
/// returns the same forward token indefinitely at the end of a stream.
///
/// Errors from `fetch` end the loop and are returned unchanged.
pub async fn collect_pages<T, F, Fut>(limit: Option<usize>, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    if limit == Some(0) {
        return Ok(items);
    }
    let mut cursor: Option<Cursor> = None;
    let mut pages = 0usize;
    loop {
        let remaining = limit.map(|limit| limit - items.len());
        let page = fetch(PageRequest {
            cursor: cursor.clone(),
            remaining,
        })
        .await?;
        pages += 1;
        trace!(pages, n_items = page.items.len(), next = ?page.cursor, "Fetched page");
        items.extend(page.items);
        if let Some(limit) = limit {
            if items.len() >= limit {
                items.truncate(limit);
                break;
            }
        }
        match page.cursor {
            None => break,
            Some(next) if cursor.as_ref() == Some(&next) => break,
            Some(next) => cursor = Some(next),
        }
    }
    trace!(pages, n_items = items.len(), "Pagination complete");
    Ok(items)
}
