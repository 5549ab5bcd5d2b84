// Copyright 2025 Martin Pool

//! Scripted in-memory implementations of the cloud traits, for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    Cursor, FunctionsApi, LambdaFunction, LogEvent, LogStream, LogsApi, Page, Queue, QueuesApi,
};
use crate::{Error, Result};

/// A log stream whose last event was at `last_event_time`.
pub fn stream(name: &str, last_event_time: i64) -> LogStream {
    LogStream {
        name: name.to_owned(),
        last_event_time,
        first_event_time: 0,
        last_ingestion_time: last_event_time,
        stored_bytes: None,
    }
}

pub fn event(timestamp: i64, message: &str) -> LogEvent {
    LogEvent {
        timestamp,
        message: message.to_owned(),
        ingestion_time: None,
    }
}

/// Fake CloudWatch Logs holding whole streams in memory.
///
/// Streams are served in pages like DescribeLogStreams; events are served in pages of
/// `event_page_size`, and at the end of a stream the forward token is repeated, as the
/// real service does.
#[derive(Debug, Default)]
pub struct FakeLogs {
    pub streams: Vec<LogStream>,
    pub events: HashMap<String, Vec<LogEvent>>,
    pub event_page_size: usize,
    /// Streams whose event reads fail.
    pub failing_streams: Vec<String>,
    /// Page sizes requested from `describe_log_streams`.
    pub stream_requests: Mutex<Vec<usize>>,
    /// Number of `get_log_events` calls per stream.
    pub event_calls: Mutex<HashMap<String, usize>>,
}

impl FakeLogs {
    pub fn with_streams(n: usize) -> Self {
        FakeLogs {
            streams: (0..n)
                .map(|i| stream(&format!("stream-{i:03}"), 1_000_000 - i as i64))
                .collect(),
            event_page_size: 2,
            ..Default::default()
        }
    }

    pub fn add_stream(&mut self, name: &str, events: Vec<LogEvent>) {
        let last = events.iter().map(|e| e.timestamp).max().unwrap_or(0);
        self.streams.push(stream(name, last));
        self.events.insert(name.to_owned(), events);
        if self.event_page_size == 0 {
            self.event_page_size = 2;
        }
    }

    pub fn stream_page_count(&self) -> usize {
        self.stream_requests.lock().unwrap().len()
    }

    pub fn event_call_count(&self, stream: &str) -> usize {
        self.event_calls
            .lock()
            .unwrap()
            .get(stream)
            .copied()
            .unwrap_or(0)
    }
}

fn offset(cursor: &Option<Cursor>) -> usize {
    cursor
        .as_ref()
        .map(|c| c.as_str().trim_start_matches("f/").parse().unwrap())
        .unwrap_or(0)
}

#[async_trait]
impl LogsApi for FakeLogs {
    async fn describe_log_streams(
        &self,
        _log_group: &str,
        page_size: usize,
        cursor: Option<Cursor>,
    ) -> Result<Page<LogStream>> {
        assert!(page_size > 0 && page_size <= 50, "bad page size {page_size}");
        self.stream_requests.lock().unwrap().push(page_size);
        let start = offset(&cursor);
        let end = (start + page_size).min(self.streams.len());
        let next = (end < self.streams.len()).then(|| Cursor::new(end.to_string()));
        Ok(Page::new(self.streams[start..end].to_vec(), next))
    }

    async fn get_log_events(
        &self,
        _log_group: &str,
        log_stream: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<LogEvent>> {
        *self
            .event_calls
            .lock()
            .unwrap()
            .entry(log_stream.to_owned())
            .or_default() += 1;
        if self.failing_streams.iter().any(|s| s == log_stream) {
            return Err(Error::Cloud(
                format!("ResourceNotFoundException: {log_stream}").into(),
            ));
        }
        let events = self.events.get(log_stream).cloned().unwrap_or_default();
        let start = offset(&cursor);
        let end = (start + self.event_page_size).min(events.len());
        // Always return a forward token; at the end it repeats the one sent.
        Ok(Page::new(
            events[start..end].to_vec(),
            Some(Cursor::new(format!("f/{end}"))),
        ))
    }
}

/// Fake Lambda and SQS.
#[derive(Debug, Default)]
pub struct FakeResources {
    pub functions: Vec<LambdaFunction>,
    pub queues: Vec<Queue>,
    /// Consumer function ARNs by event source ARN.
    pub consumers: HashMap<String, Vec<String>>,
    pub page_size_seen: Mutex<Vec<usize>>,
}

fn page_of<T: Clone>(all: &[T], page_size: usize, cursor: &Option<Cursor>) -> Page<T> {
    let start = offset(cursor);
    let end = (start + page_size).min(all.len());
    let next = (end < all.len()).then(|| Cursor::new(end.to_string()));
    Page::new(all[start..end].to_vec(), next)
}

#[async_trait]
impl FunctionsApi for FakeResources {
    async fn list_functions(
        &self,
        page_size: usize,
        marker: Option<Cursor>,
    ) -> Result<Page<LambdaFunction>> {
        self.page_size_seen.lock().unwrap().push(page_size);
        Ok(page_of(&self.functions, page_size, &marker))
    }

    async fn list_event_source_consumers(
        &self,
        event_source_arn: &str,
        marker: Option<Cursor>,
    ) -> Result<Page<String>> {
        let consumers = self
            .consumers
            .get(event_source_arn)
            .cloned()
            .unwrap_or_default();
        Ok(page_of(&consumers, 1, &marker))
    }
}

#[async_trait]
impl QueuesApi for FakeResources {
    async fn list_queues(&self, page_size: usize, cursor: Option<Cursor>) -> Result<Page<Queue>> {
        self.page_size_seen.lock().unwrap().push(page_size);
        Ok(page_of(&self.queues, page_size, &cursor))
    }

    async fn queue_arn(&self, queue: &Queue) -> Result<String> {
        Ok(format!("arn:aws:sqs:us-east-1:123456789012:{}", queue.name))
    }
}
