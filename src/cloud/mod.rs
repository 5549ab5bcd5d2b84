// Copyright 2025 Martin Pool

//! Cloud abstraction for cwlens.
//!
//! Each trait method performs exactly one remote page request. Looping over pages is done by
//! [`crate::paginate`], so the termination rules live in one place and can be tested against
//! the scripted fakes in [`fake`].

use std::fmt::{Display, Formatter};

use async_trait::async_trait;

use crate::Result;

pub mod aws;
#[cfg(test)]
pub mod fake;

/// Opaque continuation token returned by a paginated API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Cursor(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert an optional token from an API response, treating an empty token as absent.
    pub fn from_token(token: Option<&str>) -> Option<Self> {
        token.filter(|t| !t.is_empty()).map(Cursor::new)
    }
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One page of results and the cursor to continue from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<Cursor>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, cursor: Option<Cursor>) -> Self {
        Page { items, cursor }
    }
}

/// Description of one log stream, as listed from a log group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStream {
    pub name: String,
    /// Epoch millis, 0 if unknown.
    pub last_event_time: i64,
    pub first_event_time: i64,
    pub last_ingestion_time: i64,
    pub stored_bytes: Option<i64>,
}

/// One event read from a single log stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Epoch millis; 0 if the service omitted it.
    pub timestamp: i64,
    pub message: String,
    pub ingestion_time: Option<i64>,
}

/// An event tagged with the stream it came from, produced when merging streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLogEvent {
    pub stream: String,
    pub timestamp: i64,
    pub message: String,
    pub ingestion_time: Option<i64>,
}

impl MergedLogEvent {
    pub fn new(stream: &str, event: LogEvent) -> Self {
        MergedLogEvent {
            stream: stream.to_owned(),
            timestamp: event.timestamp,
            message: event.message,
            ingestion_time: event.ingestion_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaFunction {
    pub name: String,
    pub runtime: Option<String>,
    pub last_modified: Option<String>,
    pub description: Option<String>,
    /// Custom log group from the function's logging config.
    pub log_group: Option<String>,
}

impl LambdaFunction {
    pub fn new(name: impl Into<String>) -> Self {
        LambdaFunction {
            name: name.into(),
            runtime: None,
            last_modified: None,
            description: None,
            log_group: None,
        }
    }

    /// The log group the function writes to.
    pub fn log_group_name(&self) -> String {
        self.log_group
            .clone()
            .unwrap_or_else(|| default_lambda_log_group(&self.name))
    }
}

/// Lambda's conventional log group for a function name.
pub fn default_lambda_log_group(function_name: &str) -> String {
    format!("/aws/lambda/{function_name}")
}

/// Extract the function name from a Lambda function ARN, possibly qualified with a version.
///
/// Plain names are returned unchanged.
pub fn function_name_from_arn(arn: &str) -> &str {
    let parts: Vec<&str> = arn.split(':').collect();
    match parts.iter().position(|p| *p == "function") {
        Some(i) if i + 1 < parts.len() => parts[i + 1],
        _ => arn,
    }
}

/// An SQS queue, identified by its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Queue {
    pub url: String,
    pub name: String,
}

impl Queue {
    pub fn from_url(url: &str) -> Self {
        let name = url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(url)
            .to_owned();
        Queue {
            url: url.to_owned(),
            name,
        }
    }
}

/// CloudWatch Logs reads.
#[async_trait]
pub trait LogsApi: Send + Sync {
    /// Fetch one page of streams ordered by last event time, most recent first.
    async fn describe_log_streams(
        &self,
        log_group: &str,
        page_size: usize,
        cursor: Option<Cursor>,
    ) -> Result<Page<LogStream>>;

    /// Fetch one page of events reading forward from the head of a stream.
    ///
    /// The returned cursor is the next-forward token, which the service repeats
    /// when there is nothing more to read.
    async fn get_log_events(
        &self,
        log_group: &str,
        log_stream: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<LogEvent>>;
}

/// Lambda function reads.
#[async_trait]
pub trait FunctionsApi: Send + Sync {
    async fn list_functions(
        &self,
        page_size: usize,
        marker: Option<Cursor>,
    ) -> Result<Page<LambdaFunction>>;

    /// List the ARNs of functions consuming from an event source.
    async fn list_event_source_consumers(
        &self,
        event_source_arn: &str,
        marker: Option<Cursor>,
    ) -> Result<Page<String>>;
}

/// SQS reads.
#[async_trait]
pub trait QueuesApi: Send + Sync {
    async fn list_queues(&self, page_size: usize, cursor: Option<Cursor>) -> Result<Page<Queue>>;

    async fn queue_arn(&self, queue: &Queue) -> Result<String>;
}
