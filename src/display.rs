// Copyright 2025 Martin Pool

//! Render log events and stream descriptions for the terminal.

use std::io::{self, Write};

use console::{Style, style};
use jiff::tz::TimeZone;
use serde::Serialize;

use crate::cloud::{LogEvent, LogStream, MergedLogEvent};
use crate::shorttime;

/// Indent for continuation lines of multi-line messages, so stack traces line up under
/// the message rather than the time.
static CONTINUATION_INDENT: &str = "              ";

/// Severity guessed from the text of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum LogLevel {
    #[display("START")]
    Start,
    #[display("END")]
    End,
    #[display("REPORT")]
    Report,
    #[display("ERROR")]
    Error,
    #[display("WARN")]
    Warn,
    #[display("INFO")]
    Info,
    #[display("DEBUG")]
    Debug,
    #[display("DEFAULT")]
    Default,
}

impl LogLevel {
    /// Classify a message. Lambda's request lifecycle lines are recognized by prefix before
    /// any keyword search.
    pub fn detect(message: &str) -> LogLevel {
        let upper = message.to_uppercase();
        if upper.starts_with("START REQUESTID:") {
            LogLevel::Start
        } else if upper.starts_with("END REQUESTID:") {
            LogLevel::End
        } else if upper.starts_with("REPORT REQUESTID:") {
            LogLevel::Report
        } else if upper.contains("ERROR") || upper.contains("EXCEPTION") {
            LogLevel::Error
        } else if upper.contains("WARN") {
            LogLevel::Warn
        } else if upper.contains("INFO") {
            LogLevel::Info
        } else if upper.contains("DEBUG") {
            LogLevel::Debug
        } else {
            LogLevel::Default
        }
    }

    pub fn style(self) -> Style {
        match self {
            LogLevel::Start | LogLevel::End | LogLevel::Report => Style::new().green(),
            LogLevel::Error => Style::new().red(),
            LogLevel::Warn => Style::new().yellow(),
            LogLevel::Info => Style::new().cyan(),
            LogLevel::Debug => Style::new().dim(),
            LogLevel::Default => Style::new(),
        }
    }
}

/// Indent every line after the first.
pub fn indent_continuation_lines(message: &str) -> String {
    let mut lines = message.split('\n');
    let mut out = lines.next().unwrap_or_default().to_owned();
    for line in lines {
        out.push('\n');
        out.push_str(CONTINUATION_INDENT);
        out.push_str(line);
    }
    out
}

/// Format a byte count like "1.5 KB". MB is the largest unit.
pub fn format_bytes(bytes: Option<i64>) -> String {
    match bytes {
        None | Some(0) => "0 B".to_string(),
        Some(b) if b < 1024 => format!("{b} B"),
        Some(b) if b < 1024 * 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        Some(b) => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
    }
}

/// One event as a JSON line.
#[derive(Debug, Serialize)]
struct JsonEvent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<&'a str>,
    ts: i64,
    t: String,
    message: &'a str,
}

/// Renders events either as colored text or as JSON lines.
#[derive(Debug, Clone)]
pub struct Renderer {
    pub json: bool,
    pub tz: TimeZone,
}

impl Renderer {
    pub fn new(json: bool, tz: TimeZone) -> Self {
        Renderer { json, tz }
    }

    fn line(&self, stream: Option<&str>, timestamp: i64, message: &str) -> String {
        if self.json {
            let json_event = JsonEvent {
                stream,
                ts: timestamp,
                t: shorttime::rfc3339(timestamp),
                message,
            };
            // Serializing a struct of strings and integers can't fail.
            serde_json::to_string(&json_event).unwrap_or_default()
        } else {
            let level = LogLevel::detect(message);
            let body = level.style().apply_to(indent_continuation_lines(message));
            let time = style(format!("[{}]", shorttime::clock(timestamp, &self.tz))).dim();
            match stream {
                Some(stream) => format!("{time} ({stream}) {body}"),
                None => format!("{time} {body}"),
            }
        }
    }

    pub fn event_line(&self, event: &LogEvent) -> String {
        self.line(None, event.timestamp, &event.message)
    }

    pub fn merged_line(&self, event: &MergedLogEvent) -> String {
        self.line(Some(&event.stream), event.timestamp, &event.message)
    }

    /// Heading printed before the events of one stream, or None in JSON mode.
    pub fn stream_header(&self, stream: &LogStream) -> Option<String> {
        (!self.json).then(|| {
            format!(
                "\n==== Stream: {} (lastEvent: {}) ====\n",
                stream.name,
                shorttime::absolute(stream.last_event_time, &self.tz)
            )
        })
    }

    pub fn write_events(&self, out: &mut dyn Write, events: &[LogEvent]) -> io::Result<()> {
        for event in events {
            writeln!(out, "{}", self.event_line(event))?;
        }
        Ok(())
    }

    pub fn write_merged(&self, out: &mut dyn Write, events: &[MergedLogEvent]) -> io::Result<()> {
        for event in events {
            writeln!(out, "{}", self.merged_line(event))?;
        }
        Ok(())
    }
}

/// A dim horizontal rule between sections of output.
pub fn separator() -> String {
    style(format!("\n{}\n", "─".repeat(80))).dim().to_string()
}
