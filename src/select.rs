// Copyright 2025 Martin Pool

//! Interactive choice of region, service, function, queue and log stream.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{FuzzySelect, Input, Password};
use jiff::Timestamp;
use jiff::tz::TimeZone;
use tracing::debug;

use crate::cloud::{LambdaFunction, LogStream, Queue};
use crate::display::format_bytes;
use crate::regions::{AWS_REGIONS, Service};
use crate::shorttime;
use crate::{Error, Result};

/// Asks the operator questions.
///
/// Every method returns [`Error::Interrupted`] if the operator cancels.
pub trait Prompt {
    /// Pick one of `items`, returning its index.
    fn select(&self, message: &str, items: &[String]) -> Result<usize>;

    /// Read a non-empty line of text.
    fn input(&self, message: &str) -> Result<String>;

    /// Read a non-empty secret without echoing it.
    fn password(&self, message: &str) -> Result<String>;
}

/// Prompts on the controlling terminal.
#[derive(Default)]
pub struct Terminal {
    theme: ColorfulTheme,
}

impl Prompt for Terminal {
    fn select(&self, message: &str, items: &[String]) -> Result<usize> {
        FuzzySelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()?
            .ok_or(Error::Interrupted)
    }

    fn input(&self, message: &str) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(message)
            .validate_with(|value: &String| -> std::result::Result<(), &'static str> {
                if value.trim().is_empty() {
                    Err("A value is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(value.trim().to_owned())
    }

    fn password(&self, message: &str) -> Result<String> {
        let value = Password::with_theme(&self.theme)
            .with_prompt(message)
            .validate_with(|value: &String| -> std::result::Result<(), &'static str> {
                if value.trim().is_empty() {
                    Err("A value is required")
                } else {
                    Ok(())
                }
            })
            .interact()?;
        Ok(value.trim().to_owned())
    }
}

/// One selectable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<V> {
    /// Exact identifier, as typed on the command line.
    pub key: String,
    /// Text shown in the prompt.
    pub label: String,
    /// Additional text the search matches against.
    pub keywords: Vec<String>,
    pub value: V,
}

impl<V> Choice<V> {
    /// True if `query` is a case-insensitive substring of the label or any keyword.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.label.to_lowercase().contains(&query)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&query))
    }
}

/// Return the choices matching `query`, in their original order.
pub fn filter_choices<'c, V>(choices: &'c [Choice<V>], query: &str) -> Vec<&'c Choice<V>> {
    choices.iter().filter(|c| c.matches(query)).collect()
}

/// Let the operator pick one of `choices`.
///
/// If `preselect` is given it narrows the list first: an exact key wins outright, a single
/// search match is taken without asking, and several matches are offered in the prompt.
pub fn choose<V: Clone>(
    prompt: &dyn Prompt,
    message: &str,
    choices: &[Choice<V>],
    preselect: Option<&str>,
) -> Result<V> {
    let candidates: Vec<&Choice<V>> = match preselect {
        Some(query) => {
            if let Some(exact) = choices.iter().find(|c| c.key == query) {
                debug!(key = ?exact.key, "Preselected exact match");
                return Ok(exact.value.clone());
            }
            let matching = filter_choices(choices, query);
            match matching.len() {
                0 => return Err(Error::NoMatch(query.to_owned())),
                1 => {
                    debug!(key = ?matching[0].key, ?query, "Preselected only match");
                    return Ok(matching[0].value.clone());
                }
                _ => matching,
            }
        }
        None => choices.iter().collect(),
    };
    if candidates.is_empty() {
        return Err(Error::NoMatch(message.to_owned()));
    }
    let labels: Vec<String> = candidates.iter().map(|c| c.label.clone()).collect();
    let index = prompt.select(message, &labels)?;
    candidates
        .get(index)
        .map(|c| c.value.clone())
        .ok_or_else(|| Error::Argument(format!("Selection {index} out of range")))
}

pub fn region_choices() -> Vec<Choice<&'static str>> {
    AWS_REGIONS
        .iter()
        .map(|r| Choice {
            key: r.code.to_owned(),
            label: format!("{} - {}", r.code, r.name),
            keywords: vec![r.code.to_owned(), r.name.to_owned()],
            value: r.code,
        })
        .collect()
}

pub fn service_choices() -> Vec<Choice<Service>> {
    Service::ALL
        .into_iter()
        .map(|s| Choice {
            key: s.key().to_owned(),
            label: format!("{s} - {}", s.description()),
            keywords: vec![s.to_string(), s.description().to_owned(), s.key().to_owned()],
            value: s,
        })
        .collect()
}

pub fn function_choices(functions: &[LambdaFunction]) -> Vec<Choice<LambdaFunction>> {
    functions
        .iter()
        .map(|f| {
            let label = match &f.runtime {
                Some(runtime) => format!("{} ({runtime})", f.name),
                None => f.name.clone(),
            };
            let mut keywords = vec![f.name.clone()];
            keywords.extend(f.runtime.clone());
            keywords.extend(f.description.clone());
            Choice {
                key: f.name.clone(),
                label,
                keywords,
                value: f.clone(),
            }
        })
        .collect()
}

pub fn queue_choices(queues: &[Queue]) -> Vec<Choice<Queue>> {
    queues
        .iter()
        .map(|q| Choice {
            key: q.name.clone(),
            label: q.name.clone(),
            keywords: vec![q.url.clone()],
            value: q.clone(),
        })
        .collect()
}

/// What to read from a log group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamPick {
    One(String),
    /// All listed streams, merged by time.
    Merged,
}

/// Key of the choice that merges all streams.
pub static MERGED_KEY: &str = "all";

pub fn stream_choices(
    streams: &[LogStream],
    now: Timestamp,
    tz: &TimeZone,
) -> Vec<Choice<StreamPick>> {
    let mut choices = Vec::with_capacity(streams.len() + 1);
    if streams.len() > 1 {
        choices.push(Choice {
            key: MERGED_KEY.to_owned(),
            label: format!("All {} streams, merged by time", streams.len()),
            keywords: vec!["merged".to_owned()],
            value: StreamPick::Merged,
        });
    }
    choices.extend(streams.iter().map(|s| {
        let relative = shorttime::relative(s.last_event_time, now, tz);
        let absolute = shorttime::absolute(s.last_event_time, tz);
        Choice {
            key: s.name.clone(),
            label: format!("{relative} | {} | {}", s.name, format_bytes(s.stored_bytes)),
            keywords: vec![s.name.clone(), relative, absolute],
            value: StreamPick::One(s.name.clone()),
        }
    }));
    choices
}
