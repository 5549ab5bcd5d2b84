// Copyright 2025 Martin Pool

//! The interactive browse flow and the one-shot `logs` command.
//!
//! Output for the operator goes to a writer owned by the caller, so the flows can be run
//! against fakes in tests. Diagnostics go through `tracing`.

use std::io::{self, Write};
use std::time::Duration;

use clap::Args;
use console::{Style, style};
use jiff::Timestamp;
use tracing::{debug, info};

use crate::cloud::aws::AwsCloud;
use crate::cloud::{FunctionsApi, LogsApi, QueuesApi, default_lambda_log_group};
use crate::config::Config;
use crate::credentials::CredentialResolver;
use crate::display::{Renderer, separator};
use crate::logs::{list_log_events, list_log_streams, merge_log_streams};
use crate::regions::{Service, find_region};
use crate::resources::{consumer_log_group, list_lambda_functions, list_queues, queue_consumers};
use crate::select::{
    Choice, MERGED_KEY, Prompt, StreamPick, Terminal, choose, function_choices, queue_choices,
    region_choices, service_choices, stream_choices,
};
use crate::{Error, Result};

const BANNER_WIDTH: usize = 40;

/// Options for `cwlens browse`. Each one skips or narrows a prompt.
#[derive(Args, Debug, Clone, Default)]
pub struct BrowseArgs {
    /// AWS region code, like "eu-west-1".
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Service to browse: "lambda" or "sqs".
    #[arg(long, short = 's')]
    pub service: Option<Service>,

    /// Lambda function name, or part of one.
    #[arg(long, short = 'f')]
    pub function: Option<String>,

    /// SQS queue name, or part of one.
    #[arg(long, short = 'q')]
    pub queue: Option<String>,

    /// Log stream name, part of one, or "all" to merge every listed stream.
    #[arg(long)]
    pub stream: Option<String>,
}

/// Options for `cwlens logs`.
#[derive(Args, Debug, Clone)]
pub struct LogsArgs {
    /// Lambda function whose default log group to read.
    #[arg(long, short = 'f')]
    pub function: Option<String>,

    /// Log group to read; takes precedence over --function.
    #[arg(long, short = 'g')]
    pub log_group: Option<String>,

    /// AWS region; otherwise from config, the environment, or us-east-1.
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Number of most recently active streams to read.
    #[arg(long, short = 'l', default_value_t = 10)]
    pub limit: usize,

    /// Merge events from all streams by time instead of grouping by stream.
    #[arg(long, short = 'm')]
    pub merge: bool,

    /// Print one JSON object per event.
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Skip streams with no events within this period, like "2h" or "1 day".
    #[arg(long, short = 's')]
    pub since: Option<String>,
}

/// Resolve the log group for `logs`, from an explicit group or a function name.
pub fn log_group_for(log_group: Option<&str>, function: Option<&str>) -> Result<String> {
    match (log_group, function) {
        (Some(log_group), _) => Ok(log_group.to_owned()),
        (None, Some(function)) => Ok(default_lambda_log_group(function)),
        (None, None) => Err(Error::Argument(
            "Provide --function <name> or --log-group <group>".to_owned(),
        )),
    }
}

fn parse_since(since: Option<&str>) -> Result<Option<Duration>> {
    since
        .map(|since| {
            humantime::parse_duration(since).map_err(|err| {
                Error::Argument(format!("Failed to parse duration {since:?}: {err}"))
            })
        })
        .transpose()
}

fn banner() -> String {
    let border = Style::new().cyan();
    let rule = "═".repeat(BANNER_WIDTH);
    let line = |text: String| {
        format!(
            "{side}{text}{side}\n",
            side = border.apply_to("║"),
        )
    };
    let blank = " ".repeat(BANNER_WIDTH);
    let mut out = format!("\n{}\n", border.apply_to(format!("╔{rule}╗")));
    out += &line(blank.clone());
    out += &line(
        style(format!("{:^width$}", "CloudWatch Lens", width = BANNER_WIDTH))
            .yellow()
            .to_string(),
    );
    out += &line(
        style(format!("{:^width$}", "AWS logs, simplified", width = BANNER_WIDTH))
            .dim()
            .to_string(),
    );
    out += &line(blank);
    out += &format!("{}\n", border.apply_to(format!("╚{rule}╝")));
    out
}

/// Run the interactive browser against AWS.
pub async fn browse(args: &BrowseArgs, config: &Config) -> Result<()> {
    let prompt = Terminal::default();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", banner())?;

    let preselect_region = args.region.as_deref().or(config.region.as_deref());
    let region = choose(
        &prompt,
        "Select AWS region",
        &region_choices(),
        preselect_region,
    )?;
    if let Some(known) = find_region(region) {
        writeln!(stdout, "{}", style(format!("Region: {} ({})", known.code, known.name)).dim())?;
    }

    let resolver = CredentialResolver::new(config.credentials_file.as_deref())?;
    let credentials = match resolver.resolve_or_prompt(&prompt)? {
        Some((credentials, source)) => {
            writeln!(stdout, "{}", style(format!("Using credentials from {source}")).dim())?;
            Some(credentials)
        }
        None => {
            let profile = resolver.profile().unwrap_or_default();
            writeln!(stdout, "{}", style(format!("Using AWS profile {profile}")).dim())?;
            None
        }
    };

    let cloud = AwsCloud::connect(Some(region), credentials).await?;
    let account_id = cloud.account_id().await?;
    writeln!(
        stdout,
        "{}",
        style(format!("Connected to account {account_id} in {}", cloud.region())).dim()
    )?;

    let service = match args.service {
        Some(service) => service,
        None => choose(&prompt, "Select a service", &service_choices(), None)?,
    };
    info!(%service, "Browsing");

    let renderer = Renderer::new(false, config.time_zone()?);
    let mut screen = Screen {
        logs: &cloud,
        functions: &cloud,
        queues: &cloud,
        prompt: &prompt,
        renderer,
        stream_limit: config.stream_limit_or_default(),
        now: Timestamp::now(),
        out: &mut stdout,
    };
    screen.show_service(service, args).await
}

/// Run `cwlens logs`: print recent events from a log group without prompting.
pub async fn logs(args: &LogsArgs, config: &Config) -> Result<()> {
    let log_group = log_group_for(args.log_group.as_deref(), args.function.as_deref())?;
    let since = parse_since(args.since.as_deref())?;
    let region = args.region.as_deref().or(config.region.as_deref());

    // With no static credentials, the SDK's own chain can still find profiles or roles.
    let credentials = CredentialResolver::new(config.credentials_file.as_deref())?
        .resolve()?
        .map(|(credentials, source)| {
            debug!(%source, "Found credentials");
            credentials
        });
    let cloud = AwsCloud::connect(region, credentials).await?;

    eprintln!("Region: {}", cloud.region());
    eprintln!("Log group: {log_group}");
    eprintln!("Fetching {} latest log stream(s)...", args.limit);

    let request = LogsRequest {
        log_group,
        limit: args.limit,
        merge: args.merge,
        since,
    };
    let renderer = Renderer::new(args.json, config.time_zone()?);
    print_recent_logs(
        &cloud,
        &request,
        &renderer,
        Timestamp::now(),
        &mut io::stdout().lock(),
    )
    .await
}

/// What `cwlens logs` reads.
#[derive(Debug, Clone)]
pub struct LogsRequest {
    pub log_group: String,
    pub limit: usize,
    pub merge: bool,
    pub since: Option<Duration>,
}

/// Print events from the most recent streams of a log group, grouped by stream or merged.
pub async fn print_recent_logs(
    api: &dyn LogsApi,
    request: &LogsRequest,
    renderer: &Renderer,
    now: Timestamp,
    out: &mut dyn Write,
) -> Result<()> {
    let mut streams = list_log_streams(api, &request.log_group, request.limit).await?;
    if let Some(since) = request.since {
        let since_ms = i64::try_from(since.as_millis()).unwrap_or(i64::MAX);
        let cutoff = now.as_millisecond().saturating_sub(since_ms);
        streams.retain(|stream| stream.last_event_time >= cutoff);
        debug!(cutoff, n_streams = streams.len(), "Filtered streams by age");
    }
    if streams.is_empty() {
        eprintln!("No log streams found.");
        return Ok(());
    }
    if request.merge {
        let names: Vec<String> = streams.iter().map(|s| s.name.clone()).collect();
        let merged = merge_log_streams(api, &request.log_group, &names).await?;
        renderer.write_merged(out, &merged)?;
    } else {
        for stream in &streams {
            if let Some(header) = renderer.stream_header(stream) {
                writeln!(out, "{header}")?;
            }
            let events = list_log_events(api, &request.log_group, &stream.name).await?;
            renderer.write_events(out, &events)?;
        }
    }
    Ok(())
}

/// Screens after a service is chosen, drawn onto `out`.
pub struct Screen<'a> {
    pub logs: &'a dyn LogsApi,
    pub functions: &'a dyn FunctionsApi,
    pub queues: &'a dyn QueuesApi,
    pub prompt: &'a dyn Prompt,
    pub renderer: Renderer,
    /// Most streams to list in a log group.
    pub stream_limit: usize,
    /// Reference time for relative stream ages.
    pub now: Timestamp,
    pub out: &'a mut dyn Write,
}

impl Screen<'_> {
    fn heading(&mut self, title: &str) -> Result<()> {
        writeln!(self.out, "{}", style(format!("\n=== {title} ===")).cyan())?;
        Ok(())
    }

    fn status(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", style(message).yellow())?;
        Ok(())
    }

    /// Say there is nothing to show. This is not an error.
    fn nothing(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", style(format!("\n{message}")).red())?;
        Ok(())
    }

    pub async fn show_service(&mut self, service: Service, args: &BrowseArgs) -> Result<()> {
        match service {
            Service::Lambda => self.show_lambda(args).await,
            Service::Sqs => self.show_sqs(args).await,
        }
    }

    pub async fn show_lambda(&mut self, args: &BrowseArgs) -> Result<()> {
        self.heading("AWS Lambda")?;
        self.status("Loading Lambda functions...")?;
        let functions = list_lambda_functions(self.functions).await?;
        if functions.is_empty() {
            return self.nothing("No Lambda functions found in this region.");
        }
        writeln!(
            self.out,
            "{}",
            style(format!("\n✓ Found {} function(s)\n", functions.len())).green()
        )?;
        let function = choose(
            self.prompt,
            "Select a Lambda function",
            &function_choices(&functions),
            args.function.as_deref(),
        )?;
        writeln!(
            self.out,
            "{}",
            style(format!("\nSelected function: {}", function.name)).cyan()
        )?;
        self.show_log_group(&function.log_group_name(), args.stream.as_deref())
            .await
    }

    pub async fn show_sqs(&mut self, args: &BrowseArgs) -> Result<()> {
        self.heading("Amazon SQS")?;
        self.status("Loading SQS queues...")?;
        let queues = list_queues(self.queues).await?;
        if queues.is_empty() {
            return self.nothing("No SQS queues found in this region.");
        }
        writeln!(
            self.out,
            "{}",
            style(format!("\n✓ Found {} queue(s)\n", queues.len())).green()
        )?;
        let queue = choose(
            self.prompt,
            "Select an SQS queue",
            &queue_choices(&queues),
            args.queue.as_deref(),
        )?;
        self.status(&format!("Finding consumers of {}...", queue.name))?;
        let consumers = queue_consumers(self.queues, self.functions, &queue).await?;
        let function_name = match consumers.as_slice() {
            [] => {
                return self.nothing(&format!(
                    "No Lambda functions consume from {}; SQS has no logs of its own.",
                    queue.name
                ));
            }
            [only] => only.clone(),
            _ => {
                let choices: Vec<Choice<String>> = consumers
                    .iter()
                    .map(|name| Choice {
                        key: name.clone(),
                        label: name.clone(),
                        keywords: Vec::new(),
                        value: name.clone(),
                    })
                    .collect();
                choose(
                    self.prompt,
                    "Select a consuming function",
                    &choices,
                    args.function.as_deref(),
                )?
            }
        };
        writeln!(
            self.out,
            "{}",
            style(format!("\nConsumer: {function_name}")).cyan()
        )?;
        let log_group = consumer_log_group(self.functions, &function_name).await?;
        self.show_log_group(&log_group, args.stream.as_deref()).await
    }

    /// List streams in a log group, let the operator pick one or all, and print the events.
    pub async fn show_log_group(&mut self, log_group: &str, stream: Option<&str>) -> Result<()> {
        writeln!(self.out, "{}", style(format!("Log group: {log_group}")).dim())?;
        self.status("Loading log streams...")?;
        let streams = list_log_streams(self.logs, log_group, self.stream_limit).await?;
        if streams.is_empty() {
            return self.nothing(&format!("No log streams found in {log_group}."));
        }
        // With one stream there is no merged choice; "all" is just that stream.
        let stream = match (stream, streams.as_slice()) {
            (Some(key), [only]) if key == MERGED_KEY => Some(only.name.as_str()),
            _ => stream,
        };
        let pick = choose(
            self.prompt,
            "Select a log stream",
            &stream_choices(&streams, self.now, &self.renderer.tz),
            stream,
        )?;
        writeln!(self.out, "{}", separator())?;
        match pick {
            StreamPick::One(name) => {
                let events = list_log_events(self.logs, log_group, &name).await?;
                if events.is_empty() {
                    return self.nothing(&format!("No events in stream {name}."));
                }
                self.renderer.write_events(self.out, &events)?;
            }
            StreamPick::Merged => {
                let names: Vec<String> = streams.into_iter().map(|s| s.name).collect();
                let merged = merge_log_streams(self.logs, log_group, &names).await?;
                if merged.is_empty() {
                    return self.nothing("No events in these streams.");
                }
                self.renderer.write_merged(self.out, &merged)?;
            }
        }
        writeln!(self.out, "{}", separator())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use jiff::tz::TimeZone;

    use super::*;
    use crate::cloud::fake::{FakeLogs, FakeResources, event};
    use crate::cloud::{LambdaFunction, Queue};
    use crate::select::scripted::ScriptedPrompt;

    /// 2025-01-16T10:30:45Z
    const NOW: i64 = 1_737_023_445_000;

    fn now() -> Timestamp {
        Timestamp::from_millisecond(NOW).unwrap()
    }

    fn text_renderer() -> Renderer {
        Renderer::new(false, TimeZone::UTC)
    }

    fn screen<'a>(
        logs: &'a FakeLogs,
        resources: &'a FakeResources,
        prompt: &'a ScriptedPrompt,
        out: &'a mut Vec<u8>,
    ) -> Screen<'a> {
        Screen {
            logs,
            functions: resources,
            queues: resources,
            prompt,
            renderer: text_renderer(),
            stream_limit: 50,
            now: now(),
            out,
        }
    }

    fn printed(out: Vec<u8>) -> String {
        console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned()
    }

    fn two_stream_logs() -> FakeLogs {
        let mut logs = FakeLogs::default();
        logs.add_stream("s1", vec![event(NOW - 3000, "first"), event(NOW - 1000, "third")]);
        logs.add_stream("s2", vec![event(NOW - 2000, "second")]);
        logs
    }

    #[test]
    fn log_group_from_function_or_explicit() {
        assert_eq!(
            log_group_for(None, Some("orders")).unwrap(),
            "/aws/lambda/orders"
        );
        assert_eq!(
            log_group_for(Some("/custom/group"), Some("orders")).unwrap(),
            "/custom/group"
        );
        assert_matches!(log_group_for(None, None), Err(Error::Argument(_)));
    }

    #[test]
    fn since_parses_humantime() {
        assert_eq!(parse_since(None).unwrap(), None);
        assert_eq!(
            parse_since(Some("2h")).unwrap(),
            Some(Duration::from_secs(7200))
        );
        assert_matches!(parse_since(Some("yesterday-ish")), Err(Error::Argument(_)));
    }

    #[test]
    fn banner_has_title() {
        let text = console::strip_ansi_codes(&banner()).into_owned();
        assert!(text.contains("CloudWatch Lens"));
        assert!(text.contains("AWS logs, simplified"));
    }

    #[tokio::test]
    async fn grouped_logs_print_header_per_stream() {
        let logs = two_stream_logs();
        let request = LogsRequest {
            log_group: "/aws/lambda/x".to_owned(),
            limit: 10,
            merge: false,
            since: None,
        };
        let mut out = Vec::new();
        print_recent_logs(&logs, &request, &text_renderer(), now(), &mut out)
            .await
            .unwrap();
        let text = console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned();
        let s1 = text.find("==== Stream: s1").unwrap();
        let s2 = text.find("==== Stream: s2").unwrap();
        assert!(s1 < text.find("first").unwrap());
        assert!(text.find("third").unwrap() < s2);
        assert!(s2 < text.find("second").unwrap());
    }

    #[tokio::test]
    async fn merged_json_logs_are_sorted() {
        let logs = two_stream_logs();
        let request = LogsRequest {
            log_group: "/aws/lambda/x".to_owned(),
            limit: 10,
            merge: true,
            since: None,
        };
        let mut out = Vec::new();
        print_recent_logs(
            &logs,
            &request,
            &Renderer::new(true, TimeZone::UTC),
            now(),
            &mut out,
        )
        .await
        .unwrap();
        let lines: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        let messages: Vec<&str> = lines.iter().map(|v| v["message"].as_str().unwrap()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
        assert_eq!(lines[1]["stream"], "s2");
    }

    #[tokio::test]
    async fn since_drops_old_streams() {
        let mut logs = FakeLogs::default();
        logs.add_stream("recent", vec![event(NOW - 60_000, "new")]);
        logs.add_stream("stale", vec![event(NOW - 3 * 3_600_000, "old")]);
        let request = LogsRequest {
            log_group: "g".to_owned(),
            limit: 10,
            merge: false,
            since: Some(Duration::from_secs(3600)),
        };
        let mut out = Vec::new();
        print_recent_logs(&logs, &request, &text_renderer(), now(), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("new"));
        assert!(!text.contains("old"));
        assert_eq!(logs.event_call_count("stale"), 0);
    }

    #[tokio::test]
    async fn no_streams_prints_nothing() {
        let logs = FakeLogs::default();
        let request = LogsRequest {
            log_group: "g".to_owned(),
            limit: 10,
            merge: true,
            since: None,
        };
        let mut out = Vec::new();
        print_recent_logs(&logs, &request, &text_renderer(), now(), &mut out)
            .await
            .unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn lambda_with_no_functions_is_informational() {
        let (logs, resources) = (FakeLogs::default(), FakeResources::default());
        let prompt = ScriptedPrompt::default();
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_lambda(&BrowseArgs::default())
            .await
            .unwrap();
        assert!(printed(out).contains("No Lambda functions found in this region."));
        assert!(prompt.asked.borrow().is_empty());
    }

    #[tokio::test]
    async fn lambda_function_then_single_stream() {
        let mut logs = FakeLogs::default();
        logs.add_stream(
            "2025/01/16/[$LATEST]abc",
            vec![event(NOW - 5000, "hello from lambda")],
        );
        let resources = FakeResources {
            functions: vec![LambdaFunction::new("billing"), LambdaFunction::new("orders")],
            ..Default::default()
        };
        // Pick the second function; there's only one stream so no merged choice.
        let prompt = ScriptedPrompt::answering(&[Some(1), Some(0)]);
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_lambda(&BrowseArgs::default())
            .await
            .unwrap();
        let text = printed(out);
        assert!(text.contains("Found 2 function(s)"));
        assert!(text.contains("Selected function: orders"));
        assert!(text.contains("Log group: /aws/lambda/orders"));
        assert!(text.contains("hello from lambda"));
        let asked = prompt.asked.borrow();
        assert_eq!(asked.len(), 2);
        assert_eq!(asked[1].len(), 1);
    }

    #[tokio::test]
    async fn preselected_function_and_merged_streams() {
        let logs = two_stream_logs();
        let resources = FakeResources {
            functions: vec![LambdaFunction::new("billing"), LambdaFunction::new("orders")],
            ..Default::default()
        };
        let prompt = ScriptedPrompt::default();
        let args = BrowseArgs {
            function: Some("ord".to_owned()),
            stream: Some("all".to_owned()),
            ..Default::default()
        };
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_lambda(&args)
            .await
            .unwrap();
        let text = printed(out);
        assert!(prompt.asked.borrow().is_empty());
        let first = text.find("(s1) first").unwrap();
        let second = text.find("(s2) second").unwrap();
        let third = text.find("(s1) third").unwrap();
        assert!(first < second && second < third, "{text}");
    }

    #[tokio::test]
    async fn all_streams_of_a_single_stream_group() {
        let mut logs = FakeLogs::default();
        logs.add_stream("solo", vec![event(NOW - 1000, "only event")]);
        let resources = FakeResources::default();
        let prompt = ScriptedPrompt::default();
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_log_group("/aws/lambda/f", Some("all"))
            .await
            .unwrap();
        assert!(prompt.asked.borrow().is_empty());
        assert!(printed(out).contains("only event"));
    }

    #[tokio::test]
    async fn empty_stream_is_informational() {
        let mut logs = FakeLogs::default();
        logs.add_stream("quiet", Vec::new());
        let resources = FakeResources::default();
        let prompt = ScriptedPrompt::answering(&[Some(0)]);
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_log_group("/aws/lambda/q", None)
            .await
            .unwrap();
        assert!(printed(out).contains("No events in stream quiet."));
    }

    #[tokio::test]
    async fn empty_log_group_is_informational() {
        let (logs, resources) = (FakeLogs::default(), FakeResources::default());
        let prompt = ScriptedPrompt::default();
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_log_group("/aws/lambda/none", None)
            .await
            .unwrap();
        assert!(printed(out).contains("No log streams found in /aws/lambda/none."));
    }

    #[tokio::test]
    async fn cancelled_stream_prompt_is_interrupt() {
        let (logs, resources) = (two_stream_logs(), FakeResources::default());
        let prompt = ScriptedPrompt::answering(&[None]);
        let mut out = Vec::new();
        let result = screen(&logs, &resources, &prompt, &mut out)
            .show_log_group("g", None)
            .await;
        assert_matches!(result, Err(Error::Interrupted));
    }

    #[tokio::test]
    async fn unmatched_stream_preselection() {
        let (logs, resources) = (two_stream_logs(), FakeResources::default());
        let prompt = ScriptedPrompt::default();
        let mut out = Vec::new();
        let result = screen(&logs, &resources, &prompt, &mut out)
            .show_log_group("g", Some("zzz"))
            .await;
        assert_matches!(result, Err(Error::NoMatch(q)) if q == "zzz");
    }

    #[tokio::test]
    async fn sqs_queue_with_one_consumer_reads_its_logs() {
        let mut logs = FakeLogs::default();
        logs.add_stream("s", vec![event(NOW, "processed message")]);
        let resources = FakeResources {
            queues: vec![Queue::from_url(
                "https://sqs.us-east-1.amazonaws.com/123456789012/jobs",
            )],
            consumers: HashMap::from([(
                "arn:aws:sqs:us-east-1:123456789012:jobs".to_owned(),
                vec!["arn:aws:lambda:us-east-1:123456789012:function:job-worker".to_owned()],
            )]),
            ..Default::default()
        };
        let prompt = ScriptedPrompt::answering(&[Some(0)]);
        let args = BrowseArgs {
            queue: Some("jobs".to_owned()),
            ..Default::default()
        };
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_service(Service::Sqs, &args)
            .await
            .unwrap();
        let text = printed(out);
        assert!(text.contains("Consumer: job-worker"));
        assert!(text.contains("Log group: /aws/lambda/job-worker"));
        assert!(text.contains("processed message"));
    }

    #[tokio::test]
    async fn sqs_consumer_with_custom_log_group() {
        let mut logs = FakeLogs::default();
        logs.add_stream("s", vec![event(NOW, "custom group event")]);
        let mut worker = LambdaFunction::new("job-worker");
        worker.log_group = Some("/custom/job-worker".to_owned());
        let resources = FakeResources {
            functions: vec![worker],
            queues: vec![Queue::from_url(
                "https://sqs.us-east-1.amazonaws.com/123456789012/jobs",
            )],
            consumers: HashMap::from([(
                "arn:aws:sqs:us-east-1:123456789012:jobs".to_owned(),
                vec!["arn:aws:lambda:us-east-1:123456789012:function:job-worker".to_owned()],
            )]),
            ..Default::default()
        };
        let prompt = ScriptedPrompt::answering(&[Some(0)]);
        let args = BrowseArgs {
            queue: Some("jobs".to_owned()),
            ..Default::default()
        };
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_service(Service::Sqs, &args)
            .await
            .unwrap();
        let text = printed(out);
        assert!(text.contains("Log group: /custom/job-worker"), "{text}");
        assert!(text.contains("custom group event"));
    }

    #[tokio::test]
    async fn sqs_queue_without_consumers_is_informational() {
        let logs = FakeLogs::default();
        let resources = FakeResources {
            queues: vec![Queue::from_url("https://sqs.us-east-1.amazonaws.com/1/idle")],
            ..Default::default()
        };
        let prompt = ScriptedPrompt::answering(&[Some(0)]);
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_sqs(&BrowseArgs::default())
            .await
            .unwrap();
        assert!(printed(out).contains("No Lambda functions consume from idle"));
    }

    #[tokio::test]
    async fn sqs_with_no_queues_is_informational() {
        let (logs, resources) = (FakeLogs::default(), FakeResources::default());
        let prompt = ScriptedPrompt::default();
        let mut out = Vec::new();
        screen(&logs, &resources, &prompt, &mut out)
            .show_sqs(&BrowseArgs::default())
            .await
            .unwrap();
        assert!(printed(out).contains("No SQS queues found in this region."));
    }
}
