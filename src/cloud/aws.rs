// Copyright 2025 Martin Pool

//! AWS SDK implementation of the cloud traits.

use std::fmt::Debug;

use async_trait::async_trait;
use aws_config::{AppName, BehaviorVersion, Region, meta::region::RegionProviderChain};
use aws_credential_types::Credentials;
use aws_sdk_cloudwatchlogs::{error::SdkError, types::OrderBy};
use aws_sdk_sqs::types::QueueAttributeName;
use tracing::{debug, error, trace};

use super::{
    Cursor, FunctionsApi, LambdaFunction, LogEvent, LogStream, LogsApi, Page, Queue, QueuesApi,
};
use crate::credentials::AwsCredentials;
use crate::{Error, Result};

/// Region used when none is given and the SDK can't find one.
pub static FALLBACK_REGION: &str = "us-east-1";

/// Name of the static credentials provider, visible in SDK debug logs.
static CREDENTIALS_PROVIDER_NAME: &str = "cwlens";

#[derive(Debug)]
pub struct AwsCloud {
    region: String,
    logs_client: aws_sdk_cloudwatchlogs::Client,
    lambda_client: aws_sdk_lambda::Client,
    sqs_client: aws_sdk_sqs::Client,
    sts_client: aws_sdk_sts::Client,
}

impl AwsCloud {
    /// Build clients for a region.
    ///
    /// If `credentials` is None the SDK's default provider chain is used.
    pub async fn connect(
        region: Option<&str>,
        credentials: Option<AwsCredentials>,
    ) -> Result<Self> {
        let region = region.map(|r| Region::new(r.to_owned()));
        let region_provider = RegionProviderChain::first_try(region)
            .or_default_provider()
            .or_else(FALLBACK_REGION);
        let app_name = AppName::new(env!("CARGO_PKG_NAME"))
            .map_err(|err| Error::Config(format!("Invalid app name: {err}")))?;
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .app_name(app_name);
        if let Some(credentials) = credentials {
            debug!(
                access_key_id = %credentials.access_key_id,
                temporary = credentials.session_token.is_some(),
                "Using static credentials"
            );
            loader = loader.credentials_provider(static_credentials(credentials));
        } else {
            debug!("Using the SDK default credentials chain");
        }
        let sdk_config = loader.load().await;
        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .unwrap_or_else(|| FALLBACK_REGION.to_owned());
        debug!(?region, "Connected");
        Ok(AwsCloud {
            region,
            logs_client: aws_sdk_cloudwatchlogs::Client::new(&sdk_config),
            lambda_client: aws_sdk_lambda::Client::new(&sdk_config),
            sqs_client: aws_sdk_sqs::Client::new(&sdk_config),
            sts_client: aws_sdk_sts::Client::new(&sdk_config),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Check the credentials work by asking who we are, and return the account id.
    pub async fn account_id(&self) -> Result<String> {
        match self
            .sts_client
            .get_caller_identity()
            .send()
            .await
            .inspect_err(|err| {
                error!(?err, "GetCallerIdentity failed");
            }) {
            Err(aws_sdk_sts::error::SdkError::DispatchFailure(dispatch)) => {
                error!(
                    ?dispatch,
                    is_io = dispatch.is_io(),
                    is_user = dispatch.is_user(),
                    is_timeout = dispatch.is_timeout(),
                    "DispatchFailure"
                );
                Err(Error::Credentials(format!("{dispatch:?}")))
            }
            Err(err) => Err(err.into()),
            Ok(caller_identity) => {
                let account_id = caller_identity
                    .account()
                    .ok_or_else(|| Error::Credentials("No account in caller identity".into()))?
                    .to_owned();
                debug!(?account_id);
                Ok(account_id)
            }
        }
    }
}

fn static_credentials(credentials: AwsCredentials) -> Credentials {
    Credentials::new(
        credentials.access_key_id,
        credentials.secret_access_key,
        credentials.session_token,
        None,
        CREDENTIALS_PROVIDER_NAME,
    )
}

/// Clamp a page size into the i32 the SDK wants.
fn page_limit(page_size: usize) -> i32 {
    i32::try_from(page_size).unwrap_or(i32::MAX)
}

fn token(cursor: Option<Cursor>) -> Option<String> {
    cursor.map(|c| c.as_str().to_owned())
}

#[async_trait]
impl LogsApi for AwsCloud {
    async fn describe_log_streams(
        &self,
        log_group: &str,
        page_size: usize,
        cursor: Option<Cursor>,
    ) -> Result<Page<LogStream>> {
        trace!(?log_group, ?page_size, ?cursor, "DescribeLogStreams");
        let response = self
            .logs_client
            .describe_log_streams()
            .log_group_identifier(log_group)
            .order_by(OrderBy::LastEventTime)
            .descending(true)
            .limit(page_limit(page_size))
            .set_next_token(token(cursor))
            .send()
            .await?;
        let items = response
            .log_streams()
            .iter()
            .filter_map(log_stream_from_aws)
            .collect();
        Ok(Page::new(items, Cursor::from_token(response.next_token())))
    }

    async fn get_log_events(
        &self,
        log_group: &str,
        log_stream: &str,
        cursor: Option<Cursor>,
    ) -> Result<Page<LogEvent>> {
        trace!(?log_group, ?log_stream, ?cursor, "GetLogEvents");
        let response = self
            .logs_client
            .get_log_events()
            .log_group_identifier(log_group)
            .log_stream_name(log_stream)
            .start_from_head(true)
            .set_next_token(token(cursor))
            .send()
            .await?;
        let items = response.events().iter().map(log_event_from_aws).collect();
        Ok(Page::new(
            items,
            Cursor::from_token(response.next_forward_token()),
        ))
    }
}

#[async_trait]
impl FunctionsApi for AwsCloud {
    async fn list_functions(
        &self,
        page_size: usize,
        marker: Option<Cursor>,
    ) -> Result<Page<LambdaFunction>> {
        trace!(?page_size, ?marker, "ListFunctions");
        let response = self
            .lambda_client
            .list_functions()
            .max_items(page_limit(page_size))
            .set_marker(token(marker))
            .send()
            .await?;
        let items = response
            .functions()
            .iter()
            .filter_map(function_from_aws)
            .collect();
        Ok(Page::new(items, Cursor::from_token(response.next_marker())))
    }

    async fn list_event_source_consumers(
        &self,
        event_source_arn: &str,
        marker: Option<Cursor>,
    ) -> Result<Page<String>> {
        trace!(?event_source_arn, ?marker, "ListEventSourceMappings");
        let response = self
            .lambda_client
            .list_event_source_mappings()
            .event_source_arn(event_source_arn)
            .set_marker(token(marker))
            .send()
            .await?;
        let items = response
            .event_source_mappings()
            .iter()
            .filter_map(|mapping| mapping.function_arn().map(str::to_owned))
            .collect();
        Ok(Page::new(items, Cursor::from_token(response.next_marker())))
    }
}

#[async_trait]
impl QueuesApi for AwsCloud {
    async fn list_queues(&self, page_size: usize, cursor: Option<Cursor>) -> Result<Page<Queue>> {
        trace!(?page_size, ?cursor, "ListQueues");
        let response = self
            .sqs_client
            .list_queues()
            .max_results(page_limit(page_size))
            .set_next_token(token(cursor))
            .send()
            .await?;
        let items = response
            .queue_urls()
            .iter()
            .map(|url| Queue::from_url(url))
            .collect();
        Ok(Page::new(items, Cursor::from_token(response.next_token())))
    }

    async fn queue_arn(&self, queue: &Queue) -> Result<String> {
        trace!(url = queue.url, "GetQueueAttributes");
        let response = self
            .sqs_client
            .get_queue_attributes()
            .queue_url(&queue.url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await?;
        response
            .attributes()
            .and_then(|attributes| attributes.get(&QueueAttributeName::QueueArn))
            .cloned()
            .ok_or_else(|| Error::Cloud(format!("Queue {} has no ARN attribute", queue.url).into()))
    }
}

/// Convert a stream description, skipping entries without a name.
fn log_stream_from_aws(stream: &aws_sdk_cloudwatchlogs::types::LogStream) -> Option<LogStream> {
    let name = stream.log_stream_name()?;
    #[allow(deprecated)] // still reported, and useful as a rough size
    let stored_bytes = stream.stored_bytes();
    Some(LogStream {
        name: name.to_owned(),
        last_event_time: stream.last_event_timestamp().unwrap_or_default(),
        first_event_time: stream.first_event_timestamp().unwrap_or_default(),
        last_ingestion_time: stream.last_ingestion_time().unwrap_or_default(),
        stored_bytes,
    })
}

fn log_event_from_aws(event: &aws_sdk_cloudwatchlogs::types::OutputLogEvent) -> LogEvent {
    LogEvent {
        timestamp: event.timestamp().unwrap_or_default(),
        message: event.message().unwrap_or_default().to_owned(),
        ingestion_time: event.ingestion_time(),
    }
}

fn function_from_aws(
    function: &aws_sdk_lambda::types::FunctionConfiguration,
) -> Option<LambdaFunction> {
    let name = function.function_name()?;
    Some(LambdaFunction {
        name: name.to_owned(),
        runtime: function.runtime().map(|r| r.as_str().to_owned()),
        last_modified: function.last_modified().map(str::to_owned),
        description: function
            .description()
            .filter(|d| !d.is_empty())
            .map(str::to_owned),
        log_group: function
            .logging_config()
            .and_then(|config| config.log_group())
            .filter(|g| !g.is_empty())
            .map(str::to_owned),
    })
}

impl<R: Debug + Send + Sync + 'static, E: std::error::Error + Sync + Send + 'static>
    From<SdkError<E, R>> for Error
{
    fn from(err: SdkError<E, R>) -> Self {
        match err {
            // The service error's Display includes the message from the service, while the
            // outer error often just says "service error".
            SdkError::ServiceError(service_error) => {
                Error::Cloud(Box::new(service_error.into_err()))
            }
            _ => Error::Cloud(Box::new(err)),
        }
    }
}
