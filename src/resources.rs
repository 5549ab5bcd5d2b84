// Copyright 2025 Martin Pool

//! List Lambda functions and SQS queues, the sources whose logs we browse.

use tracing::debug;

use crate::Result;
use crate::cloud::{
    FunctionsApi, LambdaFunction, Queue, QueuesApi, default_lambda_log_group,
    function_name_from_arn,
};
use crate::paginate::collect_pages;

/// Page size for ListFunctions and ListQueues.
static PAGE_SIZE: usize = 50;

/// List every Lambda function in the region.
pub async fn list_lambda_functions(api: &dyn FunctionsApi) -> Result<Vec<LambdaFunction>> {
    let functions =
        collect_pages(None, move |request| api.list_functions(PAGE_SIZE, request.cursor)).await?;
    debug!(n_functions = functions.len(), "Listed Lambda functions");
    Ok(functions)
}

/// List every SQS queue in the region.
pub async fn list_queues(api: &dyn QueuesApi) -> Result<Vec<Queue>> {
    let queues =
        collect_pages(None, move |request| api.list_queues(PAGE_SIZE, request.cursor)).await?;
    debug!(n_queues = queues.len(), "Listed SQS queues");
    Ok(queues)
}

/// Find the Lambda functions that consume messages from a queue.
///
/// SQS has no log group of its own, so the logs worth reading for a queue are those of
/// its consumers. The result holds function names, deduplicated, in listing order.
pub async fn queue_consumers(
    queues: &dyn QueuesApi,
    functions: &dyn FunctionsApi,
    queue: &Queue,
) -> Result<Vec<String>> {
    let queue_arn = queues.queue_arn(queue).await?;
    debug!(?queue_arn, "Listing event source mappings");
    let event_source_arn = queue_arn.as_str();
    let arns = collect_pages(None, move |request| {
        functions.list_event_source_consumers(event_source_arn, request.cursor)
    })
    .await?;
    let mut names: Vec<String> = Vec::with_capacity(arns.len());
    for arn in &arns {
        let name = function_name_from_arn(arn);
        if !names.iter().any(|n| n == name) {
            names.push(name.to_owned());
        }
    }
    Ok(names)
}

/// The log group a consuming function writes to: its configured group if the function is
/// listed with one, otherwise the default Lambda group.
pub async fn consumer_log_group(
    functions: &dyn FunctionsApi,
    function_name: &str,
) -> Result<String> {
    let log_group = list_lambda_functions(functions)
        .await?
        .into_iter()
        .find(|function| function.name == function_name)
        .map(|function| function.log_group_name())
        .unwrap_or_else(|| default_lambda_log_group(function_name));
    debug!(?function_name, ?log_group, "Consumer log group");
    Ok(log_group)
}
