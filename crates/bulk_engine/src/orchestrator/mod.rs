//! Entry points for bulk invocations.
//!
//! Each entry point validates and optionally preprocesses the input, then
//! dispatches to the ungrouped or grouped path depending on how the
//! operation was supplied. The returned response (or the one attached to a
//! `BulkError`) always reflects everything that completed before a failure.

mod grouped;
mod ungrouped;

use std::hash::Hash;

use crate::error::BulkError;
use crate::operation::{
    BulkOptions, CountedOperation, ItemizedOperation, PreprocessFn, StatusOperation,
};
use crate::response::{BulkResponse, CountedResponse, ItemizedResponse};

async fn run_preprocess<I, R>(
    items: Vec<I>,
    preprocess: Option<PreprocessFn<I>>,
) -> Result<Vec<I>, BulkError<R>> {
    match preprocess {
        None => Ok(items),
        Some(step) => {
            log::debug!("preprocessing {} items", items.len());
            step(items).await.map_err(BulkError::new)
        }
    }
}

/// Run an operation that reports a single status for the whole batch (or
/// one per group).
pub async fn status<I>(
    items: Vec<I>,
    operation: StatusOperation<I>,
    options: BulkOptions<I>,
) -> Result<BulkResponse, BulkError<BulkResponse>>
where
    I: Clone + 'static,
{
    let items = run_preprocess(items, options.preprocess).await?;
    log::debug!("status dispatch over {} items", items.len());
    match operation {
        StatusOperation::Plain(operation) => ungrouped::status(items, operation).await,
        StatusOperation::Grouped(groups) => grouped::status(items, groups).await,
    }
}

/// Run an operation that reports how many items succeeded; the fail count
/// is inferred from the batch size.
pub async fn counted<I>(
    items: Vec<I>,
    operation: CountedOperation<I>,
    options: BulkOptions<I>,
) -> Result<CountedResponse, BulkError<CountedResponse>>
where
    I: Clone + 'static,
{
    let items = run_preprocess(items, options.preprocess).await?;
    log::debug!("counted dispatch over {} items", items.len());
    match operation {
        CountedOperation::Plain(operation) => ungrouped::counted(items, operation).await,
        CountedOperation::Grouped(groups) => grouped::counted(items, groups).await,
    }
}

/// Run an operation that reports a per-item outcome through the recorder
/// callbacks. Every item ends up with at most one result record no matter
/// how many times the operation reports it.
pub async fn itemized<I>(
    items: Vec<I>,
    operation: ItemizedOperation<I>,
    options: BulkOptions<I>,
) -> Result<ItemizedResponse<I>, BulkError<ItemizedResponse<I>>>
where
    I: Clone + Eq + Hash + 'static,
{
    let BulkOptions {
        preprocess,
        include_success_items,
    } = options;
    let items = run_preprocess(items, preprocess).await?;
    log::debug!("itemized dispatch over {} items", items.len());
    match operation {
        ItemizedOperation::Plain(operation) => {
            ungrouped::itemized(items, operation, include_success_items).await
        }
        ItemizedOperation::Grouped(groups) => {
            grouped::itemized(items, groups, include_success_items).await
        }
    }
}
