//! Dispatch for operations supplied as a single function.

use std::hash::Hash;

use crate::error::{BulkError, ErrorInfo};
use crate::operation::{CountedFn, ItemizedFn, StatusFn};
use crate::recorder::ItemRecorder;
use crate::response::{BulkCounts, BulkResponse, CountedResponse, ItemizedResponse};
use crate::status::BulkStatus;

/// Items left untouched when an itemized operation dies are failed with this
/// message; the first unrecorded item carries the operation's own error.
pub(crate) const NOT_PROCESSED: &str = "not processed due to bulk operation error";

pub(super) async fn status<I: 'static>(
    items: Vec<I>,
    operation: StatusFn<I>,
) -> Result<BulkResponse, BulkError<BulkResponse>> {
    let mut response = BulkResponse::new();
    match operation(items).await {
        Ok(outcome) => {
            response.status = outcome;
            response.finalize();
            Ok(response)
        }
        Err(cause) => {
            log::warn!("status operation failed: {cause:#}");
            response.status = BulkStatus::Fail;
            response.finalize();
            Err(BulkError {
                status: response.status,
                response: Some(response),
                source: cause,
            })
        }
    }
}

pub(super) async fn counted<I: 'static>(
    items: Vec<I>,
    operation: CountedFn<I>,
) -> Result<CountedResponse, BulkError<CountedResponse>> {
    let total = items.len();
    let mut response = CountedResponse::new();
    match operation(items).await {
        Ok(successes) => {
            response.counts = BulkCounts::new(successes, total.saturating_sub(successes));
            response.finalize();
            Ok(response)
        }
        Err(cause) => {
            log::warn!("counted operation failed: {cause:#}");
            // Counts were never reported; zeroed counts derive Fail.
            response.finalize();
            Err(BulkError {
                status: response.status,
                response: Some(response),
                source: cause,
            })
        }
    }
}

pub(super) async fn itemized<I>(
    items: Vec<I>,
    operation: ItemizedFn<I>,
    include_success_items: bool,
) -> Result<ItemizedResponse<I>, BulkError<ItemizedResponse<I>>>
where
    I: Clone + Eq + Hash + 'static,
{
    let recorder = ItemRecorder::new(include_success_items);
    match operation(items.clone(), recorder.clone()).await {
        Ok(()) => Ok(recorder.finish()),
        Err(cause) => {
            log::warn!("itemized operation failed: {cause:#}");
            // The first item the operation never reported takes the blame;
            // the rest were simply never reached.
            let mut first_unrecorded = true;
            for item in items {
                if recorder.contains(&item) {
                    continue;
                }
                let error = if first_unrecorded {
                    first_unrecorded = false;
                    ErrorInfo::from_error(&cause)
                } else {
                    ErrorInfo::new(NOT_PROCESSED)
                };
                recorder.fail(item, Some(error), None);
            }
            let response = recorder.finish();
            Err(BulkError {
                status: response.status,
                response: Some(response),
                source: cause,
            })
        }
    }
}
