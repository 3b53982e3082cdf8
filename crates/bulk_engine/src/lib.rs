//! bulk_engine - partial-failure-aware bulk operation execution
//!
//! Runs a caller-supplied operation over a collection of items and reports
//! what happened to each of them, without the caller hand-rolling
//! success/fail bookkeeping:
//! - `status` - one status code for the whole batch
//! - `counted` - aggregate success/fail counts
//! - `itemized` - a per-item success/fail record list
//!
//! Operations are supplied either as a single function or as named groups
//! (`StatusOperation::grouped` and friends); grouped failures are isolated
//! to the group that caused them. A failed invocation surfaces as a
//! `BulkError` carrying the best-effort response assembled up to that
//! point. Responses and errors rebuild from their wire form via
//! `from_json`.

pub mod error;
pub mod operation;
pub mod orchestrator;
pub mod recorder;
pub mod response;
pub mod result_item;
pub mod status;

pub use error::{BulkError, ErrorInfo, HydrationError};
pub use operation::{
    BoxFuture, BulkOptions, CountedGroup, CountedOperation, ItemizedGroup, ItemizedOperation,
    OpResult, StatusGroup, StatusOperation,
};
pub use orchestrator::{counted, itemized, status};
pub use recorder::ItemRecorder;
pub use response::{BulkCounts, BulkResponse, CountedResponse, GroupCounts, ItemLists, ItemizedResponse};
pub use result_item::ResultItem;
pub use status::BulkStatus;
