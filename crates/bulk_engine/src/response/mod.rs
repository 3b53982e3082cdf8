//! Response shapes returned by bulk invocations.
//!
//! Three escalating shapes: a bare status (`BulkResponse`), status plus
//! aggregate counts (`CountedResponse`), and counts plus per-item records
//! (`ItemizedResponse`). Each rebuilds from its wire form via `from_json`.

mod counts;
mod hydrate;

pub use counts::{BulkCounts, GroupCounts};

use serde::Serialize;

use crate::result_item::ResultItem;
use crate::status::BulkStatus;

/// Bare status-only response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkResponse {
    pub status: BulkStatus,
}

impl BulkResponse {
    pub fn new() -> Self {
        Self {
            status: BulkStatus::Fail,
        }
    }

    pub fn with_status(status: BulkStatus) -> Self {
        Self { status }
    }

    /// Finalization hook. The bare shape has nothing to derive.
    pub fn finalize(&mut self) {}
}

impl Default for BulkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Status plus aggregate (and optionally per-group) counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountedResponse {
    pub status: BulkStatus,
    pub counts: BulkCounts,
}

impl CountedResponse {
    pub fn new() -> Self {
        Self {
            status: BulkStatus::Fail,
            counts: BulkCounts::default(),
        }
    }

    /// Derive the status from the accumulated counts.
    pub fn finalize(&mut self) {
        self.status = self.counts.derive_status();
    }
}

impl Default for CountedResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Result records split by outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemLists<I> {
    pub success: Vec<ResultItem<I>>,
    pub fail: Vec<ResultItem<I>>,
}

impl<I> Default for ItemLists<I> {
    fn default() -> Self {
        Self {
            success: Vec::new(),
            fail: Vec::new(),
        }
    }
}

/// Counts plus per-item success/fail records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemizedResponse<I> {
    pub status: BulkStatus,
    pub counts: BulkCounts,
    pub items: ItemLists<I>,
}

impl<I> ItemizedResponse<I> {
    pub fn new() -> Self {
        Self {
            status: BulkStatus::Fail,
            counts: BulkCounts::default(),
            items: ItemLists::default(),
        }
    }

    /// Append a success record and bump the success count.
    pub fn add_success(&mut self, record: ResultItem<I>) {
        self.counts.success += 1;
        self.items.success.push(record);
    }

    /// Count a success without keeping its record.
    pub fn count_success(&mut self) {
        self.counts.success += 1;
    }

    /// Append a fail record and bump the fail count.
    pub fn add_fail(&mut self, record: ResultItem<I>) {
        self.counts.fail += 1;
        self.items.fail.push(record);
    }

    /// Derive the status from the accumulated counts.
    pub fn finalize(&mut self) {
        self.status = self.counts.derive_status();
    }
}

impl<I> Default for ItemizedResponse<I> {
    fn default() -> Self {
        Self::new()
    }
}
