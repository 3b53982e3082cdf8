//! Per-item success/fail recording for itemized operations.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::error::ErrorInfo;
use crate::response::ItemizedResponse;
use crate::result_item::ResultItem;

/// Cloneable handle through which an itemized operation reports per-item
/// outcomes.
///
/// The first report for a given item wins; later reports for the same item
/// are ignored, so an operation that calls back more than once per item
/// still yields exactly one record per item. Identity is the item's
/// `Eq`/`Hash`, never a deep comparison of serialized forms.
pub struct ItemRecorder<I> {
    inner: Arc<Mutex<RecorderInner<I>>>,
}

impl<I> Clone for ItemRecorder<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct RecorderInner<I> {
    response: ItemizedResponse<I>,
    seen: HashSet<I>,
    include_success_items: bool,
    group: Option<String>,
}

impl<I: Clone + Eq + Hash> ItemRecorder<I> {
    pub(crate) fn new(include_success_items: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RecorderInner {
                response: ItemizedResponse::new(),
                seen: HashSet::new(),
                include_success_items,
                group: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RecorderInner<I>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record an item as succeeded, with an optional payload.
    pub fn success(&self, item: I, data: Option<Value>) {
        let mut inner = self.lock();
        if !inner.seen.insert(item.clone()) {
            return;
        }
        let group = inner.group.clone();
        if inner.include_success_items {
            inner.response.add_success(ResultItem::Success { item, data, group });
        } else {
            inner.response.count_success();
        }
    }

    /// Record an item as failed, with an optional cause and payload.
    pub fn fail(&self, item: I, error: Option<ErrorInfo>, data: Option<Value>) {
        let mut inner = self.lock();
        if !inner.seen.insert(item.clone()) {
            return;
        }
        let group = inner.group.clone();
        inner.response.add_fail(ResultItem::Fail {
            item,
            data,
            error,
            group,
        });
    }

    /// Whether any outcome has been recorded for this item.
    pub fn contains(&self, item: &I) -> bool {
        self.lock().seen.contains(item)
    }

    /// Tag records produced from here on with a group name.
    pub(crate) fn set_group(&self, group: Option<String>) {
        self.lock().group = group;
    }

    /// Finalize and take the accumulated response.
    pub(crate) fn finish(&self) -> ItemizedResponse<I> {
        let mut inner = self.lock();
        let mut response = std::mem::take(&mut inner.response);
        response.finalize();
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::BulkStatus;

    #[test]
    fn first_report_wins() {
        let recorder = ItemRecorder::new(true);
        recorder.success(1, None);
        recorder.fail(1, Some(ErrorInfo::new("late")), None);
        recorder.success(1, None);

        let response = recorder.finish();
        assert_eq!(response.counts.success, 1);
        assert_eq!(response.counts.fail, 0);
        assert_eq!(response.items.success.len(), 1);
        assert!(response.items.fail.is_empty());
    }

    #[test]
    fn success_records_can_be_counted_without_being_kept() {
        let recorder = ItemRecorder::new(false);
        recorder.success(1, None);
        recorder.fail(2, None, None);

        let response = recorder.finish();
        assert_eq!(response.counts.success, 1);
        assert!(response.items.success.is_empty());
        assert_eq!(response.items.fail.len(), 1);
        assert_eq!(response.status, BulkStatus::PartialSuccess);
    }

    #[test]
    fn records_carry_the_current_group() {
        let recorder = ItemRecorder::new(true);
        recorder.set_group(Some("even".to_string()));
        recorder.success(2, None);
        recorder.set_group(None);
        recorder.success(3, None);

        let response = recorder.finish();
        assert_eq!(response.items.success[0].group(), Some("even"));
        assert_eq!(response.items.success[1].group(), None);
    }
}
