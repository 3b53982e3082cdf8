//! Success/fail tallies and status derivation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::status::BulkStatus;

/// Tally for one named group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GroupCounts {
    pub success: usize,
    pub fail: usize,
}

impl GroupCounts {
    pub fn new(success: usize, fail: usize) -> Self {
        Self { success, fail }
    }
}

/// Aggregate tally for a whole invocation. Per-group entries live in the
/// same wire object as the aggregate `success`/`fail` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkCounts {
    pub success: usize,
    pub fail: usize,
    #[serde(flatten)]
    pub groups: BTreeMap<String, GroupCounts>,
}

impl BulkCounts {
    pub fn new(success: usize, fail: usize) -> Self {
        Self {
            success,
            fail,
            groups: BTreeMap::new(),
        }
    }

    /// No failures with at least one success is `Success`, no successes at
    /// all is `Fail`, anything in between is `PartialSuccess`.
    pub fn derive_status(&self) -> BulkStatus {
        if self.success == 0 {
            BulkStatus::Fail
        } else if self.fail == 0 {
            BulkStatus::Success
        } else {
            BulkStatus::PartialSuccess
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_status_from_counts() {
        assert_eq!(BulkCounts::new(3, 0).derive_status(), BulkStatus::Success);
        assert_eq!(BulkCounts::new(0, 3).derive_status(), BulkStatus::Fail);
        assert_eq!(BulkCounts::new(0, 0).derive_status(), BulkStatus::Fail);
        assert_eq!(
            BulkCounts::new(2, 1).derive_status(),
            BulkStatus::PartialSuccess
        );
    }

    #[test]
    fn group_entries_flatten_into_the_counts_object() {
        let mut counts = BulkCounts::new(3, 1);
        counts.groups.insert("even".to_string(), GroupCounts::new(2, 0));
        let value = serde_json::to_value(&counts).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "success": 3,
                "fail": 1,
                "even": { "success": 2, "fail": 0 }
            })
        );
    }
}
