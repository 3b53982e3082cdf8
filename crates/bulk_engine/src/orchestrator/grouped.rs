//! Dispatch for operations supplied as named groups.
//!
//! Groups run in the order they were supplied. A failure inside one group
//! never aborts the batch or touches other groups; it is folded into that
//! group's contribution. Discriminator failures are handled asymmetrically
//! across modes: status and counted fail the whole group, itemized fails
//! only the item being classified.

use std::hash::Hash;

use crate::error::{BulkError, ErrorInfo};
use crate::operation::{CountedGroup, Discriminator, ItemizedGroup, StatusGroup};
use crate::recorder::ItemRecorder;
use crate::response::{BulkResponse, CountedResponse, GroupCounts, ItemizedResponse};
use crate::status::BulkStatus;

enum Classified<I> {
    Subset(Vec<I>),
    DiscriminatorFailed,
}

fn classify<I: Clone>(items: &[I], name: &str, discriminator: &Discriminator<I>) -> Classified<I> {
    let mut subset = Vec::new();
    for item in items {
        match discriminator(item) {
            Ok(true) => subset.push(item.clone()),
            Ok(false) => {}
            Err(cause) => {
                log::warn!("group '{name}' discriminator failed: {cause:#}");
                return Classified::DiscriminatorFailed;
            }
        }
    }
    Classified::Subset(subset)
}

/// Unanimous successes aggregate to Success, a total absence of successes
/// to Fail, any mix to PartialSuccess. Groups that matched nothing do not
/// vote.
fn aggregate(votes: &[BulkStatus]) -> BulkStatus {
    if votes.iter().all(|vote| *vote == BulkStatus::Success) {
        BulkStatus::Success
    } else if votes.iter().any(|vote| *vote == BulkStatus::Success) {
        BulkStatus::PartialSuccess
    } else {
        BulkStatus::Fail
    }
}

pub(super) async fn status<I>(
    items: Vec<I>,
    groups: Vec<StatusGroup<I>>,
) -> Result<BulkResponse, BulkError<BulkResponse>>
where
    I: Clone + 'static,
{
    let mut votes = Vec::new();
    for group in groups {
        let StatusGroup {
            name,
            discriminator,
            operation,
        } = group;
        let subset = match classify(&items, &name, &discriminator) {
            Classified::Subset(subset) => subset,
            Classified::DiscriminatorFailed => {
                votes.push(BulkStatus::Fail);
                continue;
            }
        };
        if subset.is_empty() {
            log::debug!("group '{name}' matched no items");
            continue;
        }
        match operation(subset).await {
            Ok(outcome) => votes.push(outcome),
            Err(cause) => {
                log::warn!("group '{name}' operation failed: {cause:#}");
                votes.push(BulkStatus::Fail);
            }
        }
    }

    let mut response = BulkResponse::with_status(aggregate(&votes));
    response.finalize();
    Ok(response)
}

pub(super) async fn counted<I>(
    items: Vec<I>,
    groups: Vec<CountedGroup<I>>,
) -> Result<CountedResponse, BulkError<CountedResponse>>
where
    I: Clone + 'static,
{
    let total = items.len();
    let mut response = CountedResponse::new();
    for group in groups {
        let CountedGroup {
            name,
            discriminator,
            operation,
        } = group;
        let subset = match classify(&items, &name, &discriminator) {
            Classified::Subset(subset) => subset,
            Classified::DiscriminatorFailed => {
                // Classification never finished, so the whole batch is
                // charged to this group.
                response.counts.groups.insert(name, GroupCounts::new(0, total));
                continue;
            }
        };
        if subset.is_empty() {
            log::debug!("group '{name}' matched no items");
            continue;
        }
        let subset_len = subset.len();
        let group_counts = match operation(subset).await {
            Ok(successes) => {
                GroupCounts::new(successes, subset_len.saturating_sub(successes))
            }
            Err(cause) => {
                log::warn!("group '{name}' operation failed: {cause:#}");
                GroupCounts::new(0, subset_len)
            }
        };
        response.counts.success += group_counts.success;
        response.counts.groups.insert(name, group_counts);
    }

    // The aggregate fail is what the batch is short of, not the sum of
    // per-group fails: items matched by no group count against it.
    response.counts.fail = total.saturating_sub(response.counts.success);
    response.finalize();
    Ok(response)
}

pub(super) async fn itemized<I>(
    items: Vec<I>,
    groups: Vec<ItemizedGroup<I>>,
    include_success_items: bool,
) -> Result<ItemizedResponse<I>, BulkError<ItemizedResponse<I>>>
where
    I: Clone + Eq + Hash + 'static,
{
    let recorder = ItemRecorder::new(include_success_items);
    for group in groups {
        let ItemizedGroup {
            name,
            discriminator,
            operation,
        } = group;
        recorder.set_group(Some(name.clone()));

        let mut subset = Vec::new();
        for item in &items {
            match discriminator(item) {
                Ok(true) => subset.push(item.clone()),
                Ok(false) => {}
                Err(cause) => {
                    // Scoped to the one item; classification continues.
                    log::warn!("group '{name}' discriminator failed for an item: {cause:#}");
                    recorder.fail(item.clone(), Some(ErrorInfo::from_error(&cause)), None);
                }
            }
        }
        if subset.is_empty() {
            log::debug!("group '{name}' matched no items");
            continue;
        }

        match operation(subset.clone(), recorder.clone()).await {
            Ok(()) => {}
            Err(cause) => {
                log::warn!("group '{name}' operation failed: {cause:#}");
                let error = ErrorInfo::from_error(&cause);
                for item in subset {
                    recorder.fail(item, Some(error.clone()), None);
                }
            }
        }
    }

    recorder.set_group(None);
    Ok(recorder.finish())
}
