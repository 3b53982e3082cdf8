//! Wire-to-object reconstruction for response shapes.
//!
//! Pure validation over `serde_json::Value`; malformed payloads raise a
//! `HydrationError` naming the expected shape.

use serde_json::{Map, Value};

use super::{BulkCounts, BulkResponse, CountedResponse, GroupCounts, ItemLists, ItemizedResponse};
use crate::error::HydrationError;
use crate::result_item::ResultItem;
use crate::status::BulkStatus;

fn object<'a>(raw: &'a Value, expected: &'static str) -> Result<&'a Map<String, Value>, HydrationError> {
    raw.as_object()
        .ok_or_else(|| HydrationError::invalid(expected, "payload must be an object"))
}

fn status_entry(map: &Map<String, Value>, expected: &'static str) -> Result<BulkStatus, HydrationError> {
    let code = map
        .get("status")
        .and_then(Value::as_u64)
        .ok_or_else(|| HydrationError::invalid(expected, "status must be a number"))?;
    BulkStatus::from_wire(code)
        .ok_or_else(|| HydrationError::invalid(expected, format!("unknown status code {code}")))
}

fn tally(map: &Map<String, Value>, key: &str, expected: &'static str) -> Result<usize, HydrationError> {
    map.get(key)
        .and_then(Value::as_u64)
        .map(|count| count as usize)
        .ok_or_else(|| HydrationError::invalid(expected, format!("{key} count must be a number")))
}

fn counts_entry(map: &Map<String, Value>, expected: &'static str) -> Result<BulkCounts, HydrationError> {
    let raw = map
        .get("counts")
        .ok_or_else(|| HydrationError::invalid(expected, "counts field is required"))?;
    let counts = raw
        .as_object()
        .ok_or_else(|| HydrationError::invalid(expected, "counts must be an object"))?;

    let mut out = BulkCounts::new(
        tally(counts, "success", expected)?,
        tally(counts, "fail", expected)?,
    );
    // Every other key is a per-group tally.
    for (key, value) in counts {
        if key == "success" || key == "fail" {
            continue;
        }
        let group = value.as_object().ok_or_else(|| {
            HydrationError::invalid(expected, format!("counts.{key} must be an object"))
        })?;
        out.groups.insert(
            key.clone(),
            GroupCounts::new(tally(group, "success", expected)?, tally(group, "fail", expected)?),
        );
    }
    Ok(out)
}

fn record_list(
    items: &Map<String, Value>,
    key: &str,
    expected: &'static str,
) -> Result<Vec<ResultItem<Value>>, HydrationError> {
    items
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| HydrationError::invalid(expected, format!("items.{key} must be an array")))?
        .iter()
        .map(ResultItem::from_json)
        .collect()
}

impl BulkResponse {
    /// Rebuild a bare response from its wire form.
    pub fn from_json(raw: &Value) -> Result<Self, HydrationError> {
        let map = object(raw, "BulkResponse")?;
        Ok(Self {
            status: status_entry(map, "BulkResponse")?,
        })
    }
}

impl CountedResponse {
    /// Rebuild a counted response from its wire form.
    pub fn from_json(raw: &Value) -> Result<Self, HydrationError> {
        let map = object(raw, "CountedResponse")?;
        Ok(Self {
            status: status_entry(map, "CountedResponse")?,
            counts: counts_entry(map, "CountedResponse")?,
        })
    }
}

impl ItemizedResponse<Value> {
    /// Rebuild an itemized response from its wire form. Wire items are kept
    /// as raw JSON values.
    pub fn from_json(raw: &Value) -> Result<Self, HydrationError> {
        let map = object(raw, "ItemizedResponse")?;
        let items = map
            .get("items")
            .and_then(Value::as_object)
            .ok_or_else(|| HydrationError::invalid("ItemizedResponse", "items must be an object"))?;
        Ok(Self {
            status: status_entry(map, "ItemizedResponse")?,
            counts: counts_entry(map, "ItemizedResponse")?,
            items: ItemLists {
                success: record_list(items, "success", "ItemizedResponse")?,
                fail: record_list(items, "fail", "ItemizedResponse")?,
            },
        })
    }
}
