//! Per-item outcome records.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::{ErrorInfo, HydrationError};
use crate::status::BulkStatus;

/// Outcome record for a single input item, optionally tagged with the group
/// that processed it.
///
/// Success and failure are distinct variants, so a record can never carry
/// both a success payload and an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultItem<I> {
    Success {
        item: I,
        data: Option<Value>,
        group: Option<String>,
    },
    Fail {
        item: I,
        data: Option<Value>,
        error: Option<ErrorInfo>,
        group: Option<String>,
    },
}

impl<I> ResultItem<I> {
    pub fn success(item: I, data: Option<Value>) -> Self {
        Self::Success {
            item,
            data,
            group: None,
        }
    }

    pub fn fail(item: I, error: Option<ErrorInfo>, data: Option<Value>) -> Self {
        Self::Fail {
            item,
            data,
            error,
            group: None,
        }
    }

    pub fn item(&self) -> &I {
        match self {
            Self::Success { item, .. } | Self::Fail { item, .. } => item,
        }
    }

    pub fn group(&self) -> Option<&str> {
        match self {
            Self::Success { group, .. } | Self::Fail { group, .. } => group.as_deref(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Self::Fail { error, .. } => error.as_ref(),
            Self::Success { .. } => None,
        }
    }
}

impl ResultItem<Value> {
    /// Rebuild a record from its wire form. The numeric `status` tag decides
    /// the variant: `1` success, `0` fail.
    pub fn from_json(raw: &Value) -> Result<Self, HydrationError> {
        let map = raw
            .as_object()
            .ok_or_else(|| HydrationError::invalid("ResultItem", "record must be an object"))?;
        let status = map
            .get("status")
            .and_then(Value::as_u64)
            .ok_or_else(|| HydrationError::invalid("ResultItem", "status must be a number"))?;
        let item = map.get("item").cloned().unwrap_or(Value::Null);
        let data = map.get("data").cloned();
        let group = map.get("group").and_then(Value::as_str).map(str::to_string);
        match status {
            1 => Ok(Self::Success { item, data, group }),
            0 => {
                let error = match map.get("error") {
                    Some(raw_error) => Some(ErrorInfo::from_json(raw_error, "ResultItem")?),
                    None => None,
                };
                Ok(Self::Fail {
                    item,
                    data,
                    error,
                    group,
                })
            }
            other => Err(HydrationError::invalid(
                "ResultItem",
                format!("status must be 0 or 1, got {other}"),
            )),
        }
    }
}

impl<I: Serialize> Serialize for ResultItem<I> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Self::Success { item, data, group } => {
                map.serialize_entry("item", item)?;
                if let Some(data) = data {
                    map.serialize_entry("data", data)?;
                }
                if let Some(group) = group {
                    map.serialize_entry("group", group)?;
                }
                map.serialize_entry("status", &BulkStatus::Success)?;
            }
            Self::Fail {
                item,
                data,
                error,
                group,
            } => {
                map.serialize_entry("item", item)?;
                if let Some(data) = data {
                    map.serialize_entry("data", data)?;
                }
                if let Some(error) = error {
                    map.serialize_entry("error", error)?;
                }
                if let Some(group) = group {
                    map.serialize_entry("group", group)?;
                }
                map.serialize_entry("status", &BulkStatus::Fail)?;
            }
        }
        map.end()
    }
}
