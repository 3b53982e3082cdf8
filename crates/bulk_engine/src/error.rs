//! Error types for bulk invocations and wire hydration.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::status::BulkStatus;

/// Serialized form of a failure cause, as attached to fail records and
/// carried across the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    /// Capture an operation failure. When the cause has a chain, the full
    /// chain is kept as the stack.
    pub fn from_error(error: &anyhow::Error) -> Self {
        let stack = if error.chain().count() > 1 {
            Some(format!("{error:#}"))
        } else {
            None
        };
        Self {
            message: error.to_string(),
            stack,
        }
    }

    pub(crate) fn from_json(raw: &Value, expected: &'static str) -> Result<Self, HydrationError> {
        match raw {
            Value::String(message) => Ok(Self::new(message.clone())),
            Value::Object(map) => {
                let message = map.get("message").and_then(Value::as_str).ok_or_else(|| {
                    HydrationError::invalid(expected, "error.message must be a string")
                })?;
                let stack = map.get("stack").map(|stack| match stack {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                });
                Ok(Self {
                    message: message.to_string(),
                    stack,
                })
            }
            _ => Err(HydrationError::invalid(
                expected,
                "error must be a string or an object",
            )),
        }
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorInfo {}

/// A wire payload did not match the shape it was hydrated as.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {expected} payload: {reason}")]
pub struct HydrationError {
    pub expected: &'static str,
    pub reason: String,
}

impl HydrationError {
    pub(crate) fn invalid(expected: &'static str, reason: impl Into<String>) -> Self {
        Self {
            expected,
            reason: reason.into(),
        }
    }
}

/// Failure of a bulk invocation, carrying whatever response had been
/// assembled when the operation went down.
#[derive(Debug)]
pub struct BulkError<R> {
    pub status: BulkStatus,
    /// Best-effort response at the point of failure. `None` only when the
    /// failure happened before any response existed, e.g. during
    /// preprocessing.
    pub response: Option<R>,
    /// The underlying cause.
    pub source: anyhow::Error,
}

impl<R> BulkError<R> {
    /// Wrap a failure that occurred before any response existed.
    pub fn new(source: anyhow::Error) -> Self {
        Self {
            status: BulkStatus::Fail,
            response: None,
            source,
        }
    }

    /// Rebuild an error from its wire form: `status` plus an `error` that is
    /// either a message string or an object with at least `message`.
    pub fn from_json(raw: &Value) -> Result<Self, HydrationError> {
        let map = raw
            .as_object()
            .ok_or_else(|| HydrationError::invalid("BulkError", "payload must be an object"))?;
        let status = match map.get("status") {
            None => BulkStatus::Fail,
            Some(value) => {
                let code = value.as_u64().ok_or_else(|| {
                    HydrationError::invalid("BulkError", "status must be a number")
                })?;
                BulkStatus::from_wire(code).ok_or_else(|| {
                    HydrationError::invalid("BulkError", format!("unknown status code {code}"))
                })?
            }
        };
        let error = map
            .get("error")
            .ok_or_else(|| HydrationError::invalid("BulkError", "error field is required"))?;
        let info = ErrorInfo::from_json(error, "BulkError")?;
        Ok(Self {
            status,
            response: None,
            source: anyhow::Error::new(info),
        })
    }
}

impl<R: std::fmt::Debug> std::fmt::Display for BulkError<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bulk operation failed: {}", self.source)
    }
}

impl<R: std::fmt::Debug> std::error::Error for BulkError<R> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let cause: &(dyn std::error::Error + 'static) = self.source.as_ref();
        Some(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_info_keeps_the_cause_chain_as_stack() {
        let root = anyhow::anyhow!("connection refused");
        let wrapped = root.context("flushing batch");
        let info = ErrorInfo::from_error(&wrapped);
        assert_eq!(info.message, "flushing batch");
        assert!(info.stack.unwrap().contains("connection refused"));

        let plain = ErrorInfo::from_error(&anyhow::anyhow!("boom"));
        assert_eq!(plain.message, "boom");
        assert_eq!(plain.stack, None);
    }

    #[test]
    fn hydration_error_names_the_expected_shape() {
        let error = HydrationError::invalid("CountedResponse", "counts must be an object");
        assert_eq!(
            error.to_string(),
            "invalid CountedResponse payload: counts must be an object"
        );
    }

    #[test]
    fn bulk_error_hydrates_from_a_string_cause() {
        let error =
            BulkError::<()>::from_json(&json!({ "status": 0, "error": "boom" })).unwrap();
        assert_eq!(error.status, BulkStatus::Fail);
        assert!(error.response.is_none());
        assert_eq!(error.source.to_string(), "boom");
    }

    #[test]
    fn bulk_error_hydrates_from_an_object_cause_without_status() {
        let error = BulkError::<()>::from_json(
            &json!({ "error": { "message": "boom", "stack": "at handler:1" } }),
        )
        .unwrap();
        assert_eq!(error.status, BulkStatus::Fail);
        assert_eq!(error.source.to_string(), "boom");
    }

    #[test]
    fn bulk_error_rejects_a_missing_cause() {
        let error = BulkError::<()>::from_json(&json!({ "status": 1 })).unwrap_err();
        assert!(error.to_string().contains("BulkError"));
        assert!(error.to_string().contains("error field is required"));
    }
}
