use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::node_record::NodeRecord,
};
use serde_json::Value;
use tracing::warn;

/// Body of the `type=data` endpoint: a list of node records.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeResponse {
    pub records: Vec<NodeRecord>,
    /// Elements that could not be read as a node (e.g. missing `address`).
    pub skipped: usize,
}

impl NodeResponse {
    /// Parses a raw node-list body, dropping elements that are not nodes.
    ///
    /// # Errors
    /// Returns `DashboardError::Payload` when the body is not a list.
    pub fn from_value(value: Value) -> DashboardResult<Self> {
        let Value::Array(items) = value else {
            return Err(DashboardError::Payload(format!(
                "Expected a list of nodes, got {}",
                json_kind(&value)
            )));
        };

        let mut records = Vec::with_capacity(items.len());
        let mut skipped = 0;
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<NodeRecord>(item) {
                Ok(record) => records.push(record),
                Err(error) => {
                    warn!(index, %error, "Skipping malformed node record");
                    skipped += 1;
                }
            }
        }

        Ok(Self { records, skipped })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
