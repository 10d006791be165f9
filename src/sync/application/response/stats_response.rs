use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::stats_snapshot::StatsSnapshot,
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Body of the `type=stats` endpoint.
///
/// Some deployments wrap the snapshot in a one-element list; both shapes are
/// accepted and the first element of a list wins.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StatsResponse {
    List(Vec<Map<String, Value>>),
    Single(Map<String, Value>),
}

impl StatsResponse {
    /// Parses a raw stats body.
    ///
    /// # Errors
    /// Returns `DashboardError::Payload` when the body is neither an object
    /// nor a list of objects.
    pub fn from_value(value: Value) -> DashboardResult<Self> {
        serde_json::from_value(value)
            .map_err(|e| DashboardError::Payload(format!("Unexpected stats payload: {}", e)))
    }

    /// The snapshot carried by the response.
    ///
    /// # Errors
    /// Returns `DashboardError::Payload` for an empty list.
    pub fn into_snapshot(self) -> DashboardResult<StatsSnapshot> {
        let object = match self {
            StatsResponse::Single(object) => object,
            StatsResponse::List(list) => list
                .into_iter()
                .next()
                .ok_or_else(|| DashboardError::Payload("Stats list is empty".to_string()))?,
        };

        serde_json::from_value(Value::Object(object))
            .map_err(|e| DashboardError::Payload(format!("Invalid stats snapshot: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: Value) -> DashboardResult<StatsSnapshot> {
        StatsResponse::from_value(value)?.into_snapshot()
    }

    #[test]
    fn test_single_object() {
        let stats = snapshot(json!({ "active_total": 10, "v2ray": 6 })).unwrap();
        assert_eq!(stats.active_total, 10);
        assert_eq!(stats.v2ray, 6);
        assert_eq!(stats.wireguard, 0);
    }

    #[test]
    fn test_list_takes_first_element() {
        let stats = snapshot(json!([{ "active_total": 3 }, { "active_total": 99 }])).unwrap();
        assert_eq!(stats.active_total, 3);
    }

    #[test]
    fn test_empty_list_is_payload_error() {
        assert!(matches!(snapshot(json!([])), Err(DashboardError::Payload(_))));
    }

    #[test]
    fn test_scalar_is_payload_error() {
        assert!(matches!(snapshot(json!("nope")), Err(DashboardError::Payload(_))));
        assert!(matches!(snapshot(json!([5])), Err(DashboardError::Payload(_))));
        assert!(matches!(snapshot(Value::Null), Err(DashboardError::Payload(_))));
    }
}
