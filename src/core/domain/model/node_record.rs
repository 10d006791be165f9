//! Domain model for a relay node as returned by the `type=data` endpoint.

use crate::core::domain::value_object::{
    EffectiveActivity, NodeTimestamp, TriState, Uplink,
    serde_helpers::{lenient_count, lenient_string},
};
use serde::{Deserialize, Serialize};

/// One monitored relay node.
///
/// Every field except `address` tolerates absence: flags default to
/// [`TriState::Unknown`], counts to 0, strings to `None`. Scalar values in
/// text fields are kept as their string form.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeRecord {
    /// Unique node address; the row key.
    pub address: String,
    /// Operator-chosen display name.
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub moniker: Option<String>,
    /// Number of connected peers.
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub peers: u64,
    /// Measured uplink throughput (number or numeric string).
    #[serde(default)]
    pub uplink: Uplink,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub city: Option<String>,
    /// Protocol served by the node (`v2ray`, `wireguard`, or anything else).
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub service_type: Option<String>,
    /// Public `host:port` of the node.
    #[serde(default, deserialize_with = "lenient_string::deserialize")]
    pub ip_port: Option<String>,
    /// Time of the last successful check.
    #[serde(default)]
    pub last_checked: Option<NodeTimestamp>,
    /// Time of the last failed check.
    #[serde(default)]
    pub failed_check: Option<NodeTimestamp>,
    #[serde(default)]
    pub is_earning: TriState,
    #[serde(default)]
    pub is_healthy: TriState,
    #[serde(default)]
    pub is_whitelisted: TriState,
    #[serde(default)]
    pub is_residential: TriState,
}

impl NodeRecord {
    /// A record with only its address set; everything else unknown.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            moniker: None,
            peers: 0,
            uplink: Uplink::Missing,
            country: None,
            city: None,
            service_type: None,
            ip_port: None,
            last_checked: None,
            failed_check: None,
            is_earning: TriState::Unknown,
            is_healthy: TriState::Unknown,
            is_whitelisted: TriState::Unknown,
            is_residential: TriState::Unknown,
        }
    }

    /// The later of `last_checked` / `failed_check`, and whether it was a failure.
    #[must_use]
    pub fn effective_activity(&self) -> EffectiveActivity<'_> {
        EffectiveActivity::resolve(self.last_checked.as_ref(), self.failed_check.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record() {
        let record: NodeRecord = serde_json::from_value(serde_json::json!({
            "address": "sentnode1abc",
            "moniker": "alpha",
            "peers": 12,
            "uplink": "2500000",
            "country": "Germany",
            "city": "Berlin",
            "service_type": "wireguard",
            "ip_port": "10.0.0.1:443",
            "last_checked": "2024-01-01 10:00:00",
            "failed_check": null,
            "is_earning": 1,
            "is_healthy": 0,
            "is_whitelisted": null,
            "is_residential": 1
        }))
        .unwrap();

        assert_eq!(record.address, "sentnode1abc");
        assert_eq!(record.moniker.as_deref(), Some("alpha"));
        assert_eq!(record.peers, 12);
        assert_eq!(record.uplink.value(), 2_500_000);
        assert_eq!(record.service_type.as_deref(), Some("wireguard"));
        assert_eq!(record.is_earning, TriState::True);
        assert_eq!(record.is_healthy, TriState::False);
        assert_eq!(record.is_whitelisted, TriState::Unknown);
        assert_eq!(record.is_residential, TriState::True);
        assert!(!record.effective_activity().failed);
    }

    #[test]
    fn test_minimal_record_defaults() {
        let record: NodeRecord =
            serde_json::from_value(serde_json::json!({ "address": "sentnode1xyz" })).unwrap();
        assert_eq!(record, NodeRecord::new("sentnode1xyz"));
        assert_eq!(record.uplink.value(), 0);
    }

    #[test]
    fn test_address_is_required() {
        let result = serde_json::from_value::<NodeRecord>(serde_json::json!({ "peers": 3 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_string_text_fields() {
        let record: NodeRecord = serde_json::from_value(serde_json::json!({
            "address": "sentnode1abc",
            "moniker": 42,
            "country": true,
            "city": 0,
            "service_type": 5,
            "ip_port": { "host": "10.0.0.1" }
        }))
        .unwrap();

        assert_eq!(record.moniker.as_deref(), Some("42"));
        assert_eq!(record.country.as_deref(), Some("true"));
        assert_eq!(record.city.as_deref(), Some("0"));
        assert_eq!(record.service_type.as_deref(), Some("5"));
        assert_eq!(record.ip_port, None);
    }
}
