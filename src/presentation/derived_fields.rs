//! Presentation attributes derived from a [`NodeRecord`].
//!
//! All functions here are pure: same record and clock in, same cells out.

use crate::core::domain::{
    model::node_record::NodeRecord,
    value_object::{NodeTimestamp, TriState, Uplink},
};
use crate::presentation::time_format::time_ago;
use chrono::{DateTime, Utc};

const HIGH_UPLINK: i64 = 1_000_000;
const MEDIUM_UPLINK: i64 = 100_000;

/// Placeholder for absent display strings.
pub const PLACEHOLDER: &str = "—";

/// Uplink quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignalTier {
    Low,
    Medium,
    High,
}

impl SignalTier {
    /// Tier of an integer uplink reading.
    #[must_use]
    pub fn from_value(value: i64) -> Self {
        if value > HIGH_UPLINK {
            SignalTier::High
        } else if value > MEDIUM_UPLINK {
            SignalTier::Medium
        } else {
            SignalTier::Low
        }
    }

    /// Tier of a raw uplink; unparseable values rank as 0.
    #[must_use]
    pub fn of(uplink: &Uplink) -> Self {
        Self::from_value(uplink.value())
    }
}

/// Visual tone of an indicator; the view maps tones to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Positive,
    Warning,
    Negative,
    /// Present but inactive.
    Muted,
    /// State not reported.
    Unknown,
    /// Fixed informational marker.
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Earning,
    Health,
    Whitelist,
    Hosting,
    Signal,
}

/// One icon of the status cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub kind: IndicatorKind,
    pub tone: Tone,
    /// Hover text.
    pub title: String,
}

impl Indicator {
    fn new(kind: IndicatorKind, tone: Tone, title: impl Into<String>) -> Self {
        Self {
            kind,
            tone,
            title: title.into(),
        }
    }
}

/// The five-icon status cluster of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIcons {
    pub earning: Indicator,
    pub health: Indicator,
    pub whitelist: Indicator,
    pub hosting: Indicator,
    pub signal: Indicator,
}

impl StatusIcons {
    /// Derives every indicator; each flag may be in any of its three states.
    #[must_use]
    pub fn of(record: &NodeRecord) -> Self {
        let earning = match record.is_earning {
            TriState::True => Indicator::new(IndicatorKind::Earning, Tone::Warning, "Earning"),
            TriState::False | TriState::Unknown => {
                Indicator::new(IndicatorKind::Earning, Tone::Muted, "Not Earning")
            }
        };

        let health = match record.is_healthy {
            TriState::True => Indicator::new(IndicatorKind::Health, Tone::Positive, "Healthy"),
            TriState::False => Indicator::new(IndicatorKind::Health, Tone::Negative, "Unhealthy"),
            TriState::Unknown => Indicator::new(IndicatorKind::Health, Tone::Unknown, "Unknown"),
        };

        let whitelist = match record.is_whitelisted {
            TriState::True => {
                Indicator::new(IndicatorKind::Whitelist, Tone::Positive, "Whitelisted")
            }
            TriState::False => Indicator::new(IndicatorKind::Whitelist, Tone::Negative, "Delisted"),
            TriState::Unknown => {
                Indicator::new(IndicatorKind::Whitelist, Tone::Unknown, "Pending")
            }
        };

        let signal_tone = match SignalTier::of(&record.uplink) {
            SignalTier::High => Tone::Positive,
            SignalTier::Medium => Tone::Warning,
            SignalTier::Low => Tone::Negative,
        };

        Self {
            earning,
            health,
            whitelist,
            hosting: Indicator::new(IndicatorKind::Hosting, Tone::Info, "Hosting"),
            signal: Indicator::new(
                IndicatorKind::Signal,
                signal_tone,
                format!("Uplink: {}", record.uplink),
            ),
        }
    }

    /// The icons in display order.
    #[must_use]
    pub fn iter(&self) -> [&Indicator; 5] {
        [
            &self.earning,
            &self.health,
            &self.whitelist,
            &self.hosting,
            &self.signal,
        ]
    }
}

/// The last-activity column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCell {
    /// The timestamp the label is computed from; refreshed every tick.
    pub timestamp: Option<NodeTimestamp>,
    /// Relative label such as `"5m ago"`.
    pub label: String,
    /// The latest check was a failure.
    pub failed: bool,
    /// `http://{ip_port}` when the node advertises an endpoint.
    pub link: Option<String>,
}

impl ActivityCell {
    #[must_use]
    pub fn of(record: &NodeRecord, now: DateTime<Utc>) -> Self {
        let activity = record.effective_activity();
        Self {
            label: time_ago(activity.timestamp, now),
            timestamp: activity.timestamp.cloned(),
            failed: activity.failed,
            link: record
                .ip_port
                .as_deref()
                .filter(|ip_port| !ip_port.is_empty())
                .map(|ip_port| format!("http://{}", ip_port)),
        }
    }

    /// Recomputes the label against a new clock reading.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.label = time_ago(self.timestamp.as_ref(), now);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeStyle {
    V2Ray,
    WireGuard,
    Neutral,
}

/// Protocol column badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolBadge {
    pub label: String,
    pub style: BadgeStyle,
}

impl ProtocolBadge {
    /// Known protocols get their display name; anything else shows verbatim,
    /// and an absent or empty value shows the literal `null`.
    #[must_use]
    pub fn of(service_type: Option<&str>) -> Self {
        match service_type {
            Some("v2ray") => Self {
                label: "V2Ray".to_string(),
                style: BadgeStyle::V2Ray,
            },
            Some("wireguard") => Self {
                label: "WireGuard".to_string(),
                style: BadgeStyle::WireGuard,
            },
            Some(other) if !other.is_empty() => Self {
                label: other.to_string(),
                style: BadgeStyle::Neutral,
            },
            _ => Self {
                label: "null".to_string(),
                style: BadgeStyle::Neutral,
            },
        }
    }
}

/// Address column: the full key plus progressively shorter forms for narrow layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressCell {
    pub full: String,
    pub short_xs: String,
    pub short_sm: String,
    pub short_lg: String,
}

impl AddressCell {
    #[must_use]
    pub fn of(address: &str) -> Self {
        Self {
            full: address.to_string(),
            short_xs: shorten(address, 8, 4),
            short_sm: shorten(address, 12, 6),
            short_lg: shorten(address, 16, 8),
        }
    }
}

fn shorten(value: &str, head: usize, tail: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    let head_end = head.min(chars.len());
    let tail_start = chars.len().saturating_sub(tail);
    let mut out: String = chars[..head_end].iter().collect();
    out.push_str("...");
    out.extend(&chars[tail_start..]);
    out
}

/// Peer count column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerCell {
    pub count: u64,
    /// Highlighted when at least one peer is connected.
    pub active: bool,
}

/// Display name, or [`PLACEHOLDER`] when absent or empty.
#[must_use]
pub fn moniker_label(moniker: Option<&str>) -> &str {
    non_empty(moniker).unwrap_or(PLACEHOLDER)
}

/// `"{country} • {city}"`, each part falling back to [`PLACEHOLDER`].
#[must_use]
pub fn location_label(country: Option<&str>, city: Option<&str>) -> String {
    format!(
        "{} • {}",
        non_empty(country).unwrap_or(PLACEHOLDER),
        non_empty(city).unwrap_or(PLACEHOLDER)
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Every display column of one node row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub address: AddressCell,
    pub status: StatusIcons,
    pub moniker: String,
    pub peers: PeerCell,
    pub location: String,
    pub protocol: ProtocolBadge,
    pub activity: ActivityCell,
}

impl DisplayRow {
    #[must_use]
    pub fn of(record: &NodeRecord, now: DateTime<Utc>) -> Self {
        Self {
            address: AddressCell::of(&record.address),
            status: StatusIcons::of(record),
            moniker: moniker_label(record.moniker.as_deref()).to_string(),
            peers: PeerCell {
                count: record.peers,
                active: record.peers > 0,
            },
            location: location_label(record.country.as_deref(), record.city.as_deref()),
            protocol: ProtocolBadge::of(record.service_type.as_deref()),
            activity: ActivityCell::of(record, now),
        }
    }
}
