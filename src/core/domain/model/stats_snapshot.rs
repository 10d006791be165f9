//! Domain model for the aggregate counters returned by the `type=stats` endpoint.

use crate::core::domain::value_object::serde_helpers::lenient_count;
use serde::{Deserialize, Serialize};

/// Fleet-wide counters. Missing counters read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatsSnapshot {
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub active_total: u64,
    /// Connected users across the fleet.
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub peers_total: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub earning_total: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub v2ray: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub wireguard: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub healthy: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub unhealthy: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub whitelisted: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub whitelist_pending: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub delisted: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub hosting: u64,
    #[serde(default, deserialize_with = "lenient_count::deserialize")]
    pub residential: u64,
}

/// A named counter display on the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCounter {
    Active,
    Users,
    Earning,
    V2Ray,
    WireGuard,
    Healthy,
    Unhealthy,
    Whitelisted,
    Pending,
    Delisted,
    Hosting,
    Residential,
}

impl StatCounter {
    pub const ALL: [StatCounter; 12] = [
        StatCounter::Active,
        StatCounter::Users,
        StatCounter::Earning,
        StatCounter::V2Ray,
        StatCounter::WireGuard,
        StatCounter::Healthy,
        StatCounter::Unhealthy,
        StatCounter::Whitelisted,
        StatCounter::Pending,
        StatCounter::Delisted,
        StatCounter::Hosting,
        StatCounter::Residential,
    ];
}

/// A proportional bar on the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatioBar {
    V2Ray,
    WireGuard,
    Health,
    Whitelisted,
    Pending,
    Hosting,
}

/// A bar width as a percentage of its group total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarWidth {
    pub bar: RatioBar,
    pub percent: f64,
}

impl StatsSnapshot {
    /// Value of one panel counter.
    #[must_use]
    pub fn counter(&self, counter: StatCounter) -> u64 {
        match counter {
            StatCounter::Active => self.active_total,
            StatCounter::Users => self.peers_total,
            StatCounter::Earning => self.earning_total,
            StatCounter::V2Ray => self.v2ray,
            StatCounter::WireGuard => self.wireguard,
            StatCounter::Healthy => self.healthy,
            StatCounter::Unhealthy => self.unhealthy,
            StatCounter::Whitelisted => self.whitelisted,
            StatCounter::Pending => self.whitelist_pending,
            StatCounter::Delisted => self.delisted,
            StatCounter::Hosting => self.hosting,
            StatCounter::Residential => self.residential,
        }
    }

    /// Widths of every bar whose group total is non-zero.
    ///
    /// Groups with a zero denominator are omitted so the caller leaves their
    /// previous width in place.
    #[must_use]
    pub fn bar_widths(&self) -> Vec<BarWidth> {
        let mut widths = Vec::with_capacity(6);
        push_group(
            &mut widths,
            group_total(&[self.v2ray, self.wireguard]),
            &[(RatioBar::V2Ray, self.v2ray), (RatioBar::WireGuard, self.wireguard)],
        );
        push_group(
            &mut widths,
            group_total(&[self.healthy, self.unhealthy]),
            &[(RatioBar::Health, self.healthy)],
        );
        push_group(
            &mut widths,
            group_total(&[self.whitelisted, self.whitelist_pending, self.delisted]),
            &[
                (RatioBar::Whitelisted, self.whitelisted),
                (RatioBar::Pending, self.whitelist_pending),
            ],
        );
        push_group(
            &mut widths,
            group_total(&[self.hosting, self.residential]),
            &[(RatioBar::Hosting, self.hosting)],
        );
        widths
    }
}

/// Widened so counters near `u64::MAX` cannot overflow the sum.
fn group_total(counters: &[u64]) -> u128 {
    counters.iter().map(|&c| u128::from(c)).sum()
}

fn push_group(widths: &mut Vec<BarWidth>, total: u128, bars: &[(RatioBar, u64)]) {
    if total == 0 {
        return;
    }
    widths.extend(bars.iter().map(|&(bar, value)| BarWidth {
        bar,
        percent: value as f64 * 100.0 / total as f64,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(widths: &[BarWidth], bar: RatioBar) -> Option<f64> {
        widths.iter().find(|w| w.bar == bar).map(|w| w.percent)
    }

    #[test]
    fn test_two_way_split() {
        let stats = StatsSnapshot {
            v2ray: 3,
            wireguard: 1,
            ..Default::default()
        };
        let widths = stats.bar_widths();
        assert_eq!(width(&widths, RatioBar::V2Ray), Some(75.0));
        assert_eq!(width(&widths, RatioBar::WireGuard), Some(25.0));
    }

    #[test]
    fn test_zero_denominator_skips_group() {
        let stats = StatsSnapshot::default();
        assert!(stats.bar_widths().is_empty());
    }

    #[test]
    fn test_each_group_is_independent() {
        let stats = StatsSnapshot {
            healthy: 9,
            unhealthy: 1,
            whitelisted: 2,
            whitelist_pending: 1,
            delisted: 1,
            ..Default::default()
        };
        let widths = stats.bar_widths();
        assert_eq!(width(&widths, RatioBar::V2Ray), None);
        assert_eq!(width(&widths, RatioBar::Hosting), None);
        assert_eq!(width(&widths, RatioBar::Health), Some(90.0));
        assert_eq!(width(&widths, RatioBar::Whitelisted), Some(50.0));
        assert_eq!(width(&widths, RatioBar::Pending), Some(25.0));
    }

    #[test]
    fn test_hosting_share() {
        let stats = StatsSnapshot {
            hosting: 1,
            residential: 3,
            ..Default::default()
        };
        assert_eq!(width(&stats.bar_widths(), RatioBar::Hosting), Some(25.0));
    }

    #[test]
    fn test_huge_counters_do_not_overflow() {
        let stats = StatsSnapshot {
            v2ray: u64::MAX,
            wireguard: 1,
            whitelisted: u64::MAX,
            whitelist_pending: u64::MAX,
            delisted: u64::MAX,
            ..Default::default()
        };
        let widths = stats.bar_widths();
        let v2ray = width(&widths, RatioBar::V2Ray).unwrap();
        assert!(v2ray > 99.9 && v2ray <= 100.0);
        assert!(width(&widths, RatioBar::WireGuard).unwrap() < 0.1);
        let whitelisted = width(&widths, RatioBar::Whitelisted).unwrap();
        assert!((whitelisted - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_counters_default_to_zero() {
        let stats: StatsSnapshot =
            serde_json::from_value(serde_json::json!({ "active_total": 10, "v2ray": null }))
                .unwrap();
        assert_eq!(stats.counter(StatCounter::Active), 10);
        assert_eq!(stats.counter(StatCounter::V2Ray), 0);
        assert_eq!(stats.counter(StatCounter::Residential), 0);
    }
}
