//! Row-visibility predicate built from the user's filter settings.

use crate::core::domain::model::{
    node_record::NodeRecord,
    view_state::{EarningFilter, FilterSettings},
};

/// A single visibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterRule {
    /// Only definitely earning nodes.
    Earning,
    /// Everything not definitely earning; unknown counts as not earning.
    NotEarning,
    RequireHealthy,
    RequireWhitelisted,
    RequireResidential,
}

impl FilterRule {
    #[must_use]
    pub fn test(self, record: &NodeRecord) -> bool {
        match self {
            FilterRule::Earning => record.is_earning.is_true(),
            FilterRule::NotEarning => !record.is_earning.is_true(),
            FilterRule::RequireHealthy => record.is_healthy.is_true(),
            FilterRule::RequireWhitelisted => record.is_whitelisted.is_true(),
            FilterRule::RequireResidential => record.is_residential.is_true(),
        }
    }
}

/// AND-combination of [`FilterRule`]s; an empty predicate keeps every row.
///
/// Independent of the table's free-text search, which is applied separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPredicate {
    rules: Vec<FilterRule>,
}

impl FilterPredicate {
    /// A predicate that keeps every row.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Builds the predicate matching the current filter settings.
    #[must_use]
    pub fn from_settings(settings: &FilterSettings) -> Self {
        let mut predicate = Self::allow_all();
        match settings.earning {
            EarningFilter::All => {}
            EarningFilter::Earning => predicate = predicate.and(FilterRule::Earning),
            EarningFilter::NotEarning => predicate = predicate.and(FilterRule::NotEarning),
        }
        if settings.healthy_only {
            predicate = predicate.and(FilterRule::RequireHealthy);
        }
        if settings.whitelisted_only {
            predicate = predicate.and(FilterRule::RequireWhitelisted);
        }
        if settings.residential_only {
            predicate = predicate.and(FilterRule::RequireResidential);
        }
        predicate
    }

    /// Adds a rule.
    #[must_use]
    pub fn and(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    /// True when every rule accepts the record.
    #[must_use]
    pub fn matches(&self, record: &NodeRecord) -> bool {
        self.rules.iter().all(|rule| rule.test(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::value_object::TriState;

    const STATES: [TriState; 3] = [TriState::True, TriState::False, TriState::Unknown];

    fn record_with(earning: TriState, healthy: TriState, whitelisted: TriState) -> NodeRecord {
        let mut record = NodeRecord::new("sentnode1");
        record.is_earning = earning;
        record.is_healthy = healthy;
        record.is_whitelisted = whitelisted;
        record
    }

    fn settings(earning: EarningFilter) -> FilterSettings {
        FilterSettings {
            earning,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_settings_keep_everything() {
        let predicate = FilterPredicate::from_settings(&FilterSettings::default());
        assert!(predicate.rules().is_empty());
        for e in STATES {
            for h in STATES {
                for w in STATES {
                    assert!(predicate.matches(&record_with(e, h, w)));
                }
            }
        }
    }

    #[test]
    fn test_unknown_earning_is_not_earning() {
        let unknown = record_with(TriState::Unknown, TriState::Unknown, TriState::Unknown);
        let earning = FilterPredicate::from_settings(&settings(EarningFilter::Earning));
        let not_earning = FilterPredicate::from_settings(&settings(EarningFilter::NotEarning));
        assert!(!earning.matches(&unknown));
        assert!(not_earning.matches(&unknown));
    }

    #[test]
    fn test_earning_modes_partition_on_true() {
        let earning = FilterPredicate::from_settings(&settings(EarningFilter::Earning));
        let not_earning = FilterPredicate::from_settings(&settings(EarningFilter::NotEarning));
        for e in STATES {
            let record = record_with(e, TriState::Unknown, TriState::Unknown);
            assert_ne!(earning.matches(&record), not_earning.matches(&record));
            assert_eq!(earning.matches(&record), e == TriState::True);
        }
    }

    #[test]
    fn test_toggles_require_definite_true() {
        let predicate = FilterPredicate::from_settings(&FilterSettings {
            healthy_only: true,
            whitelisted_only: true,
            ..Default::default()
        });
        for h in STATES {
            for w in STATES {
                let record = record_with(TriState::Unknown, h, w);
                assert_eq!(
                    predicate.matches(&record),
                    h == TriState::True && w == TriState::True
                );
            }
        }
    }

    #[test]
    fn test_residential_toggle() {
        let predicate = FilterPredicate::from_settings(&FilterSettings {
            residential_only: true,
            ..Default::default()
        });
        let mut record = NodeRecord::new("sentnode1");
        assert!(!predicate.matches(&record));
        record.is_residential = TriState::False;
        assert!(!predicate.matches(&record));
        record.is_residential = TriState::True;
        assert!(predicate.matches(&record));
    }

    #[test]
    fn test_rules_compose() {
        let predicate = FilterPredicate::allow_all()
            .and(FilterRule::Earning)
            .and(FilterRule::RequireHealthy);
        assert!(predicate.matches(&record_with(TriState::True, TriState::True, TriState::False)));
        assert!(!predicate.matches(&record_with(TriState::True, TriState::False, TriState::True)));
        assert!(!predicate.matches(&record_with(TriState::False, TriState::True, TriState::True)));
    }
}
