use serde::Serialize;

use super::model::LaunchRecord;

/// Success / failure tally over a subset of launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OutcomeCounts {
    pub success: usize,
    pub failure: usize,
}

impl OutcomeCounts {
    pub fn total(&self) -> usize {
        self.success + self.failure
    }

    /// Share of successful launches, `None` when nothing was counted.
    pub fn success_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(self.success as f64 / total as f64),
        }
    }
}

/// Count successes and failures. Empty input yields `{0, 0}`.
pub fn aggregate_outcomes<'a>(records: impl IntoIterator<Item = &'a LaunchRecord>) -> OutcomeCounts {
    records
        .into_iter()
        .fold(OutcomeCounts::default(), |mut counts, r| {
            if r.outcome.is_success() {
                counts.success += 1;
            } else {
                counts.failure += 1;
            }
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{SiteSelection, filter_by_site};
    use crate::data::model::Outcome;

    fn record(site: &str, outcome: Outcome) -> LaunchRecord {
        LaunchRecord::new(site, 1000.0, outcome, "v1.1").unwrap()
    }

    #[test]
    fn test_empty_input() {
        let counts = aggregate_outcomes(std::iter::empty::<&LaunchRecord>());
        assert_eq!(counts, OutcomeCounts { success: 0, failure: 0 });
        assert_eq!(counts.success_rate(), None);
    }

    #[test]
    fn test_site_scenario() {
        let records = vec![
            record("A", Outcome::Success),
            record("A", Outcome::Success),
            record("A", Outcome::Failure),
            record("B", Outcome::Failure),
            record("B", Outcome::Success),
        ];
        let subset = filter_by_site(&records, &SiteSelection::Site("A".into()));
        assert_eq!(subset.len(), 3);

        let counts = aggregate_outcomes(subset.iter().copied());
        assert_eq!(counts, OutcomeCounts { success: 2, failure: 1 });
        assert_eq!(counts.total(), subset.len());

        let all = aggregate_outcomes(&records);
        assert_eq!(all.total(), records.len());
        assert_eq!(all.success_rate(), Some(0.6));
    }
}
