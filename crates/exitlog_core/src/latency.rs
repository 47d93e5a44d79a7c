//! Optional pacing delays between orchestrated steps.

use crate::config::LatencyConfig;
use std::thread;
use std::time::Duration;

/// Orchestrated step that may be paced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Load,
    Add,
    Remove,
    Persist,
    Render,
    NameSearch,
    DateFilter,
    PersonTotals,
    TopReasons,
}

/// Sleeps before steps according to a [`LatencyConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pacer {
    config: LatencyConfig,
}

impl Pacer {
    pub fn new(config: LatencyConfig) -> Self {
        Self { config }
    }

    /// Pacer that never sleeps.
    pub fn immediate() -> Self {
        Self::default()
    }

    pub fn delay_for(&self, step: Step) -> Duration {
        let millis = match step {
            Step::Load => self.config.load_ms,
            Step::Add => self.config.add_ms,
            Step::Remove => self.config.remove_ms,
            Step::Persist => self.config.persist_ms,
            Step::Render => self.config.render_ms,
            Step::NameSearch => self.config.name_search_ms,
            Step::DateFilter => self.config.date_filter_ms,
            Step::PersonTotals => self.config.person_totals_ms,
            Step::TopReasons => self.config.top_reasons_ms,
        };
        Duration::from_millis(millis)
    }

    /// Blocks for the configured delay of `step`; returns immediately at zero.
    pub fn pause(&self, step: Step) {
        let delay = self.delay_for(step);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Pacer, Step};
    use crate::config::LatencyConfig;
    use std::time::Duration;

    #[test]
    fn original_pacing_maps_each_step() {
        let pacer = Pacer::new(LatencyConfig::original_pacing());
        assert_eq!(pacer.delay_for(Step::Add), Duration::from_millis(1_000));
        assert_eq!(pacer.delay_for(Step::Remove), Duration::from_millis(800));
        assert_eq!(pacer.delay_for(Step::Persist), Duration::from_millis(300));
        assert_eq!(pacer.delay_for(Step::Render), Duration::from_millis(500));
        assert_eq!(pacer.delay_for(Step::NameSearch), Duration::from_millis(500));
        assert_eq!(pacer.delay_for(Step::DateFilter), Duration::from_millis(500));
        assert_eq!(pacer.delay_for(Step::PersonTotals), Duration::from_millis(700));
        assert_eq!(pacer.delay_for(Step::TopReasons), Duration::from_millis(600));
    }

    #[test]
    fn immediate_pacer_has_no_delay() {
        let pacer = Pacer::immediate();
        assert!(pacer.delay_for(Step::Load).is_zero());
    }
}
