use serde::{Deserialize, Serialize};

use crate::domain::{AdvisoryState, DecisionRecord, InhibitOverride};

/// Outcome counts over a run of evaluations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryTally {
    pub evaluated: usize,
    pub unresolved: usize,
    pub upward: usize,
    pub downward: usize,
    pub rejected: usize,
    pub inhibit_degraded: usize,
    pub inhibit_reported: usize,
}

impl AdvisoryTally {
    pub fn record(&mut self, record: &DecisionRecord) {
        self.evaluated += 1;
        match record.advisory {
            AdvisoryState::Unresolved => self.unresolved += 1,
            AdvisoryState::UpwardAdvisory => self.upward += 1,
            AdvisoryState::DownwardAdvisory => self.downward += 1,
        }
        if record.is_rejected() {
            self.rejected += 1;
        }
        match record.resolution.and_then(|r| r.inhibit_override) {
            Some(InhibitOverride::Degraded) => self.inhibit_degraded += 1,
            Some(InhibitOverride::IssuedDespiteInhibit) => self.inhibit_reported += 1,
            None => {}
        }
    }
}
