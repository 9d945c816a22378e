use super::EventReport;
use crate::filter::EventDecision;
use serde::Serialize;
use std::fmt;

/// Per-run counters accumulated by the caller over processed events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub run: u32,
    pub processed: usize,
    /// Events whose raw verdict failed, regardless of tagging mode.
    pub flagged: usize,
    pub tower_flagged: usize,
    pub object_flagged: usize,
    pub boundary_coded: usize,
    pub warnings: usize,
}

impl RunSummary {
    pub fn new(run: u32) -> Self {
        Self {
            run,
            ..Self::default()
        }
    }

    pub fn record(&mut self, decision: &EventDecision) {
        self.processed += 1;
        self.flagged += usize::from(!decision.raw_pass);
        self.tower_flagged += usize::from(!decision.tower.pass);
        self.object_flagged += usize::from(!decision.objects.pass);
        self.boundary_coded += usize::from(decision.boundary_code != 0);
    }

    pub fn record_report(&mut self, report: &EventReport) {
        self.record(&report.decision);
        self.warnings += report.warnings().count();
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {}: {} events, {} flagged (tower {}, objects {}), {} near boundaries, {} warnings",
            self.run,
            self.processed,
            self.flagged,
            self.tower_flagged,
            self.object_flagged,
            self.boundary_coded,
            self.warnings
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Decision;

    #[test]
    fn counts_raw_failures_in_tagging_mode() {
        let decision = EventDecision::combine(
            Decision {
                result: -1,
                pass: false,
            },
            Decision::passing(),
            0,
            true,
        );
        assert!(decision.pass);
        let mut summary = RunSummary::new(7);
        summary.record(&decision);
        summary.record(&EventDecision::combine(Decision::passing(), Decision::passing(), 0, false));
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.flagged, 1);
        assert_eq!(summary.tower_flagged, 1);
        assert_eq!(summary.object_flagged, 0);
    }
}
