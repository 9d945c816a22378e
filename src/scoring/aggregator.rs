//! Per-cell path: sum recovered energy of masked cells into towers.

use super::{QualifiedGroup, TieBreak, TowerScore};
use crate::diagnostics::ConsistencyWarning;
use crate::status::{ChannelStatusIndex, StatusPredicate};
use crate::types::{CellId, EnergyReading, GroupId};
use log::debug;
use std::collections::{BTreeMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupAggregator {
    /// Which masked cells may contribute.
    pub status: StatusPredicate,
    /// What every member of a contributing tower is expected to satisfy.
    pub membership: StatusPredicate,
    /// Transverse energy a tower needs to qualify.
    pub cut_value: f64,
    pub tie_break: TieBreak,
}

#[derive(Clone, Copy, Debug)]
struct GroupAccumulator {
    energy: f64,
    cells: usize,
}

impl GroupAggregator {
    /// Scores one event from its per-cell readings.
    ///
    /// A reading contributes when its cell is masked, matches `status` and
    /// was recovered. Repeated readings of a cell contribute once.
    pub fn score(&self, readings: &[EnergyReading], index: &ChannelStatusIndex) -> TowerScore {
        let mut towers: BTreeMap<GroupId, GroupAccumulator> = BTreeMap::new();
        let mut seen: HashSet<CellId> = HashSet::new();
        let mut audited: HashSet<GroupId> = HashSet::new();
        let mut warnings = Vec::new();
        let mut used = 0usize;

        for reading in readings {
            let Some(record) = index.get(&reading.cell) else {
                continue;
            };
            if !reading.recovered || !self.status.matches(record.status_code) {
                continue;
            }
            let Some(group) = index.group_of(&reading.cell) else {
                continue;
            };

            if audited.insert(group) {
                let offending = self.offending_members(&group, index);
                if offending > 0 {
                    warnings.push(
                        ConsistencyWarning::MembershipMismatch {
                            group,
                            cell: reading.cell,
                            offending,
                        }
                        .emit(),
                    );
                }
            }

            if !seen.insert(reading.cell) {
                debug!("GroupAggregator: duplicate reading for {} ignored", reading.cell);
                continue;
            }

            let acc = towers.entry(group).or_insert(GroupAccumulator {
                energy: 0.0,
                cells: 0,
            });
            acc.energy += reading.energy * record.theta.sin();
            acc.cells += 1;
            used += 1;
        }

        let mut qualifying = Vec::new();
        for (group, acc) in &towers {
            let expected = index.members_of(group).len();
            if acc.cells != expected {
                warnings.push(
                    ConsistencyWarning::UnexpectedMemberCount {
                        group: *group,
                        contributing: acc.cells,
                        expected,
                    }
                    .emit(),
                );
            }
            if acc.energy >= self.cut_value {
                qualifying.push(QualifiedGroup {
                    group: *group,
                    energy: acc.energy,
                    cells: acc.cells,
                });
            }
        }

        debug!(
            "GroupAggregator: {} reading(s) used, {} tower(s) filled, {} above {:.2}",
            used,
            towers.len(),
            qualifying.len(),
            self.cut_value
        );
        TowerScore::resolve(qualifying, self.tie_break, used, warnings)
    }

    /// Members that are unmasked or fail the membership predicate.
    fn offending_members(&self, group: &GroupId, index: &ChannelStatusIndex) -> usize {
        index
            .members_of(group)
            .iter()
            .filter(|member| {
                index
                    .get(member)
                    .map_or(true, |r| !self.membership.matches(r.status_code))
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Conditions, SyntheticDetector, TowerTopology};
    use crate::status::IndexOptions;

    fn dead_tower_index() -> (ChannelStatusIndex, Vec<CellId>) {
        let mut det = SyntheticDetector::default();
        let seed = CellId::GridA { row: 2, col: 2 };
        let tower = det.group_of(&seed);
        let members = det.constituents_of(&tower);
        for cell in &members {
            det.set_status(*cell, 13);
        }
        let options = IndexOptions {
            status_threshold: 10,
            status_mask: None,
        };
        let index = ChannelStatusIndex::build(&Conditions::from_provider(&det), &options)
            .expect("conditions available");
        (index, members)
    }

    fn aggregator(cut_value: f64) -> GroupAggregator {
        GroupAggregator {
            status: StatusPredicate::Exact(13),
            membership: StatusPredicate::Exact(13),
            cut_value,
            tie_break: TieBreak::HighestEnergy,
        }
    }

    #[test]
    fn full_tower_sums_transverse_energy() {
        let (index, members) = dead_tower_index();
        let readings: Vec<_> = members
            .iter()
            .map(|cell| EnergyReading {
                cell: *cell,
                energy: 4.0,
                recovered: true,
            })
            .collect();
        let expected: f64 = members
            .iter()
            .map(|c| 4.0 * index.get(c).map(|r| r.theta.sin()).unwrap_or(0.0))
            .sum();
        let score = aggregator(50.0).score(&readings, &index);
        assert_eq!(score.signed, 1);
        let chosen = score.chosen.expect("tower qualifies");
        assert!((chosen.energy - expected).abs() < 1e-9);
        assert_eq!(chosen.cells, 25);
        assert!(score.warnings.is_empty(), "{:?}", score.warnings);
    }

    #[test]
    fn unrecovered_readings_are_ignored() {
        let (index, members) = dead_tower_index();
        let readings: Vec<_> = members
            .iter()
            .map(|cell| EnergyReading {
                cell: *cell,
                energy: 40.0,
                recovered: false,
            })
            .collect();
        let score = aggregator(1.0).score(&readings, &index);
        assert_eq!(score.signed, 0);
        assert_eq!(score.inputs_used, 0);
    }

    #[test]
    fn partial_tower_is_reported_but_still_scored() {
        let (index, members) = dead_tower_index();
        let readings = [EnergyReading {
            cell: members[0],
            energy: 500.0,
            recovered: true,
        }];
        let score = aggregator(10.0).score(&readings, &index);
        assert_eq!(score.signed, 1);
        assert!(score.warnings.iter().any(|w| matches!(
            w,
            ConsistencyWarning::UnexpectedMemberCount {
                contributing: 1,
                expected: 25,
                ..
            }
        )));
    }

    #[test]
    fn membership_predicate_mismatch_is_reported() {
        let (index, members) = dead_tower_index();
        let readings = [EnergyReading {
            cell: members[3],
            energy: 1.0,
            recovered: true,
        }];
        let strict = GroupAggregator {
            membership: StatusPredicate::Exact(14),
            ..aggregator(100.0)
        };
        let score = strict.score(&readings, &index);
        assert_eq!(score.signed, 0);
        assert!(score.warnings.iter().any(|w| matches!(
            w,
            ConsistencyWarning::MembershipMismatch { offending: 25, .. }
        )));
    }
}
