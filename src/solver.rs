use log::debug;

use crate::error::{DepthChartError, Result};
use crate::player::{PlayerId, TeamId};
use crate::position::Position;
use crate::team::DefensiveScheme;
use crate::valuation::ScoreTable;

use Position::*;

/// One seat in a position group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroupSlot {
    pub position: Position,

    /// Multiplier on the chosen player's score
    pub weight: f64,
}

const fn slot(position: Position, weight: f64) -> GroupSlot {
    GroupSlot { position, weight }
}

/// A cluster of slots whose starters are chosen jointly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionGroup {
    pub name: &'static str,
    pub slots: &'static [GroupSlot],
}

impl PositionGroup {
    /// Distinct positions in slot order, with how many seats each has.
    pub fn seat_counts(&self) -> Vec<(Position, usize)> {
        let mut counts: Vec<(Position, usize)> = Vec::new();
        for s in self.slots {
            match counts.iter_mut().find(|(p, _)| *p == s.position) {
                Some(entry) => entry.1 += 1,
                None => counts.push((s.position, 1)),
            }
        }
        counts
    }
}

/// Two halfbacks (the second at half value), a fullback, and a tight end.
pub const BACKFIELD: PositionGroup = PositionGroup {
    name: "backfield",
    slots: &[slot(HB, 1.0), slot(HB, 0.5), slot(FB, 1.0), slot(TE, 1.0)],
};

pub const OFFENSIVE_LINE: PositionGroup = PositionGroup {
    name: "offensive line",
    slots: &[
        slot(LT, 1.0),
        slot(LG, 1.0),
        slot(C, 1.0),
        slot(RG, 1.0),
        slot(RT, 1.0),
    ],
};

pub const DEFENSIVE_LINE_34: PositionGroup = PositionGroup {
    name: "3-4 defensive line",
    slots: &[slot(LE, 1.0), slot(RE, 1.0), slot(DT, 1.0)],
};

pub const DEFENSIVE_LINE_43: PositionGroup = PositionGroup {
    name: "4-3 defensive line",
    slots: &[slot(LE, 1.0), slot(RE, 1.0), slot(DT, 1.0), slot(DT, 0.98)],
};

pub const LINEBACKERS_43: PositionGroup = PositionGroup {
    name: "4-3 linebackers",
    slots: &[slot(LOLB, 1.0), slot(ROLB, 1.0), slot(MLB, 1.0)],
};

pub const LINEBACKERS_34: PositionGroup = PositionGroup {
    name: "3-4 linebackers",
    slots: &[slot(LOLB, 1.0), slot(ROLB, 1.0), slot(MLB, 1.0), slot(MLB, 0.98)],
};

/// Five corners with steeply falling weights, plus both safeties.
pub const SECONDARY: PositionGroup = PositionGroup {
    name: "secondary",
    slots: &[
        slot(CB, 1.0),
        slot(CB, 0.98),
        slot(CB, 0.3),
        slot(CB, 0.15),
        slot(CB, 0.08),
        slot(FS, 1.0),
        slot(SS, 1.0),
    ],
};

pub fn defensive_line(scheme: DefensiveScheme) -> PositionGroup {
    match scheme {
        DefensiveScheme::Front34 => DEFENSIVE_LINE_34,
        DefensiveScheme::Front43 => DEFENSIVE_LINE_43,
    }
}

pub fn linebackers(scheme: DefensiveScheme) -> PositionGroup {
    if scheme != DefensiveScheme::Front34 {
        LINEBACKERS_43
    } else {
        LINEBACKERS_34
    }
}

/// Winning starters for a group, one per slot, in slot order.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupAssignment {
    pub players: Vec<PlayerId>,
    pub total: f64,
}

impl GroupAssignment {
    /// Players seated at `position`, in slot order.
    pub fn at(&self, group: &PositionGroup, position: Position) -> Vec<PlayerId> {
        group
            .slots
            .iter()
            .zip(&self.players)
            .filter(|(s, _)| s.position == position)
            .map(|(_, &id)| id)
            .collect()
    }
}

struct Search<'a> {
    pools: Vec<&'a [(PlayerId, f64)]>,
    weights: Vec<f64>,
    current: Vec<PlayerId>,
    best: Option<GroupAssignment>,
    visited: u64,
}

impl Search<'_> {
    fn descend(&mut self, depth: usize, total: f64) {
        if depth == self.pools.len() {
            self.visited += 1;
            if self.best.as_ref().map_or(true, |b| total > b.total) {
                self.best = Some(GroupAssignment {
                    players: self.current.clone(),
                    total,
                });
            }
            return;
        }

        let pool = self.pools[depth];
        let weight = self.weights[depth];
        for &(player_id, score) in pool {
            if self.current.contains(&player_id) {
                continue;
            }
            self.current.push(player_id);
            self.descend(depth + 1, total + weight * score);
            self.current.pop();
        }
    }
}

/// Find the best disjoint assignment of `group` for one team.
///
/// Each seat takes one distinct player from its slot's pool, maximising the
/// weighted sum of scores.
/// Pools are walked in insertion order and only a strictly better total
/// replaces the running best, so among equal totals the first one found wins.
pub fn solve(
    team_id: TeamId,
    group: &PositionGroup,
    scores: &ScoreTable,
) -> Result<GroupAssignment> {
    for (position, required) in group.seat_counts() {
        let available = scores.pool(position).len();
        if available < required {
            return Err(DepthChartError::InsufficientCandidates {
                team_id,
                group: group.name,
                position,
                required,
                available,
            });
        }
    }

    let mut search = Search {
        pools: group.slots.iter().map(|s| scores.pool(s.position)).collect(),
        weights: group.slots.iter().map(|s| s.weight).collect(),
        current: Vec::with_capacity(group.slots.len()),
        best: None,
        visited: 0,
    };
    search.descend(0, 0.0);

    debug!(
        "Team {}: {} search visited {} assignments",
        team_id, group.name, search.visited
    );

    // Every pool was large enough on its own, but the pools overlap too much
    // to seat distinct players in every slot.
    search.best.ok_or_else(|| {
        let mut distinct: Vec<PlayerId> = group
            .slots
            .iter()
            .flat_map(|s| scores.pool(s.position).iter().map(|(id, _)| *id))
            .collect();
        distinct.sort_unstable();
        distinct.dedup();
        DepthChartError::InsufficientCandidates {
            team_id,
            group: group.name,
            position: group.slots[0].position,
            required: group.slots.len(),
            available: distinct.len(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn table(entries: &[(Position, PlayerId, f64)]) -> ScoreTable {
        let mut table = ScoreTable::new();
        for &(position, id, score) in entries {
            table.push(position, id, score);
        }
        table
    }

    #[test]
    fn test_seat_counts() {
        assert_eq!(SECONDARY.seat_counts(), vec![(CB, 5), (FS, 1), (SS, 1)]);
        assert_eq!(BACKFIELD.seat_counts(), vec![(HB, 2), (FB, 1), (TE, 1)]);
    }

    #[test]
    fn test_scheme_topologies() {
        assert_eq!(defensive_line(DefensiveScheme::Front34).slots.len(), 3);
        assert_eq!(defensive_line(DefensiveScheme::Front43).slots.len(), 4);
        assert_eq!(linebackers(DefensiveScheme::Front43).slots.len(), 3);
        assert_eq!(linebackers(DefensiveScheme::Front34).slots.len(), 4);
    }

    #[test]
    fn test_picks_joint_optimum_over_greedy() {
        // Player 1 is the best DT and a decent LE; greedy LE-first would take
        // him at LE and leave a weak DT.
        let scores = table(&[
            (LE, 1, 50.0),
            (LE, 2, 48.0),
            (RE, 3, 40.0),
            (DT, 1, 60.0),
            (DT, 4, 20.0),
        ]);
        let result = solve(0, &DEFENSIVE_LINE_34, &scores).unwrap();
        assert_eq!(result.players, vec![2, 3, 1]);
        assert!((result.total - 148.0).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_first_found() {
        let scores = table(&[
            (LOLB, 1, 10.0),
            (LOLB, 2, 10.0),
            (ROLB, 1, 10.0),
            (ROLB, 2, 10.0),
            (MLB, 3, 10.0),
        ]);
        let result = solve(0, &LINEBACKERS_43, &scores).unwrap();
        assert_eq!(result.players, vec![1, 2, 3]);
    }

    #[test]
    fn test_flex_weights_order_corners() {
        let mut entries: Vec<(Position, PlayerId, f64)> = [65.0, 70.0, 90.0, 75.0, 85.0, 80.0]
            .iter()
            .enumerate()
            .map(|(i, &s)| (CB, i as PlayerId + 1, s))
            .collect();
        entries.push((FS, 20, 88.0));
        entries.push((SS, 21, 86.0));
        let scores = table(&entries);

        let result = solve(0, &SECONDARY, &scores).unwrap();
        assert_eq!(result.at(&SECONDARY, CB), vec![3, 5, 6, 4, 2]);
        assert_eq!(result.at(&SECONDARY, FS), vec![20]);
        assert_eq!(result.at(&SECONDARY, SS), vec![21]);
    }

    #[test]
    fn test_empty_pool_is_insufficient() {
        let scores = table(&[(LT, 1, 10.0), (LG, 2, 10.0)]);
        match solve(7, &OFFENSIVE_LINE, &scores) {
            Err(DepthChartError::InsufficientCandidates {
                team_id,
                position,
                required,
                available,
                ..
            }) => {
                assert_eq!(team_id, 7);
                assert_eq!(position, C);
                assert_eq!(required, 1);
                assert_eq!(available, 0);
            }
            other => panic!("expected InsufficientCandidates, got {:?}", other),
        }
    }

    #[test]
    fn test_overlapping_pools_are_insufficient() {
        // Two halfbacks are needed but the only HB candidates also fill FB/TE.
        let scores = table(&[
            (HB, 1, 10.0),
            (HB, 2, 10.0),
            (FB, 1, 10.0),
            (TE, 2, 10.0),
        ]);
        assert!(matches!(
            solve(0, &BACKFIELD, &scores),
            Err(DepthChartError::InsufficientCandidates { required: 4, available: 2, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_assignment_is_distinct(
            cb in proptest::collection::vec((1u32..12, 0.0f64..100.0), 5..8),
            fs in proptest::collection::vec((1u32..12, 0.0f64..100.0), 1..4),
            ss in proptest::collection::vec((1u32..12, 0.0f64..100.0), 1..4),
        ) {
            let mut scores = ScoreTable::new();
            let mut seen = HashSet::new();
            for (position, pool) in [(CB, &cb), (FS, &fs), (SS, &ss)] {
                seen.clear();
                for &(id, score) in pool.iter() {
                    if seen.insert(id) {
                        scores.push(position, id, score);
                    }
                }
            }

            if let Ok(result) = solve(0, &SECONDARY, &scores) {
                let unique: HashSet<_> = result.players.iter().collect();
                prop_assert_eq!(unique.len(), result.players.len());
                prop_assert_eq!(result.players.len(), SECONDARY.slots.len());
            }
        }
    }
}
