use std::collections::HashMap;

use crate::catalog::PositionCatalog;
use crate::depth_chart::TeamDepthChart;
use crate::error::Result;
use crate::player::{Player, PlayerId};
use crate::position::Position;
use crate::team::Team;
use crate::valuation::ScoreTable;

/// Working state for one team's depth chart computation.
///
/// Owned by a single worker from scoring through the last backfill, so
/// teams never share mutable state.
#[derive(Debug)]
pub struct TeamContext<'a> {
    pub team: &'a Team,
    pub catalog: &'a PositionCatalog,
    pub scores: ScoreTable,
    pub chart: TeamDepthChart,
    naturals: HashMap<PlayerId, Position>,
}

impl<'a> TeamContext<'a> {
    pub fn new(
        team: &'a Team,
        catalog: &'a PositionCatalog,
        players: &[Player],
        scores: ScoreTable,
    ) -> Self {
        TeamContext {
            team,
            catalog,
            scores,
            chart: TeamDepthChart::new(team.team_id, team.scheme),
            naturals: players.iter().map(|p| (p.player_id, p.position)).collect(),
        }
    }

    pub fn natural_position(&self, player_id: PlayerId) -> Option<Position> {
        self.naturals.get(&player_id).copied()
    }

    /// Snapshot of the starters designated so far.
    pub fn starters(&self) -> Vec<PlayerId> {
        self.chart.starters().to_vec()
    }

    pub fn starter_count(&self, position: Position) -> Result<usize> {
        self.catalog.starters(position, self.team.scheme)
    }

    /// List a player at the bottom of `position`, designating them a starter
    /// when `depth` is inside the slot's starter count. Specialist slots
    /// never designate starters. A player already listed at `position` is
    /// left where they are.
    pub fn place(&mut self, position: Position, depth: usize, player_id: PlayerId) -> Result<()> {
        let starters = self.starter_count(position)?;
        if !self.chart.push(position, player_id) {
            return Ok(());
        }
        if !position.is_specialist() && depth < starters {
            self.chart.add_starter(player_id);
        }
        Ok(())
    }
}
