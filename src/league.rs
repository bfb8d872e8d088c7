use log::info;
use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::depth_chart::{DepthChartEntry, LeagueDepthChart, TeamDepthChart};
use crate::engine::DepthChartEngine;
use crate::error::{DepthChartError, Result};
use crate::player::{Player, TeamId};
use crate::team::Team;

/// Read-only access to the league snapshot.
pub trait LeagueSource {
    /// Teams to chart, in output order.
    fn team_ids(&self) -> Vec<TeamId>;

    fn team(&self, team_id: TeamId) -> Option<Team>;

    /// Roster for a team, in the order ties should be broken.
    fn players(&self, team_id: TeamId) -> Vec<Player>;
}

/// Destination for a freshly computed league depth chart.
pub trait DepthChartSink {
    /// Replace every stored entry with `entries`.
    fn replace_all(&mut self, entries: Vec<DepthChartEntry>) -> Result<()>;
}

/// League snapshot held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLeague {
    teams: BTreeMap<TeamId, Team>,
    players: Vec<Player>,
}

impl InMemoryLeague {
    pub fn new(teams: impl IntoIterator<Item = Team>, players: Vec<Player>) -> Self {
        InMemoryLeague {
            teams: teams.into_iter().map(|t| (t.team_id, t)).collect(),
            players,
        }
    }

    pub fn add_team(&mut self, team: Team) {
        self.teams.insert(team.team_id, team);
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn all_players(&self) -> &[Player] {
        &self.players
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

impl LeagueSource for InMemoryLeague {
    fn team_ids(&self) -> Vec<TeamId> {
        self.teams.keys().copied().collect()
    }

    fn team(&self, team_id: TeamId) -> Option<Team> {
        self.teams.get(&team_id).cloned()
    }

    fn players(&self, team_id: TeamId) -> Vec<Player> {
        self.players
            .iter()
            .filter(|p| p.team_id == team_id)
            .cloned()
            .collect()
    }
}

/// Depth chart table kept in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryDepthChartStore {
    entries: Vec<DepthChartEntry>,
    writes: usize,
}

impl MemoryDepthChartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<DepthChartEntry>) -> Self {
        MemoryDepthChartStore { entries, writes: 0 }
    }

    pub fn entries(&self) -> &[DepthChartEntry] {
        &self.entries
    }

    /// Number of completed `replace_all` calls.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DepthChartSink for MemoryDepthChartStore {
    fn replace_all(&mut self, entries: Vec<DepthChartEntry>) -> Result<()> {
        // Stale rows for players no longer on a roster must not survive.
        self.entries = entries;
        self.writes += 1;
        Ok(())
    }
}

impl DepthChartEngine {
    /// Depth chart for one team pulled from `source`.
    pub fn sort_team_depth_chart<S>(
        &self,
        source: &S,
        team_id: TeamId,
        with_progression: bool,
    ) -> Result<TeamDepthChart>
    where
        S: LeagueSource + ?Sized,
    {
        let team = source
            .team(team_id)
            .ok_or(DepthChartError::UnknownTeam(team_id))?;
        let players = source.players(team_id);
        self.build_team_chart(&team, &players, with_progression)
    }

    /// Compute every team's chart without writing anything.
    ///
    /// Teams are independent, so they run in parallel. Results keep the
    /// source's team order.
    pub fn compute_league_depth_charts<S>(
        &self,
        source: &S,
        with_progression: bool,
    ) -> Result<LeagueDepthChart>
    where
        S: LeagueSource + Sync + ?Sized,
    {
        let team_ids = source.team_ids();

        let teams = team_ids
            .par_iter()
            .map(|&team_id| self.sort_team_depth_chart(source, team_id, with_progression))
            .collect::<Result<Vec<_>>>()?;

        Ok(LeagueDepthChart { teams })
    }

    /// Recompute every team's chart and hand the full replacement to `sink`.
    ///
    /// Nothing is written unless every team succeeds.
    pub fn reorder_league_depth_charts<S, K>(
        &self,
        source: &S,
        sink: &mut K,
        with_progression: bool,
    ) -> Result<LeagueDepthChart>
    where
        S: LeagueSource + Sync + ?Sized,
        K: DepthChartSink + ?Sized,
    {
        let league = self.compute_league_depth_charts(source, with_progression)?;
        let entries = league.entries();

        info!(
            "Reordered depth charts for {} teams ({} entries, progression {})",
            league.teams.len(),
            entries.len(),
            with_progression
        );

        sink.replace_all(entries)?;
        Ok(league)
    }
}
