use log::{debug, warn};

use crate::backfill::fill;
use crate::catalog::PositionCatalog;
use crate::constants::{
    CB_DEPTH, DEFAULT_DEPTH, DT_DEPTH, MLB_DEPTH, WR_DEPTH, WR_NATURAL_DEPTH,
};
use crate::context::TeamContext;
use crate::depth_chart::TeamDepthChart;
use crate::eligibility::EligibilityMatrix;
use crate::error::{DepthChartError, Result};
use crate::player::{Player, PlayerId};
use crate::position::Position;
use crate::solver::{self, PositionGroup};
use crate::team::{DefensiveScheme, Team};
use crate::valuation::Valuator;

/// What to do when a position group cannot seat distinct starters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShortRosterPolicy {
    /// Fail the team with `InsufficientCandidates`.
    #[default]
    Abort,
    /// Skip the group search and fill its slots greedily.
    Degrade,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub short_roster: ShortRosterPolicy,
}

/// Who is excluded from a group's backup spots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BackupExclusion {
    /// Everyone seated by the group search
    Group,
    /// Only players designated as starters so far
    Starters,
}

/// Total players listed at a slot filled by a group search.
fn listed_depth(position: Position) -> usize {
    match position {
        Position::DT => DT_DEPTH,
        Position::MLB => MLB_DEPTH,
        Position::WR => WR_DEPTH,
        Position::CB => CB_DEPTH,
        _ => DEFAULT_DEPTH,
    }
}

/// Builds depth charts from roster snapshots.
#[derive(Clone, Debug)]
pub struct DepthChartEngine {
    catalog: PositionCatalog,
    eligibility: EligibilityMatrix,
    config: EngineConfig,
}

impl Default for DepthChartEngine {
    fn default() -> Self {
        DepthChartEngine::new(None, EngineConfig::default())
    }
}

impl DepthChartEngine {
    /// Create an engine. Without a catalog the built-in defaults are used.
    pub fn new(catalog: Option<PositionCatalog>, config: EngineConfig) -> Self {
        DepthChartEngine {
            catalog: catalog.unwrap_or_default(),
            eligibility: EligibilityMatrix::default(),
            config,
        }
    }

    pub fn with_eligibility(mut self, eligibility: EligibilityMatrix) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn catalog(&self) -> &PositionCatalog {
        &self.catalog
    }

    pub fn eligibility(&self) -> &EligibilityMatrix {
        &self.eligibility
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn valuator(&self) -> Valuator<'_> {
        Valuator::new(&self.catalog, &self.eligibility)
    }

    /// Score one player at one slot.
    pub fn score(
        &self,
        player: &Player,
        alternate: Position,
        scheme: DefensiveScheme,
        con: f64,
    ) -> Result<f64> {
        self.valuator().score(player, alternate, scheme, con)
    }

    /// Compute a full depth chart for one team.
    ///
    /// Players rostered on other teams are ignored. Roster order is the
    /// tie-break order for equal scores.
    pub fn build_team_chart(
        &self,
        team: &Team,
        players: &[Player],
        with_progression: bool,
    ) -> Result<TeamDepthChart> {
        let roster: Vec<Player> = players
            .iter()
            .filter(|p| p.team_id == team.team_id)
            .cloned()
            .collect();
        let con = team.progression_con(with_progression);
        let scores = self.valuator().score_roster(&roster, team.scheme, con)?;
        let mut ctx = TeamContext::new(team, &self.catalog, &roster, scores);

        debug!(
            "Team {}: sorting {} players ({:?}, con {})",
            team.team_id,
            roster.len(),
            team.scheme,
            con
        );

        // Quarterbacks have no flex partners
        let starters = ctx.starters();
        fill(&mut ctx, Position::QB, 0..DEFAULT_DEPTH, None, &starters)?;

        self.run_group(&mut ctx, &solver::BACKFIELD, BackupExclusion::Group)?;

        // Starting receivers come from natural WRs only. No formation uses
        // five receivers with a back and tight end, so the fifth spot is open
        // to anyone left.
        fill(&mut ctx, Position::WR, 0..WR_NATURAL_DEPTH, Some(Position::WR), &[])?;
        let listed = ctx.chart.slot(Position::WR).to_vec();
        fill(&mut ctx, Position::WR, WR_NATURAL_DEPTH..WR_DEPTH, None, &listed)?;

        self.run_group(&mut ctx, &solver::OFFENSIVE_LINE, BackupExclusion::Group)?;
        self.run_group(&mut ctx, &solver::defensive_line(team.scheme), BackupExclusion::Group)?;
        self.run_group(&mut ctx, &solver::linebackers(team.scheme), BackupExclusion::Group)?;

        // Corners seated beyond the starters may still back up at safety.
        self.run_group(&mut ctx, &solver::SECONDARY, BackupExclusion::Starters)?;

        self.fill_specialists(&mut ctx)?;

        debug!(
            "Team {}: {} starters, {} listings",
            team.team_id,
            ctx.chart.starters().len(),
            ctx.chart.entries().len()
        );

        Ok(ctx.chart)
    }

    fn fill_specialists(&self, ctx: &mut TeamContext<'_>) -> Result<()> {
        fill(ctx, Position::P, 0..DEFAULT_DEPTH, None, &[])?;
        fill(ctx, Position::K, 0..DEFAULT_DEPTH, None, &[])?;

        // Kick and punt returners share a pool; starters stay off both.
        let starters = ctx.starters();
        fill(ctx, Position::KR, 0..DEFAULT_DEPTH, None, &starters)?;
        fill(ctx, Position::PR, 0..DEFAULT_DEPTH, None, &starters)?;

        fill(ctx, Position::KOS, 0..DEFAULT_DEPTH, None, &[])?;

        let starters = ctx.starters();
        fill(ctx, Position::LS, 0..DEFAULT_DEPTH, None, &starters)?;

        fill(ctx, Position::ThirdDownBack, 0..DEFAULT_DEPTH, None, &[])?;
        Ok(())
    }

    /// Seat a group's starters, then fill each of its slots with backups.
    fn run_group(
        &self,
        ctx: &mut TeamContext<'_>,
        group: &PositionGroup,
        exclusion: BackupExclusion,
    ) -> Result<()> {
        let assignment = match solver::solve(ctx.team.team_id, group, &ctx.scores) {
            Ok(assignment) => assignment,
            Err(err @ DepthChartError::InsufficientCandidates { .. })
                if self.config.short_roster == ShortRosterPolicy::Degrade =>
            {
                warn!("{}; filling {} greedily", err, group.name);
                return self.degrade_group(ctx, group);
            }
            Err(err) => return Err(err),
        };

        debug!(
            "Team {}: {} starters {:?} (total {:.3})",
            ctx.team.team_id, group.name, assignment.players, assignment.total
        );

        let seat_counts = group.seat_counts();
        for &(position, _) in &seat_counts {
            for (depth, player_id) in assignment.at(group, position).into_iter().enumerate() {
                ctx.place(position, depth, player_id)?;
            }
        }

        let excluded: Vec<PlayerId> = match exclusion {
            BackupExclusion::Group => assignment.players.clone(),
            BackupExclusion::Starters => ctx.starters(),
        };
        for (position, seats) in seat_counts {
            fill(ctx, position, seats..listed_depth(position), None, &excluded)?;
        }

        Ok(())
    }

    fn degrade_group(&self, ctx: &mut TeamContext<'_>, group: &PositionGroup) -> Result<()> {
        for (position, _) in group.seat_counts() {
            let starters = ctx.starters();
            fill(ctx, position, 0..listed_depth(position), None, &starters)?;
        }
        Ok(())
    }
}
