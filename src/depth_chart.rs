use serde::{Deserialize, Serialize};

use crate::catalog::PositionCatalog;
use crate::constants::SLOT_COUNT;
use crate::error::Result;
use crate::player::{PlayerId, TeamId};
use crate::position::Position;
use crate::team::DefensiveScheme;

/// One row handed to the depth chart store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepthChartEntry {
    pub team_id: TeamId,
    pub position: Position,

    /// 0 = starter
    pub depth_order: usize,

    pub player_id: PlayerId,
}

/// Ordered players at every slot for one team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TeamDepthChartRecord")]
pub struct TeamDepthChart {
    pub team_id: TeamId,
    pub scheme: DefensiveScheme,
    slots: Vec<Vec<PlayerId>>,

    /// Players designated as starters, in the order they were chosen
    starters: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct TeamDepthChartRecord {
    team_id: TeamId,
    scheme: DefensiveScheme,
    slots: Vec<Vec<PlayerId>>,
    #[serde(default)]
    starters: Vec<PlayerId>,
}

impl TryFrom<TeamDepthChartRecord> for TeamDepthChart {
    type Error = String;

    fn try_from(record: TeamDepthChartRecord) -> std::result::Result<Self, Self::Error> {
        if record.slots.len() != SLOT_COUNT {
            return Err(format!(
                "Team {}: expected {} depth chart slots, found {}",
                record.team_id,
                SLOT_COUNT,
                record.slots.len()
            ));
        }
        Ok(TeamDepthChart {
            team_id: record.team_id,
            scheme: record.scheme,
            slots: record.slots,
            starters: record.starters,
        })
    }
}

impl TeamDepthChart {
    pub fn new(team_id: TeamId, scheme: DefensiveScheme) -> Self {
        TeamDepthChart {
            team_id,
            scheme,
            slots: vec![Vec::new(); SLOT_COUNT],
            starters: Vec::new(),
        }
    }

    pub fn slot(&self, position: Position) -> &[PlayerId] {
        &self.slots[position.index()]
    }

    /// Append a player to the bottom of a slot. Returns false if the player
    /// was already listed there.
    pub fn push(&mut self, position: Position, player_id: PlayerId) -> bool {
        let slot = &mut self.slots[position.index()];
        if slot.contains(&player_id) {
            return false;
        }
        slot.push(player_id);
        true
    }

    pub fn starters(&self) -> &[PlayerId] {
        &self.starters
    }

    pub fn is_starter(&self, player_id: PlayerId) -> bool {
        self.starters.contains(&player_id)
    }

    pub fn add_starter(&mut self, player_id: PlayerId) {
        if !self.starters.contains(&player_id) {
            self.starters.push(player_id);
        }
    }

    /// The top of a slot, down to the scheme's starter count.
    pub fn starters_at(
        &self,
        position: Position,
        catalog: &PositionCatalog,
    ) -> Result<&[PlayerId]> {
        let slot = self.slot(position);
        let count = catalog.starters(position, self.scheme)?.min(slot.len());
        Ok(&slot[..count])
    }

    /// Slots a player is listed at, with depth.
    pub fn listings(&self, player_id: PlayerId) -> Vec<(Position, usize)> {
        Position::ALL
            .iter()
            .filter_map(|&pos| {
                self.slot(pos)
                    .iter()
                    .position(|&id| id == player_id)
                    .map(|depth| (pos, depth))
            })
            .collect()
    }

    pub fn entries(&self) -> Vec<DepthChartEntry> {
        Position::ALL
            .iter()
            .flat_map(|&position| {
                self.slot(position)
                    .iter()
                    .enumerate()
                    .map(move |(depth_order, &player_id)| DepthChartEntry {
                        team_id: self.team_id,
                        position,
                        depth_order,
                        player_id,
                    })
            })
            .collect()
    }
}

/// Replacement depth charts for a whole league.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueDepthChart {
    pub teams: Vec<TeamDepthChart>,
}

impl LeagueDepthChart {
    pub fn team(&self, team_id: TeamId) -> Option<&TeamDepthChart> {
        self.teams.iter().find(|t| t.team_id == team_id)
    }

    pub fn entries(&self) -> Vec<DepthChartEntry> {
        self.teams.iter().flat_map(TeamDepthChart::entries).collect()
    }
}
