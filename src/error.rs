use thiserror::Error;

use crate::player::TeamId;
use crate::position::Position;

pub type Result<T> = std::result::Result<T, DepthChartError>;

#[derive(Debug, Error)]
pub enum DepthChartError {
    #[error(
        "Team {team_id}: {group} needs {required} candidate(s) at {position}, {available} eligible"
    )]
    InsufficientCandidates {
        team_id: TeamId,
        group: &'static str,
        position: Position,
        required: usize,
        available: usize,
    },

    #[error("No eligibility factor for a natural {natural} playing {alternate}")]
    UnknownEligibility {
        natural: Position,
        alternate: Position,
    },

    #[error("Position catalog has no entry for {position}")]
    MalformedCatalog { position: Position },

    #[error("Team {0} not found in league source")]
    UnknownTeam(TeamId),

    #[error("Failed to load position catalog: {0}")]
    Catalog(String),

    #[error("Depth chart sink rejected the update: {0}")]
    Sink(String),
}
