use serde::{Deserialize, Serialize};

use crate::constants::NEUTRAL_CON;
use crate::player::TeamId;

/// Defensive front a team plays.
///
/// The front changes how many defensive linemen and linebackers start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefensiveScheme {
    #[default]
    Front43,
    Front34,
}

/// Team snapshot read by the depth chart engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: TeamId,

    pub scheme: DefensiveScheme,

    /// Development rate coefficient (5.0 = neutral)
    #[serde(default = "default_con")]
    pub con: f64,
}

fn default_con() -> f64 {
    NEUTRAL_CON
}

impl Team {
    pub fn new(team_id: TeamId, scheme: DefensiveScheme, con: f64) -> Self {
        Team {
            team_id,
            scheme,
            con,
        }
    }

    /// Coefficient used for progression-aware scoring.
    ///
    /// Without progression every team is treated as neutral, which zeroes
    /// both the youth bonus and the age decline.
    pub fn progression_con(&self, with_progression: bool) -> f64 {
        if with_progression {
            self.con
        } else {
            NEUTRAL_CON
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progression_con() {
        let team = Team::new(3, DefensiveScheme::Front34, 2.0);
        assert_eq!(team.progression_con(true), 2.0);
        assert_eq!(team.progression_con(false), NEUTRAL_CON);
    }

    #[test]
    fn test_con_defaults_when_missing() {
        let team: Team = serde_json::from_str(r#"{"team_id": 1, "scheme": "Front34"}"#).unwrap();
        assert_eq!(team.scheme, DefensiveScheme::Front34);
        assert_eq!(team.con, NEUTRAL_CON);
    }
}
