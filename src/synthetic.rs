use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::league::InMemoryLeague;
use crate::player::{Attribute, Attributes, Player, PlayerId, TeamId};
use crate::position::Position;
use crate::team::{DefensiveScheme, Team};

use Position::*;

/// Natural positions and head counts for a 53-man roster.
pub const ROSTER_TEMPLATE: &[(Position, usize)] = &[
    (QB, 3),
    (HB, 3),
    (FB, 2),
    (WR, 5),
    (TE, 3),
    (LT, 2),
    (LG, 2),
    (C, 2),
    (RG, 2),
    (RT, 2),
    (LE, 2),
    (RE, 2),
    (DT, 4),
    (LOLB, 2),
    (MLB, 3),
    (ROLB, 2),
    (CB, 6),
    (FS, 2),
    (SS, 2),
    (K, 1),
    (P, 1),
];

pub fn roster_size() -> usize {
    ROSTER_TEMPLATE.iter().map(|(_, n)| n).sum()
}

fn is_specialty(position: Position, attribute: Attribute) -> bool {
    match attribute {
        Attribute::ThrowPower | Attribute::ThrowAccuracy => position == QB,
        Attribute::KickPower | Attribute::KickAccuracy => matches!(position, K | P),
        _ => true,
    }
}

fn random_attributes(rng: &mut ChaCha8Rng, position: Position) -> Attributes {
    let quality: i32 = rng.gen_range(45..=90);
    let mut attributes = Attributes::default();
    for attribute in Attribute::ALL {
        let value = if is_specialty(position, attribute) {
            quality + rng.gen_range(-12..=12)
        } else {
            rng.gen_range(10..=40)
        };
        attributes.set(attribute, value.clamp(0, 99) as u8);
    }
    attributes
}

/// Build a league of `team_count` full rosters. The same seed always yields
/// the same league. Player ids ascend through each roster.
pub fn generate_league(seed: u64, team_count: u32) -> InMemoryLeague {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut league = InMemoryLeague::default();
    let mut next_id: PlayerId = 1;

    for team_id in 0..team_count {
        let scheme = if rng.gen_bool(0.5) {
            DefensiveScheme::Front43
        } else {
            DefensiveScheme::Front34
        };
        let con = rng.gen_range(1.0..=9.0);
        league.add_team(Team::new(team_id, scheme, con));

        for player in generate_roster(&mut rng, team_id, next_id) {
            next_id = player.player_id + 1;
            league.add_player(player);
        }
    }

    league
}

fn generate_roster(rng: &mut ChaCha8Rng, team_id: TeamId, first_id: PlayerId) -> Vec<Player> {
    let mut players = Vec::with_capacity(roster_size());
    let mut player_id = first_id;

    for &(position, count) in ROSTER_TEMPLATE {
        for _ in 0..count {
            let age: u8 = rng.gen_range(21..=36);
            let years_pro = rng.gen_range(0..=(age - 21).min(15));
            let attributes = random_attributes(rng, position);
            players.push(Player::new(player_id, team_id, position, age, years_pro, attributes));
            player_id += 1;
        }
    }

    players
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::LeagueSource;

    #[test]
    fn test_roster_size() {
        assert_eq!(roster_size(), 53);
    }

    #[test]
    fn test_same_seed_same_league() {
        let a = generate_league(42, 3);
        let b = generate_league(42, 3);
        assert_eq!(a.all_players(), b.all_players());
        assert_eq!(a.team(2), b.team(2));
    }

    #[test]
    fn test_rosters_are_complete() {
        let league = generate_league(7, 4);
        assert_eq!(league.team_count(), 4);
        assert_eq!(league.team_ids(), vec![0, 1, 2, 3]);
        for team_id in league.team_ids() {
            let players = league.players(team_id);
            assert_eq!(players.len(), 53);
            assert!(players.windows(2).all(|w| w[0].player_id < w[1].player_id));
        }
    }
}
