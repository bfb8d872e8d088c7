use std::ops::Range;

use log::trace;

use crate::context::TeamContext;
use crate::error::Result;
use crate::player::PlayerId;
use crate::position::Position;

/// Greedily fill `depths` of a slot from its candidate pool.
///
/// Each depth takes the best remaining candidate that is not in `excluded`
/// and, when `natural` is given, is rostered at exactly that position.
/// Filling stops early once nobody qualifies; a short list is not an error.
/// Returns how many players were placed.
pub fn fill(
    ctx: &mut TeamContext<'_>,
    position: Position,
    depths: Range<usize>,
    natural: Option<Position>,
    excluded: &[PlayerId],
) -> Result<usize> {
    let mut exclusions: Vec<PlayerId> = excluded.to_vec();
    let mut placed = 0;

    for depth in depths {
        let mut best: Option<(PlayerId, f64)> = None;

        for &(player_id, score) in ctx.scores.pool(position) {
            if exclusions.contains(&player_id) {
                continue;
            }
            if natural.is_some() && ctx.natural_position(player_id) != natural {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((player_id, score));
            }
        }

        let Some((player_id, score)) = best else {
            break;
        };

        trace!(
            "Team {}: {} depth {} -> player {} ({:.3})",
            ctx.team.team_id,
            position,
            depth,
            player_id,
            score
        );

        exclusions.push(player_id);
        ctx.place(position, depth, player_id)?;
        placed += 1;
    }

    Ok(placed)
}
