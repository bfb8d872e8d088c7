use std::collections::HashMap;

use crate::error::{DepthChartError, Result};
use crate::position::Position;

use Position::*;

/// Awareness discounts for playing out of position, as
/// (natural, alternate, factor). Identity pairs are added separately.
const CROSS_POSITION_FACTORS: &[(Position, Position, f64)] = &[
    // Backfield and receivers
    (HB, FB, 0.65),
    (HB, WR, 0.80),
    (FB, HB, 0.90),
    (FB, TE, 0.85),
    (TE, FB, 0.85),
    (TE, WR, 0.9),
    // Offensive line
    (LT, LG, 0.8),
    (LT, C, 0.7),
    (LT, RG, 0.8),
    (LT, RT, 0.9),
    (LG, LT, 0.85),
    (LG, C, 0.8),
    (LG, RG, 0.9),
    (LG, RT, 0.8),
    (C, LT, 0.8),
    (C, LG, 0.8),
    (C, RG, 0.8),
    (C, RT, 0.8),
    (RG, LT, 0.8),
    (RG, LG, 0.9),
    (RG, C, 0.8),
    (RG, RT, 0.85),
    (RT, LT, 0.9),
    (RT, LG, 0.8),
    (RT, C, 0.7),
    (RT, RG, 0.8),
    // Defensive line
    (LE, RE, 0.9),
    (LE, DT, 0.9),
    (RE, LE, 0.85),
    (RE, DT, 0.9),
    (DT, LE, 0.8),
    (DT, RE, 0.85),
    // Linebackers
    (LOLB, MLB, 0.85),
    (LOLB, ROLB, 0.85),
    (MLB, LOLB, 0.8),
    (MLB, ROLB, 0.8),
    (ROLB, LOLB, 0.85),
    (ROLB, MLB, 0.85),
    // Secondary
    (CB, FS, 0.50),
    (CB, SS, 0.50),
    (FS, CB, 0.80),
    (FS, SS, 0.85),
    (SS, CB, 0.80),
    (SS, FS, 0.85),
    // Returners
    (HB, KR, 1.0),
    (WR, KR, 1.0),
    (CB, KR, 1.0),
    (FS, KR, 1.0),
    (SS, KR, 1.0),
    (HB, PR, 1.0),
    (WR, PR, 1.0),
    (CB, PR, 1.0),
    (FS, PR, 1.0),
    (SS, PR, 1.0),
    // Kickoffs
    (K, KOS, 1.0),
    (P, KOS, 1.0),
    // Long snapper
    (LT, LS, 1.0),
    (LG, LS, 1.0),
    (C, LS, 1.0),
    (RG, LS, 1.0),
    (RT, LS, 1.0),
    // Third down back
    (HB, ThirdDownBack, 1.0),
];

/// Which alternate slots each natural position may be scored at, and the
/// awareness discount applied when it is.
#[derive(Clone, Debug)]
pub struct EligibilityMatrix {
    by_natural: HashMap<Position, Vec<(Position, f64)>>,
}

impl Default for EligibilityMatrix {
    fn default() -> Self {
        let mut matrix = EligibilityMatrix {
            by_natural: HashMap::new(),
        };

        for natural in Position::ALL.iter().take(Position::NATURAL_COUNT) {
            matrix.insert(*natural, *natural, 1.0);
        }
        for &(natural, alternate, factor) in CROSS_POSITION_FACTORS {
            matrix.insert(natural, alternate, factor);
        }

        matrix
    }
}

impl EligibilityMatrix {
    /// Add or update a pair. Alternates keep their first insertion order.
    pub fn insert(&mut self, natural: Position, alternate: Position, factor: f64) {
        let alternates = self.by_natural.entry(natural).or_default();
        match alternates.iter_mut().find(|(alt, _)| *alt == alternate) {
            Some(entry) => entry.1 = factor,
            None => alternates.push((alternate, factor)),
        }
    }

    pub fn factor(&self, natural: Position, alternate: Position) -> Option<f64> {
        self.by_natural
            .get(&natural)?
            .iter()
            .find(|(alt, _)| *alt == alternate)
            .map(|&(_, factor)| factor)
    }

    /// Like [`factor`](Self::factor), but an absent pair is an error.
    pub fn require(&self, natural: Position, alternate: Position) -> Result<f64> {
        self.factor(natural, alternate)
            .ok_or(DepthChartError::UnknownEligibility { natural, alternate })
    }

    /// Every slot a natural position can be scored at, identity first.
    pub fn alternates(&self, natural: Position) -> &[(Position, f64)] {
        self.by_natural
            .get(&natural)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
