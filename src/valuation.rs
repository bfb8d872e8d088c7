use statrs::distribution::{ContinuousCDF, Normal};

use crate::catalog::PositionCatalog;
use crate::constants::{MAX_RATING, PROGRESSION_HORIZON, VALUE_CURVE_MEAN, VALUE_CURVE_STDDEV};
use crate::eligibility::EligibilityMatrix;
use crate::error::Result;
use crate::player::{Attribute, Player, PlayerId};
use crate::position::Position;
use crate::team::DefensiveScheme;

use Attribute::*;

/// How an adjusted overall is built from raw attributes.
#[derive(Clone, Copy, Debug)]
pub enum RatingFormula {
    /// `round(sum(((attr - 50) / 10) * w)) + baseline`
    Centered {
        terms: &'static [(Attribute, f64)],
        baseline: f64,
    },
    /// `intercept + sum(attr * w)`, optionally rounded
    Linear {
        intercept: f64,
        terms: &'static [(Attribute, f64)],
        rounded: bool,
    },
    /// A single attribute taken as is
    Raw(Attribute),
}

impl RatingFormula {
    pub fn terms(&self) -> &'static [(Attribute, f64)] {
        match self {
            RatingFormula::Centered { terms, .. } | RatingFormula::Linear { terms, .. } => terms,
            RatingFormula::Raw(_) => &[],
        }
    }

    /// The attribute with the largest weight.
    pub fn dominant_attribute(&self) -> Attribute {
        match self {
            RatingFormula::Raw(attribute) => *attribute,
            _ => self
                .terms()
                .iter()
                .copied()
                .fold(None::<(Attribute, f64)>, |best, term| match best {
                    Some(b) if b.1 >= term.1 => Some(b),
                    _ => Some(term),
                })
                .map(|(attribute, _)| attribute)
                .unwrap_or(Awareness),
        }
    }
}

const QB_TERMS: &[(Attribute, f64)] = &[
    (ThrowPower, 4.9),
    (ThrowAccuracy, 5.8),
    (BreakTackle, 0.8),
    (Agility, 0.8),
    (Awareness, 4.0),
    (Speed, 2.0),
];

const HB_TERMS: &[(Attribute, f64)] = &[
    (PassBlocking, 0.33),
    (BreakTackle, 3.3),
    (Carrying, 2.0),
    (Acceleration, 1.8),
    (Agility, 2.8),
    (Awareness, 2.0),
    (Strength, 0.6),
    (Speed, 3.3),
    (Catching, 1.4),
];

const FB_TERMS: &[(Attribute, f64)] = &[
    (PassBlocking, 1.0),
    (RunBlocking, 7.2),
    (BreakTackle, 1.8),
    (Carrying, 1.8),
    (Acceleration, 1.8),
    (Agility, 1.0),
    (Awareness, 2.8),
    (Strength, 1.8),
    (Speed, 1.8),
    (Catching, 5.2),
];

const WR_TERMS: &[(Attribute, f64)] = &[
    (BreakTackle, 0.8),
    (Acceleration, 2.3),
    (Agility, 2.3),
    (Awareness, 2.3),
    (Strength, 0.8),
    (Speed, 2.3),
    (Catching, 4.75),
    (Jumping, 1.4),
];

const TE_TERMS: &[(Attribute, f64)] = &[
    (Speed, 2.65),
    (Strength, 2.65),
    (Awareness, 2.65),
    (Agility, 1.25),
    (Acceleration, 1.25),
    (Catching, 5.4),
    (BreakTackle, 1.2),
    (PassBlocking, 1.2),
    (RunBlocking, 5.4),
];

const TACKLE_TERMS: &[(Attribute, f64)] = &[
    (Speed, 0.8),
    (Strength, 3.3),
    (Awareness, 3.3),
    (Agility, 0.8),
    (Acceleration, 0.8),
    (PassBlocking, 4.75),
    (RunBlocking, 3.75),
];

const INTERIOR_LINE_TERMS: &[(Attribute, f64)] = &[
    (Speed, 1.7),
    (Strength, 3.25),
    (Awareness, 3.25),
    (Agility, 0.8),
    (Acceleration, 1.7),
    (PassBlocking, 3.25),
    (RunBlocking, 4.8),
];

const END_TERMS: &[(Attribute, f64)] = &[
    (Speed, 3.75),
    (Strength, 3.75),
    (Awareness, 1.75),
    (Agility, 1.75),
    (Acceleration, 3.8),
    (Tackle, 5.5),
];

const DT_TERMS: &[(Attribute, f64)] = &[
    (Speed, 1.8),
    (Strength, 5.5),
    (Awareness, 3.8),
    (Agility, 1.0),
    (Acceleration, 2.8),
    (Tackle, 4.55),
];

const OLB_TERMS: &[(Attribute, f64)] = &[
    (Speed, 3.75),
    (Strength, 2.4),
    (Awareness, 3.6),
    (Agility, 2.4),
    (Acceleration, 1.3),
    (Catching, 1.3),
    (Tackle, 4.8),
];

const MLB_TERMS: &[(Attribute, f64)] = &[
    (Speed, 0.75),
    (Strength, 3.4),
    (Awareness, 5.2),
    (Agility, 1.65),
    (Acceleration, 1.75),
    (Tackle, 5.2),
];

const CB_TERMS: &[(Attribute, f64)] = &[
    (Speed, 3.85),
    (Strength, 0.9),
    (Awareness, 3.85),
    (Agility, 1.55),
    (Acceleration, 2.35),
    (Catching, 3.0),
    (Jumping, 1.55),
    (Tackle, 1.55),
];

const FS_TERMS: &[(Attribute, f64)] = &[
    (Speed, 3.0),
    (Strength, 0.9),
    (Awareness, 4.85),
    (Agility, 1.5),
    (Acceleration, 2.5),
    (Catching, 3.0),
    (Jumping, 1.5),
    (Tackle, 2.5),
];

const SS_TERMS: &[(Attribute, f64)] = &[
    (Speed, 3.2),
    (Strength, 1.7),
    (Awareness, 4.75),
    (Agility, 1.7),
    (Acceleration, 1.7),
    (Catching, 3.2),
    (Jumping, 0.9),
    (Tackle, 3.2),
];

const P_TERMS: &[(Attribute, f64)] = &[(Awareness, 0.218), (KickPower, 1.5), (KickAccuracy, 1.33)];

const K_TERMS: &[(Attribute, f64)] = &[(Awareness, 0.218), (KickPower, 1.28), (KickAccuracy, 1.47)];

const KOS_TERMS: &[(Attribute, f64)] = &[(KickPower, 2.556), (KickAccuracy, 0.222)];

// Center formula with more weight on getting downfield.
const LS_TERMS: &[(Attribute, f64)] = &[
    (Speed, 2.5),
    (Strength, 3.0),
    (Awareness, 2.5),
    (Agility, 0.8),
    (Acceleration, 2.0),
    (PassBlocking, 3.0),
    (RunBlocking, 4.2),
];

// HB/WR hybrid: more blocking, hands and burst, less power running.
const THIRD_DOWN_BACK_TERMS: &[(Attribute, f64)] = &[
    (PassBlocking, 0.6),
    (BreakTackle, 2.1),
    (Carrying, 1.4),
    (Acceleration, 2.1),
    (Agility, 2.8),
    (Awareness, 2.0),
    (Strength, 0.6),
    (Speed, 3.3),
    (Catching, 3.0),
];

/// Rating formula for a depth chart slot.
pub fn formula_for(position: Position) -> RatingFormula {
    let centered = |terms, baseline| RatingFormula::Centered { terms, baseline };

    match position {
        Position::QB => centered(QB_TERMS, 28.0),
        Position::HB => centered(HB_TERMS, 27.0),
        Position::FB => centered(FB_TERMS, 39.0),
        Position::WR => centered(WR_TERMS, 26.0),
        Position::TE => centered(TE_TERMS, 35.0),
        Position::LT | Position::RT => centered(TACKLE_TERMS, 26.0),
        Position::LG | Position::C | Position::RG => centered(INTERIOR_LINE_TERMS, 28.0),
        Position::LE | Position::RE => centered(END_TERMS, 30.0),
        Position::DT => centered(DT_TERMS, 29.0),
        Position::LOLB | Position::ROLB => centered(OLB_TERMS, 29.0),
        Position::MLB => centered(MLB_TERMS, 27.0),
        Position::CB => centered(CB_TERMS, 28.0),
        Position::FS => centered(FS_TERMS, 30.0),
        Position::SS => centered(SS_TERMS, 30.0),
        Position::P => RatingFormula::Linear {
            intercept: -183.0,
            terms: P_TERMS,
            rounded: true,
        },
        Position::K => RatingFormula::Linear {
            intercept: -177.0,
            terms: K_TERMS,
            rounded: true,
        },
        Position::KR | Position::PR => RatingFormula::Raw(KickReturn),
        Position::KOS => RatingFormula::Linear {
            intercept: -167.67,
            terms: KOS_TERMS,
            rounded: false,
        },
        Position::LS => centered(LS_TERMS, 28.0),
        Position::ThirdDownBack => centered(THIRD_DOWN_BACK_TERMS, 27.0),
    }
}

fn attribute_value(player: &Player, attribute: Attribute, awareness_factor: f64) -> f64 {
    let raw = player.attributes.get(attribute) as f64;
    if attribute == Awareness {
        raw * awareness_factor
    } else {
        raw
    }
}

/// Overall rating (0-99) of a player at an alternate slot.
///
/// `awareness_factor` is the eligibility discount for the player's natural
/// position at `alternate`.
pub fn adjusted_overall(player: &Player, alternate: Position, awareness_factor: f64) -> f64 {
    let overall = match formula_for(alternate) {
        RatingFormula::Centered { terms, baseline } => {
            let sum: f64 = terms
                .iter()
                .map(|&(attribute, weight)| {
                    ((attribute_value(player, attribute, awareness_factor) - 50.0) / 10.0) * weight
                })
                .sum();
            sum.round_ties_even() + baseline
        }
        RatingFormula::Linear {
            intercept,
            terms,
            rounded,
        } => {
            let sum = terms.iter().fold(intercept, |acc, &(attribute, weight)| {
                acc + weight * attribute_value(player, attribute, awareness_factor)
            });
            if rounded {
                sum.round_ties_even()
            } else {
                sum
            }
        }
        RatingFormula::Raw(attribute) => attribute_value(player, attribute, awareness_factor),
    };

    overall.clamp(0.0, MAX_RATING)
}

/// Unit step: 1 for strictly positive input, 0 otherwise.
pub fn step(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Rating points added for expected growth, minus points for expected decline.
///
/// Both terms scale with `(5 - con) / 2`, so a neutral team (`con == 5`)
/// gets no adjustment.
pub fn progression_adjustment(years_pro: u8, age: u8, retirement_age: u8, con: f64) -> f64 {
    let rate = (PROGRESSION_HORIZON - con) / 2.0;
    let youth = PROGRESSION_HORIZON - years_pro as f64;
    let decline = age as f64 + PROGRESSION_HORIZON - retirement_age as f64;

    step(youth) * youth * rate - step(decline) * decline * rate
}

/// Map a rating onto (0, 1) with a normal CDF centred on an average starter.
pub fn value_curve(rating: f64) -> f64 {
    let normal = Normal::standard();
    normal.cdf((rating - VALUE_CURVE_MEAN) / VALUE_CURVE_STDDEV)
}

/// Scores players against the catalog and eligibility matrix.
///
/// A score is the slot's value weight times the value curve evaluated at the
/// player's adjusted overall plus a progression adjustment.
#[derive(Clone, Copy, Debug)]
pub struct Valuator<'a> {
    pub catalog: &'a PositionCatalog,
    pub eligibility: &'a EligibilityMatrix,
}

impl<'a> Valuator<'a> {
    pub fn new(catalog: &'a PositionCatalog, eligibility: &'a EligibilityMatrix) -> Self {
        Valuator {
            catalog,
            eligibility,
        }
    }

    /// Comparable value of `player` at `alternate`.
    ///
    /// Fails if the player's natural position is not eligible for
    /// `alternate`, or if either slot is missing from the catalog.
    pub fn score(
        &self,
        player: &Player,
        alternate: Position,
        scheme: DefensiveScheme,
        con: f64,
    ) -> Result<f64> {
        let factor = self.eligibility.require(player.position, alternate)?;
        self.score_with_factor(player, alternate, factor, scheme, con)
    }

    fn score_with_factor(
        &self,
        player: &Player,
        alternate: Position,
        factor: f64,
        scheme: DefensiveScheme,
        con: f64,
    ) -> Result<f64> {
        let weight = self.catalog.value(alternate, scheme)?;
        let retirement_age = self.catalog.retirement_age(player.position)?;
        let overall = adjusted_overall(player, alternate, factor);
        let adjustment = progression_adjustment(player.years_pro, player.age, retirement_age, con);

        Ok(weight * value_curve(overall + adjustment))
    }

    /// Score every active player at every slot they are eligible for.
    ///
    /// Pools keep the order players were supplied in; the group solver's
    /// tie-break depends on it.
    pub fn score_roster(
        &self,
        players: &[Player],
        scheme: DefensiveScheme,
        con: f64,
    ) -> Result<ScoreTable> {
        let mut table = ScoreTable::new();
        for player in players.iter().filter(|p| !p.injured_reserve) {
            for &(alternate, factor) in self.eligibility.alternates(player.position) {
                let score = self.score_with_factor(player, alternate, factor, scheme, con)?;
                table.push(alternate, player.player_id, score);
            }
        }
        Ok(table)
    }
}

/// Candidate pools per slot, in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreTable {
    pools: Vec<Vec<(PlayerId, f64)>>,
}

impl Default for ScoreTable {
    fn default() -> Self {
        ScoreTable::new()
    }
}

impl ScoreTable {
    pub fn new() -> Self {
        ScoreTable {
            pools: vec![Vec::new(); Position::ALL.len()],
        }
    }

    pub fn push(&mut self, position: Position, player_id: PlayerId, score: f64) {
        self.pools[position.index()].push((player_id, score));
    }

    pub fn pool(&self, position: Position) -> &[(PlayerId, f64)] {
        &self.pools[position.index()]
    }

    pub fn get(&self, position: Position, player_id: PlayerId) -> Option<f64> {
        self.pool(position)
            .iter()
            .find(|(id, _)| *id == player_id)
            .map(|&(_, score)| score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NEUTRAL_CON;
    use crate::error::DepthChartError;
    use crate::player::Attributes;
    use proptest::prelude::*;

    fn player(position: Position, rating: u8) -> Player {
        Player::new(1, 0, position, 26, 4, Attributes::uniform(rating))
    }

    #[test]
    fn test_default_score_table_has_every_pool() {
        let mut table = ScoreTable::default();
        assert!(table.pool(Position::QB).is_empty());
        table.push(Position::ThirdDownBack, 4, 0.5);
        assert_eq!(table.get(Position::ThirdDownBack, 4), Some(0.5));
        assert_eq!(table.get(Position::ThirdDownBack, 5), None);
        assert_eq!(table.get(Position::QB, 4), None);
    }

    #[test]
    fn test_average_player_hits_baseline() {
        // Every centered term is zero at 50.
        let p = player(Position::QB, 50);
        assert_eq!(adjusted_overall(&p, Position::QB, 1.0), 28.0);
        assert_eq!(adjusted_overall(&p, Position::FB, 1.0), 39.0);
    }

    #[test]
    fn test_awareness_discount_lowers_overall() {
        let p = player(Position::CB, 80);
        let natural = adjusted_overall(&p, Position::FS, 1.0);
        let discounted = adjusted_overall(&p, Position::FS, 0.5);
        assert!(discounted < natural);
    }

    #[test]
    fn test_overall_is_clamped() {
        assert_eq!(adjusted_overall(&player(Position::QB, 99), Position::QB, 1.0), 99.0);
        assert_eq!(adjusted_overall(&player(Position::P, 0), Position::P, 1.0), 0.0);
    }

    #[test]
    fn test_kicker_formula() {
        let p = Player::new(1, 0, Position::K, 26, 4, Attributes::default())
            .with_attribute(Awareness, 60)
            .with_attribute(KickPower, 90)
            .with_attribute(KickAccuracy, 80);
        // -177 + 13.08 + 115.2 + 117.6 = 68.88
        assert_eq!(adjusted_overall(&p, Position::K, 1.0), 69.0);
    }

    #[test]
    fn test_kickoff_specialist_is_not_rounded() {
        let p = Player::new(1, 0, Position::K, 26, 4, Attributes::default())
            .with_attribute(KickPower, 95)
            .with_attribute(KickAccuracy, 50);
        let expected = -167.67 + 2.556 * 95.0 + 0.222 * 50.0;
        assert!((adjusted_overall(&p, Position::KOS, 1.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_returners_use_kick_return() {
        let p = player(Position::WR, 40).with_attribute(KickReturn, 91);
        assert_eq!(adjusted_overall(&p, Position::KR, 1.0), 91.0);
        assert_eq!(adjusted_overall(&p, Position::PR, 1.0), 91.0);
    }

    #[test]
    fn test_neutral_con_has_no_progression() {
        assert_eq!(progression_adjustment(0, 22, 35, NEUTRAL_CON), 0.0);
        assert_eq!(progression_adjustment(12, 34, 32, NEUTRAL_CON), 0.0);
    }

    #[test]
    fn test_progression_youth_and_decline() {
        // Rookie on a fast developing team: 5 * (5 - 1) / 2
        assert_eq!(progression_adjustment(0, 22, 35, 1.0), 10.0);
        // Veteran two years from retirement: -(33 + 5 - 35) * 2
        assert_eq!(progression_adjustment(10, 33, 35, 1.0), -6.0);
        // Step gates at zero
        assert_eq!(progression_adjustment(5, 30, 35, 1.0), 0.0);
    }

    #[test]
    fn test_value_curve_is_monotonic_and_bounded() {
        let mut last = 0.0;
        for rating in -20..=130 {
            let v = value_curve(rating as f64);
            assert!(v > last, "curve flat at {}", rating);
            assert!(v < 1.0);
            last = v;
        }
        assert!((value_curve(VALUE_CURVE_MEAN) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dominant_attribute() {
        assert_eq!(formula_for(Position::QB).dominant_attribute(), ThrowAccuracy);
        assert_eq!(formula_for(Position::FB).dominant_attribute(), RunBlocking);
        assert_eq!(formula_for(Position::KR).dominant_attribute(), KickReturn);
    }

    #[test]
    fn test_score_rejects_ineligible_pair() {
        let catalog = PositionCatalog::default();
        let eligibility = EligibilityMatrix::default();
        let valuator = Valuator::new(&catalog, &eligibility);
        let qb = player(Position::QB, 70);
        let result = valuator.score(&qb, Position::K, DefensiveScheme::Front43, 5.0);
        assert!(matches!(result, Err(DepthChartError::UnknownEligibility { .. })));
    }

    #[test]
    fn test_score_roster_skips_injured_reserve() {
        let catalog = PositionCatalog::default();
        let eligibility = EligibilityMatrix::default();
        let valuator = Valuator::new(&catalog, &eligibility);
        let players = vec![
            Player::new(1, 0, Position::HB, 24, 2, Attributes::uniform(70)),
            Player::new(2, 0, Position::HB, 24, 2, Attributes::uniform(75)).on_injured_reserve(),
        ];
        let table = valuator
            .score_roster(&players, DefensiveScheme::Front43, NEUTRAL_CON)
            .unwrap();
        // HB plays HB, FB, WR, KR, PR, 3DRB
        for slot in [Position::HB, Position::FB, Position::WR, Position::KR, Position::PR] {
            assert_eq!(table.pool(slot).len(), 1);
            assert_eq!(table.pool(slot)[0].0, 1);
        }
        assert!(table.pool(Position::TE).is_empty());
    }

    #[test]
    fn test_score_roster_keeps_input_order() {
        let catalog = PositionCatalog::default();
        let eligibility = EligibilityMatrix::default();
        let valuator = Valuator::new(&catalog, &eligibility);
        let players: Vec<Player> = [9, 3, 5]
            .iter()
            .map(|&id| Player::new(id, 0, Position::CB, 25, 3, Attributes::uniform(60)))
            .collect();
        let table = valuator
            .score_roster(&players, DefensiveScheme::Front43, NEUTRAL_CON)
            .unwrap();
        let ids: Vec<PlayerId> = table.pool(Position::CB).iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![9, 3, 5]);
    }

    fn arb_attributes() -> impl Strategy<Value = Attributes> {
        proptest::collection::vec(0u8..=99, Attribute::ALL.len()).prop_map(|values| {
            let mut attributes = Attributes::default();
            for (attribute, value) in Attribute::ALL.iter().zip(values) {
                attributes.set(*attribute, value);
            }
            attributes
        })
    }

    fn arb_eligible_pair() -> impl Strategy<Value = (Position, Position, f64)> {
        let eligibility = EligibilityMatrix::default();
        let pairs: Vec<(Position, Position, f64)> = Position::ALL
            .iter()
            .flat_map(|&natural| {
                eligibility
                    .alternates(natural)
                    .iter()
                    .map(move |&(alternate, factor)| (natural, alternate, factor))
                    .collect::<Vec<_>>()
            })
            .collect();
        proptest::sample::select(pairs)
    }

    proptest! {
        #[test]
        fn prop_score_bounded_and_deterministic(
            attributes in arb_attributes(),
            (natural, alternate, _) in arb_eligible_pair(),
            age in 20u8..40,
            years_pro in 0u8..15,
            con in 0.0f64..10.0,
            front34 in any::<bool>(),
        ) {
            let catalog = PositionCatalog::default();
            let eligibility = EligibilityMatrix::default();
            let valuator = Valuator::new(&catalog, &eligibility);
            let scheme = if front34 { DefensiveScheme::Front34 } else { DefensiveScheme::Front43 };
            let p = Player::new(1, 0, natural, age, years_pro, attributes);

            let first = valuator.score(&p, alternate, scheme, con).unwrap();
            let second = valuator.score(&p, alternate, scheme, con).unwrap();
            let weight = catalog.value(alternate, scheme).unwrap();

            prop_assert_eq!(first, second);
            prop_assert!(first >= 0.0 && first <= weight);

            let factor = eligibility.factor(natural, alternate).unwrap();
            let overall = adjusted_overall(&p, alternate, factor);
            prop_assert!((0.0..=MAX_RATING).contains(&overall));
        }

        #[test]
        fn prop_dominant_attribute_is_monotonic(
            attributes in arb_attributes(),
            (natural, alternate, _) in arb_eligible_pair(),
            bump in 1u8..40,
        ) {
            let catalog = PositionCatalog::default();
            let eligibility = EligibilityMatrix::default();
            let valuator = Valuator::new(&catalog, &eligibility);
            let dominant = formula_for(alternate).dominant_attribute();
            let p = Player::new(1, 0, natural, 27, 5, attributes);
            let raised_value = p.attributes.get(dominant).saturating_add(bump);
            let raised = p.clone().with_attribute(dominant, raised_value);

            let scheme = DefensiveScheme::Front43;
            let before = valuator.score(&p, alternate, scheme, NEUTRAL_CON).unwrap();
            let after = valuator.score(&raised, alternate, scheme, NEUTRAL_CON).unwrap();
            prop_assert!(after >= before);
        }
    }
}
