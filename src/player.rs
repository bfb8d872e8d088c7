use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::MAX_ATTRIBUTE;
use crate::position::Position;

pub type PlayerId = u32;
pub type TeamId = u32;

/// Raw ratings in the 0-99 range.
///
/// Deserializes from a map of attribute names to ratings. Missing ratings are
/// zero; unknown names and ratings above 99 are rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u8>")]
pub struct Attributes {
    pub speed: u8,
    pub strength: u8,
    pub awareness: u8,
    pub agility: u8,
    pub acceleration: u8,
    pub catching: u8,
    pub carrying: u8,
    pub break_tackle: u8,
    pub pass_blocking: u8,
    pub run_blocking: u8,
    pub tackle: u8,
    pub jumping: u8,
    pub throw_power: u8,
    pub throw_accuracy: u8,
    pub kick_power: u8,
    pub kick_accuracy: u8,
    pub kick_return: u8,
}

/// Names a single field of [`Attributes`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    Speed,
    Strength,
    Awareness,
    Agility,
    Acceleration,
    Catching,
    Carrying,
    BreakTackle,
    PassBlocking,
    RunBlocking,
    Tackle,
    Jumping,
    ThrowPower,
    ThrowAccuracy,
    KickPower,
    KickAccuracy,
    KickReturn,
}

impl Attribute {
    pub const ALL: [Attribute; 17] = [
        Attribute::Speed,
        Attribute::Strength,
        Attribute::Awareness,
        Attribute::Agility,
        Attribute::Acceleration,
        Attribute::Catching,
        Attribute::Carrying,
        Attribute::BreakTackle,
        Attribute::PassBlocking,
        Attribute::RunBlocking,
        Attribute::Tackle,
        Attribute::Jumping,
        Attribute::ThrowPower,
        Attribute::ThrowAccuracy,
        Attribute::KickPower,
        Attribute::KickAccuracy,
        Attribute::KickReturn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Attribute::Speed => "speed",
            Attribute::Strength => "strength",
            Attribute::Awareness => "awareness",
            Attribute::Agility => "agility",
            Attribute::Acceleration => "acceleration",
            Attribute::Catching => "catching",
            Attribute::Carrying => "carrying",
            Attribute::BreakTackle => "break_tackle",
            Attribute::PassBlocking => "pass_blocking",
            Attribute::RunBlocking => "run_blocking",
            Attribute::Tackle => "tackle",
            Attribute::Jumping => "jumping",
            Attribute::ThrowPower => "throw_power",
            Attribute::ThrowAccuracy => "throw_accuracy",
            Attribute::KickPower => "kick_power",
            Attribute::KickAccuracy => "kick_accuracy",
            Attribute::KickReturn => "kick_return",
        }
    }

    pub fn from_name(name: &str) -> Option<Attribute> {
        Attribute::ALL.iter().copied().find(|a| a.name() == name)
    }
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Speed => self.speed,
            Attribute::Strength => self.strength,
            Attribute::Awareness => self.awareness,
            Attribute::Agility => self.agility,
            Attribute::Acceleration => self.acceleration,
            Attribute::Catching => self.catching,
            Attribute::Carrying => self.carrying,
            Attribute::BreakTackle => self.break_tackle,
            Attribute::PassBlocking => self.pass_blocking,
            Attribute::RunBlocking => self.run_blocking,
            Attribute::Tackle => self.tackle,
            Attribute::Jumping => self.jumping,
            Attribute::ThrowPower => self.throw_power,
            Attribute::ThrowAccuracy => self.throw_accuracy,
            Attribute::KickPower => self.kick_power,
            Attribute::KickAccuracy => self.kick_accuracy,
            Attribute::KickReturn => self.kick_return,
        }
    }

    /// Set a rating, clamping to 99.
    pub fn set(&mut self, attribute: Attribute, value: u8) {
        let value = value.min(MAX_ATTRIBUTE);
        let field = match attribute {
            Attribute::Speed => &mut self.speed,
            Attribute::Strength => &mut self.strength,
            Attribute::Awareness => &mut self.awareness,
            Attribute::Agility => &mut self.agility,
            Attribute::Acceleration => &mut self.acceleration,
            Attribute::Catching => &mut self.catching,
            Attribute::Carrying => &mut self.carrying,
            Attribute::BreakTackle => &mut self.break_tackle,
            Attribute::PassBlocking => &mut self.pass_blocking,
            Attribute::RunBlocking => &mut self.run_blocking,
            Attribute::Tackle => &mut self.tackle,
            Attribute::Jumping => &mut self.jumping,
            Attribute::ThrowPower => &mut self.throw_power,
            Attribute::ThrowAccuracy => &mut self.throw_accuracy,
            Attribute::KickPower => &mut self.kick_power,
            Attribute::KickAccuracy => &mut self.kick_accuracy,
            Attribute::KickReturn => &mut self.kick_return,
        };
        *field = value;
    }

    /// Every rating set to the same value.
    pub fn uniform(value: u8) -> Self {
        let mut attributes = Attributes::default();
        for attribute in Attribute::ALL {
            attributes.set(attribute, value);
        }
        attributes
    }
}

impl TryFrom<BTreeMap<String, u8>> for Attributes {
    type Error = String;

    fn try_from(ratings: BTreeMap<String, u8>) -> Result<Self, Self::Error> {
        let mut attributes = Attributes::default();
        for (name, value) in ratings {
            let attribute =
                Attribute::from_name(&name).ok_or_else(|| format!("unknown attribute '{}'", name))?;
            if value > MAX_ATTRIBUTE {
                return Err(format!("{} rating {} is above {}", name, value, MAX_ATTRIBUTE));
            }
            attributes.set(attribute, value);
        }
        Ok(attributes)
    }
}

/// Player snapshot read by the depth chart engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub team_id: TeamId,

    /// Position the player is rostered at
    pub position: Position,

    pub age: u8,
    pub years_pro: u8,

    pub attributes: Attributes,

    /// Players on injured reserve are left off the depth chart entirely.
    #[serde(default)]
    pub injured_reserve: bool,
}

impl Player {
    pub fn new(
        player_id: PlayerId,
        team_id: TeamId,
        position: Position,
        age: u8,
        years_pro: u8,
        attributes: Attributes,
    ) -> Self {
        Player {
            player_id,
            team_id,
            position,
            age,
            years_pro,
            attributes,
            injured_reserve: false,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute, value: u8) -> Self {
        self.attributes.set(attribute, value);
        self
    }

    pub fn on_injured_reserve(mut self) -> Self {
        self.injured_reserve = true;
        self
    }
}
