use serde::{Deserialize, Serialize};
use std::fmt;

/// Depth chart slot.
///
/// The first 21 variants are natural positions a player can be rostered at.
/// Ids 21-25 are specialist slots that only exist on the depth chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Position {
    QB = 0,
    HB = 1,
    FB = 2,
    WR = 3,
    TE = 4,
    LT = 5,
    LG = 6,
    C = 7,
    RG = 8,
    RT = 9,
    LE = 10,
    RE = 11,
    DT = 12,
    LOLB = 13,
    MLB = 14,
    ROLB = 15,
    CB = 16,
    FS = 17,
    SS = 18,
    K = 19,
    P = 20,
    /// Kick returner
    KR = 21,
    /// Punt returner
    PR = 22,
    /// Kickoff specialist
    KOS = 23,
    /// Long snapper
    LS = 24,
    /// Third down back
    #[serde(rename = "3DRB")]
    ThirdDownBack = 25,
}

impl Position {
    /// Every slot, in id order.
    pub const ALL: [Position; 26] = [
        Position::QB,
        Position::HB,
        Position::FB,
        Position::WR,
        Position::TE,
        Position::LT,
        Position::LG,
        Position::C,
        Position::RG,
        Position::RT,
        Position::LE,
        Position::RE,
        Position::DT,
        Position::LOLB,
        Position::MLB,
        Position::ROLB,
        Position::CB,
        Position::FS,
        Position::SS,
        Position::K,
        Position::P,
        Position::KR,
        Position::PR,
        Position::KOS,
        Position::LS,
        Position::ThirdDownBack,
    ];

    /// Number of natural positions (ids below this are rosterable).
    pub const NATURAL_COUNT: usize = 21;

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_id(id: u8) -> Option<Position> {
        Position::ALL.get(id as usize).copied()
    }

    pub fn is_specialist(self) -> bool {
        self.index() >= Position::NATURAL_COUNT
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Position::QB => "QB",
            Position::HB => "HB",
            Position::FB => "FB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::LT => "LT",
            Position::LG => "LG",
            Position::C => "C",
            Position::RG => "RG",
            Position::RT => "RT",
            Position::LE => "LE",
            Position::RE => "RE",
            Position::DT => "DT",
            Position::LOLB => "LOLB",
            Position::MLB => "MLB",
            Position::ROLB => "ROLB",
            Position::CB => "CB",
            Position::FS => "FS",
            Position::SS => "SS",
            Position::K => "K",
            Position::P => "P",
            Position::KR => "KR",
            Position::PR => "PR",
            Position::KOS => "KOS",
            Position::LS => "LS",
            Position::ThirdDownBack => "3DRB",
        }
    }

    pub fn from_abbreviation(name: &str) -> Option<Position> {
        Position::ALL
            .iter()
            .copied()
            .find(|p| p.abbreviation().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
