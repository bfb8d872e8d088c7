//! Depth Core - depth chart engine for a football league.
//!
//! Scores every player at every slot they can play, seats starters with an
//! exhaustive search per position group, backfills the remaining depth
//! greedily, and writes the league's charts to a sink in one replacement.
//! Python bindings via PyO3 are available behind the `python` feature.

pub mod backfill;
pub mod catalog;
pub mod constants;
pub mod context;
pub mod depth_chart;
pub mod eligibility;
pub mod engine;
pub mod error;
pub mod league;
pub mod player;
pub mod position;
pub mod solver;
pub mod synthetic;
pub mod team;
pub mod valuation;

#[cfg(feature = "python")]
mod python;

pub use catalog::{PositionCatalog, PositionProfile};
pub use depth_chart::{DepthChartEntry, LeagueDepthChart, TeamDepthChart};
pub use eligibility::EligibilityMatrix;
pub use engine::{DepthChartEngine, EngineConfig, ShortRosterPolicy};
pub use error::{DepthChartError, Result};
pub use league::{DepthChartSink, InMemoryLeague, LeagueSource, MemoryDepthChartStore};
pub use player::{Attribute, Attributes, Player, PlayerId, TeamId};
pub use position::Position;
pub use team::{DefensiveScheme, Team};
pub use valuation::{value_curve, ScoreTable, Valuator};
