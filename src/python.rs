use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::collections::HashMap;

use crate::catalog::PositionCatalog;
use crate::depth_chart::{DepthChartEntry, LeagueDepthChart};
use crate::engine::{DepthChartEngine, EngineConfig, ShortRosterPolicy};
use crate::error::DepthChartError;
use crate::league::InMemoryLeague;
use crate::player::{Attribute, Attributes, Player, PlayerId, TeamId};
use crate::position::Position;
use crate::team::{DefensiveScheme, Team};
use crate::valuation::value_curve;

type EntryTuple = (TeamId, String, usize, PlayerId);

impl From<DepthChartError> for PyErr {
    fn from(err: DepthChartError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn parse_position(name: &str) -> PyResult<Position> {
    Position::from_abbreviation(name)
        .ok_or_else(|| PyValueError::new_err(format!("unknown position '{}'", name)))
}

fn parse_scheme(name: &str) -> PyResult<DefensiveScheme> {
    match name {
        "4-3" | "43" => Ok(DefensiveScheme::Front43),
        "3-4" | "34" => Ok(DefensiveScheme::Front34),
        _ => Err(PyValueError::new_err(format!("unknown defensive scheme '{}'", name))),
    }
}

fn parse_attributes(ratings: &HashMap<String, u8>) -> PyResult<Attributes> {
    let mut attributes = Attributes::default();
    for (name, &value) in ratings {
        let attribute = Attribute::from_name(name)
            .ok_or_else(|| PyValueError::new_err(format!("unknown attribute '{}'", name)))?;
        attributes.set(attribute, value);
    }
    Ok(attributes)
}

#[pyclass(name = "Team")]
#[derive(Clone)]
struct PyTeam {
    #[pyo3(get)]
    team_id: TeamId,
    #[pyo3(get)]
    scheme: String,
    #[pyo3(get, set)]
    con: f64,
    inner: Team,
}

#[pymethods]
impl PyTeam {
    #[new]
    #[pyo3(signature = (team_id, scheme = "4-3", con = 5.0))]
    fn new(team_id: TeamId, scheme: &str, con: f64) -> PyResult<Self> {
        let parsed = parse_scheme(scheme)?;
        Ok(PyTeam {
            team_id,
            scheme: scheme.to_string(),
            con,
            inner: Team::new(team_id, parsed, con),
        })
    }

    fn __repr__(&self) -> String {
        format!("Team({}, {}, con={})", self.team_id, self.scheme, self.con)
    }
}

impl PyTeam {
    fn team(&self) -> Team {
        Team {
            con: self.con,
            ..self.inner.clone()
        }
    }
}

#[pyclass(name = "Player")]
#[derive(Clone)]
struct PyPlayer {
    #[pyo3(get)]
    player_id: PlayerId,
    #[pyo3(get)]
    team_id: TeamId,
    #[pyo3(get)]
    position: String,
    inner: Player,
}

#[pymethods]
impl PyPlayer {
    #[new]
    #[pyo3(signature = (
        player_id, team_id, position, age, years_pro, ratings, injured_reserve = false
    ))]
    fn new(
        player_id: PlayerId,
        team_id: TeamId,
        position: &str,
        age: u8,
        years_pro: u8,
        ratings: HashMap<String, u8>,
        injured_reserve: bool,
    ) -> PyResult<Self> {
        let natural = parse_position(position)?;
        if natural.is_specialist() {
            return Err(PyValueError::new_err(format!(
                "'{}' is not a rostered position",
                position
            )));
        }
        let mut inner = Player::new(
            player_id,
            team_id,
            natural,
            age,
            years_pro,
            parse_attributes(&ratings)?,
        );
        inner.injured_reserve = injured_reserve;
        Ok(PyPlayer {
            player_id,
            team_id,
            position: natural.abbreviation().to_string(),
            inner,
        })
    }

    fn __repr__(&self) -> String {
        format!("Player({}, team {}, {})", self.player_id, self.team_id, self.position)
    }
}

fn build_engine(catalog_path: Option<&str>, degrade: bool) -> PyResult<DepthChartEngine> {
    let catalog = catalog_path.map(PositionCatalog::read_from_file).transpose()?;
    let config = EngineConfig {
        short_roster: if degrade {
            ShortRosterPolicy::Degrade
        } else {
            ShortRosterPolicy::Abort
        },
    };
    Ok(DepthChartEngine::new(catalog, config))
}

fn entry_tuple(entry: &DepthChartEntry) -> EntryTuple {
    (
        entry.team_id,
        entry.position.abbreviation().to_string(),
        entry.depth_order,
        entry.player_id,
    )
}

fn league_tuples(league: &LeagueDepthChart) -> Vec<EntryTuple> {
    league.entries().iter().map(entry_tuple).collect()
}

/// Value of one player at one slot.
#[pyfunction]
#[pyo3(signature = (player, team, position, with_progression = false, catalog_path = None))]
fn score_player(
    player: &PyPlayer,
    team: &PyTeam,
    position: &str,
    with_progression: bool,
    catalog_path: Option<&str>,
) -> PyResult<f64> {
    let engine = build_engine(catalog_path, false)?;
    let team = team.team();
    let alternate = parse_position(position)?;
    Ok(engine.score(
        &player.inner,
        alternate,
        team.scheme,
        team.progression_con(with_progression),
    )?)
}

/// Normal CDF rating curve.
#[pyfunction]
fn py_value_curve(rating: f64) -> f64 {
    value_curve(rating)
}

/// Depth chart rows for one team as (team_id, position, depth_order, player_id).
#[pyfunction]
#[pyo3(signature = (
    team, players, with_progression = false, catalog_path = None, degrade = false
))]
fn sort_team_depth_chart(
    team: &PyTeam,
    players: Vec<PyPlayer>,
    with_progression: bool,
    catalog_path: Option<&str>,
    degrade: bool,
) -> PyResult<Vec<EntryTuple>> {
    let engine = build_engine(catalog_path, degrade)?;
    let roster: Vec<Player> = players.into_iter().map(|p| p.inner).collect();
    let chart = engine.build_team_chart(&team.team(), &roster, with_progression)?;
    Ok(chart.entries().iter().map(entry_tuple).collect())
}

/// Replacement depth chart rows for every team.
///
/// Runs without the GIL; teams are charted in parallel.
#[pyfunction]
#[pyo3(signature = (
    teams, players, with_progression = false, catalog_path = None, degrade = false
))]
fn reorder_league_depth_charts(
    py: Python<'_>,
    teams: Vec<PyTeam>,
    players: Vec<PyPlayer>,
    with_progression: bool,
    catalog_path: Option<&str>,
    degrade: bool,
) -> PyResult<Vec<EntryTuple>> {
    let engine = build_engine(catalog_path, degrade)?;
    let league = InMemoryLeague::new(
        teams.iter().map(PyTeam::team),
        players.into_iter().map(|p| p.inner).collect(),
    );
    let charts =
        py.allow_threads(|| engine.compute_league_depth_charts(&league, with_progression))?;
    Ok(league_tuples(&charts))
}

/// Python module definition
#[pymodule]
fn depth_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<PyTeam>()?;
    m.add_class::<PyPlayer>()?;

    // Functions
    m.add_function(wrap_pyfunction!(score_player, m)?)?;
    m.add_function(wrap_pyfunction!(py_value_curve, m)?)?;
    m.add_function(wrap_pyfunction!(sort_team_depth_chart, m)?)?;
    m.add_function(wrap_pyfunction!(reorder_league_depth_charts, m)?)?;

    // Constants
    m.add("LEAGUE_TEAMS", crate::constants::LEAGUE_TEAMS)?;
    m.add(
        "POSITIONS",
        Position::ALL
            .iter()
            .map(|p| p.abbreviation())
            .collect::<Vec<_>>(),
    )?;

    Ok(())
}
