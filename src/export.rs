//! CSV export of ranked standings.

use crate::logic::StandingsEntry;
use crate::models::{Group, GroupId};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct StandingsRow<'a> {
    group: &'a str,
    position: usize,
    team: &'a str,
    points: i32,
    games: u32,
    won: u32,
    lost: u32,
    sets_won: u32,
    sets_lost: u32,
    /// Empty when nothing was lost.
    sets_ratio: Option<f64>,
    balls_won: u32,
    balls_lost: u32,
    balls_ratio: Option<f64>,
    penalty: i32,
}

/// One CSV row per team, groups in `groups` order, positions starting at 1.
/// Groups without a name in `groups` are skipped.
pub fn standings_csv(
    standings: &BTreeMap<GroupId, Vec<StandingsEntry>>,
    groups: &[Group],
) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for group in groups {
        let Some(entries) = standings.get(&group.id) else {
            continue;
        };
        for (i, e) in entries.iter().enumerate() {
            writer.serialize(StandingsRow {
                group: &group.name,
                position: i + 1,
                team: &e.team_name,
                points: e.points,
                games: e.games_total,
                won: e.games_won,
                lost: e.games_lost,
                sets_won: e.sets_won,
                sets_lost: e.sets_lost,
                sets_ratio: e.sets_ratio().value(),
                balls_won: e.balls_won,
                balls_lost: e.balls_lost,
                balls_ratio: e.balls_ratio().value(),
                penalty: e.penalty_points,
            })?;
        }
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
