//! Head-to-head pivot table of a group.

use crate::models::{Game, GroupId, Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Sets score of one game from the home team's perspective.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShortGameResult {
    pub home_sets: u16,
    pub away_sets: u16,
    pub is_technical_defeat: bool,
}

impl ShortGameResult {
    /// The same game seen from the away team's row.
    pub fn transpose(&self) -> Self {
        Self {
            home_sets: self.away_sets,
            away_sets: self.home_sets,
            is_technical_defeat: self.is_technical_defeat,
        }
    }
}

/// One cell of the pivot table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "results")]
pub enum PivotCell {
    /// A team against itself.
    NonPlayable,
    /// No completed game for this home/away order yet.
    Empty,
    /// Completed games with the row team at home, in schedule order.
    Played(Vec<ShortGameResult>),
}

/// Row `i`, column `j` holds games of `team_ids[i]` at home against `team_ids[j]`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub team_ids: Vec<TeamId>,
    pub cells: Vec<Vec<PivotCell>>,
}

impl PivotTable {
    pub fn cell(&self, home: TeamId, away: TeamId) -> Option<&PivotCell> {
        let row = self.team_ids.iter().position(|&t| t == home)?;
        let column = self.team_ids.iter().position(|&t| t == away)?;
        Some(&self.cells[row][column])
    }
}

/// Build the pivot table for `teams` (row/column order) from their games.
/// The mirror cell is never filled in; a game only lands in its home row.
pub fn build(games: &[Game], teams: &[Team]) -> PivotTable {
    let team_ids: Vec<TeamId> = teams.iter().map(|t| t.id).collect();
    let index: HashMap<TeamId, usize> = team_ids.iter().enumerate().map(|(i, &t)| (t, i)).collect();
    let n = team_ids.len();

    let mut cells: Vec<Vec<PivotCell>> = (0..n)
        .map(|row| {
            (0..n)
                .map(|column| {
                    if row == column {
                        PivotCell::NonPlayable
                    } else {
                        PivotCell::Empty
                    }
                })
                .collect()
        })
        .collect();

    let mut ordered: Vec<&Game> = games.iter().collect();
    ordered.sort_by_key(|g| g.round);

    for game in ordered {
        let (Some(away), Some(result)) = (game.away_team, game.played_result()) else {
            continue;
        };
        let (Some(&row), Some(&column)) = (index.get(&game.home_team), index.get(&away)) else {
            continue;
        };
        if row == column {
            continue;
        }
        let short = ShortGameResult {
            home_sets: result.game_score.home,
            away_sets: result.game_score.away,
            is_technical_defeat: result.is_technical_defeat(),
        };
        let cell = &mut cells[row][column];
        match cell {
            PivotCell::Played(results) => results.push(short),
            _ => *cell = PivotCell::Played(vec![short]),
        }
    }

    PivotTable { team_ids, cells }
}

/// Pivot tables for every group; games crossing groups are left out.
pub fn build_all(games: &[Game], teams: &[Team]) -> BTreeMap<GroupId, PivotTable> {
    let mut by_group: BTreeMap<GroupId, Vec<Team>> = BTreeMap::new();
    for team in teams {
        by_group.entry(team.group_id).or_default().push(team.clone());
    }
    by_group
        .into_iter()
        .map(|(group, group_teams)| (group, build(games, &group_teams)))
        .collect()
}
