//! Fold completed games into per-team standings entries, grouped by group.

use crate::config::ScoringConfig;
use crate::models::{Game, GameResult, GroupId, Side, Team, TeamId};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// won / lost, compared exactly. Nothing lost counts as infinitely good.
/// Equality is by value, so 1/2 == 2/4.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ratio {
    pub won: u32,
    pub lost: u32,
}

impl Ratio {
    pub fn new(won: u32, lost: u32) -> Self {
        Self { won, lost }
    }

    pub fn is_infinite(&self) -> bool {
        self.lost == 0
    }

    /// None when infinite.
    pub fn value(&self) -> Option<f64> {
        if self.is_infinite() {
            None
        } else {
            Some(f64::from(self.won) / f64::from(self.lost))
        }
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let lhs = u64::from(self.won) * u64::from(other.lost);
                let rhs = u64::from(other.won) * u64::from(self.lost);
                lhs.cmp(&rhs)
            }
        }
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value() {
            Some(v) => serializer.serialize_some(&v),
            None => serializer.serialize_none(),
        }
    }
}

/// One team's line in a standings table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StandingsEntry {
    pub team_id: TeamId,
    pub team_name: String,
    /// Competition points after penalties.
    pub points: i32,
    pub games_total: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub wins_3_0: u32,
    pub wins_3_1: u32,
    pub wins_3_2: u32,
    pub losses_2_3: u32,
    pub losses_1_3: u32,
    pub losses_0_3: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub balls_won: u32,
    pub balls_lost: u32,
    /// Sum of penalties already subtracted from `points`.
    pub penalty_points: i32,
}

impl StandingsEntry {
    pub fn new(team: &Team) -> Self {
        Self {
            team_id: team.id,
            team_name: team.name.clone(),
            ..Self::default()
        }
    }

    pub fn sets_ratio(&self) -> Ratio {
        Ratio::new(self.sets_won, self.sets_lost)
    }

    pub fn balls_ratio(&self) -> Ratio {
        Ratio::new(self.balls_won, self.balls_lost)
    }

    fn record_outcome(&mut self, won: u16, lost: u16) {
        match (won, lost) {
            (3, 0) => self.wins_3_0 += 1,
            (3, 1) => self.wins_3_1 += 1,
            (3, 2) => self.wins_3_2 += 1,
            (2, 3) => self.losses_2_3 += 1,
            (1, 3) => self.losses_1_3 += 1,
            (0, 3) => self.losses_0_3 += 1,
            _ => {}
        }
    }
}

/// Build one entry per team (even without games) and fold every completed,
/// non-free-day game into them. Entries keep the order of `teams`.
pub fn aggregate(
    games: &[Game],
    teams: &[Team],
    config: &ScoringConfig,
) -> BTreeMap<GroupId, Vec<StandingsEntry>> {
    let mut entries: Vec<StandingsEntry> = teams.iter().map(StandingsEntry::new).collect();
    let index: HashMap<TeamId, usize> = teams.iter().enumerate().map(|(i, t)| (t.id, i)).collect();

    for game in games {
        let (Some(away_team), Some(result)) = (game.away_team, game.played_result()) else {
            continue;
        };
        let Some(winner) = result.game_score.winner() else {
            log::warn!("Skipping game {} without a winner", game.id);
            continue;
        };
        let score = &result.game_score;
        let (winner_points, loser_points) = config
            .points
            .lookup(score.max(), score.min())
            .unwrap_or_else(|| {
                log::warn!(
                    "No points configured for {}:{}, game {} scores 0",
                    score.max(),
                    score.min(),
                    game.id
                );
                (0, 0)
            });

        for (side, team_id) in [(Side::Home, game.home_team), (Side::Away, away_team)] {
            let Some(&i) = index.get(&team_id) else {
                log::warn!("Game {} references unknown team {}", game.id, team_id);
                continue;
            };
            let won = side == winner;
            let points = if won { winner_points } else { loser_points };
            apply_side(&mut entries[i], result, side, won, points);
        }
    }

    let mut groups: BTreeMap<GroupId, Vec<StandingsEntry>> = BTreeMap::new();
    for (team, entry) in teams.iter().zip(entries) {
        groups.entry(team.group_id).or_default().push(entry);
    }
    groups
}

fn apply_side(entry: &mut StandingsEntry, result: &GameResult, side: Side, won: bool, points: i32) {
    let other = side.opposite();
    let score = &result.game_score;

    entry.games_total += 1;
    if won {
        entry.games_won += 1;
    } else {
        entry.games_lost += 1;
    }
    entry.record_outcome(score.for_side(side), score.for_side(other));
    entry.sets_won += u32::from(score.for_side(side));
    entry.sets_lost += u32::from(score.for_side(other));

    // Balls only count for sets that were actually played.
    if !result.is_technical_defeat() {
        for set in result.set_scores.iter().filter(|s| !s.is_technical_defeat) {
            entry.balls_won += u32::from(set.for_side(side));
            entry.balls_lost += u32::from(set.for_side(other));
        }
    }

    let penalty = i32::from(result.penalty_for(side));
    entry.points += points - penalty;
    entry.penalty_points += penalty;
}
