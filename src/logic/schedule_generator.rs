//! Round-robin schedule generation (circle method), one set of rounds per group.

use crate::error::ScheduleError;
use crate::models::{Game, Team, TeamId, TournamentId, TournamentScheme};
use rand::seq::SliceRandom;
use std::collections::BTreeMap;

/// Generate every game of a round-robin schedule.
///
/// Groups play in parallel, so round `r` of every group shares the same number.
/// Odd-sized groups get a free day per round in the first leg. The double
/// schemes add a second leg with home and away reversed (and no free days,
/// since a team may only have one). Fails when a group needs more rounds than
/// a round number can hold.
pub fn generate_round_robin(
    tournament_id: TournamentId,
    teams: &[Team],
    scheme: TournamentScheme,
    shuffle: bool,
) -> Result<Vec<Game>, ScheduleError> {
    let mut by_group: BTreeMap<_, Vec<TeamId>> = BTreeMap::new();
    for team in teams {
        by_group.entry(team.group_id).or_default().push(team.id);
    }

    let mut rng = rand::thread_rng();
    let mut games = Vec::new();
    for (_, mut ids) in by_group {
        if shuffle {
            ids.shuffle(&mut rng);
        }
        let first_leg = first_leg_pairings(&ids);
        let round_number = |index: usize| {
            u8::try_from(index + 1).map_err(|_| ScheduleError::TooManyRounds { teams: ids.len() })
        };
        for (i, pairings) in first_leg.iter().enumerate() {
            let round = round_number(i)?;
            for &(home, away) in pairings {
                games.push(match away {
                    Some(away) => Game::new(tournament_id, round, home, away),
                    None => Game::free_day(tournament_id, round, home),
                });
            }
        }
        if scheme == TournamentScheme::Single {
            continue;
        }
        for (i, pairings) in first_leg.iter().enumerate() {
            let round = round_number(first_leg.len() + i)?;
            for &(home, away) in pairings {
                if let Some(away) = away {
                    games.push(Game::new(tournament_id, round, away, home));
                }
            }
        }
    }
    log::debug!("Generated {} games for tournament {}", games.len(), tournament_id);
    Ok(games)
}

/// Pairings per round; `None` is the free-day slot of an odd group.
fn first_leg_pairings(ids: &[TeamId]) -> Vec<Vec<(TeamId, Option<TeamId>)>> {
    if ids.len() < 2 {
        return Vec::new();
    }
    let mut slots: Vec<Option<TeamId>> = ids.iter().copied().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();
    let mut rounds = Vec::with_capacity(n - 1);
    for round in 0..n - 1 {
        let mut pairings = Vec::with_capacity(n / 2);
        for i in 0..n / 2 {
            let (a, b) = (slots[i], slots[n - 1 - i]);
            // Alternate the fixed team's home games between rounds.
            let (home, away) = if i == 0 && round % 2 == 1 { (b, a) } else { (a, b) };
            match (home, away) {
                (Some(home), away) => pairings.push((home, away)),
                (None, Some(team)) => pairings.push((team, None)),
                (None, None) => {}
            }
        }
        rounds.push(pairings);
        // Keep slot 0 fixed and rotate the rest by one.
        slots[1..].rotate_right(1);
    }
    rounds
}
