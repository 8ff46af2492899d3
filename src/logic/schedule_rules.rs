//! Scheduling rules: may this game be placed in its round, given every other game
//! of the tournament?

use crate::error::{ScheduleError, ValidationError};
use crate::models::{Game, TeamId, TournamentContext, TournamentScheme};

/// Validate a new or edited game against the tournament's other games.
///
/// `existing` may contain the candidate itself (on update); it is skipped by id.
/// Returns the game as it should be stored: under the double schemes a repeated
/// pairing is accepted with home and away swapped when that order is still free.
pub fn validate_create_or_update(
    candidate: &Game,
    tournament: &TournamentContext,
    existing: &[Game],
) -> Result<Game, ValidationError> {
    if candidate.round == 0 {
        return Err(ScheduleError::InvalidRound.into());
    }
    validate_distinct_teams(candidate)?;
    validate_window(candidate, tournament)?;

    let others: Vec<&Game> = existing.iter().filter(|g| g.id != candidate.id).collect();
    let (same_round, other_rounds): (Vec<&Game>, Vec<&Game>) =
        others.into_iter().partition(|g| g.round == candidate.round);

    validate_same_round(candidate, &same_round)?;
    let accepted = match tournament.scheme {
        TournamentScheme::Single => {
            validate_single_scheme(candidate, &other_rounds)?;
            candidate.clone()
        }
        TournamentScheme::Double | TournamentScheme::DoubleAndHalf => {
            validate_double_scheme(candidate, &other_rounds)?
        }
    };
    Ok(accepted)
}

/// Home and away must differ; a free day has no away team at all.
pub fn validate_distinct_teams(game: &Game) -> Result<(), ScheduleError> {
    match game.away_team {
        Some(away) if away == game.home_team => Err(ScheduleError::SameTeam(away)),
        _ => Ok(()),
    }
}

/// Games with a fixed date must be inside the tournament's games window.
pub fn validate_window(game: &Game, tournament: &TournamentContext) -> Result<(), ValidationError> {
    match game.date {
        Some(date) if !tournament.contains(date) => Err(ValidationError::OutsideWindow {
            date,
            start: tournament.games_start,
            end: tournament.games_end,
        }),
        _ => Ok(()),
    }
}

/// Within one round each team appears at most once, free days included.
pub fn validate_same_round(candidate: &Game, same_round: &[&Game]) -> Result<(), ScheduleError> {
    let round = candidate.round;
    for other in same_round {
        if other.same_pair(candidate) {
            return Err(if candidate.is_free_day() {
                ScheduleError::DuplicateFreeDayInRound {
                    round,
                    team: candidate.home_team,
                }
            } else {
                ScheduleError::DuplicatePairInRound { round }
            });
        }
        if let Some(team) = shared_team(candidate, other) {
            return Err(if other.is_free_day() {
                ScheduleError::TeamHasFreeDayInRound { round, team }
            } else {
                ScheduleError::TeamBookedInRound { round, team }
            });
        }
    }
    Ok(())
}

fn shared_team(a: &Game, b: &Game) -> Option<TeamId> {
    a.teams().find(|&t| b.involves(t))
}

/// Single round robin: a pair (or a team's free day) occurs once in the whole tournament.
pub fn validate_single_scheme(candidate: &Game, other_rounds: &[&Game]) -> Result<(), ScheduleError> {
    match other_rounds.iter().find(|g| g.same_pair(candidate)) {
        Some(previous) if candidate.is_free_day() => Err(ScheduleError::FreeDayLimitExceeded {
            round: previous.round,
            team: candidate.home_team,
        }),
        Some(previous) => Err(ScheduleError::PairAlreadyPlayed {
            round: previous.round,
        }),
        None => Ok(()),
    }
}

/// Double round robin: each ordered pairing occurs once. A repeated order is
/// retried with home and away swapped; if that order is taken as well the pair
/// has already met twice. One free day per team.
pub fn validate_double_scheme(
    candidate: &Game,
    other_rounds: &[&Game],
) -> Result<Game, ScheduleError> {
    if candidate.is_free_day() {
        return match other_rounds.iter().find(|g| g.same_pair(candidate)) {
            Some(previous) => Err(ScheduleError::FreeDayLimitExceeded {
                round: previous.round,
                team: candidate.home_team,
            }),
            None => Ok(candidate.clone()),
        };
    }
    if !other_rounds.iter().any(|g| g.same_ordered_pair(candidate)) {
        return Ok(candidate.clone());
    }
    let mut swapped = candidate.clone();
    swapped.swap_teams();
    if other_rounds.iter().any(|g| g.same_ordered_pair(&swapped)) {
        return Err(ScheduleError::PairPlayedInBothOrders);
    }
    Ok(swapped)
}
