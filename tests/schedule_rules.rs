//! Integration tests for the scheduling rules.

mod common;

use common::{context, date, game};
use uuid::Uuid;
use volleyball_tournament_web::logic::schedule_rules::validate_create_or_update;
use volleyball_tournament_web::{
    Game, ScheduleError, TournamentScheme, ValidationError,
};

fn teams<const N: usize>() -> [Uuid; N] {
    std::array::from_fn(|_| Uuid::new_v4())
}

fn schedule_err(e: Result<Game, ValidationError>) -> ScheduleError {
    match e {
        Err(ValidationError::Schedule(e)) => e,
        other => panic!("expected schedule error, got {other:?}"),
    }
}

#[test]
fn rejects_team_against_itself() {
    let ctx = context(TournamentScheme::Single);
    let [x] = teams();
    let g = game(&ctx, 1, x, x);
    assert_eq!(
        schedule_err(validate_create_or_update(&g, &ctx, &[])),
        ScheduleError::SameTeam(x)
    );
}

#[test]
fn rejects_round_zero() {
    let ctx = context(TournamentScheme::Single);
    let [x, y] = teams();
    let g = game(&ctx, 0, x, y);
    assert_eq!(
        schedule_err(validate_create_or_update(&g, &ctx, &[])),
        ScheduleError::InvalidRound
    );
}

#[test]
fn date_must_be_inside_window() {
    let ctx = context(TournamentScheme::Single);
    let [x, y] = teams();
    let inside = game(&ctx, 1, x, y).with_date(date(2026, 4, 1));
    assert!(validate_create_or_update(&inside, &ctx, &[]).is_ok());

    let outside = game(&ctx, 1, x, y).with_date(date(2026, 7, 1));
    assert!(matches!(
        validate_create_or_update(&outside, &ctx, &[]),
        Err(ValidationError::OutsideWindow { .. })
    ));
}

#[test]
fn same_pair_twice_in_round_is_rejected_in_either_order() {
    let ctx = context(TournamentScheme::Double);
    let [x, y] = teams();
    let first = game(&ctx, 1, x, y);
    for second in [game(&ctx, 1, x, y), game(&ctx, 1, y, x)] {
        assert_eq!(
            schedule_err(validate_create_or_update(&second, &ctx, &[first.clone()])),
            ScheduleError::DuplicatePairInRound { round: 1 }
        );
    }
}

#[test]
fn team_cannot_play_twice_in_round() {
    let ctx = context(TournamentScheme::Single);
    let [x, y, z] = teams();
    let existing = vec![game(&ctx, 1, x, y)];
    let candidate = game(&ctx, 1, z, y);
    assert_eq!(
        schedule_err(validate_create_or_update(&candidate, &ctx, &existing)),
        ScheduleError::TeamBookedInRound { round: 1, team: y }
    );
}

#[test]
fn free_day_conflicts_in_round() {
    let ctx = context(TournamentScheme::Single);
    let [x, y] = teams();
    let bye = Game::free_day(ctx.id, 1, x);

    let again = Game::free_day(ctx.id, 1, x);
    assert_eq!(
        schedule_err(validate_create_or_update(&again, &ctx, &[bye.clone()])),
        ScheduleError::DuplicateFreeDayInRound { round: 1, team: x }
    );

    let playing = game(&ctx, 1, y, x);
    assert_eq!(
        schedule_err(validate_create_or_update(&playing, &ctx, &[bye])),
        ScheduleError::TeamHasFreeDayInRound { round: 1, team: x }
    );
}

#[test]
fn single_scheme_allows_one_meeting() {
    let ctx = context(TournamentScheme::Single);
    let [x, y] = teams();
    let existing = vec![game(&ctx, 1, x, y)];
    for candidate in [game(&ctx, 2, x, y), game(&ctx, 5, y, x)] {
        assert_eq!(
            schedule_err(validate_create_or_update(&candidate, &ctx, &existing)),
            ScheduleError::PairAlreadyPlayed { round: 1 }
        );
    }
}

#[test]
fn single_scheme_one_free_day_per_team() {
    let ctx = context(TournamentScheme::Single);
    let [x] = teams();
    let existing = vec![Game::free_day(ctx.id, 1, x)];
    let candidate = Game::free_day(ctx.id, 3, x);
    assert_eq!(
        schedule_err(validate_create_or_update(&candidate, &ctx, &existing)),
        ScheduleError::FreeDayLimitExceeded { round: 1, team: x }
    );
}

#[test]
fn double_scheme_allows_each_home_once() {
    let ctx = context(TournamentScheme::Double);
    let [x, y] = teams();
    let first = game(&ctx, 1, x, y);
    let second = game(&ctx, 2, y, x);
    let accepted = validate_create_or_update(&second, &ctx, &[first.clone()]).unwrap();
    assert_eq!(accepted, second);

    let existing = vec![first, second];
    for third in [game(&ctx, 3, x, y), game(&ctx, 3, y, x)] {
        assert_eq!(
            schedule_err(validate_create_or_update(&third, &ctx, &existing)),
            ScheduleError::PairPlayedInBothOrders
        );
    }
}

#[test]
fn double_scheme_swaps_repeated_order() {
    let ctx = context(TournamentScheme::Double);
    let [x, y] = teams();
    let existing = vec![game(&ctx, 1, x, y)];
    let candidate = game(&ctx, 4, x, y);
    let accepted = validate_create_or_update(&candidate, &ctx, &existing).unwrap();
    assert_eq!(accepted.id, candidate.id);
    assert_eq!(accepted.home_team, y);
    assert_eq!(accepted.away_team, Some(x));
}

#[test]
fn double_scheme_one_free_day_per_team() {
    let ctx = context(TournamentScheme::DoubleAndHalf);
    let [x] = teams();
    let existing = vec![Game::free_day(ctx.id, 2, x)];
    let candidate = Game::free_day(ctx.id, 7, x);
    assert_eq!(
        schedule_err(validate_create_or_update(&candidate, &ctx, &existing)),
        ScheduleError::FreeDayLimitExceeded { round: 2, team: x }
    );
}

#[test]
fn edited_game_is_not_its_own_duplicate() {
    let ctx = context(TournamentScheme::Single);
    let [x, y] = teams();
    let original = game(&ctx, 1, x, y);
    let mut moved = original.clone();
    moved.round = 2;
    assert!(validate_create_or_update(&moved, &ctx, &[original.clone()]).is_ok());
    assert!(validate_create_or_update(&original, &ctx, &[original.clone()]).is_ok());
}
