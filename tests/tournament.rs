//! Integration tests for tournament metadata: groups, teams, window.

mod common;

use common::{date, home_3_0, tournament, tournament_with_teams};
use volleyball_tournament_web::{Game, Tournament, TournamentError, TournamentScheme};

#[test]
fn reversed_window_is_rejected() {
    assert!(matches!(
        Tournament::new("Cup", TournamentScheme::Single, date(2026, 6, 1), date(2026, 5, 1)),
        Err(TournamentError::InvalidWindow { .. })
    ));
}

#[test]
fn names_are_unique_case_insensitive() {
    let mut t = tournament(TournamentScheme::Single);
    let group = t.add_group("North", "First").unwrap();
    assert_eq!(t.add_group(" north ", ""), Err(TournamentError::DuplicateGroupName));
    t.add_team("Falcons", group).unwrap();
    assert_eq!(t.add_team("FALCONS", group), Err(TournamentError::DuplicateTeamName));
    assert_eq!(t.add_team("   ", group), Err(TournamentError::EmptyName));
}

#[test]
fn team_needs_existing_group() {
    let mut t = tournament(TournamentScheme::Single);
    let missing = uuid::Uuid::new_v4();
    assert_eq!(t.add_team("Falcons", missing), Err(TournamentError::GroupNotFound(missing)));
}

#[test]
fn scheduled_team_cannot_move_or_leave() {
    let (mut t, _, teams) = tournament_with_teams(TournamentScheme::Single, 3);
    let other = t.add_group("B", "Premier").unwrap();
    t.games.push(Game::new(t.id, 1, teams[0], teams[1]));

    assert_eq!(t.move_team(teams[0], other), Err(TournamentError::TeamHasGames(teams[0])));
    assert_eq!(t.remove_team(teams[1]), Err(TournamentError::TeamHasGames(teams[1])));

    t.move_team(teams[2], other).unwrap();
    assert_eq!(t.teams_in_group(other).len(), 1);
    t.remove_team(teams[2]).unwrap();
    assert_eq!(t.teams.len(), 2);
}

#[test]
fn games_in_group_excludes_cross_group_games() {
    let (mut t, group, teams) = tournament_with_teams(TournamentScheme::Single, 2);
    let other = t.add_group("B", "Premier").unwrap();
    let outsider = t.add_team("Outsider", other).unwrap();
    t.games.push(Game::new(t.id, 1, teams[0], teams[1]).with_result(home_3_0()));
    t.games.push(Game::new(t.id, 2, teams[0], outsider));
    t.games.push(Game::free_day(t.id, 3, teams[1]));

    assert_eq!(t.games_in_group(group).len(), 2);
    assert!(t.games_in_group(other).is_empty());
}

#[test]
fn window_is_inclusive() {
    let ctx = tournament(TournamentScheme::Single).context();
    assert!(ctx.contains(ctx.games_start));
    assert!(ctx.contains(ctx.games_end));
    assert!(!ctx.contains(date(2026, 2, 28)));
}
