//! Integration tests for standings aggregation and ranking.

mod common;

use common::{home_3_0, home_3_1, home_3_2, home_technical_win, result, teams_in_group};
use uuid::Uuid;
use volleyball_tournament_web::logic::ranking::rank_by;
use volleyball_tournament_web::logic::standings::aggregate;
use volleyball_tournament_web::{
    compute_standings, rank, Game, OutcomePoints, Penalty, PointsTable, RankCriterion, Ratio,
    Score, ScoringConfig, Side, StandingsEntry,
};

fn entry(name: &str, points: i32, won: u32, sets: (u32, u32), balls: (u32, u32)) -> StandingsEntry {
    StandingsEntry {
        team_name: name.to_string(),
        points,
        games_won: won,
        sets_won: sets.0,
        sets_lost: sets.1,
        balls_won: balls.0,
        balls_lost: balls.1,
        ..StandingsEntry::default()
    }
}

fn names(entries: &[StandingsEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.team_name.as_str()).collect()
}

#[test]
fn no_games_gives_zero_entry_per_team() {
    let group = Uuid::new_v4();
    let teams = teams_in_group(group, 3);
    let standings = compute_standings(&[], &teams, &ScoringConfig::default());
    assert_eq!(standings.len(), 1);
    let entries = &standings[&group];
    assert_eq!(names(entries), vec!["T0", "T1", "T2"]);
    assert!(entries.iter().all(|e| e.points == 0 && e.games_total == 0));
}

#[test]
fn teams_are_grouped_by_group() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut teams = teams_in_group(a, 2);
    teams.extend(teams_in_group(b, 3));
    let standings = aggregate(&[], &teams, &ScoringConfig::default());
    assert_eq!(standings[&a].len(), 2);
    assert_eq!(standings[&b].len(), 3);
}

#[test]
fn points_follow_the_outcome_table() {
    let group = Uuid::new_v4();
    let teams = teams_in_group(group, 4);
    let t = Uuid::new_v4();
    let games = vec![
        Game::new(t, 1, teams[0].id, teams[1].id).with_result(home_3_0()),
        Game::new(t, 1, teams[2].id, teams[3].id).with_result(home_3_2()),
        Game::new(t, 2, teams[1].id, teams[3].id).with_result(home_3_1().transpose()),
    ];
    let standings = aggregate(&games, &teams, &ScoringConfig::default());
    let e = &standings[&group];

    assert_eq!((e[0].points, e[0].games_won, e[0].wins_3_0), (3, 1, 1));
    assert_eq!((e[1].points, e[1].games_lost, e[1].losses_0_3, e[1].losses_1_3), (0, 2, 1, 1));
    assert_eq!((e[2].points, e[2].wins_3_2), (2, 1));
    assert_eq!((e[3].points, e[3].games_won, e[3].losses_2_3), (1 + 3, 1, 1));
    assert_eq!((e[3].sets_won, e[3].sets_lost), (2 + 3, 3 + 1));
    assert_eq!(e[0].balls_won, 75);
    assert_eq!(e[0].balls_lost, 60);
}

#[test]
fn configured_points_table_is_used() {
    let group = Uuid::new_v4();
    let teams = teams_in_group(group, 2);
    let config = ScoringConfig {
        points: PointsTable::new(vec![OutcomePoints {
            winner_sets: 3,
            loser_sets: 2,
            winner_points: 3,
            loser_points: 1,
        }]),
        ..ScoringConfig::default()
    };
    let games = vec![Game::new(Uuid::new_v4(), 1, teams[0].id, teams[1].id).with_result(home_3_2())];
    let e = &aggregate(&games, &teams, &config)[&group];
    assert_eq!((e[0].points, e[1].points), (3, 1));
}

#[test]
fn unplayed_games_and_free_days_are_skipped() {
    let group = Uuid::new_v4();
    let teams = teams_in_group(group, 3);
    let t = Uuid::new_v4();
    let games = vec![
        Game::new(t, 1, teams[0].id, teams[1].id),
        Game::free_day(t, 1, teams[2].id),
    ];
    let e = &aggregate(&games, &teams, &ScoringConfig::default())[&group];
    assert!(e.iter().all(|e| e.games_total == 0));
}

#[test]
fn technical_defeat_set_counts_sets_but_not_balls() {
    let group = Uuid::new_v4();
    let teams = teams_in_group(group, 2);
    let mut r = result((3, 1), &[(25, 20), (20, 25), (25, 20), (25, 20)]);
    r.set_scores[1] = Score::technical_defeat(0, 25);
    let games = vec![Game::new(Uuid::new_v4(), 1, teams[0].id, teams[1].id).with_result(r)];
    let e = &aggregate(&games, &teams, &ScoringConfig::default())[&group];

    assert_eq!((e[0].sets_won, e[0].sets_lost), (3, 1));
    assert_eq!((e[1].sets_won, e[1].sets_lost), (1, 3));
    assert_eq!((e[0].balls_won, e[0].balls_lost), (75, 60));
    assert_eq!((e[1].balls_won, e[1].balls_lost), (60, 75));
}

#[test]
fn technical_defeat_game_has_no_balls() {
    let group = Uuid::new_v4();
    let teams = teams_in_group(group, 2);
    let games = vec![Game::new(Uuid::new_v4(), 1, teams[0].id, teams[1].id)
        .with_result(home_technical_win())];
    let e = &aggregate(&games, &teams, &ScoringConfig::default())[&group];
    assert_eq!((e[0].points, e[0].sets_won, e[0].balls_won), (3, 3, 0));
    assert_eq!((e[1].sets_lost, e[1].balls_lost), (3, 0));
}

#[test]
fn penalty_reduces_points() {
    let group = Uuid::new_v4();
    let teams = teams_in_group(group, 2);
    let r = home_3_0().with_penalty(Penalty {
        side: Side::Home,
        amount: 2,
        description: "Late roster".to_string(),
    });
    let games = vec![Game::new(Uuid::new_v4(), 1, teams[0].id, teams[1].id).with_result(r)];
    let e = &aggregate(&games, &teams, &ScoringConfig::default())[&group];
    assert_eq!((e[0].points, e[0].penalty_points), (1, 2));
    assert_eq!(e[1].points, 0);
}

#[test]
fn sets_ratio_breaks_equal_points_and_wins() {
    let a = entry("A", 9, 3, (9, 1), (0, 0));
    let b = entry("B", 9, 3, (9, 3), (0, 0));
    assert_eq!(names(&rank(vec![b, a])), vec!["A", "B"]);
}

#[test]
fn nothing_lost_beats_any_finite_ratio() {
    let c = entry("C", 6, 2, (6, 0), (150, 100));
    let d = entry("D", 6, 2, (16, 2), (400, 300));
    assert_eq!(names(&rank(vec![d, c])), vec!["C", "D"]);
    assert!(Ratio::new(0, 0) > Ratio::new(8, 1));
    assert_eq!(Ratio::new(6, 0).value(), None);
    assert_eq!(Ratio::new(16, 2).value(), Some(8.0));
}

#[test]
fn equal_ratios_compare_equal() {
    assert_eq!(Ratio::new(1, 2), Ratio::new(2, 4));
    assert_eq!(Ratio::new(5, 0), Ratio::new(0, 0));
    assert_ne!(Ratio::new(1, 2), Ratio::new(1, 3));
}

#[test]
fn cascade_order_points_wins_sets_balls() {
    let entries = vec![
        entry("low", 3, 1, (3, 6), (100, 120)),
        entry("balls", 6, 2, (6, 3), (150, 100)),
        entry("wins", 6, 3, (9, 9), (100, 200)),
        entry("balls2", 6, 2, (6, 3), (140, 100)),
        entry("top", 9, 3, (9, 0), (225, 150)),
    ];
    assert_eq!(
        names(&rank(entries)),
        vec!["top", "wins", "balls", "balls2", "low"]
    );
}

#[test]
fn full_ties_keep_input_order() {
    let entries = vec![
        entry("first", 3, 1, (3, 1), (90, 80)),
        entry("second", 3, 1, (3, 1), (90, 80)),
        entry("third", 3, 1, (3, 1), (90, 80)),
    ];
    assert_eq!(names(&rank(entries)), vec!["first", "second", "third"]);
}

#[test]
fn custom_criteria() {
    let entries = vec![
        entry("points", 9, 3, (9, 6), (0, 0)),
        entry("ratio", 6, 2, (6, 0), (0, 0)),
    ];
    let ranked = rank_by(entries, &[RankCriterion::SetsRatio, RankCriterion::Points]);
    assert_eq!(names(&ranked), vec!["ratio", "points"]);
}

#[test]
fn recomputing_gives_identical_output() {
    let group = Uuid::new_v4();
    let teams = teams_in_group(group, 3);
    let t = Uuid::new_v4();
    let games = vec![
        Game::new(t, 1, teams[0].id, teams[1].id).with_result(home_3_1()),
        Game::new(t, 2, teams[1].id, teams[2].id).with_result(home_3_2()),
    ];
    let config = ScoringConfig::default();
    assert_eq!(
        compute_standings(&games, &teams, &config),
        compute_standings(&games, &teams, &config)
    );
}
