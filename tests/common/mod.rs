//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use volleyball_tournament_web::{
    Game, GameResult, GroupId, Score, Team, TeamId, Tournament, TournamentContext,
    TournamentScheme,
};

pub fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Played sets; missing trailing sets are filled with the unplayed sentinel.
pub fn result(game: (u16, u16), sets: &[(u16, u16)]) -> GameResult {
    let mut set_scores = [Score::unplayed(); 5];
    for (slot, &(home, away)) in set_scores.iter_mut().zip(sets) {
        *slot = Score::new(home, away);
    }
    GameResult::new(Score::new(game.0, game.1), set_scores)
}

pub fn home_3_0() -> GameResult {
    result((3, 0), &[(25, 20), (25, 20), (25, 20)])
}

pub fn home_3_1() -> GameResult {
    result((3, 1), &[(25, 20), (20, 25), (25, 20), (25, 20)])
}

pub fn home_3_2() -> GameResult {
    result((3, 2), &[(25, 20), (20, 25), (25, 20), (20, 25), (15, 10)])
}

/// Home team wins by technical defeat of the away team.
pub fn home_technical_win() -> GameResult {
    let mut r = result((3, 0), &[]);
    r.game_score.is_technical_defeat = true;
    for set in r.set_scores.iter_mut().take(3) {
        *set = Score::technical_defeat(25, 0);
    }
    r
}

pub fn tournament(scheme: TournamentScheme) -> Tournament {
    Tournament::new("Spring Cup", scheme, date(2026, 3, 1), date(2026, 6, 30)).unwrap()
}

pub fn context(scheme: TournamentScheme) -> TournamentContext {
    tournament(scheme).context()
}

/// Tournament with one group and `n` teams named T0..Tn.
pub fn tournament_with_teams(scheme: TournamentScheme, n: usize) -> (Tournament, GroupId, Vec<TeamId>) {
    let mut t = tournament(scheme);
    let group = t.add_group("A", "Premier").unwrap();
    let teams = (0..n)
        .map(|i| t.add_team(format!("T{i}"), group).unwrap())
        .collect();
    (t, group, teams)
}

pub fn teams_in_group(group: GroupId, n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"), group)).collect()
}

pub fn game(ctx: &TournamentContext, round: u8, home: TeamId, away: TeamId) -> Game {
    Game::new(ctx.id, round, home, away)
}
