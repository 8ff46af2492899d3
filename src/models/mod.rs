//! Data structures for the volleyball tournament: teams, games, results, tournaments.

mod game;
mod result;
mod team;
mod tournament;

pub use game::{Game, GameId};
pub use result::{GameResult, Penalty, Score, Side};
pub use team::{Group, GroupId, Team, TeamId};
pub use tournament::{
    Tournament, TournamentContext, TournamentError, TournamentId, TournamentScheme,
};
