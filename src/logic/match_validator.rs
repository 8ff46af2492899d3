//! Accept or reject game create/update/delete requests and commit accepted ones.

use crate::config::ScoringConfig;
use crate::error::{NotFound, PolicyViolation, ScheduleError, ValidationError};
use crate::logic::{schedule_rules, score_rules};
use crate::models::{Game, GameId, Team, Tournament, TournamentContext, TournamentId};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Consistent read of one tournament, taken once per request.
#[derive(Clone, Debug)]
pub struct TournamentSnapshot {
    pub context: TournamentContext,
    pub teams: Vec<Team>,
    pub games: Vec<Game>,
}

impl TournamentSnapshot {
    pub fn from_tournament(tournament: &Tournament) -> Self {
        Self {
            context: tournament.context(),
            teams: tournament.teams.clone(),
            games: tournament.games.clone(),
        }
    }

    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }
}

/// A single write to the game collection.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameChange {
    Insert(Game),
    Update(Game),
    Delete(GameId),
}

/// Where games live. The validator reads a snapshot and hands back the changes to apply.
pub trait GameStore {
    fn snapshot(&self, tournament_id: TournamentId) -> Option<TournamentSnapshot>;

    /// Apply all changes or none. Updates and deletes of games that vanished
    /// since the snapshot fail with `NotFound::Game`; inserting an id that is
    /// already stored fails with `ScheduleError::GameExists`.
    fn commit(&mut self, tournament_id: TournamentId, changes: Vec<GameChange>)
        -> Result<(), ValidationError>;
}

/// In-memory store keyed by tournament id.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tournaments: HashMap<TournamentId, Tournament>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tournament: Tournament) -> TournamentId {
        let id = tournament.id;
        self.tournaments.insert(id, tournament);
        id
    }

    pub fn get(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    pub fn get_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.get_mut(&id)
    }

    pub fn remove(&mut self, id: TournamentId) -> Option<Tournament> {
        self.tournaments.remove(&id)
    }
}

impl GameStore for MemoryStore {
    fn snapshot(&self, tournament_id: TournamentId) -> Option<TournamentSnapshot> {
        self.tournaments
            .get(&tournament_id)
            .map(TournamentSnapshot::from_tournament)
    }

    fn commit(
        &mut self,
        tournament_id: TournamentId,
        changes: Vec<GameChange>,
    ) -> Result<(), ValidationError> {
        let tournament = self
            .tournaments
            .get_mut(&tournament_id)
            .ok_or(NotFound::Tournament(tournament_id))?;
        // Check everything first so a failed commit leaves the games untouched.
        let mut inserted = HashSet::new();
        for change in &changes {
            let target = match change {
                GameChange::Insert(game) => {
                    let stored = tournament.games.iter().any(|g| g.id == game.id);
                    if stored || !inserted.insert(game.id) {
                        return Err(ScheduleError::GameExists(game.id).into());
                    }
                    continue;
                }
                GameChange::Update(game) => game.id,
                GameChange::Delete(id) => *id,
            };
            if !tournament.games.iter().any(|g| g.id == target) {
                return Err(NotFound::Game(target).into());
            }
        }
        for change in changes {
            match change {
                GameChange::Insert(game) => tournament.games.push(game),
                GameChange::Update(game) => {
                    if let Some(slot) = tournament.games.iter_mut().find(|g| g.id == game.id) {
                        *slot = game;
                    }
                }
                GameChange::Delete(id) => tournament.games.retain(|g| g.id != id),
            }
        }
        Ok(())
    }
}

/// Validate a game against the scoring rules and the rest of the schedule.
///
/// Returns the game to store (see `schedule_rules::validate_create_or_update`
/// for when home and away get swapped).
pub fn validate_game(
    candidate: &Game,
    existing_games: &[Game],
    tournament: &TournamentContext,
    config: &ScoringConfig,
) -> Result<Game, ValidationError> {
    if let Some(result) = candidate.played_result() {
        score_rules::validate(result, config)?;
    }
    schedule_rules::validate_create_or_update(candidate, tournament, existing_games)
}

/// Runs the score and schedule rules and commits accepted changes to a store.
#[derive(Clone, Debug, Default)]
pub struct MatchValidator {
    config: ScoringConfig,
}

impl MatchValidator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Schedule a new game, with or without a result.
    pub fn create_game(
        &self,
        store: &mut impl GameStore,
        candidate: Game,
    ) -> Result<Game, ValidationError> {
        let snapshot = load(&*store, candidate.tournament_id)?;
        check_new(&candidate, &snapshot)?;
        let accepted = self.check(&candidate, &snapshot)?;
        store.commit(snapshot.context.id, vec![GameChange::Insert(accepted.clone())])?;
        log::info!(
            "Scheduled game {} in round {} of tournament {}",
            accepted.id,
            accepted.round,
            accepted.tournament_id
        );
        Ok(accepted)
    }

    /// Schedule several new games in one commit, each validated against the
    /// existing games and the ones accepted before it.
    pub fn create_games(
        &self,
        store: &mut impl GameStore,
        tournament_id: TournamentId,
        candidates: Vec<Game>,
    ) -> Result<Vec<Game>, ValidationError> {
        let mut snapshot = load(&*store, tournament_id)?;
        let mut accepted = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if candidate.tournament_id != tournament_id {
                return Err(NotFound::Tournament(candidate.tournament_id).into());
            }
            check_new(&candidate, &snapshot)?;
            let game = self.check(&candidate, &snapshot)?;
            snapshot.games.push(game.clone());
            accepted.push(game);
        }
        let changes = accepted.iter().cloned().map(GameChange::Insert).collect();
        store.commit(tournament_id, changes)?;
        log::info!(
            "Scheduled {} games in tournament {}",
            accepted.len(),
            tournament_id
        );
        Ok(accepted)
    }

    /// Replace an existing game (teams, round, date or result).
    pub fn update_game(
        &self,
        store: &mut impl GameStore,
        candidate: Game,
    ) -> Result<Game, ValidationError> {
        let snapshot = load(&*store, candidate.tournament_id)?;
        if snapshot.game(candidate.id).is_none() {
            return Err(NotFound::Game(candidate.id).into());
        }
        let accepted = self.check(&candidate, &snapshot)?;
        store.commit(snapshot.context.id, vec![GameChange::Update(accepted.clone())])?;
        log::info!("Updated game {}", accepted.id);
        Ok(accepted)
    }

    /// Remove a game that has no sets played and whose date has not passed.
    pub fn delete_game(
        &self,
        store: &mut impl GameStore,
        tournament_id: TournamentId,
        game_id: GameId,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let snapshot = load(&*store, tournament_id)?;
        let game = snapshot.game(game_id).ok_or(NotFound::Game(game_id))?;
        check_deletable(game, now)?;
        store.commit(tournament_id, vec![GameChange::Delete(game_id)])?;
        log::info!("Deleted game {}", game_id);
        Ok(())
    }

    /// Exchange the round numbers of all games in two rounds. Only rounds
    /// without played games can be swapped.
    pub fn swap_rounds(
        &self,
        store: &mut impl GameStore,
        tournament_id: TournamentId,
        first: u8,
        second: u8,
    ) -> Result<Vec<Game>, ValidationError> {
        if first == 0 || second == 0 {
            return Err(ScheduleError::InvalidRound.into());
        }
        let snapshot = load(&*store, tournament_id)?;
        if first == second {
            return Ok(Vec::new());
        }
        let mut moved = Vec::new();
        for game in &snapshot.games {
            let target = if game.round == first {
                second
            } else if game.round == second {
                first
            } else {
                continue;
            };
            if game.played_result().is_some() {
                return Err(PolicyViolation::GameAlreadyPlayed(game.id).into());
            }
            let mut game = game.clone();
            game.round = target;
            moved.push(game);
        }
        if !moved.is_empty() {
            let changes = moved.iter().cloned().map(GameChange::Update).collect();
            store.commit(tournament_id, changes)?;
            log::info!(
                "Swapped rounds {} and {} of tournament {} ({} games)",
                first,
                second,
                tournament_id,
                moved.len()
            );
        }
        Ok(moved)
    }

    fn check(&self, candidate: &Game, snapshot: &TournamentSnapshot) -> Result<Game, ValidationError> {
        for team in candidate.teams() {
            if !snapshot.teams.iter().any(|t| t.id == team) {
                return Err(NotFound::Team(team).into());
            }
        }
        validate_game(candidate, &snapshot.games, &snapshot.context, &self.config).map_err(|e| {
            log::debug!("Rejected game {}: {}", candidate.id, e);
            e
        })
    }
}

/// Deleting is only allowed before the game starts and before any set is entered.
pub fn check_deletable(game: &Game, now: DateTime<Utc>) -> Result<(), PolicyViolation> {
    if game.played_result().is_some() {
        return Err(PolicyViolation::GameAlreadyPlayed(game.id));
    }
    match game.date {
        Some(date) if date < now => Err(PolicyViolation::GameDatePassed(game.id)),
        _ => Ok(()),
    }
}

/// Inserts must carry an id the tournament has not seen yet.
fn check_new(candidate: &Game, snapshot: &TournamentSnapshot) -> Result<(), ScheduleError> {
    match snapshot.game(candidate.id) {
        Some(_) => Err(ScheduleError::GameExists(candidate.id)),
        None => Ok(()),
    }
}

fn load(store: &impl GameStore, tournament_id: TournamentId) -> Result<TournamentSnapshot, NotFound> {
    store
        .snapshot(tournament_id)
        .ok_or(NotFound::Tournament(tournament_id))
}
