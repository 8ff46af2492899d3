//! Single binary web server: JSON API over an in-memory tournament store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, and SCORING_CONFIG (path to a JSON scoring config).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;
use volleyball_tournament_web::export::standings_csv;
use volleyball_tournament_web::{
    compute_pivot, compute_standings, generate_round_robin, Game, GameResult, GameStore, GroupId,
    MatchValidator, MemoryStore, Ratio, ScoringConfig, StandingsEntry, TeamId, Tournament,
    TournamentId, TournamentScheme, ValidationError,
};

/// Store plus last activity per tournament (for auto-cleanup).
struct AppState {
    store: MemoryStore,
    last_activity: HashMap<TournamentId, Instant>,
}

impl AppState {
    fn touch(&mut self, id: TournamentId) -> bool {
        if self.store.get(id).is_none() {
            return false;
        }
        self.last_activity.insert(id, Instant::now());
        true
    }
}

type SharedState = Data<RwLock<AppState>>;
type Validator = Data<MatchValidator>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    scheme: TournamentScheme,
    games_start: DateTime<Utc>,
    games_end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct AddGroupBody {
    name: String,
    #[serde(default)]
    division: String,
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
    group_id: GroupId,
}

#[derive(Deserialize)]
struct GameBody {
    round: u8,
    home_team: TeamId,
    #[serde(default)]
    away_team: Option<TeamId>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    result: Option<GameResult>,
}

impl GameBody {
    fn into_game(self, id: Uuid, tournament_id: TournamentId) -> Game {
        Game {
            id,
            tournament_id,
            round: self.round,
            home_team: self.home_team,
            away_team: self.away_team,
            date: self.date,
            result: self.result,
        }
    }
}

#[derive(Deserialize)]
struct SwapRoundsBody {
    first: u8,
    second: u8,
}

#[derive(Deserialize)]
struct GenerateBody {
    #[serde(default)]
    shuffle: bool,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and game id.
#[derive(Deserialize)]
struct TournamentGamePath {
    id: TournamentId,
    game_id: Uuid,
}

/// Path segments: tournament id and team id.
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

/// Path segments: tournament id and group id.
#[derive(Deserialize)]
struct TournamentGroupPath {
    id: TournamentId,
    group_id: GroupId,
}

#[derive(Serialize)]
struct StandingsRow<'a> {
    position: usize,
    #[serde(flatten)]
    entry: &'a StandingsEntry,
    sets_ratio: Ratio,
    balls_ratio: Ratio,
}

#[derive(Serialize)]
struct GroupStandings<'a> {
    group_id: GroupId,
    group_name: &'a str,
    entries: Vec<StandingsRow<'a>>,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn validation_error(e: ValidationError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ValidationError::NotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "volleyball-tournament-web",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: SharedState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament = match Tournament::new(body.name, body.scheme, body.games_start, body.games_end) {
        Ok(t) => t,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let id = g.store.insert(tournament);
    g.touch(id);
    match g.store.get(id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => not_found(),
    }
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    match g.store.get(path.id) {
        Some(t) => HttpResponse::Ok().json(t),
        None => not_found(),
    }
}

/// Add a group.
#[post("/api/tournaments/{id}/groups")]
async fn api_add_group(state: SharedState, path: Path<TournamentPath>, body: Json<AddGroupBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    let Some(t) = g.store.get_mut(path.id) else {
        return not_found();
    };
    let body = body.into_inner();
    match t.add_group(body.name, body.division) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Add a team to a group.
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(state: SharedState, path: Path<TournamentPath>, body: Json<AddTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    let Some(t) = g.store.get_mut(path.id) else {
        return not_found();
    };
    let body = body.into_inner();
    match t.add_team(body.name, body.group_id) {
        Ok(_) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Remove a team that has no games yet.
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: SharedState, path: Path<TournamentTeamPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    let Some(t) = g.store.get_mut(path.id) else {
        return not_found();
    };
    match t.remove_team(path.team_id) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// All games of a tournament, ordered by round.
#[get("/api/tournaments/{id}/games")]
async fn api_list_games(state: SharedState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(snapshot) = g.store.snapshot(path.id) else {
        return not_found();
    };
    let mut games = snapshot.games;
    games.sort_by_key(|game| game.round);
    HttpResponse::Ok().json(games)
}

/// Schedule a game (with or without result).
#[post("/api/tournaments/{id}/games")]
async fn api_create_game(
    state: SharedState,
    validator: Validator,
    path: Path<TournamentPath>,
    body: Json<GameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    let game = body.into_inner().into_game(Uuid::new_v4(), path.id);
    match validator.create_game(&mut g.store, game) {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => validation_error(e),
    }
}

/// Edit a game: teams, round, date or result.
#[put("/api/tournaments/{id}/games/{game_id}")]
async fn api_update_game(
    state: SharedState,
    validator: Validator,
    path: Path<TournamentGamePath>,
    body: Json<GameBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    let game = body.into_inner().into_game(path.game_id, path.id);
    match validator.update_game(&mut g.store, game) {
        Ok(game) => HttpResponse::Ok().json(game),
        Err(e) => validation_error(e),
    }
}

/// Delete an unplayed game whose date has not passed.
#[delete("/api/tournaments/{id}/games/{game_id}")]
async fn api_delete_game(state: SharedState, validator: Validator, path: Path<TournamentGamePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    match validator.delete_game(&mut g.store, path.id, path.game_id, Utc::now()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => validation_error(e),
    }
}

/// Swap two rounds that have no played games.
#[post("/api/tournaments/{id}/rounds/swap")]
async fn api_swap_rounds(
    state: SharedState,
    validator: Validator,
    path: Path<TournamentPath>,
    body: Json<SwapRoundsBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    match validator.swap_rounds(&mut g.store, path.id, body.first, body.second) {
        Ok(games) => HttpResponse::Ok().json(games),
        Err(e) => validation_error(e),
    }
}

/// Generate the round-robin schedule (only while no games exist).
#[post("/api/tournaments/{id}/schedule/generate")]
async fn api_generate_schedule(
    state: SharedState,
    validator: Validator,
    path: Path<TournamentPath>,
    body: Option<Json<GenerateBody>>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if !g.touch(path.id) {
        return not_found();
    }
    let Some(snapshot) = g.store.snapshot(path.id) else {
        return not_found();
    };
    if !snapshot.games.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Tournament already has games" }));
    }
    let shuffle = body.map(|b| b.shuffle).unwrap_or_default();
    let games = match generate_round_robin(path.id, &snapshot.teams, snapshot.context.scheme, shuffle) {
        Ok(games) => games,
        Err(e) => return validation_error(e.into()),
    };
    match validator.create_games(&mut g.store, path.id, games) {
        Ok(games) => HttpResponse::Ok().json(games),
        Err(e) => validation_error(e),
    }
}

/// Ranked standings per group.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: SharedState, validator: Validator, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.store.get(path.id) else {
        return not_found();
    };
    let standings = compute_standings(&t.games, &t.teams, validator.config());
    let groups: Vec<GroupStandings> = t
        .groups
        .iter()
        .filter_map(|group| {
            let entries = standings.get(&group.id)?;
            Some(GroupStandings {
                group_id: group.id,
                group_name: &group.name,
                entries: entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| StandingsRow {
                        position: i + 1,
                        entry,
                        sets_ratio: entry.sets_ratio(),
                        balls_ratio: entry.balls_ratio(),
                    })
                    .collect(),
            })
        })
        .collect();
    HttpResponse::Ok().json(groups)
}

/// Ranked standings of every group as CSV.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: SharedState, validator: Validator, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.store.get(path.id) else {
        return not_found();
    };
    let standings = compute_standings(&t.games, &t.teams, validator.config());
    match standings_csv(&standings, &t.groups) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => {
            log::error!("Standings export failed for {}: {}", path.id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// Head-to-head table of one group.
#[get("/api/tournaments/{id}/groups/{group_id}/pivot")]
async fn api_pivot(state: SharedState, path: Path<TournamentGroupPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let Some(t) = g.store.get(path.id) else {
        return not_found();
    };
    if t.group(path.group_id).is_none() {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "No group" }));
    }
    let teams = t.teams_in_group(path.group_id);
    let games = t.games_in_group(path.group_id);
    HttpResponse::Ok().json(compute_pivot(&games, &teams))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn load_scoring_config() -> std::io::Result<ScoringConfig> {
    match std::env::var("SCORING_CONFIG") {
        Ok(path) => {
            let config = ScoringConfig::from_json_file(&path)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
            log::info!("Loaded scoring config from {}", path);
            Ok(config)
        }
        Err(_) => Ok(ScoringConfig::default()),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let validator = Data::new(MatchValidator::new(load_scoring_config()?));
    let state = Data::new(RwLock::new(AppState {
        store: MemoryStore::new(),
        last_activity: HashMap::new(),
    }));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let stale: Vec<TournamentId> = g
                .last_activity
                .iter()
                .filter(|(_, at)| at.elapsed() >= INACTIVITY_TIMEOUT)
                .map(|(id, _)| *id)
                .collect();
            for id in &stale {
                g.store.remove(*id);
                g.last_activity.remove(id);
            }
            if !stale.is_empty() {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", stale.len());
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(validator.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_group)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_list_games)
            .service(api_create_game)
            .service(api_update_game)
            .service(api_delete_game)
            .service(api_swap_rounds)
            .service(api_generate_schedule)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_pivot)
    })
    .bind(bind)?
    .run()
    .await
}
