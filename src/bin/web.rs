//! Single binary web server: bracket generation over a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    get, post,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use bracketeer::{read_roster, Competitor, GeneratorOptions, Season, SeasonId};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-season entry: season data + last activity time (for auto-cleanup).
struct SeasonEntry {
    season: Season,
    last_activity: Instant,
}

/// In-memory state: many seasons by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<SeasonId, SeasonEntry>>>;

/// Inactivity threshold: seasons not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct GenerateBracketBody {
    competitors: Vec<Competitor>,
    #[serde(flatten)]
    options: GeneratorOptions,
}

/// Path segment: season id (e.g. /api/seasons/{id})
#[derive(Deserialize)]
struct SeasonPath {
    id: SeasonId,
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "bracketeer",
    })
}

/// Create a new season with an empty pairing history.
#[post("/api/seasons")]
async fn api_create_season(state: AppState) -> HttpResponse {
    let season = Season::new();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&season);
    g.insert(
        season.id,
        SeasonEntry {
            season,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a season by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/seasons/{id}")]
async fn api_get_season(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.season)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No season" })),
    }
}

/// Generate a bracket from a JSON competitor list, updating the season's pairing history.
#[post("/api/seasons/{id}/brackets")]
async fn api_generate_bracket(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<GenerateBracketBody>,
) -> HttpResponse {
    let body = body.into_inner();
    generate_for_season(&state, path.id, &body.competitors, body.options)
}

/// Generate a bracket from a CSV roster (`name,team,rating`); options come from the query.
#[post("/api/seasons/{id}/brackets/csv")]
async fn api_generate_bracket_csv(
    state: AppState,
    path: Path<SeasonPath>,
    options: Query<GeneratorOptions>,
    body: String,
) -> HttpResponse {
    let competitors = match read_roster(body.as_bytes()) {
        Ok(c) => c,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    generate_for_season(&state, path.id, &competitors, options.into_inner())
}

fn generate_for_season(
    state: &AppState,
    id: SeasonId,
    competitors: &[Competitor],
    options: GeneratorOptions,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No season" })),
    };
    entry.last_activity = Instant::now();
    match entry.season.generate(competitors, options) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_season)
        .service(api_get_season)
        .service(api_generate_bracket)
        .service(api_generate_bracket_csv);
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

    let state = Data::new(RwLock::new(HashMap::<SeasonId, SeasonEntry>::new()));

    // Background task: every 30 minutes, remove seasons inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive season(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(bind)?
        .run()
        .await
}
