//! Stub of the remote statistics API
//!
//! Serves `GET /players/{id}` from a table of canned responses on a random
//! local port. Unknown ids get a JSON 404.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use parking_lot::RwLock;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One canned response
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl StubResponse {
    /// 200 with a JSON body
    pub fn json(body: &Value) -> Self {
        Self {
            status: 200,
            content_type: "application/json; charset=utf-8".to_string(),
            body: body.to_string(),
        }
    }

    /// Error status with a JSON error body
    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            body: json!({ "error": "stubbed failure" }).to_string(),
        }
    }

    /// 200 with an HTML body, as served by an error page or captive portal
    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html".to_string(),
            body: body.to_string(),
        }
    }
}

/// Player record in the remote API's shape
pub fn player_json(name: &str, solo_rating: f64, solo_games: i32) -> Value {
    json!({
        "name": name,
        "profile_id": 1,
        "modes": {
            "rm_solo": {
                "rating": solo_rating,
                "wins_count": solo_games / 2,
                "games_count": solo_games,
                "last_game_at": "2024-05-01T12:00:00Z"
            },
            "rm_1v1_elo": {
                "rating": solo_rating + 80.0,
                "wins_count": solo_games / 2,
                "games_count": solo_games
            },
            "rm_team": {
                "rating": 1010,
                "wins_count": 3,
                "games_count": 7,
                "last_game_at": "2024-04-28T18:30:00Z"
            }
        },
        "avatars": {
            "small": format!("https://cdn.example/{name}-s.png"),
            "full": format!("https://cdn.example/{name}.png")
        },
        "clan": { "tag": "STB" },
        "region": "eu",
        "main_civilization": "english"
    })
}

#[derive(Default)]
struct StubState {
    responses: RwLock<HashMap<String, StubResponse>>,
    latency: RwLock<Duration>,
    hits: AtomicUsize,
}

/// Running stub server; stops when dropped
pub struct StubRemote {
    pub addr: SocketAddr,
    state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubRemote {
    pub async fn start() -> Result<Self> {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .route("/players/:player_id", get(serve_player))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    /// Base URL to put in `REMOTE_BASE_URL`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn respond(&self, player_id: &str, response: StubResponse) {
        self.state
            .responses
            .write()
            .insert(player_id.to_string(), response);
    }

    /// Serve a well-formed player record
    pub fn add_player(&self, player_id: &str, name: &str, solo_rating: f64, solo_games: i32) {
        self.respond(
            player_id,
            StubResponse::json(&player_json(name, solo_rating, solo_games)),
        );
    }

    /// Delay every response
    pub fn set_latency(&self, latency: Duration) {
        *self.state.latency.write() = latency;
    }

    /// Number of requests served so far
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

impl Drop for StubRemote {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_player(
    State(state): State<Arc<StubState>>,
    Path(player_id): Path<String>,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    let latency = *state.latency.read();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let canned = state.responses.read().get(&player_id).cloned();
    let canned = canned.unwrap_or_else(|| StubResponse::status(404));

    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, canned.content_type)], canned.body).into_response()
}
