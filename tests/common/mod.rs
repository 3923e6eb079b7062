#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header::AUTHORIZATION},
    routing::{get, post},
};
use intune::config::{Config, DEFAULT_SCOPE};
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const TOKEN: &str = "token";
pub const ARTISTS: &str = "artists";
pub const TRACKS: &str = "tracks";
pub const ME: &str = "me";
pub const CREATE_PLAYLIST: &str = "create_playlist";
pub const ADD_TRACKS: &str = "add_tracks";

/// `Basic` credentials for `client-id:client-secret`.
pub const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Value,
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn created(body: Value) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub route: &'static str,
    pub uri: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct MockState {
    replies: HashMap<&'static str, Reply>,
    log: Mutex<Vec<Recorded>>,
}

/// Fake Spotify accounts + Web API bound to an ephemeral local port.
pub struct MockProvider {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockProvider {
    pub async fn start(replies: Vec<(&'static str, Reply)>) -> Self {
        let state = Arc::new(MockState {
            replies: replies.into_iter().collect(),
            log: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/top/artists", get(artists))
            .route("/v1/me/top/tracks", get(tracks))
            .route("/v1/me", get(me))
            .route("/v1/users/{user_id}/playlists", post(create_playlist))
            .route("/v1/playlists/{playlist_id}/tracks", post(add_tracks))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: format!("{}/authorize", self.base_url),
            token_url: format!("{}/api/token", self.base_url),
            api_url: format!("{}/v1", self.base_url),
            server_address: "127.0.0.1:0".to_string(),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.log.lock().unwrap().clone()
    }

    pub fn routes_hit(&self) -> Vec<&'static str> {
        self.requests().iter().map(|r| r.route).collect()
    }

    pub fn hits(&self, route: &str) -> usize {
        self.requests().iter().filter(|r| r.route == route).count()
    }

    pub fn last(&self, route: &str) -> Option<Recorded> {
        self.requests().into_iter().filter(|r| r.route == route).last()
    }
}

fn respond(
    state: &MockState,
    route: &'static str,
    uri: &Uri,
    headers: &HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    state.log.lock().unwrap().push(Recorded {
        route,
        uri: uri.to_string(),
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.replies.get(route) {
        Some(reply) => (reply.status, Json(reply.body.clone())),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "no reply" }))),
    }
}

async fn token(
    State(s): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    respond(&s, TOKEN, &uri, &headers, body)
}

async fn artists(
    State(s): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    respond(&s, ARTISTS, &uri, &headers, body)
}

async fn tracks(
    State(s): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    respond(&s, TRACKS, &uri, &headers, body)
}

async fn me(
    State(s): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    respond(&s, ME, &uri, &headers, body)
}

async fn create_playlist(
    State(s): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    respond(&s, CREATE_PLAYLIST, &uri, &headers, body)
}

async fn add_tracks(
    State(s): State<Arc<MockState>>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    respond(&s, ADD_TRACKS, &uri, &headers, body)
}

pub fn artist_item(id: &str, name: &str, genres: &[&str], popularity: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "genres": genres,
        "popularity": popularity,
        "followers": { "total": 1234567 },
        "href": format!("https://api.spotify.com/v1/artists/{}", id),
        "images": [
            { "url": format!("https://i.scdn.co/image/{}-large", id) },
            { "url": format!("https://i.scdn.co/image/{}-small", id) }
        ]
    })
}

pub fn track_item(id: &str, name: &str, artists: &[&str], release_date: &str, popularity: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>(),
        "album": {
            "release_date": release_date,
            "images": [{ "url": format!("https://i.scdn.co/image/album-{}", id) }]
        },
        "popularity": popularity,
        "href": format!("https://api.spotify.com/v1/tracks/{}", id)
    })
}

pub fn page(items: Vec<Value>, total: u64) -> Value {
    json!({ "items": items, "total": total, "limit": 10, "offset": 0 })
}
