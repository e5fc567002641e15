// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the statistics API for integration tests.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bezirk_charts::config::Config;
use bezirk_charts::services::PasswordPrompt;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const USERNAME: &str = "tester@example.com";
pub const PASSWORD: &str = "correct horse";
pub const REFRESH_TOKEN: &str = "stored-refresh-token";
pub const LOGIN_ACCESS_TOKEN: &str = "login-access-token";
pub const REFRESHED_ACCESS_TOKEN: &str = "refreshed-access-token";

/// How the history endpoint answers.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Normal,
    /// `200 OK` with an empty body
    EmptyBody,
    /// `200 OK` with a JSON `null` body
    NullBody,
    /// `500` with a valid-looking body
    ServerError,
}

/// Mock service state; tweak the public fields before calling `spawn`.
pub struct MockService {
    pub regions: Value,
    pub histories: HashMap<String, Value>,
    pub history_mode: HistoryMode,
    /// Login answers `200` with an `error` field instead of `401`
    pub login_error_with_ok: bool,
    /// Extra `error` field sent along with successful login tokens
    pub login_success_error: Option<Value>,
    pub login_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub seen_tokens: Mutex<Vec<String>>,
}

impl Default for MockService {
    fn default() -> Self {
        let mut histories = HashMap::new();
        histories.insert("101".to_string(), default_history());

        Self {
            regions: json!({
                "results": [
                    {"gkz": "100", "name": "Eisenstadt(Stadt)"},
                    {"gkz": "101", "name": "Testbezirk"},
                    {"gkz": 102, "name": "testbezirk"},
                ]
            }),
            histories,
            history_mode: HistoryMode::Normal,
            login_error_with_ok: false,
            login_success_error: None,
            login_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            seen_tokens: Mutex::new(Vec::new()),
        }
    }
}

/// Three days of "Testbezirk" statistics.
pub fn default_history() -> Value {
    json!({
        "results": [
            {
                "date": "2020-11-01T00:00:00.000Z",
                "gkz": "101",
                "casesTotal": 100,
                "casesToday": 10,
                "deathsTotal": 5,
                "recoveredTotal": 60,
                "SevenDayIncidence": 120.5
            },
            {
                "date": "2020-11-02T00:00:00.000Z",
                "gkz": "101",
                "casesTotal": 112,
                "casesToday": 12,
                "deathsTotal": 5,
                "recoveredTotal": 70,
                "SevenDayIncidence": 131.2
            },
            {
                "date": "2020-11-03T00:00:00.000Z",
                "gkz": "101",
                "casesTotal": 125,
                "casesToday": 13,
                "deathsTotal": 6,
                "recoveredTotal": 80,
                "SevenDayIncidence": 140.0
            }
        ]
    })
}

impl MockService {
    /// Serve on an ephemeral local port; returns the base URL.
    pub async fn spawn(self) -> (String, Arc<MockService>) {
        let state = Arc::new(self);

        let app = Router::new()
            .route("/api/info", get(info))
            .route("/api/bezirk", get(list_regions))
            .route("/api/bezirk/{gkz}", get(get_region))
            .route("/api/statisticEntry", get(history))
            .route("/api/user/login", post(login))
            .route("/api/user/refreshToken", post(refresh))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock service");
        let addr = listener.local_addr().expect("Mock service has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock service failed");
        });

        (format!("http://{}/api/", addr), state)
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let token = headers
            .get("Token")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let ok = token == LOGIN_ACCESS_TOKEN || token == REFRESHED_ACCESS_TOKEN;
        self.seen_tokens.lock().unwrap().push(token);
        ok
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid access token"})),
    )
        .into_response()
}

async fn info() -> Json<Value> {
    Json(json!({"name": "covidApiAustria", "version": "1.0.0"}))
}

async fn list_regions(State(state): State<Arc<MockService>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(state.regions.clone()).into_response()
}

async fn get_region(
    State(state): State<Arc<MockService>>,
    Path(gkz): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }

    let found = state.regions["results"]
        .as_array()
        .and_then(|list| {
            list.iter().find(|r| match &r["gkz"] {
                Value::String(s) => *s == gkz,
                other => other.to_string() == gkz,
            })
        })
        .cloned();

    match found {
        Some(region) => Json(region).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn history(
    State(state): State<Arc<MockService>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    state.history_calls.fetch_add(1, Ordering::SeqCst);

    match state.history_mode {
        HistoryMode::EmptyBody => return (StatusCode::OK, "").into_response(),
        HistoryMode::NullBody => return (StatusCode::OK, "null").into_response(),
        HistoryMode::ServerError => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(default_history())).into_response()
        }
        HistoryMode::Normal => {}
    }

    let history = params
        .get("gkz")
        .and_then(|gkz| state.histories.get(gkz))
        .cloned();

    match history {
        Some(body) => Json(body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(state): State<Arc<MockService>>, Json(body): Json<LoginBody>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);

    if body.email == USERNAME && body.password == PASSWORD {
        let mut tokens = json!({
            "accessToken": {"token": LOGIN_ACCESS_TOKEN, "expiresIn": "15m"},
            "refreshToken": "freshly-issued-refresh-token"
        });
        if let Some(error) = &state.login_success_error {
            tokens["error"] = error.clone();
        }
        return Json(tokens).into_response();
    }

    let status = if state.login_error_with_ok {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(json!({"error": "Wrong email or password"}))).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody {
    user_email: String,
    refresh_token: String,
}

async fn refresh(State(state): State<Arc<MockService>>, Json(body): Json<RefreshBody>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    if body.user_email == USERNAME && body.refresh_token == REFRESH_TOKEN {
        return Json(json!({"accessToken": {"token": REFRESHED_ACCESS_TOKEN}})).into_response();
    }
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid refresh token"})),
    )
        .into_response()
}

/// Password prompt answering with a fixed password and counting calls.
#[allow(dead_code)]
pub struct StaticPassword {
    pub password: String,
    pub asked: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl StaticPassword {
    pub fn new(password: &str) -> (Self, Arc<AtomicUsize>) {
        let asked = Arc::new(AtomicUsize::new(0));
        (
            Self {
                password: password.to_string(),
                asked: asked.clone(),
            },
            asked,
        )
    }
}

impl PasswordPrompt for StaticPassword {
    async fn read_password(&mut self, _prompt: &str) -> std::io::Result<String> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.password.clone())
    }
}

/// Config pointing at a mock service.
#[allow(dead_code)]
pub fn test_config(base_url: &str, refresh_token: Option<&str>, output_dir: &std::path::Path) -> Config {
    Config {
        api_username: USERNAME.to_string(),
        api_refresh_token: refresh_token.map(str::to_string),
        api_base_url: base_url.to_string(),
        output_dir: output_dir.to_path_buf(),
        ..Config::test_default()
    }
}
