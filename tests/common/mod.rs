//! In-process fake of the console backend, served by warp on an ephemeral
//! port. Only the handful of routes the integration tests exercise exist.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use synapse_console::session::SessionStore;
use synapse_console::transport::ApiTransport;
use synapse_console::ConsoleClient;
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reply::Response;
use warp::{Filter, Reply};

pub const TOKEN: &str = "T";
pub const TIMESTAMP: &str = "2024-05-01T10:00:00.123456";
pub const SLOW_REPLY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
pub struct BackendState {
    pub requests: Mutex<Vec<RecordedRequest>>,
    pub combinations: Mutex<BTreeMap<i64, Value>>,
}

impl BackendState {
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

pub struct FakeBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        let (addr, server) =
            warp::serve(routes(state.clone())).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// A client with an in-memory session, optionally already signed in.
    pub fn client(&self, token: Option<&str>) -> ConsoleClient {
        let session = SessionStore::in_memory();
        if let Some(token) = token {
            session.save_token(token).unwrap();
        }
        ConsoleClient::new(ApiTransport::new(&self.base_url, session).unwrap())
    }
}

pub fn user_json(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "role": role,
        "is_active": true,
        "created_at": TIMESTAMP,
        "updated_at": TIMESTAMP,
        "last_login_at": null,
    })
}

fn reply(status: StatusCode, body: Value) -> Response {
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

fn not_authenticated() -> Response {
    reply(
        StatusCode::UNAUTHORIZED,
        json!({"detail": "Could not validate credentials"}),
    )
}

fn authorized(header: &Option<String>) -> bool {
    header.as_deref() == Some("Bearer T")
}

fn with_state(
    state: Arc<BackendState>,
) -> impl Filter<Extract = (Arc<BackendState>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn auth_header() -> impl Filter<Extract = (Option<String>,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("authorization")
}

fn record(
    state: Arc<BackendState>,
) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    warp::method()
        .and(warp::path::full())
        .and(
            warp::query::raw()
                .or(warp::any().map(String::new))
                .unify(),
        )
        .and(auth_header())
        .map(
            move |method: Method, path: FullPath, query: String, authorization: Option<String>| {
                state.requests.lock().unwrap().push(RecordedRequest {
                    method,
                    path: path.as_str().to_string(),
                    query,
                    authorization,
                });
            },
        )
        .untuple_one()
}

fn routes(
    state: Arc<BackendState>,
) -> impl Filter<Extract = (Response,), Error = warp::Rejection> + Clone {
    let login = warp::post()
        .and(warp::path!("api" / "v1" / "auth" / "login"))
        .and(warp::body::json())
        .map(|body: Value| {
            if body["username"] == "admin" && body["password"] == "secret" {
                reply(
                    StatusCode::OK,
                    json!({
                        "access_token": TOKEN,
                        "token_type": "bearer",
                        "user": user_json(1, "admin", "admin"),
                    }),
                )
            } else {
                reply(
                    StatusCode::UNAUTHORIZED,
                    json!({"detail": "Incorrect username or password"}),
                )
            }
        });

    let me = warp::get()
        .and(warp::path!("api" / "v1" / "auth" / "me"))
        .and(auth_header())
        .map(|auth: Option<String>| {
            if !authorized(&auth) {
                return not_authenticated();
            }
            reply(StatusCode::OK, user_json(1, "admin", "admin"))
        });

    let dashboard = warp::get()
        .and(warp::path!("api" / "v1" / "dashboard" / "stats"))
        .and(auth_header())
        .map(|auth: Option<String>| {
            if !authorized(&auth) {
                return not_authenticated();
            }
            reply(
                StatusCode::OK,
                json!({
                    "services": {"total": 2},
                    "combinations": {"total": 3, "active": 2, "inactive": 1},
                    "mcp_servers": {"total": 1, "active": 1, "inactive": 0},
                    "endpoints": {"total": 14},
                    "recent_items": [{
                        "id": 3,
                        "name": "pets",
                        "type": "combination",
                        "status": "active",
                        "created_at": TIMESTAMP,
                    }],
                }),
            )
        });

    // Always fails with a plain-text body.
    let services = warp::get()
        .and(warp::path!("api" / "v1" / "services"))
        .map(|| {
            warp::reply::with_status("upstream exploded", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        });

    let users = warp::get()
        .and(warp::path!("api" / "v1" / "users"))
        .and(auth_header())
        .map(|auth: Option<String>| {
            if !authorized(&auth) {
                return not_authenticated();
            }
            reply(
                StatusCode::OK,
                json!({"users": [user_json(2, "operator", "user")], "total": 1}),
            )
        });

    let list_combinations = warp::get()
        .and(warp::path!("api" / "v1" / "combinations"))
        .and(auth_header())
        .and(with_state(state.clone()))
        .map(|auth: Option<String>, state: Arc<BackendState>| {
            if !authorized(&auth) {
                return not_authenticated();
            }
            let all: Vec<Value> = state.combinations.lock().unwrap().values().cloned().collect();
            reply(StatusCode::OK, Value::Array(all))
        });

    let create_combination = warp::post()
        .and(warp::path!("api" / "v1" / "combinations"))
        .and(auth_header())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .map(|auth: Option<String>, body: Value, state: Arc<BackendState>| {
            if !authorized(&auth) {
                return not_authenticated();
            }
            let mut combinations = state.combinations.lock().unwrap();
            let id = combinations.keys().next_back().copied().unwrap_or(0) + 1;
            let created = json!({
                "id": id,
                "name": body["name"],
                "description": body["description"],
                "status": "active",
                "endpoints": body["endpoints"],
                "createdAt": TIMESTAMP,
                "updatedAt": TIMESTAMP,
            });
            combinations.insert(id, created.clone());
            reply(StatusCode::OK, created)
        });

    let get_combination = warp::get()
        .and(warp::path!("api" / "v1" / "combinations" / i64))
        .and(auth_header())
        .and(with_state(state.clone()))
        .map(|id: i64, auth: Option<String>, state: Arc<BackendState>| {
            if !authorized(&auth) {
                return not_authenticated();
            }
            match state.combinations.lock().unwrap().get(&id) {
                Some(found) => reply(StatusCode::OK, found.clone()),
                None => reply(
                    StatusCode::NOT_FOUND,
                    json!({"detail": "Combination not found"}),
                ),
            }
        });

    let combination_status = warp::patch()
        .and(warp::path!("api" / "v1" / "combinations" / i64 / "status"))
        .and(auth_header())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_state(state.clone()))
        .map(
            |id: i64,
             auth: Option<String>,
             query: HashMap<String, String>,
             state: Arc<BackendState>| {
                if !authorized(&auth) {
                    return not_authenticated();
                }
                let Some(status) = query.get("status") else {
                    return reply(
                        StatusCode::UNPROCESSABLE_ENTITY,
                        json!({"detail": [{"loc": ["query", "status"], "msg": "field required"}]}),
                    );
                };
                let mut combinations = state.combinations.lock().unwrap();
                match combinations.get_mut(&id) {
                    Some(found) => {
                        found["status"] = Value::String(status.clone());
                        reply(StatusCode::OK, found.clone())
                    }
                    None => reply(
                        StatusCode::NOT_FOUND,
                        json!({"detail": "Combination not found"}),
                    ),
                }
            },
        );

    let delete_combination = warp::delete()
        .and(warp::path!("api" / "v1" / "combinations" / i64))
        .and(auth_header())
        .and(with_state(state.clone()))
        .map(|id: i64, auth: Option<String>, state: Arc<BackendState>| {
            if !authorized(&auth) {
                return not_authenticated();
            }
            match state.combinations.lock().unwrap().remove(&id) {
                Some(_) => reply(
                    StatusCode::OK,
                    json!({"message": "Combination deleted successfully"}),
                ),
                None => reply(
                    StatusCode::NOT_FOUND,
                    json!({"detail": "Combination not found"}),
                ),
            }
        });

    // Every listing is refused, as if the token had just been revoked.
    let list_servers = warp::get()
        .and(warp::path!("api" / "v1" / "mcp-servers"))
        .map(not_authenticated);

    // Answers late so a concurrent request can fail first.
    let get_server = warp::get()
        .and(warp::path!("api" / "v1" / "mcp-servers" / i64))
        .and(auth_header())
        .and_then(|id: i64, auth: Option<String>| async move {
            tokio::time::sleep(SLOW_REPLY).await;
            if !authorized(&auth) {
                return Ok::<_, warp::Rejection>(not_authenticated());
            }
            Ok(reply(
                StatusCode::OK,
                json!({
                    "id": id,
                    "name": "Pets",
                    "prefix": "pets",
                    "description": "",
                    "status": "active",
                    "combination_ids": [3],
                    "createdAt": TIMESTAMP,
                    "updatedAt": TIMESTAMP,
                }),
            ))
        });

    let gateway_config = warp::get()
        .and(warp::path!("mcp" / String / "config"))
        .map(|prefix: String| {
            let url = format!("http://localhost:8000/mcp/{prefix}");
            reply(
                StatusCode::OK,
                json!({
                    "config": {prefix.clone(): {"type": "streamable-http", "url": url}},
                    "example": {"mcpServers": {prefix.clone(): {"type": "streamable-http", "url": url}}},
                    "endpoint": url,
                    "instructions": {"claude_desktop": "Add the snippet to your client configuration"},
                }),
            )
        });

    let tools = warp::get()
        .and(warp::path!("mcp" / "v1" / "tools"))
        .map(|| {
            reply(
                StatusCode::OK,
                json!({
                    "mcp_version": "1.0",
                    "tools": [{
                        "name": "list_pets",
                        "description": "List all pets",
                        "input_schema": {"type": "object", "properties": {}},
                        "metadata": {
                            "path": "/pets",
                            "method": "GET",
                            "operation_id": "listPets",
                            "tags": ["pets"],
                        },
                    }],
                }),
            )
        });

    record(state).and(
        login
            .or(me)
            .unify()
            .or(dashboard)
            .unify()
            .or(services)
            .unify()
            .or(users)
            .unify()
            .or(list_combinations)
            .unify()
            .or(create_combination)
            .unify()
            .or(get_combination)
            .unify()
            .or(combination_status)
            .unify()
            .or(delete_combination)
            .unify()
            .or(list_servers)
            .unify()
            .or(get_server)
            .unify()
            .or(gateway_config)
            .unify()
            .or(tools)
            .unify(),
    )
}
