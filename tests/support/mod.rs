#![allow(dead_code)]

//! Shared test support: a real HTTP mock of the task-board API bound to a
//! random port, and a scripted `Ui` for driving screen flows.

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use taskdeck::screens::Ui;
use taskdeck::{SessionStore, TokenPair};

pub const TEST_TOKEN: &str = "t1";
pub const TEST_REFRESH: &str = "r1";

/// Behavior switches and request counters for the mock API.
#[derive(Default)]
pub struct MockState {
    /// Board ids whose task listing answers 500.
    pub fail_tasks_for: Vec<i64>,
    pub login_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub board_list_calls: AtomicUsize,
    pub board_delete_calls: AtomicUsize,
    pub task_create_calls: AtomicUsize,
}

impl MockState {
    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

fn authorized(req: &HttpRequest) -> bool {
    match req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
    {
        Some(value) => value == format!("Bearer {}", TEST_TOKEN),
        None => false,
    }
}

fn token_pair_body() -> Value {
    json!({ "token": TEST_TOKEN, "refreshToken": TEST_REFRESH })
}

async fn login(state: web::Data<MockState>, body: web::Json<Value>) -> HttpResponse {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    if body["email"] == "wrong@example.com" {
        return HttpResponse::BadRequest().json(json!({ "message": "Invalid email or password" }));
    }
    HttpResponse::Ok().json(token_pair_body())
}

async fn register(_body: web::Json<Value>) -> HttpResponse {
    HttpResponse::Created().json(token_pair_body())
}

async fn profile(state: web::Data<MockState>, req: HttpRequest) -> HttpResponse {
    state.profile_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Ok().json(json!({ "id": 5, "username": "alice", "email": "a@b.com" }))
}

async fn update_profile(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    if body["email"] == "taken@example.com" {
        return HttpResponse::Conflict().json(json!({ "message": "Email already in use" }));
    }
    // Success with a deliberately empty 200 body.
    HttpResponse::Ok().finish()
}

async fn list_boards(state: web::Data<MockState>, req: HttpRequest) -> HttpResponse {
    state.board_list_calls.fetch_add(1, Ordering::SeqCst);
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Ok().json(json!([
        { "id": 1, "title": "Chores", "description": "around the house", "createdAt": "2024-05-01T12:00:00Z" },
        { "id": 2, "title": "Work", "createdAt": "2024-05-02T08:00:00Z" }
    ]))
}

async fn create_board(req: HttpRequest, _body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Created().json(json!({ "id": 3, "title": "New board" }))
}

/// GET /api/v1/boards/{id}. A few magic ids produce the error shapes the
/// message-extraction contract distinguishes.
async fn get_board(req: HttpRequest, path: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    match path.into_inner() {
        999 => HttpResponse::NotFound().json(json!({ "message": "Board not found" })),
        998 => HttpResponse::InternalServerError().body("boom"),
        997 => HttpResponse::BadRequest().finish(),
        id => HttpResponse::Ok().json(json!({
            "id": id, "title": "Chores", "description": "around the house",
            "createdAt": "2024-05-01T12:00:00Z"
        })),
    }
}

async fn update_board(req: HttpRequest, _path: web::Path<i64>, _body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Ok().finish()
}

async fn delete_board(
    state: web::Data<MockState>,
    req: HttpRequest,
    _path: web::Path<i64>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    state.board_delete_calls.fetch_add(1, Ordering::SeqCst);
    HttpResponse::NoContent().finish()
}

async fn board_tasks(
    state: web::Data<MockState>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let board_id = path.into_inner();
    if state.fail_tasks_for.contains(&board_id) {
        return HttpResponse::InternalServerError().body("task store unavailable");
    }
    match board_id {
        1 => HttpResponse::Ok().json(json!([
            { "id": 10, "title": "Buy milk", "status": "NEW", "boardId": 1 },
            { "id": 11, "title": "Mow lawn", "status": "DONE", "boardId": 1,
              "dueDate": "2024-06-01T09:00:00Z" }
        ])),
        _ => HttpResponse::Ok().json(json!([])),
    }
}

async fn create_task(
    state: web::Data<MockState>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    state.task_create_calls.fetch_add(1, Ordering::SeqCst);
    let board_id = path.into_inner();
    let mut task = body.into_inner();
    task["id"] = json!(42);
    task["boardId"] = json!(board_id);
    HttpResponse::Created().json(task)
}

async fn delete_task(req: HttpRequest, _path: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::NoContent().finish()
}

async fn mark_task_done(req: HttpRequest, _path: web::Path<i64>) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::NoContent().finish()
}

/// Binds the mock API to a random port and returns its base URL.
pub async fn spawn_mock_api(state: Arc<MockState>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::from(app_state.clone()))
            .route("/api/v1/auth/login", web::post().to(login))
            .route("/api/v1/auth/register", web::post().to(register))
            .route("/api/v1/users/profile", web::get().to(profile))
            .route("/api/v1/users/update/{id}", web::put().to(update_profile))
            .route("/api/v1/boards", web::post().to(create_board))
            .route("/api/v1/boards/user/{userId}", web::get().to(list_boards))
            .route("/api/v1/boards/{id}/tasks", web::get().to(board_tasks))
            .service(
                web::resource("/api/v1/boards/{id}")
                    .route(web::get().to(get_board))
                    .route(web::put().to(update_board))
                    .route(web::delete().to(delete_board)),
            )
            .route("/api/v1/tasks/{id}/done", web::patch().to(mark_task_done))
            .service(
                // POST {id} is the board to create on; DELETE {id} is the task.
                web::resource("/api/v1/tasks/{id}")
                    .route(web::post().to(create_task))
                    .route(web::delete().to(delete_task)),
            )
    })
    .listen(listener)
    .expect("Failed to listen on mock port")
    .workers(1)
    .run();

    actix_web::rt::spawn(server);

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    format!("http://127.0.0.1:{}", port)
}

/// Fresh file-backed session in the temp dir, unique per test.
pub fn temp_session(name: &str) -> SessionStore {
    let path = std::env::temp_dir().join(format!(
        "taskdeck-it-{}-{}.json",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);
    SessionStore::new(path)
}

/// A session already holding the token the mock API accepts.
pub fn logged_in_session(name: &str) -> SessionStore {
    let store = temp_session(name);
    store
        .store(&TokenPair {
            token: TEST_TOKEN.into(),
            refresh_token: TEST_REFRESH.into(),
        })
        .expect("Failed to seed session");
    store
}

/// A session holding a token the mock API rejects with 401.
pub fn stale_session(name: &str) -> SessionStore {
    let store = temp_session(name);
    store
        .store(&TokenPair {
            token: "stale".into(),
            refresh_token: "stale".into(),
        })
        .expect("Failed to seed session");
    store
}

/// `Ui` double fed from canned inputs; records everything shown to the user.
#[derive(Default)]
pub struct ScriptedUi {
    pub inputs: VecDeque<String>,
    pub confirms: VecDeque<bool>,
    pub field_errors: Vec<(String, String)>,
    pub alerts: Vec<String>,
    pub shown: Vec<String>,
}

impl ScriptedUi {
    pub fn with_inputs(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn confirming(mut self, answers: &[bool]) -> Self {
        self.confirms = answers.iter().copied().collect();
        self
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        self.field_errors.iter().any(|(f, _)| f == field)
    }
}

impl Ui for ScriptedUi {
    fn prompt(&mut self, _label: &str) -> Option<String> {
        self.inputs.pop_front()
    }

    fn confirm(&mut self, _question: &str) -> bool {
        self.confirms.pop_front().unwrap_or(false)
    }

    fn field_error(&mut self, field: &str, message: &str) {
        self.field_errors.push((field.to_string(), message.to_string()));
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn show(&mut self, content: &str) {
        self.shown.push(content.to_string());
    }
}
