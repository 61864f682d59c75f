//!
//! # API Client
//!
//! The single typed client for the task-board API. The original screens each
//! carried their own copy of an ad-hoc fetch helper, with drifting base URLs
//! and drifting error parsing; this module is the one place requests are made.
//!
//! The request contract, preserved from the most complete of the originals:
//! - authenticated requests carry `Authorization: Bearer <token>`;
//! - a 401 response clears the session before the error is returned, so the
//!   caller's only job is to navigate back to the login screen;
//! - any other non-2xx response becomes `AppError::Api` with a message taken
//!   from the body's `message` field when the body is JSON carrying one,
//!   otherwise the raw body text, otherwise a fixed fallback;
//! - 204 and empty-body responses resolve to `None` and are never fed to the
//!   JSON parser.
//!
//! Inputs are validated before any request is sent, so a `Validation` error
//! means no traffic was produced.

use crate::{
    error::AppError,
    models::{Board, BoardInput, LoginInput, ProfileInput, RegisterInput, Task, TaskInput, User},
    session::{SessionStore, TokenPair},
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

const GENERIC_API_ERROR: &str = "API request failed";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Performs one request against the API and applies the response contract.
    ///
    /// `authenticated` requests fail early with `AppError::Auth` when no
    /// session is stored, without touching the network.
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        authenticated: bool,
    ) -> Result<Option<Value>, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);

        if authenticated {
            let token = self.session.require_token()?;
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.session.clear();
            return Err(AppError::Auth("session expired".into()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.text().await?;
        if body.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| AppError::Internal(format!("invalid JSON in response: {}", e)))
    }

    // --- auth ---

    /// Logs in and stores the issued token pair.
    pub async fn login(&self, input: &LoginInput) -> Result<TokenPair, AppError> {
        input.validate()?;
        let value = self
            .send(
                Method::POST,
                "/api/v1/auth/login",
                Some(&to_body(input)?),
                false,
            )
            .await?;
        let pair: TokenPair = decode(require_body(value)?)?;
        self.session.store(&pair)?;
        Ok(pair)
    }

    /// Registers a new account and stores the issued token pair, so that
    /// registration leaves the user logged in just like login does.
    pub async fn register(&self, input: &RegisterInput) -> Result<TokenPair, AppError> {
        input.validate()?;
        let value = self
            .send(
                Method::POST,
                "/api/v1/auth/register",
                Some(&to_body(input)?),
                false,
            )
            .await?;
        let pair: TokenPair = decode(require_body(value)?)?;
        self.session.store(&pair)?;
        Ok(pair)
    }

    // --- users ---

    /// The authoritative "who am I" call. Every screen that needs an identity
    /// uses this instead of picking apart the token payload client-side.
    pub async fn profile(&self) -> Result<User, AppError> {
        let value = self
            .send(Method::GET, "/api/v1/users/profile", None, true)
            .await?;
        decode(require_body(value)?)
    }

    pub async fn update_profile(&self, user_id: i64, input: &ProfileInput) -> Result<(), AppError> {
        input.validate()?;
        self.send(
            Method::PUT,
            &format!("/api/v1/users/update/{}", user_id),
            Some(&to_body(input)?),
            true,
        )
        .await?;
        Ok(())
    }

    // --- boards ---

    pub async fn create_board(&self, input: &BoardInput) -> Result<(), AppError> {
        input.validate()?;
        self.send(
            Method::POST,
            "/api/v1/boards",
            Some(&to_body(input)?),
            true,
        )
        .await?;
        Ok(())
    }

    pub async fn boards_for_user(&self, user_id: i64) -> Result<Vec<Board>, AppError> {
        let value = self
            .send(
                Method::GET,
                &format!("/api/v1/boards/user/{}", user_id),
                None,
                true,
            )
            .await?;
        match value {
            Some(value) => decode(value),
            None => Ok(Vec::new()),
        }
    }

    pub async fn board(&self, board_id: i64) -> Result<Board, AppError> {
        let value = self
            .send(
                Method::GET,
                &format!("/api/v1/boards/{}", board_id),
                None,
                true,
            )
            .await?;
        decode(require_body(value)?)
    }

    pub async fn update_board(&self, board_id: i64, input: &BoardInput) -> Result<(), AppError> {
        input.validate()?;
        self.send(
            Method::PUT,
            &format!("/api/v1/boards/{}", board_id),
            Some(&to_body(input)?),
            true,
        )
        .await?;
        Ok(())
    }

    /// Deletes a board. The server cascades the deletion to the board's tasks.
    pub async fn delete_board(&self, board_id: i64) -> Result<(), AppError> {
        self.send(
            Method::DELETE,
            &format!("/api/v1/boards/{}", board_id),
            None,
            true,
        )
        .await?;
        Ok(())
    }

    // --- tasks ---

    pub async fn tasks_for_board(&self, board_id: i64) -> Result<Vec<Task>, AppError> {
        let value = self
            .send(
                Method::GET,
                &format!("/api/v1/boards/{}/tasks", board_id),
                None,
                true,
            )
            .await?;
        match value {
            Some(value) => decode(value),
            None => Ok(Vec::new()),
        }
    }

    pub async fn create_task(&self, input: &TaskInput) -> Result<(), AppError> {
        input.validate()?;
        self.send(
            Method::POST,
            &format!("/api/v1/tasks/{}", input.board_id),
            Some(&to_body(input)?),
            true,
        )
        .await?;
        Ok(())
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<(), AppError> {
        self.send(
            Method::DELETE,
            &format!("/api/v1/tasks/{}", task_id),
            None,
            true,
        )
        .await?;
        Ok(())
    }

    /// Marks a task as done. This is the only status transition the API has.
    pub async fn mark_task_done(&self, task_id: i64) -> Result<(), AppError> {
        self.send(
            Method::PATCH,
            &format!("/api/v1/tasks/{}/done", task_id),
            None,
            true,
        )
        .await?;
        Ok(())
    }
}

fn to_body<T: serde::Serialize>(input: &T) -> Result<Value, AppError> {
    serde_json::to_value(input)
        .map_err(|e| AppError::Internal(format!("cannot encode request body: {}", e)))
}

fn require_body(value: Option<Value>) -> Result<Value, AppError> {
    value.ok_or_else(|| AppError::Internal("empty response from server".into()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value)
        .map_err(|e| AppError::Internal(format!("unexpected response shape: {}", e)))
}

/// Extracts a user-facing message from an error response body.
///
/// The UI surfaces this string directly, so the order matters: the body's
/// `message` field when present, else the raw body text, else a fixed
/// fallback for empty bodies.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        GENERIC_API_ERROR.to_string()
    } else {
        trimmed.to_string()
    }
}
