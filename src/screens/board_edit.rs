//!
//! # Board Edit
//!
//! Loads one board with its tasks, and supports editing the board's metadata
//! plus creating, completing and deleting tasks on it. Every mutation reloads
//! the screen, mirroring the original page's reload-after-save behavior.

use super::{handle_error, Nav, Ui};
use crate::{
    api::ApiClient,
    error::AppError,
    models::{Board, BoardInput, Task, TaskInput},
    render::render_board,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parses an optional due date. Accepts RFC 3339, `YYYY-MM-DD HH:MM`, or a
/// bare `YYYY-MM-DD` (midnight). Empty input means no due date.
pub fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(Some(parsed.and_utc()));
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(midnight) = parsed.and_hms_opt(0, 0, 0) {
            return Ok(Some(midnight.and_utc()));
        }
    }
    Err(format!(
        "Cannot parse \"{}\" as a date; use YYYY-MM-DD or YYYY-MM-DD HH:MM",
        input
    ))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Save,
    AddTask,
    DeleteTask(i64),
    MarkDone(i64),
    Back,
    Reload,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    let mut parts = input.trim().split_whitespace();
    let verb = parts.next()?;
    let id = parts.next().and_then(|raw| raw.parse::<i64>().ok());

    match verb {
        "s" | "save" => Some(Command::Save),
        "a" | "add" => Some(Command::AddTask),
        "x" | "delete" => id.map(Command::DeleteTask),
        "t" | "done" => id.map(Command::MarkDone),
        "b" | "back" => Some(Command::Back),
        "r" | "reload" => Some(Command::Reload),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

const MENU: &str = "s save board | a add task | x <task-id> delete task | \
t <task-id> mark task done | b back to dashboard | r reload | q quit";

pub async fn load(api: &ApiClient, board_id: i64) -> Result<(Board, Vec<Task>), AppError> {
    let board = api.board(board_id).await?;
    let tasks = api.tasks_for_board(board_id).await?;
    Ok((board, tasks))
}

/// One edit cycle for the given board.
pub async fn run(api: &ApiClient, ui: &mut dyn Ui, board_id: i64) -> Nav {
    let (board, tasks) = match load(api, board_id).await {
        Ok(loaded) => loaded,
        Err(err) if err.is_auth() => return Nav::Login,
        Err(err) => {
            log::error!("board {} load failed: {}", board_id, err);
            ui.alert(&format!("Failed to load board: {}", err));
            return Nav::Dashboard;
        }
    };

    ui.show(&render_board(&board, &tasks).to_text());
    ui.show(MENU);

    let line = match ui.prompt("board") {
        Some(line) => line,
        None => return Nav::Quit,
    };
    let command = match parse_command(&line) {
        Some(command) => command,
        None => {
            ui.alert("Unknown command");
            return Nav::BoardEdit(board_id);
        }
    };

    match command {
        Command::Save => handle_board_save(api, ui, &board).await,
        Command::AddTask => handle_task_create(api, ui, board_id).await,
        Command::DeleteTask(task_id) => handle_task_delete(api, ui, board_id, task_id).await,
        Command::MarkDone(task_id) => handle_task_done(api, ui, board_id, task_id).await,
        Command::Back => Nav::Dashboard,
        Command::Reload => Nav::BoardEdit(board_id),
        Command::Quit => Nav::Quit,
    }
}

/// Saves the board's title and description. Prompts default to the current
/// values; entering nothing keeps them.
pub async fn handle_board_save(api: &ApiClient, ui: &mut dyn Ui, board: &Board) -> Nav {
    let title = ui
        .prompt(&format!("Title [{}]", board.title))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| board.title.clone());
    let current_description = board.description.clone().unwrap_or_default();
    let description = merge_description(
        ui.prompt(&format!("Description [{}] (- to clear)", current_description)),
        &board.description,
    );

    match api.update_board(board.id, &BoardInput { title, description }).await {
        Ok(()) => {
            ui.show("Board changes saved");
            Nav::BoardEdit(board.id)
        }
        Err(err) if err.is_auth() => Nav::Login,
        Err(err) => {
            ui.alert(&format!("Failed to save board: {}", err));
            Nav::BoardEdit(board.id)
        }
    }
}

/// Resolves the description prompt against the current value: blank input
/// keeps it, `-` clears it, anything else replaces it.
fn merge_description(input: Option<String>, current: &Option<String>) -> Option<String> {
    match input.as_deref().map(str::trim) {
        None | Some("") => current.clone(),
        Some("-") => None,
        Some(text) => Some(text.to_string()),
    }
}

/// Creates a task on the board. An empty title or an unparsable due date is
/// rejected inline before any request is made.
pub async fn handle_task_create(api: &ApiClient, ui: &mut dyn Ui, board_id: i64) -> Nav {
    let title = match ui.prompt("Task title") {
        Some(title) => title.trim().to_string(),
        None => return Nav::BoardEdit(board_id),
    };
    if title.is_empty() {
        ui.field_error("title", "Title is required");
        return Nav::BoardEdit(board_id);
    }
    let description = ui
        .prompt("Description (optional)")
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    let due_date = match parse_due_date(&ui.prompt("Due date (optional)").unwrap_or_default()) {
        Ok(due_date) => due_date,
        Err(message) => {
            ui.field_error("dueDate", &message);
            return Nav::BoardEdit(board_id);
        }
    };

    let input = TaskInput::new(board_id, title, description, due_date);
    match api.create_task(&input).await {
        Ok(()) => Nav::BoardEdit(board_id),
        Err(err) if err.is_auth() => Nav::Login,
        Err(AppError::Api { message, .. }) => {
            ui.field_error("title", &message);
            Nav::BoardEdit(board_id)
        }
        Err(err) => handle_error(ui, &err, Nav::BoardEdit(board_id)),
    }
}

/// Deletes a task after an explicit confirmation.
pub async fn handle_task_delete(
    api: &ApiClient,
    ui: &mut dyn Ui,
    board_id: i64,
    task_id: i64,
) -> Nav {
    if !ui.confirm("Delete this task?") {
        return Nav::BoardEdit(board_id);
    }
    match api.delete_task(task_id).await {
        Ok(()) => Nav::BoardEdit(board_id),
        Err(err) if err.is_auth() => Nav::Login,
        Err(err) => {
            ui.alert(&format!("Failed to delete task: {}", err));
            Nav::BoardEdit(board_id)
        }
    }
}

pub async fn handle_task_done(
    api: &ApiClient,
    ui: &mut dyn Ui,
    board_id: i64,
    task_id: i64,
) -> Nav {
    match api.mark_task_done(task_id).await {
        Ok(()) => Nav::BoardEdit(board_id),
        Err(err) if err.is_auth() => Nav::Login,
        Err(err) => {
            ui.alert(&format!("Failed to update task: {}", err));
            Nav::BoardEdit(board_id)
        }
    }
}
