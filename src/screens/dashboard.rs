//!
//! # Dashboard
//!
//! Greets the current user and shows every board with its nested tasks. Board
//! metadata comes from the board listing; tasks are fetched for all boards
//! concurrently. A failed per-board task fetch degrades that one board to an
//! empty task list instead of failing the whole dashboard; only auth failures
//! cut the flow short.

use super::{handle_error, Nav, Ui};
use crate::{
    api::ApiClient,
    error::AppError,
    models::{Board, BoardInput, Task, User},
    render::{boards_markup, boards_text, render_board, BoardView},
};
use futures::future::join_all;

/// A board annotated with its fetched tasks, merged by board before rendering.
#[derive(Debug)]
pub struct BoardWithTasks {
    pub board: Board,
    pub tasks: Vec<Task>,
}

/// Loads everything the dashboard shows: the current user, their boards, and
/// the tasks of every board (fetched in parallel, completion order
/// irrelevant).
pub async fn load(api: &ApiClient) -> Result<(User, Vec<BoardWithTasks>), AppError> {
    let user = api.profile().await?;
    let boards = api.boards_for_user(user.id).await?;

    let fetches = boards.into_iter().map(|board| async move {
        match api.tasks_for_board(board.id).await {
            Ok(tasks) => Ok(BoardWithTasks { board, tasks }),
            // A cleared session must not be papered over with an empty list.
            Err(err) if err.is_auth() => Err(err),
            Err(err) => {
                log::warn!("task fetch for board {} failed: {}", board.id, err);
                Ok(BoardWithTasks {
                    board,
                    tasks: Vec::new(),
                })
            }
        }
    });
    let annotated = join_all(fetches)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok((user, annotated))
}

pub fn views(boards: &[BoardWithTasks]) -> Vec<BoardView> {
    boards
        .iter()
        .map(|entry| render_board(&entry.board, &entry.tasks))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewBoard,
    DeleteBoard(i64),
    EditBoard(i64),
    MarkDone(i64),
    Profile,
    ExportHtml,
    Reload,
    Logout,
    Quit,
}

/// Parses a dashboard menu command. Commands with an id argument reject
/// anything that is not a number.
pub fn parse_command(input: &str) -> Option<Command> {
    let mut parts = input.trim().split_whitespace();
    let verb = parts.next()?;
    let arg = parts.next();
    let id = |arg: Option<&str>| arg.and_then(|raw| raw.parse::<i64>().ok());

    match verb {
        "n" | "new" => Some(Command::NewBoard),
        "d" | "delete" => id(arg).map(Command::DeleteBoard),
        "e" | "edit" => id(arg).map(Command::EditBoard),
        "t" | "done" => id(arg).map(Command::MarkDone),
        "p" | "profile" => Some(Command::Profile),
        "w" | "export" => Some(Command::ExportHtml),
        "r" | "reload" => Some(Command::Reload),
        "o" | "logout" => Some(Command::Logout),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

const MENU: &str = "n new board | d <board-id> delete board | e <board-id> edit board | \
t <task-id> mark task done | p profile | w export html | r reload | o logout | q quit";

/// One dashboard cycle: load, render, take one command, act, and hand the
/// next screen back to the shell (a mutation hands back `Dashboard`, which
/// reloads).
pub async fn run(api: &ApiClient, ui: &mut dyn Ui) -> Nav {
    let (user, boards) = match load(api).await {
        Ok(loaded) => loaded,
        Err(err) if err.is_auth() => return Nav::Login,
        Err(err) => {
            log::error!("dashboard load failed: {}", err);
            ui.alert(&format!("Failed to load dashboard: {}", err));
            // Let the user decide between retrying and giving up instead of
            // hammering the API in a reload loop.
            return match ui.prompt("[r]etry or [q]uit") {
                Some(choice) if choice.trim() == "r" => Nav::Dashboard,
                _ => Nav::Quit,
            };
        }
    };

    let views = views(&boards);
    ui.show(&format!("Hello, {}, here are your boards", user.username));
    ui.show(&boards_text(&views));
    ui.show(MENU);

    let line = match ui.prompt("dashboard") {
        Some(line) => line,
        None => return Nav::Quit,
    };
    let command = match parse_command(&line) {
        Some(command) => command,
        None => {
            ui.alert("Unknown command");
            return Nav::Dashboard;
        }
    };

    match command {
        Command::NewBoard => handle_board_create(api, ui).await,
        Command::DeleteBoard(board_id) => handle_board_delete(api, ui, board_id).await,
        Command::EditBoard(board_id) => Nav::BoardEdit(board_id),
        Command::MarkDone(task_id) => handle_task_done(api, ui, task_id).await,
        Command::Profile => Nav::Profile,
        Command::ExportHtml => {
            export_html(ui, &views);
            Nav::Dashboard
        }
        Command::Reload => Nav::Dashboard,
        Command::Logout => handle_logout(api),
        Command::Quit => Nav::Quit,
    }
}

/// Logs the user out: drops the stored session and returns to the login
/// screen. Purely local, no request is made.
pub fn handle_logout(api: &ApiClient) -> Nav {
    api.session().clear();
    Nav::Login
}

/// Creates a board from prompted fields. An empty title is rejected inline
/// before any request is made.
pub async fn handle_board_create(api: &ApiClient, ui: &mut dyn Ui) -> Nav {
    let title = match ui.prompt("Board title") {
        Some(title) => title.trim().to_string(),
        None => return Nav::Dashboard,
    };
    if title.is_empty() {
        ui.field_error("title", "Title is required");
        return Nav::Dashboard;
    }
    let description = ui
        .prompt("Description (optional)")
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    match api.create_board(&BoardInput { title, description }).await {
        Ok(()) => Nav::Dashboard,
        Err(err) if err.is_auth() => Nav::Login,
        Err(AppError::Api { message, .. }) => {
            ui.field_error("title", &message);
            Nav::Dashboard
        }
        Err(err) => handle_error(ui, &err, Nav::Dashboard),
    }
}

/// Deletes a board after an explicit confirmation. Declining issues no
/// request and leaves the list unchanged.
pub async fn handle_board_delete(api: &ApiClient, ui: &mut dyn Ui, board_id: i64) -> Nav {
    if !ui.confirm("Delete this board? All of its tasks will be deleted as well.") {
        return Nav::Dashboard;
    }
    match api.delete_board(board_id).await {
        Ok(()) => Nav::Dashboard,
        Err(err) if err.is_auth() => Nav::Login,
        Err(err) => {
            ui.alert(&format!("Failed to delete board: {}", err));
            Nav::Dashboard
        }
    }
}

pub async fn handle_task_done(api: &ApiClient, ui: &mut dyn Ui, task_id: i64) -> Nav {
    match api.mark_task_done(task_id).await {
        Ok(()) => Nav::Dashboard,
        Err(err) if err.is_auth() => Nav::Login,
        Err(err) => {
            ui.alert(&format!("Failed to update task: {}", err));
            Nav::Dashboard
        }
    }
}

/// Writes the escaped card markup of the current board list to a file.
fn export_html(ui: &mut dyn Ui, views: &[BoardView]) {
    let path = ui
        .prompt("Write HTML to")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| "dashboard.html".to_string());

    match std::fs::write(&path, boards_markup(views)) {
        Ok(()) => ui.show(&format!("Wrote {}", path)),
        Err(err) => ui.alert(&format!("Cannot write {}: {}", path, err)),
    }
}
