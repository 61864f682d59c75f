//!
//! # View-Model Rendering
//!
//! Pure rendering, decoupled from any UI toolkit: `render_board` turns a board
//! and its fetched tasks into a display-ready view model, and the markup
//! builders reproduce the card markup of the original dashboard for the HTML
//! export command.
//!
//! Board and task titles are input typed by any registered user, so every
//! user-supplied field is entity-escaped before it lands in markup. The view
//! models carry the escaped text, which keeps the guarantee in one place.

use crate::models::{Board, Task, TaskStatus};
use chrono::{DateTime, Utc};

/// Display-ready task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due: Option<String>,
}

/// Display-ready board with its nested tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created: String,
    pub tasks: Vec<TaskView>,
}

/// Escapes the five characters that matter for embedding user text in markup.
pub fn escape_html(unsafe_text: &str) -> String {
    unsafe_text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Formats an optional timestamp for display; missing dates read as "not set".
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => "not set".to_string(),
    }
}

pub fn render_task(task: &Task) -> TaskView {
    TaskView {
        id: task.id,
        title: escape_html(&task.title),
        description: task
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(escape_html),
        status: task.status,
        due: task.due_date.map(|d| format_date(Some(d))),
    }
}

/// Builds the view model for one board card: metadata plus its nested tasks.
pub fn render_board(board: &Board, tasks: &[Task]) -> BoardView {
    BoardView {
        id: board.id,
        title: escape_html(&board.title),
        description: board
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(escape_html),
        created: format_date(board.created_at),
        tasks: tasks.iter().map(render_task).collect(),
    }
}

// --- card markup, mirroring the original dashboard templates ---

pub fn task_item(task: &TaskView) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"task-item\">\n");
    html.push_str(&format!(
        "  <h5 class=\"task-title\">{}</h5> <span class=\"task-status {}\">{}</span>\n",
        task.title,
        task.status.as_str().to_lowercase(),
        task.status.as_str()
    ));
    if let Some(description) = &task.description {
        html.push_str(&format!(
            "  <p class=\"task-description\">{}</p>\n",
            description
        ));
    }
    if let Some(due) = &task.due {
        html.push_str(&format!("  <p class=\"task-due\">Due: {}</p>\n", due));
    }
    html.push_str("</div>");
    html
}

pub fn board_card(board: &BoardView) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"board-card\">\n");
    html.push_str(&format!(
        "<h3 class=\"board-title\">{}</h3>\n",
        board.title
    ));
    if let Some(description) = &board.description {
        html.push_str(&format!(
            "<p class=\"board-description\">{}</p>\n",
            description
        ));
    }
    html.push_str(&format!(
        "<p class=\"board-date\">Created: {}</p>\n",
        board.created
    ));
    html.push_str("<div class=\"tasks-list\">\n");
    if board.tasks.is_empty() {
        html.push_str("<p class=\"no-tasks\">No tasks</p>\n");
    } else {
        for task in &board.tasks {
            html.push_str(&task_item(task));
            html.push('\n');
        }
    }
    html.push_str("</div>\n</div>");
    html
}

/// The full board list, with the friendly empty state.
pub fn boards_markup(boards: &[BoardView]) -> String {
    if boards.is_empty() {
        return "<p class=\"no-boards\">You have no boards yet</p>".to_string();
    }
    boards
        .iter()
        .map(board_card)
        .collect::<Vec<_>>()
        .join("\n")
}

// --- plain text for the terminal ---

impl TaskView {
    pub fn to_text(&self) -> String {
        let mut line = format!("  [{}] #{} {}", self.status.as_str(), self.id, self.title);
        if let Some(due) = &self.due {
            line.push_str(&format!(" (due {})", due));
        }
        line
    }
}

impl BoardView {
    pub fn to_text(&self) -> String {
        let mut out = format!("Board #{}: {} (created {})", self.id, self.title, self.created);
        if let Some(description) = &self.description {
            out.push_str(&format!("\n  {}", description));
        }
        if self.tasks.is_empty() {
            out.push_str("\n  (no tasks)");
        } else {
            for task in &self.tasks {
                out.push('\n');
                out.push_str(&task.to_text());
            }
        }
        out
    }
}

pub fn boards_text(boards: &[BoardView]) -> String {
    if boards.is_empty() {
        return "You have no boards yet".to_string();
    }
    boards
        .iter()
        .map(BoardView::to_text)
        .collect::<Vec<_>>()
        .join("\n\n")
}
