use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents the status of a task.
///
/// The API exposes exactly one status transition, the "mark done" endpoint,
/// so the canonical enumeration is two-valued. A task with no status on the
/// wire counts as `NEW`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    New,
    /// Task is completed.
    Done,
}

impl TaskStatus {
    pub fn is_done(self) -> bool {
        self == TaskStatus::Done
    }

    /// The wire spelling, also used as a style class in the card markup.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::New => "NEW",
            TaskStatus::Done => "DONE",
        }
    }
}

/// A task as returned by the API. Field names follow the API's camelCase
/// wire format (`dueDate`, `boardId`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub board_id: Option<i64>,
}

/// Input structure for creating a task on a board
/// (`POST /api/v1/tasks/{boardId}`). The board id is repeated in the body;
/// that is what the API expects.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Optional due date for the task. Serialized as `null` when absent.
    pub due_date: Option<DateTime<Utc>>,

    /// The initial status of the task.
    pub status: TaskStatus,

    /// The board the task belongs to. Immutable after creation.
    pub board_id: i64,
}

impl TaskInput {
    /// New tasks always start as `NEW`.
    pub fn new(
        board_id: i64,
        title: String,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title,
            description,
            due_date,
            status: TaskStatus::New,
            board_id,
        }
    }
}
