pub mod board;
pub mod task;
pub mod user;

pub use board::{Board, BoardInput};
pub use task::{Task, TaskInput, TaskStatus};
pub use user::{LoginInput, ProfileInput, RegisterInput, User};
