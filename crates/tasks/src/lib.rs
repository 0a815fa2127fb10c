//! Task board: the dashboard's representative owner-scoped resource.

pub mod board;
pub mod task;

pub use board::{Column, NewTask, TaskBoard};
pub use task::{
    CreateTask, Direction, MoveTask, Priority, Task, TaskCommand, TaskCreated, TaskEvent, TaskMoved,
    TaskStatus,
};
