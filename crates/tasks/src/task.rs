use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use intranet_auth::Assigned;
use intranet_core::{Aggregate, AggregateRoot, DomainError, TaskId};

// ─────────────────────────────────────────────────────────────────────────────
// Status / Priority
// ─────────────────────────────────────────────────────────────────────────────

/// Kanban column a task sits in. Tasks move one column at a time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Board order, left to right.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Review => "In review",
            TaskStatus::Done => "Done",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            TaskStatus::Todo => Some(TaskStatus::InProgress),
            TaskStatus::InProgress => Some(TaskStatus::Review),
            TaskStatus::Review => Some(TaskStatus::Done),
            TaskStatus::Done => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            TaskStatus::Todo => None,
            TaskStatus::InProgress => Some(TaskStatus::Todo),
            TaskStatus::Review => Some(TaskStatus::InProgress),
            TaskStatus::Done => Some(TaskStatus::Review),
        }
    }

    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Forward => self.next(),
            Direction::Back => self.previous(),
        }
    }
}

impl core::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Back,
}

// ─────────────────────────────────────────────────────────────────────────────
// Task Aggregate
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregate root: Task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: Priority,
    /// Display name of the assignee; empty when unassigned.
    assignee: String,
    due_date: Option<NaiveDate>,
    created_on: NaiveDate,
    #[serde(skip)]
    version: u64,
    #[serde(skip)]
    created: bool,
}

impl Task {
    /// Create an empty, not-yet-created aggregate instance.
    pub fn empty(id: TaskId) -> Self {
        Self {
            id,
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::default(),
            assignee: String::new(),
            due_date: None,
            created_on: NaiveDate::MIN,
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }
}

impl AggregateRoot for Task {
    type Id = TaskId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Assigned for Task {
    fn assignee(&self) -> Option<&str> {
        Some(&self.assignee)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Command: CreateTask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTask {
    pub task_id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    pub occurred_at: DateTime<Utc>,
}

/// Command: MoveTask (one column left or right).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTask {
    pub task_id: TaskId,
    pub direction: Direction,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCommand {
    Create(CreateTask),
    Move(MoveTask),
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// Event: TaskCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCreated {
    pub task_id: TaskId,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TaskMoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMoved {
    pub task_id: TaskId,
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskEvent {
    Created(TaskCreated),
    Moved(TaskMoved),
}

impl TaskEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            TaskEvent::Created(_) => "tasks.task.created",
            TaskEvent::Moved(_) => "tasks.task.moved",
        }
    }

    /// True when the event finished a task (the moment the dashboard
    /// congratulates the assignee).
    pub fn completes_task(&self) -> bool {
        matches!(self, TaskEvent::Moved(e) if e.to == TaskStatus::Done)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl Aggregate for Task {
    type Command = TaskCommand;
    type Event = TaskEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            TaskEvent::Created(e) => {
                self.id = e.task_id;
                self.title = e.title.clone();
                self.description = e.description.clone();
                self.status = TaskStatus::Todo;
                self.priority = e.priority;
                self.assignee = e.assignee.clone();
                self.due_date = e.due_date;
                self.created_on = e.occurred_at.date_naive();
                self.created = true;
            }
            TaskEvent::Moved(e) => {
                self.status = e.to;
            }
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            TaskCommand::Create(cmd) => {
                if self.created {
                    return Err(DomainError::invariant("task already exists"));
                }

                let title = cmd.title.trim();
                if title.is_empty() {
                    return Err(DomainError::validation("task title cannot be empty"));
                }

                Ok(vec![TaskEvent::Created(TaskCreated {
                    task_id: cmd.task_id,
                    title: title.to_string(),
                    description: cmd.description.trim().to_string(),
                    priority: cmd.priority,
                    assignee: cmd.assignee.trim().to_string(),
                    due_date: cmd.due_date,
                    occurred_at: cmd.occurred_at,
                })])
            }
            TaskCommand::Move(cmd) => {
                if !self.created {
                    return Err(DomainError::NotFound);
                }

                let Some(to) = self.status.step(cmd.direction) else {
                    return Err(DomainError::invariant(match cmd.direction {
                        Direction::Forward => "task is already done",
                        Direction::Back => "task has not been started",
                    }));
                };

                Ok(vec![TaskEvent::Moved(TaskMoved {
                    task_id: self.id,
                    from: self.status,
                    to,
                    occurred_at: cmd.occurred_at,
                })])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created_task(title: &str, assignee: &str) -> Task {
        let id = TaskId::new();
        let mut task = Task::empty(id);
        let cmd = TaskCommand::Create(CreateTask {
            task_id: id,
            title: title.to_string(),
            description: String::new(),
            priority: Priority::High,
            assignee: assignee.to_string(),
            due_date: None,
            occurred_at: Utc::now(),
        });
        for event in task.handle(&cmd).unwrap() {
            task.apply(&event);
        }
        task
    }

    fn move_cmd(task: &Task, direction: Direction) -> TaskCommand {
        TaskCommand::Move(MoveTask {
            task_id: task.id_typed(),
            direction,
            occurred_at: Utc::now(),
        })
    }

    #[test]
    fn create_starts_in_todo_and_trims_fields() {
        let task = created_task("  Write docs ", " Elena Kozlova ");
        assert_eq!(task.status(), TaskStatus::Todo);
        assert_eq!(task.title(), "Write docs");
        assert_eq!(task.assignee(), Some("Elena Kozlova"));
        assert_eq!(task.version(), 1);
    }

    #[test]
    fn blank_title_rejected() {
        let id = TaskId::new();
        let cmd = TaskCommand::Create(CreateTask {
            task_id: id,
            title: "   ".to_string(),
            description: String::new(),
            priority: Priority::Low,
            assignee: String::new(),
            due_date: None,
            occurred_at: Utc::now(),
        });
        let err = Task::empty(id).handle(&cmd).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn cannot_create_twice() {
        let task = created_task("Test API", "Dmitry Volkov");
        let cmd = TaskCommand::Create(CreateTask {
            task_id: task.id_typed(),
            title: "again".to_string(),
            description: String::new(),
            priority: Priority::Low,
            assignee: String::new(),
            due_date: None,
            occurred_at: Utc::now(),
        });
        assert!(matches!(task.handle(&cmd), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn moves_through_every_column_and_stops_at_done() {
        let mut task = created_task("Optimize queries", "Anna Petrova");

        for expected in [TaskStatus::InProgress, TaskStatus::Review, TaskStatus::Done] {
            let events = task.handle(&move_cmd(&task, Direction::Forward)).unwrap();
            assert_eq!(events.len(), 1);
            for event in &events {
                task.apply(event);
            }
            assert_eq!(task.status(), expected);
        }

        let err = task.handle(&move_cmd(&task, Direction::Forward)).unwrap_err();
        assert_eq!(err.to_string(), "invariant violated: task is already done");
    }

    #[test]
    fn cannot_move_back_from_todo() {
        let task = created_task("Notifications", "Mikhail Sidorov");
        let err = task.handle(&move_cmd(&task, Direction::Back)).unwrap_err();
        assert!(err.to_string().contains("not been started"));
    }

    #[test]
    fn moving_into_done_completes_task() {
        let mut task = created_task("Ship", "Anna Petrova");
        let mut last = None;
        for _ in 0..3 {
            let events = task.handle(&move_cmd(&task, Direction::Forward)).unwrap();
            for event in events {
                task.apply(&event);
                last = Some(event);
            }
        }
        let last = last.unwrap();
        assert!(last.completes_task());
        assert_eq!(last.event_type(), "tasks.task.moved");
    }

    #[test]
    fn move_on_missing_task_is_not_found() {
        let task = Task::empty(TaskId::new());
        assert_eq!(task.handle(&move_cmd(&task, Direction::Forward)), Err(DomainError::NotFound));
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, r#""in-progress""#);
    }

    use proptest::prelude::*;

    proptest! {
        /// Property: a move succeeds exactly when there is a neighbouring
        /// column, and a refused move leaves the task untouched.
        #[test]
        fn moves_stay_on_the_board(forward in prop::collection::vec(any::<bool>(), 0..24)) {
            let mut task = created_task("Walk the board", "Anna Petrova");

            for is_forward in forward {
                let direction = if is_forward { Direction::Forward } else { Direction::Back };
                let before = (task.status(), task.version());

                match task.handle(&move_cmd(&task, direction)) {
                    Ok(events) => {
                        prop_assert_eq!(events.len(), 1);
                        prop_assert!(before.0.step(direction).is_some());
                        for event in &events {
                            task.apply(event);
                        }
                        prop_assert_eq!(Some(task.status()), before.0.step(direction));
                        prop_assert_eq!(task.version(), before.1 + 1);
                    }
                    Err(_) => {
                        prop_assert!(before.0.step(direction).is_none());
                        prop_assert_eq!((task.status(), task.version()), before);
                    }
                }
            }
        }
    }
}
