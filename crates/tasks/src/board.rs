//! In-memory task board with policy-guarded operations.
//!
//! Authorization happens here, at the command boundary; the [`Task`]
//! aggregate itself stays auth-agnostic.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use intranet_auth::{AccessPolicy, Action, User};
use intranet_core::{Aggregate, DomainError, DomainResult, TaskId};

use crate::task::{
    CreateTask, Direction, MoveTask, Priority, Task, TaskCommand, TaskCreated, TaskEvent, TaskMoved, TaskStatus,
};

/// Input for a new task, as typed into the "create task" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
}

/// One kanban column as rendered for a particular user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column<'a> {
    pub status: TaskStatus,
    pub title: &'static str,
    pub tasks: Vec<&'a Task>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board pre-filled with the sample tasks shown on first login.
    pub fn demo() -> Self {
        let mut board = Self::new();
        board.seed(
            "Refresh the home page design",
            "Bring the layout in line with the new brand book",
            TaskStatus::InProgress,
            Priority::High,
            "Anna Petrova",
            (2024, 2, 15),
            (2024, 2, 1),
        );
        board.seed(
            "Set up the notification system",
            "Push notifications for the mobile app",
            TaskStatus::Todo,
            Priority::Medium,
            "Mikhail Sidorov",
            (2024, 2, 20),
            (2024, 2, 2),
        );
        board.seed(
            "Test the API",
            "Full coverage of every API endpoint",
            TaskStatus::Review,
            Priority::High,
            "Dmitry Volkov",
            (2024, 2, 12),
            (2024, 1, 28),
        );
        board.seed(
            "Write the documentation",
            "Technical documentation for the new module",
            TaskStatus::Done,
            Priority::Low,
            "Elena Kozlova",
            (2024, 2, 10),
            (2024, 1, 25),
        );
        board.seed(
            "Optimize the database",
            "Speed up the slowest queries",
            TaskStatus::Todo,
            Priority::Medium,
            "Anna Petrova",
            (2024, 2, 25),
            (2024, 2, 3),
        );
        board
    }

    /// Every task, regardless of who is asking.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn visible<'a>(&'a self, policy: &AccessPolicy, actor: &User) -> Vec<&'a Task> {
        policy.visible_resources(actor.role(), actor.display_name(), &self.tasks)
    }

    /// The four status columns in board order, each holding the tasks the
    /// actor may see.
    pub fn columns<'a>(&'a self, policy: &AccessPolicy, actor: &User) -> Vec<Column<'a>> {
        let visible = self.visible(policy, actor);
        TaskStatus::ALL
            .into_iter()
            .map(|status| Column {
                status,
                title: status.label(),
                tasks: visible.iter().copied().filter(|t| t.status() == status).collect(),
            })
            .collect()
    }

    pub fn create(
        &mut self,
        policy: &AccessPolicy,
        actor: &User,
        new: NewTask,
        now: DateTime<Utc>,
    ) -> DomainResult<TaskEvent> {
        if !policy.can_perform(actor.role(), Action::CreateTask) {
            return Err(DomainError::Unauthorized);
        }

        let task_id = TaskId::new();
        let mut task = Task::empty(task_id);
        let cmd = TaskCommand::Create(CreateTask {
            task_id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            assignee: new.assignee,
            due_date: new.due_date,
            occurred_at: now,
        });

        let event = apply_single(&mut task, &cmd)?;
        tracing::info!(
            task_id = %task_id,
            actor = %actor.login(),
            title = task.title(),
            "task created"
        );
        self.tasks.push(task);
        Ok(event)
    }

    /// Move a task one column.
    ///
    /// A task the actor may not touch is reported as [`DomainError::NotFound`],
    /// the same as a task that does not exist.
    pub fn move_task(
        &mut self,
        policy: &AccessPolicy,
        actor: &User,
        task_id: TaskId,
        direction: Direction,
        now: DateTime<Utc>,
    ) -> DomainResult<TaskEvent> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id_typed() == task_id)
            .ok_or(DomainError::NotFound)?;

        if !policy.can_mutate(actor.role(), actor.display_name(), &*task) {
            return Err(DomainError::NotFound);
        }

        let cmd = TaskCommand::Move(MoveTask {
            task_id,
            direction,
            occurred_at: now,
        });
        let event = apply_single(task, &cmd)?;

        if let TaskEvent::Moved(moved) = &event {
            tracing::info!(
                task_id = %task_id,
                actor = %actor.login(),
                from = %moved.from,
                to = %moved.to,
                "task moved"
            );
        }
        Ok(event)
    }

    #[allow(clippy::too_many_arguments)]
    fn seed(
        &mut self,
        title: &str,
        description: &str,
        status: TaskStatus,
        priority: Priority,
        assignee: &str,
        due: (i32, u32, u32),
        created: (i32, u32, u32),
    ) {
        let task_id = TaskId::new();
        let mut task = Task::empty(task_id);
        let created_at = Utc
            .with_ymd_and_hms(created.0, created.1, created.2, 9, 0, 0)
            .single()
            .unwrap_or_default();

        let mut events = vec![TaskEvent::Created(TaskCreated {
            task_id,
            title: title.to_string(),
            description: description.to_string(),
            priority,
            assignee: assignee.to_string(),
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2),
            occurred_at: created_at,
        })];

        let mut current = TaskStatus::Todo;
        while current != status {
            let Some(next) = current.next() else { break };
            events.push(TaskEvent::Moved(TaskMoved {
                task_id,
                from: current,
                to: next,
                occurred_at: created_at,
            }));
            current = next;
        }

        for event in &events {
            task.apply(event);
        }
        self.tasks.push(task);
    }
}

/// Run a command that emits exactly one event and apply it.
fn apply_single(task: &mut Task, cmd: &TaskCommand) -> DomainResult<TaskEvent> {
    let mut events = task.handle(cmd)?;
    let event = events
        .pop()
        .ok_or_else(|| DomainError::invariant("command produced no event"))?;
    task.apply(&event);
    Ok(event)
}
