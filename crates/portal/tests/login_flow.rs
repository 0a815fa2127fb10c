use std::time::Duration;

use chrono::Utc;

use intranet_auth::{AccessPolicy, Action, Assigned, DenialKind, RoleClaim};
use intranet_core::DomainError;
use intranet_portal::{AuthError, DirectoryAuthenticator, FixedLatency, Session, UserDirectory};
use intranet_tasks::{Direction, NewTask, TaskBoard, TaskStatus};

fn authenticator() -> FixedLatency<DirectoryAuthenticator> {
    FixedLatency::new(DirectoryAuthenticator::new(UserDirectory::demo().unwrap()), Duration::ZERO)
}

#[test]
fn manager_assigns_task_and_employee_finishes_it() {
    let policy = AccessPolicy::standard();
    let auth = authenticator();
    let mut board = TaskBoard::new();

    let elena = Session::login(&auth, "elena", "elena123").unwrap();
    assert!(elena.can_perform(&policy, Action::CreateTask));
    board
        .create(
            &policy,
            elena.user(),
            NewTask {
                title: "Prepare the sprint demo".to_string(),
                assignee: "Maria Ivanova".to_string(),
                ..NewTask::default()
            },
            Utc::now(),
        )
        .unwrap();
    elena.end();

    let maria = Session::login(&auth, "maria", "maria123").unwrap();
    assert!(!maria.can_perform(&policy, Action::CreateTask));

    let visible = board.visible(&policy, maria.user());
    assert_eq!(visible.len(), 1);
    let task_id = visible[0].id_typed();

    let mut last = None;
    for _ in 0..3 {
        last = Some(
            board
                .move_task(&policy, maria.user(), task_id, Direction::Forward, Utc::now())
                .unwrap(),
        );
    }
    assert!(last.unwrap().completes_task());

    let columns = board.columns(&policy, maria.user());
    let done = columns.iter().find(|c| c.status == TaskStatus::Done).unwrap();
    assert_eq!(done.tasks.len(), 1);
}

#[test]
fn employees_never_see_each_others_tasks() {
    let policy = AccessPolicy::standard();
    let auth = authenticator();
    let board = TaskBoard::demo();

    for (login, password) in [("anna", "anna123"), ("mikhail", "mikhail123"), ("dmitry", "dmitry123")] {
        let session = Session::login(&auth, login, password).unwrap();
        let visible = board.visible(&policy, session.user());
        assert!(!visible.is_empty());
        assert!(visible.iter().all(|t| t.assignee() == Some(session.display_name())));
    }

    // Maria has nothing on the demo board.
    let maria = Session::login(&auth, "maria", "maria123").unwrap();
    assert!(board.visible(&policy, maria.user()).is_empty());
}

#[test]
fn employee_cannot_touch_foreign_task() {
    let policy = AccessPolicy::standard();
    let mut board = TaskBoard::demo();
    let anna = Session::login(&authenticator(), "anna", "anna123").unwrap();

    let foreign = board
        .all()
        .iter()
        .find(|t| t.assignee() == Some("Dmitry Volkov"))
        .unwrap()
        .id_typed();
    let err = board
        .move_task(&policy, anna.user(), foreign, Direction::Back, Utc::now())
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound);

    let explained = policy.explain_resource_access(anna.role(), anna.display_name(), &board.all()[2]);
    assert!(!explained.granted);
    assert_eq!(explained.denial, Some(DenialKind::NotAssignee));
}

#[test]
fn tampered_role_is_denied_everything() {
    let policy = AccessPolicy::standard();
    let claim = RoleClaim::parse("superadmin");

    assert!(policy.visible_menu(&claim).is_empty());
    for view in policy.menu().iter() {
        assert!(!policy.can_view_menu_item(&claim, view.id()));
    }
    assert!(!policy.can_perform(&claim, Action::ManageTeam));
}

#[test]
fn bad_password_is_rejected() {
    let err = Session::login(&authenticator(), "admin", "letmein").unwrap_err();
    assert_eq!(err, AuthError::InvalidCredentials);
}
