mod common;

use common::{login_as, relogin, setup_app_data};
use nodue_backend::coordinators::{DirectoryCoordinator, LoginCoordinator, NodueCoordinator};
use nodue_backend::errors::internal::{AccessError, ApprovalError, InternalError, ValidationError};
use nodue_backend::providers::directory_provider::{
    FACULTY_NAME_NOT_AVAILABLE, STAFF_NAME_NOT_AVAILABLE,
};
use nodue_backend::types::db::{faculty_staff, nodue_request, user};
use nodue_backend::types::internal::{ApprovalState, RequestContext, Role, Stage};
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, PaginatorTrait, Set};

fn state_of(request: &nodue_request::Model) -> ApprovalState {
    request.approval_fields().state().expect("Request should be in a defined state")
}

async fn queue_ids(coordinator: &NodueCoordinator, ctx: &RequestContext, stage: Stage) -> Vec<i32> {
    coordinator
        .queue(ctx, stage)
        .await
        .expect("Queue should load")
        .into_iter()
        .map(|r| r.id)
        .collect()
}

#[tokio::test]
async fn test_request_walks_through_all_three_stages() {
    let app_data = setup_app_data().await;
    let nodue = NodueCoordinator::new(app_data.clone());
    let student = login_as(&app_data, "asha", Role::Student, Some(("X", "CS"))).await;
    let hod = login_as(&app_data, "hod1", Role::Hod, Some(("X", "CS"))).await;
    let library = login_as(&app_data, "lib1", Role::Library, Some(("X", "CS"))).await;
    let staff = login_as(&app_data, "staff1", Role::Staff, Some(("X", "CS"))).await;

    // Submission
    let request = nodue.submit(&student).await.unwrap();
    assert_eq!(state_of(&request), ApprovalState::Pending);
    assert!(!request.is_approved);
    assert_eq!(request.hod_comment, None);
    assert_eq!(request.library_comment, None);
    assert_eq!(request.staff_comment, None);
    assert_eq!(request.college_name, "X");
    assert_eq!(request.branch_name, "CS");
    assert_eq!(queue_ids(&nodue, &hod, Stage::Hod).await, vec![request.id]);

    // HOD
    let approved = nodue.act(&hod, Stage::Hod, request.id, None).await.unwrap();
    assert_eq!(state_of(&approved), ApprovalState::HodApproved);
    assert!(queue_ids(&nodue, &hod, Stage::Hod).await.is_empty());
    assert_eq!(queue_ids(&nodue, &library, Stage::Library).await, vec![request.id]);

    // Library
    let cleared = nodue
        .act(&library, Stage::Library, request.id, Some("ok"))
        .await
        .unwrap();
    assert_eq!(state_of(&cleared), ApprovalState::LibraryCleared);
    assert_eq!(cleared.library_comment.as_deref(), Some("ok"));
    assert!(queue_ids(&nodue, &hod, Stage::Hod).await.is_empty());
    assert!(queue_ids(&nodue, &library, Stage::Library).await.is_empty());
    assert_eq!(queue_ids(&nodue, &staff, Stage::Staff).await, vec![request.id]);

    // Staff
    let done = nodue
        .act(&staff, Stage::Staff, request.id, Some("cleared"))
        .await
        .unwrap();
    assert_eq!(state_of(&done), ApprovalState::FullyCleared);
    assert_eq!(done.staff_comment.as_deref(), Some("cleared"));
    assert!(queue_ids(&nodue, &hod, Stage::Hod).await.is_empty());
    assert!(queue_ids(&nodue, &library, Stage::Library).await.is_empty());
    assert!(queue_ids(&nodue, &staff, Stage::Staff).await.is_empty());

    let own = nodue.own_requests(&student).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(state_of(&own[0]), ApprovalState::FullyCleared);
}

#[tokio::test]
async fn test_fully_cleared_request_accepts_no_further_action() {
    let app_data = setup_app_data().await;
    let nodue = NodueCoordinator::new(app_data.clone());
    let student = login_as(&app_data, "asha", Role::Student, Some(("X", "CS"))).await;
    let hod = login_as(&app_data, "hod1", Role::Hod, Some(("X", "CS"))).await;
    let library = login_as(&app_data, "lib1", Role::Library, Some(("X", "CS"))).await;
    let staff = login_as(&app_data, "staff1", Role::Staff, Some(("X", "CS"))).await;

    let request = nodue.submit(&student).await.unwrap();
    nodue.act(&hod, Stage::Hod, request.id, None).await.unwrap();
    nodue.act(&library, Stage::Library, request.id, Some("ok")).await.unwrap();
    nodue.act(&staff, Stage::Staff, request.id, Some("cleared")).await.unwrap();

    for (ctx, stage) in [(&hod, Stage::Hod), (&library, Stage::Library), (&staff, Stage::Staff)] {
        let err = nodue.act(ctx, stage, request.id, Some("again")).await.unwrap_err();
        assert!(matches!(
            err,
            InternalError::Approval(ApprovalError::WrongState {
                actual: ApprovalState::FullyCleared,
                ..
            })
        ));
    }

    let stored = app_data
        .nodue_request_store
        .get_request(request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.staff_comment.as_deref(), Some("cleared"));
    assert_eq!(stored.library_comment.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_queues_are_limited_to_own_college_and_branch() {
    let app_data = setup_app_data().await;
    let nodue = NodueCoordinator::new(app_data.clone());
    let cs_student = login_as(&app_data, "asha", Role::Student, Some(("X", "CS"))).await;
    let ee_student = login_as(&app_data, "ravi", Role::Student, Some(("X", "EE"))).await;
    let other_college = login_as(&app_data, "meera", Role::Student, Some(("Y", "CS"))).await;
    let cs_hod = login_as(&app_data, "hod-cs", Role::Hod, Some(("X", "CS"))).await;
    let ee_hod = login_as(&app_data, "hod-ee", Role::Hod, Some(("X", "EE"))).await;

    let cs_request = nodue.submit(&cs_student).await.unwrap();
    let ee_request = nodue.submit(&ee_student).await.unwrap();
    nodue.submit(&other_college).await.unwrap();

    assert_eq!(queue_ids(&nodue, &cs_hod, Stage::Hod).await, vec![cs_request.id]);
    assert_eq!(queue_ids(&nodue, &ee_hod, Stage::Hod).await, vec![ee_request.id]);

    let err = nodue.act(&ee_hod, Stage::Hod, cs_request.id, None).await.unwrap_err();
    assert!(matches!(err, InternalError::Approval(ApprovalError::OutOfScope { .. })));
}

#[tokio::test]
async fn test_queue_keeps_submission_order() {
    let app_data = setup_app_data().await;
    let nodue = NodueCoordinator::new(app_data.clone());
    let student = login_as(&app_data, "asha", Role::Student, Some(("X", "CS"))).await;
    let hod = login_as(&app_data, "hod1", Role::Hod, Some(("X", "CS"))).await;

    let first = nodue.submit(&student).await.unwrap();
    let second = nodue.submit(&student).await.unwrap();
    let third = nodue.submit(&student).await.unwrap();

    assert_eq!(
        queue_ids(&nodue, &hod, Stage::Hod).await,
        vec![first.id, second.id, third.id]
    );
}

#[tokio::test]
async fn test_request_scope_is_snapshotted_at_submission() {
    let app_data = setup_app_data().await;
    let nodue = NodueCoordinator::new(app_data.clone());
    let student = login_as(&app_data, "asha", Role::Student, Some(("X", "CS"))).await;
    let cs_hod = login_as(&app_data, "hod-cs", Role::Hod, Some(("X", "CS"))).await;
    let ee_hod = login_as(&app_data, "hod-ee", Role::Hod, Some(("X", "EE"))).await;

    let request = nodue.submit(&student).await.unwrap();

    // Student transfers branches after submitting
    let db = &app_data.connections.db;
    let stored_user = user::Entity::find_by_id(student.actor_id.clone())
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active = stored_user.into_active_model();
    active.branch_name = Set(Some("EE".to_string()));
    active.update(db).await.unwrap();

    let reread = app_data
        .nodue_request_store
        .get_request(request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread.college_name, "X");
    assert_eq!(reread.branch_name, "CS");
    assert_eq!(queue_ids(&nodue, &cs_hod, Stage::Hod).await, vec![request.id]);
    assert!(queue_ids(&nodue, &ee_hod, Stage::Hod).await.is_empty());

    // A new submission after logging in again uses the new branch
    let student = relogin(&app_data, "asha", "asha-password").await;
    let later = nodue.submit(&student).await.unwrap();
    assert_eq!(later.branch_name, "EE");
    assert_eq!(queue_ids(&nodue, &ee_hod, Stage::Hod).await, vec![later.id]);
}

#[tokio::test]
async fn test_simultaneous_hod_approvals_apply_once() {
    let app_data = setup_app_data().await;
    let nodue = NodueCoordinator::new(app_data.clone());
    let student = login_as(&app_data, "asha", Role::Student, Some(("X", "CS"))).await;
    let hod_a = login_as(&app_data, "hod-a", Role::Hod, Some(("X", "CS"))).await;
    let hod_b = login_as(&app_data, "hod-b", Role::Hod, Some(("X", "CS"))).await;

    let request = nodue.submit(&student).await.unwrap();

    let (a, b) = tokio::join!(
        nodue.act(&hod_a, Stage::Hod, request.id, Some("from a")),
        nodue.act(&hod_b, Stage::Hod, request.id, Some("from b")),
    );

    let outcomes = [a, b];
    let applied = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(applied, 1);
    assert!(outcomes.iter().any(|r| matches!(
        r,
        Err(InternalError::Approval(ApprovalError::WrongState { .. }))
    )));
}

#[tokio::test]
async fn test_student_without_scope_cannot_submit() {
    let app_data = setup_app_data().await;
    let nodue = NodueCoordinator::new(app_data.clone());
    let student = login_as(&app_data, "drifter", Role::Student, None).await;

    let err = nodue.submit(&student).await.unwrap_err();
    assert!(matches!(
        err,
        InternalError::Validation(ValidationError::IncompleteScope { .. })
    ));
}

#[tokio::test]
async fn test_library_cannot_create_directory_entry() {
    let app_data = setup_app_data().await;
    let directory = DirectoryCoordinator::new(app_data.clone());
    let library = login_as(&app_data, "lib1", Role::Library, Some(("X", "CS"))).await;

    let err = directory
        .add_entry(&library, Some("Dr. Rao"), Some("Mr. Iyer"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        InternalError::Access(AccessError::Denied { role: Role::Library, .. })
    ));

    let rows = faculty_staff::Entity::find()
        .count(&app_data.connections.db)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_directory_lookup_falls_back_to_placeholders() {
    let app_data = setup_app_data().await;
    let directory = DirectoryCoordinator::new(app_data.clone());
    let admin = login_as(&app_data, "admin1", Role::Admin, Some(("X", "CS"))).await;
    let other_branch = login_as(&app_data, "ravi", Role::Student, Some(("X", "EE"))).await;

    directory.add_entry(&admin, Some("Dr. Rao"), Some("Mr. Iyer")).await.unwrap();

    let listing = directory.lookup(&other_branch).await.unwrap();
    assert_eq!(listing.faculty_name, FACULTY_NAME_NOT_AVAILABLE);
    assert_eq!(listing.staff_name, STAFF_NAME_NOT_AVAILABLE);
    assert!(!listing.found);
}

#[tokio::test]
async fn test_directory_lookup_uses_oldest_entry() {
    let app_data = setup_app_data().await;
    let directory = DirectoryCoordinator::new(app_data.clone());
    let admin = login_as(&app_data, "admin1", Role::Admin, Some(("X", "CS"))).await;
    let student = login_as(&app_data, "asha", Role::Student, Some(("X", "CS"))).await;

    directory.add_entry(&admin, Some("Dr. Rao"), Some("Mr. Iyer")).await.unwrap();
    directory.add_entry(&admin, Some("Dr. Sen"), Some("Ms. Das")).await.unwrap();

    let listing = directory.lookup(&student).await.unwrap();
    assert_eq!(listing.faculty_name, "Dr. Rao");
    assert_eq!(listing.staff_name, "Mr. Iyer");
    assert!(listing.found);
}

#[tokio::test]
async fn test_logged_out_context_is_refused() {
    let app_data = setup_app_data().await;
    let nodue = NodueCoordinator::new(app_data.clone());
    let student = login_as(&app_data, "asha", Role::Student, Some(("X", "CS"))).await;

    LoginCoordinator::new(app_data.clone()).logout(&student).await.unwrap();

    let token = student.session_token.clone().unwrap();
    let resolved = app_data
        .providers
        .authentication_provider
        .resolve_session(&token)
        .await
        .unwrap();
    assert!(resolved.is_none());

    let err = nodue.submit(&RequestContext::anonymous()).await.unwrap_err();
    assert!(matches!(err, InternalError::Access(AccessError::Unauthenticated)));
}
