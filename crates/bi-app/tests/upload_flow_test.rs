mod support;

use std::sync::Arc;

use bi_app::usecases::upload_flow::{UploadFlowError, UploadFlowOrchestrator};
use bi_app::SessionStore;
use bi_core::auth::{BearerToken, User};
use bi_core::ids::{AssignmentId, ClassroomId, StudentId, SubjectId};
use bi_core::ports::ApiError;
use bi_core::selection::{SelectionPhase, SelectionStep};
use bi_core::upload::{SubmitButton, UploadBlocked};

use support::{FakeSchoolApi, RecordingAlerts};

struct Harness {
    api: Arc<FakeSchoolApi>,
    alerts: Arc<RecordingAlerts>,
    flow: UploadFlowOrchestrator,
}

async fn signed_in_session() -> SessionStore {
    let session = SessionStore::new();
    let user = User {
        id: None,
        username: "teacher1".into(),
        email: "t@school.org".into(),
        fname: "Tess".into(),
        lname: "Teach".into(),
    };
    session
        .login(BearerToken::new("token-abc").unwrap(), user)
        .await;
    session
}

async fn harness_with(api: FakeSchoolApi) -> Harness {
    let api = Arc::new(api);
    let alerts = Arc::new(RecordingAlerts::default());
    let flow = UploadFlowOrchestrator::new(api.clone(), alerts.clone(), signed_in_session().await, 10);
    Harness { api, alerts, flow }
}

async fn harness() -> Harness {
    harness_with(FakeSchoolApi::seeded()).await
}

/// Walk the chain to classroom 101, subject 7, assignment 9, student 55.
async fn select_all(h: &Harness) {
    h.flow.open().await.expect("open");
    h.flow.pick_classroom(ClassroomId::new(101)).await.expect("classroom");
    h.flow.pick_subject(SubjectId::new(7)).await.expect("subject");
    h.flow.pick_assignment(AssignmentId::new(9)).await.expect("assignment");
    h.flow.pick_student(StudentId::new(55)).await.expect("student");
}

fn images(n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| format!("file:///data/cache/IMG_00{i}.jpg"))
        .collect()
}

#[tokio::test]
async fn open_loads_classrooms() {
    let h = harness().await;

    let screen = h.flow.open().await.expect("open");

    assert_eq!(screen.classrooms.len(), 2);
    assert_eq!(screen.selection.phase(), SelectionPhase::NoClassroom);
    assert!(!screen.loading.classrooms);
    assert_eq!(h.api.calls(), vec!["GET /classrooms-by-teacher"]);
}

#[tokio::test]
async fn picking_subject_loads_assignments_then_classroom_roster() {
    let h = harness().await;
    h.flow.open().await.unwrap();
    h.flow.pick_classroom(ClassroomId::new(101)).await.unwrap();

    let screen = h.flow.pick_subject(SubjectId::new(7)).await.unwrap();

    assert_eq!(
        h.api.calls(),
        vec![
            "GET /classrooms-by-teacher",
            "GET /subjects-by-teacher",
            "GET /assignments-by-subject/7",
            "GET /classroom/101/students",
        ]
    );
    assert_eq!(screen.assignments.len(), 2);
    let names: Vec<_> = screen.students.iter().map(|s| s.full_name()).collect();
    assert_eq!(names, vec!["Ada Lovelace", "Alan Turing"]);
    assert_eq!(screen.students[0].classroom_id, Some(ClassroomId::new(101)));
    assert!(h.alerts.all().is_empty());
}

#[tokio::test]
async fn roster_falls_back_to_subject_when_classroom_roster_fails() {
    let api = FakeSchoolApi::seeded();
    *api.classroom_roster.lock().unwrap() = Err(ApiError::Http {
        status: 404,
        detail: Some("Classroom not found".into()),
    });
    *api.subject_detail.lock().unwrap() = Ok(serde_json::json!({
        "id": 7,
        "name": "English",
        "students": [{"user_id": 70, "name": "Grace Hopper"}]
    }));
    let h = harness_with(api).await;
    h.flow.open().await.unwrap();
    h.flow.pick_classroom(ClassroomId::new(101)).await.unwrap();

    let screen = h.flow.pick_subject(SubjectId::new(7)).await.unwrap();

    let calls = h.api.calls();
    assert_eq!(
        &calls[calls.len() - 2..],
        ["GET /classroom/101/students", "GET /subject/7"]
    );
    assert_eq!(screen.students.len(), 1);
    assert_eq!(screen.students[0].id, Some(StudentId::new(70)));
    assert_eq!(screen.students[0].full_name(), "Grace Hopper");
    assert!(h.alerts.all().is_empty(), "fallback success is silent");
}

#[tokio::test]
async fn both_rosters_failing_alerts_and_leaves_students_empty() {
    let api = FakeSchoolApi::seeded();
    *api.classroom_roster.lock().unwrap() = Err(ApiError::Transport("connection reset".into()));
    *api.subject_detail.lock().unwrap() = Err(ApiError::Http {
        status: 500,
        detail: None,
    });
    let h = harness_with(api).await;
    h.flow.open().await.unwrap();
    h.flow.pick_classroom(ClassroomId::new(101)).await.unwrap();

    let screen = h.flow.pick_subject(SubjectId::new(7)).await.unwrap();

    assert!(screen.students.is_empty());
    assert!(!screen.loading.students);
    assert_eq!(h.alerts.messages(), vec!["Failed to load students from subject"]);
}

#[tokio::test]
async fn unrecognized_roster_shape_is_an_empty_roster() {
    let api = FakeSchoolApi::seeded();
    *api.classroom_roster.lock().unwrap() = Ok(serde_json::json!({"items": [{"id": 1}]}));
    let h = harness_with(api).await;
    h.flow.open().await.unwrap();
    h.flow.pick_classroom(ClassroomId::new(101)).await.unwrap();

    let screen = h.flow.pick_subject(SubjectId::new(7)).await.unwrap();

    assert!(screen.students.is_empty());
    assert!(
        !h.api.calls().contains(&"GET /subject/7".to_string()),
        "a parsed response is not a failure"
    );
}

#[tokio::test]
async fn classroom_load_failure_alerts() {
    let api = FakeSchoolApi::seeded();
    *api.classrooms.lock().unwrap() = Err(ApiError::Transport("offline".into()));
    let h = harness_with(api).await;

    let screen = h.flow.open().await.expect("load failures do not abort the flow");

    assert!(screen.classrooms.is_empty());
    assert_eq!(h.alerts.messages(), vec!["Failed to load classrooms"]);
}

#[tokio::test]
async fn changing_classroom_clears_everything_downstream() {
    let h = harness().await;
    select_all(&h).await;

    let screen = h.flow.pick_classroom(ClassroomId::new(102)).await.unwrap();

    assert_eq!(screen.selection.classroom(), Some(ClassroomId::new(102)));
    assert_eq!(screen.selection.subject(), None);
    assert_eq!(screen.selection.assignment(), None);
    assert_eq!(screen.selection.student(), None);
    assert!(screen.assignments.is_empty());
    assert!(screen.students.is_empty());
    assert_eq!(screen.subjects.len(), 2, "subjects reloaded for the new classroom");
}

#[tokio::test]
async fn re_picking_the_same_classroom_keeps_downstream() {
    let h = harness().await;
    select_all(&h).await;
    let calls_before = h.api.calls().len();

    let screen = h.flow.pick_classroom(ClassroomId::new(101)).await.unwrap();

    assert_eq!(screen.selection.phase(), SelectionPhase::StudentChosen);
    assert_eq!(h.api.calls().len(), calls_before);
}

#[tokio::test]
async fn reopening_assignment_keeps_the_roster() {
    let h = harness().await;
    select_all(&h).await;

    let screen = h.flow.reopen(SelectionStep::Assignment).await.unwrap();

    assert_eq!(screen.selection.phase(), SelectionPhase::SubjectChosen);
    assert_eq!(screen.students.len(), 2);
    assert_eq!(screen.assignments.len(), 2);
}

#[tokio::test]
async fn locked_and_unlisted_picks_are_rejected() {
    let h = harness().await;
    h.flow.open().await.unwrap();

    let locked = h.flow.pick_subject(SubjectId::new(7)).await;
    assert!(matches!(locked, Err(UploadFlowError::StepLocked(SelectionStep::Subject))));

    let unlisted = h.flow.pick_classroom(ClassroomId::new(999)).await;
    assert!(matches!(
        unlisted,
        Err(UploadFlowError::NotInList {
            step: SelectionStep::Classroom,
            id: 999
        })
    ));
}

#[tokio::test]
async fn missing_token_stops_before_any_request() {
    let api = Arc::new(FakeSchoolApi::seeded());
    let alerts = Arc::new(RecordingAlerts::default());
    let flow = UploadFlowOrchestrator::new(api.clone(), alerts, SessionStore::new(), 10);

    let result = flow.open().await;

    assert!(matches!(result, Err(UploadFlowError::MissingToken)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn add_images_caps_each_batch_and_reports_total() {
    let h = harness().await;

    let screen = h.flow.add_images(images(12)).await;
    assert_eq!(screen.pending.images().len(), 10);
    assert_eq!(
        h.alerts.last().map(|a| (a.title, a.message)),
        Some(("Images Added".into(), "10 images added successfully. Total: 10".into()))
    );

    let screen = h.flow.add_images(images(1)).await;
    assert_eq!(screen.pending.images().len(), 11);
    assert_eq!(screen.submit_button(), SubmitButton::Enabled);

    let screen = h.flow.remove_image(0).await;
    assert_eq!(screen.pending.images().len(), 10);
}

#[tokio::test]
async fn submit_uploads_every_image_and_clears_pending() {
    let h = harness().await;
    select_all(&h).await;
    h.flow.add_images(images(3)).await;
    h.flow.set_description("week 3 essays".into()).await;

    let summary = h.flow.submit().await.expect("upload");

    assert_eq!(summary.files, 3);
    assert_eq!(summary.message, "Successfully uploaded 3 files for Ada Lovelace - Essay 1");
    let uploads = h.api.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].assignment_id, AssignmentId::new(9));
    assert_eq!(uploads[0].student_id, StudentId::new(55));
    let names: Vec<_> = uploads[0].files.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(names, vec!["IMG_001.jpg", "IMG_002.jpg", "IMG_003.jpg"]);

    let screen = h.flow.screen().await;
    assert!(screen.pending.is_empty());
    assert!(screen.pending.description().is_empty());
    assert!(!screen.uploading);
    assert_eq!(h.alerts.last().map(|a| a.title), Some("Success".into()));
}

#[tokio::test]
async fn second_submit_while_uploading_is_rejected_without_a_request() {
    let (api, gate) = FakeSchoolApi::seeded().gated();
    let h = harness_with(api).await;
    select_all(&h).await;
    h.flow.add_images(images(3)).await;

    let (first, (during, second)) = tokio::join!(h.flow.submit(), async {
        h.api.upload_started.notified().await;
        let during = h.flow.screen().await;
        let second = h.flow.submit().await;
        gate.notify_one();
        (during, second)
    });

    assert!(during.uploading);
    assert_eq!(during.submit_button(), SubmitButton::Disabled);
    assert!(matches!(second, Err(UploadFlowError::AlreadyInFlight)));
    assert_eq!(first.expect("first upload").files, 3);
    assert_eq!(h.api.uploads.lock().unwrap().len(), 1);

    let after = h.flow.screen().await;
    assert!(!after.uploading);
    assert!(after.pending.is_empty());
}

#[tokio::test]
async fn images_picked_during_upload_stay_pending() {
    let (api, gate) = FakeSchoolApi::seeded().gated();
    let h = harness_with(api).await;
    select_all(&h).await;
    h.flow.add_images(images(2)).await;
    let late = "file:///data/cache/late.jpg".to_string();

    let (result, ()) = tokio::join!(h.flow.submit(), async {
        h.api.upload_started.notified().await;
        h.flow.add_images(vec![late.clone()]).await;
        gate.notify_one();
    });

    assert_eq!(result.expect("upload").files, 2);
    let screen = h.flow.screen().await;
    assert_eq!(screen.pending.images(), [late]);
    assert_eq!(screen.submit_button(), SubmitButton::Enabled);
}

#[tokio::test]
async fn failed_submit_surfaces_detail_and_keeps_images() {
    let api = FakeSchoolApi::seeded();
    *api.upload_result.lock().unwrap() = Err(ApiError::Http {
        status: 500,
        detail: Some("disk full".into()),
    });
    let h = harness_with(api).await;
    select_all(&h).await;
    h.flow.add_images(images(3)).await;

    let result = h.flow.submit().await;

    assert!(matches!(result, Err(UploadFlowError::Upload(_))));
    assert_eq!(
        h.alerts.last().map(|a| (a.title, a.message)),
        Some(("Error".into(), "disk full".into()))
    );
    let screen = h.flow.screen().await;
    assert_eq!(screen.pending.images().len(), 3);
    assert_eq!(screen.submit_button(), SubmitButton::Enabled);
}

#[tokio::test]
async fn submit_without_images_is_blocked() {
    let h = harness().await;
    select_all(&h).await;

    let result = h.flow.submit().await;

    assert!(matches!(result, Err(UploadFlowError::Blocked(UploadBlocked::NoImages))));
    assert_eq!(h.alerts.last().map(|a| a.message), Some("Please select files to upload".into()));
    assert!(!h.api.calls().contains(&"POST /bulk-upload".to_string()));
}

#[tokio::test]
async fn submit_without_student_is_blocked() {
    let h = harness().await;
    h.flow.open().await.unwrap();
    h.flow.pick_classroom(ClassroomId::new(101)).await.unwrap();
    h.flow.pick_subject(SubjectId::new(7)).await.unwrap();
    h.flow.pick_assignment(AssignmentId::new(9)).await.unwrap();
    h.flow.add_images(images(1)).await;

    let result = h.flow.submit().await;

    assert!(matches!(result, Err(UploadFlowError::Blocked(UploadBlocked::NoStudent))));
    assert_eq!(h.alerts.last().map(|a| a.message), Some("Please select a student".into()));
    assert!(h.api.uploads.lock().unwrap().is_empty());
}
