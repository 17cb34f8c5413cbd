use anyhow::Context;
use serde::Serialize;

use bi_app::usecases::upload_flow::UploadFlowOrchestrator;
use bi_core::ids::{AssignmentId, ClassroomId, StudentId, SubjectId};

use crate::bootstrap::AppRuntime;
use crate::cli::ChainArgs;

use super::Output;

pub struct UploadTarget {
    pub chain: ChainArgs,
    pub assignment: i64,
    pub student: i64,
}

#[derive(Serialize)]
struct Uploaded {
    files: usize,
    message: String,
    pdf_id: Option<i64>,
}

/// Open the screen and choose classroom then subject.
async fn open_chain(runtime: &AppRuntime, chain: ChainArgs) -> anyhow::Result<UploadFlowOrchestrator> {
    let flow = runtime.upload_flow();
    flow.open().await?;
    flow.pick_classroom(ClassroomId::new(chain.classroom))
        .await
        .with_context(|| format!("Cannot select classroom {}", chain.classroom))?;
    flow.pick_subject(SubjectId::new(chain.subject))
        .await
        .with_context(|| format!("Cannot select subject {}", chain.subject))?;
    Ok(flow)
}

pub async fn classrooms(runtime: &AppRuntime, output: &Output) -> anyhow::Result<()> {
    let screen = runtime.upload_flow().open().await?;
    output.emit(&screen.classrooms, || {
        screen
            .classrooms
            .iter()
            .map(|c| {
                let students = c.student_count.map(|n| format!("{n} students")).unwrap_or_default();
                format!("{:>6}  {}  {}", c.id, c.name, students)
            })
            .collect()
    })
}

pub async fn subjects(runtime: &AppRuntime, output: &Output, classroom: i64) -> anyhow::Result<()> {
    let flow = runtime.upload_flow();
    flow.open().await?;
    let screen = flow
        .pick_classroom(ClassroomId::new(classroom))
        .await
        .with_context(|| format!("Cannot select classroom {classroom}"))?;
    output.emit(&screen.subjects, || {
        screen
            .subjects
            .iter()
            .map(|s| format!("{:>6}  {}", s.id, s.name))
            .collect()
    })
}

pub async fn assignments(runtime: &AppRuntime, output: &Output, chain: ChainArgs) -> anyhow::Result<()> {
    let screen = open_chain(runtime, chain).await?.screen().await;
    output.emit(&screen.assignments, || {
        screen
            .assignments
            .iter()
            .map(|a| {
                let due = a.due_date.as_deref().unwrap_or("no due date");
                format!("{:>6}  {}  ({due})", a.id, a.title)
            })
            .collect()
    })
}

pub async fn students(runtime: &AppRuntime, output: &Output, chain: ChainArgs) -> anyhow::Result<()> {
    let screen = open_chain(runtime, chain).await?.screen().await;
    output.emit(&screen.students, || {
        screen
            .students
            .iter()
            .map(|s| {
                let id = s.id.map_or_else(|| "-".to_string(), |id| id.to_string());
                format!("{id:>6}  {}", s.full_name())
            })
            .collect()
    })
}

pub async fn upload(
    runtime: &AppRuntime,
    output: &Output,
    target: UploadTarget,
    description: Option<String>,
    images: Vec<String>,
) -> anyhow::Result<()> {
    let flow = open_chain(runtime, target.chain).await?;
    flow.pick_assignment(AssignmentId::new(target.assignment))
        .await
        .with_context(|| format!("Cannot select assignment {}", target.assignment))?;
    flow.pick_student(StudentId::new(target.student))
        .await
        .with_context(|| format!("Cannot select student {}", target.student))?;

    // the screen caps each picker batch, so feed the paths in batches
    let limit = runtime.config().selection_limit.max(1);
    for batch in images.chunks(limit) {
        flow.add_images(batch.to_vec()).await;
    }
    if let Some(description) = description {
        flow.set_description(description).await;
    }

    let summary = flow.submit().await?;
    let uploaded = Uploaded {
        files: summary.files,
        message: summary.message,
        pdf_id: summary.receipt.pdf_id,
    };
    output.emit(&uploaded, || vec![uploaded.message.clone()])
}
