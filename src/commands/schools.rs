use anyhow::bail;

use bi_core::auth::Role;
use bi_core::ids::SchoolId;
use bi_core::role_selection::RoleSelectionState;

use crate::bootstrap::AppRuntime;

use super::Output;

pub async fn list(runtime: &AppRuntime, output: &Output) -> anyhow::Result<()> {
    match runtime.school_selection().start().await? {
        RoleSelectionState::PickSchool {
            error: Some(error), ..
        } => bail!(error),
        RoleSelectionState::PickSchool { schools, .. } => output.emit(&schools, || {
            schools
                .iter()
                .map(|school| {
                    let address = school.address.as_deref().unwrap_or("");
                    format!("{:>6}  {}  {}", school.id, school.name, address)
                })
                .collect()
        }),
        other => bail!("unexpected school selection state: {other:?}"),
    }
}

pub async fn select_role(
    runtime: &AppRuntime,
    output: &Output,
    school: i64,
    role: Role,
    email: String,
) -> anyhow::Result<()> {
    let wizard = runtime.school_selection();
    if let RoleSelectionState::PickSchool {
        error: Some(error), ..
    } = wizard.start().await?
    {
        bail!(error);
    }
    wizard.pick_school(SchoolId::new(school)).await?;
    wizard.pick_role(role).await?;
    wizard.edit_email(email).await?;

    match wizard.confirm().await? {
        RoleSelectionState::Confirmed { school, role } => {
            output.emit(&runtime.session().snapshot().await.school, || {
                vec![format!("Confirmed as {role} at {} ({})", school.name, school.id)]
            })
        }
        RoleSelectionState::ConfirmEmail {
            error: Some(error), ..
        } => bail!(error),
        other => bail!("unexpected school selection state: {other:?}"),
    }
}
