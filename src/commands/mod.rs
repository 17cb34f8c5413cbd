//! Command handlers.
//!
//! Each handler drives the same use cases a screen would, feeding them the
//! events a user would produce, and prints the resulting state.

mod account;
mod output;
mod schools;
mod upload;

use anyhow::Context;
use tracing::{info_span, Instrument};

use bi_core::auth::BearerToken;

use crate::bootstrap::AppRuntime;
use crate::cli::{Cli, Command};

pub use output::Output;

pub async fn run(cli: Cli, runtime: &AppRuntime) -> anyhow::Result<()> {
    let output = Output::new(cli.json);
    let span = info_span!("command.run", command = command_name(&cli.command));

    async move {
        if needs_session(&cli.command) {
            resume_session(runtime, cli.token).await?;
        }
        match cli.command {
            Command::Login { username, password } => {
                account::login(runtime, &output, username, password).await
            }
            Command::Register {
                username,
                password,
                email,
                fname,
                lname,
            } => {
                let form = account::registration_form(username, password, email, fname, lname);
                account::register(runtime, &output, form).await
            }
            Command::Schools => schools::list(runtime, &output).await,
            Command::SelectRole {
                school,
                role,
                email,
            } => schools::select_role(runtime, &output, school, role.into(), email).await,
            Command::Classrooms => upload::classrooms(runtime, &output).await,
            Command::Subjects { classroom } => upload::subjects(runtime, &output, classroom).await,
            Command::Assignments(chain) => upload::assignments(runtime, &output, chain).await,
            Command::Students(chain) => upload::students(runtime, &output, chain).await,
            Command::Upload {
                chain,
                assignment,
                student,
                description,
                images,
            } => {
                let target = upload::UploadTarget {
                    chain,
                    assignment,
                    student,
                };
                upload::upload(runtime, &output, target, description, images).await
            }
        }
    }
    .instrument(span)
    .await
}

async fn resume_session(runtime: &AppRuntime, token: Option<String>) -> anyhow::Result<()> {
    let token = token
        .and_then(BearerToken::new)
        .context("Authentication required: pass --token or set BRAININK_TOKEN")?;
    runtime.session().resume(token).await;
    Ok(())
}

fn needs_session(command: &Command) -> bool {
    !matches!(command, Command::Login { .. } | Command::Register { .. })
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Login { .. } => "login",
        Command::Register { .. } => "register",
        Command::Schools => "schools",
        Command::SelectRole { .. } => "select-role",
        Command::Classrooms => "classrooms",
        Command::Subjects { .. } => "subjects",
        Command::Assignments(_) => "assignments",
        Command::Students(_) => "students",
        Command::Upload { .. } => "upload",
    }
}
