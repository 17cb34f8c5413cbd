//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use bi_core::auth::Role;

#[derive(Parser, Debug)]
#[command(name = "brainink")]
#[command(about = "BrainInk teacher client", long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/brainink/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Bearer token from a previous login
    #[arg(long, global = true, env = "BRAININK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and print the access token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "BRAININK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and print the access token
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "BRAININK_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        fname: String,
        #[arg(long)]
        lname: String,
    },
    /// List schools available to the signed-in user
    Schools,
    /// Confirm a school and role
    SelectRole {
        #[arg(long)]
        school: i64,
        #[arg(long, value_enum)]
        role: RoleArg,
        #[arg(long)]
        email: String,
    },
    /// List the teacher's classrooms
    Classrooms,
    /// List subjects once a classroom is chosen
    Subjects {
        #[arg(long)]
        classroom: i64,
    },
    /// List assignments of a subject
    Assignments(ChainArgs),
    /// List the roster for a classroom and subject
    Students(ChainArgs),
    /// Upload images for one student's assignment
    Upload {
        #[command(flatten)]
        chain: ChainArgs,
        #[arg(long)]
        assignment: i64,
        #[arg(long)]
        student: i64,
        #[arg(short, long)]
        description: Option<String>,
        /// Image paths or file:// URIs
        #[arg(required = true)]
        images: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct ChainArgs {
    #[arg(long)]
    pub classroom: i64,
    #[arg(long)]
    pub subject: i64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Teacher,
    Principal,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Teacher => Role::Teacher,
            RoleArg::Principal => Role::Principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn upload_takes_chain_and_images() {
        let cli = Cli::try_parse_from([
            "brainink",
            "--token",
            "abc",
            "upload",
            "--classroom",
            "101",
            "--subject",
            "7",
            "--assignment",
            "9",
            "--student",
            "55",
            "a.jpg",
            "b.jpg",
        ])
        .unwrap();

        assert_eq!(cli.token.as_deref(), Some("abc"));
        match cli.command {
            Command::Upload {
                chain,
                assignment,
                student,
                images,
                ..
            } => {
                assert_eq!((chain.classroom, chain.subject), (101, 7));
                assert_eq!((assignment, student), (9, 55));
                assert_eq!(images, vec!["a.jpg", "b.jpg"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn select_role_parses_role_value() {
        let cli = Cli::try_parse_from([
            "brainink",
            "select-role",
            "--school",
            "3",
            "--role",
            "principal",
            "--email",
            "p@school.org",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::SelectRole {
                role: RoleArg::Principal,
                school: 3,
                ..
            }
        ));
    }
}
