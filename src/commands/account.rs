use serde::Serialize;

use bi_core::auth::{LoginForm, RegistrationForm, SecretString, User};

use crate::bootstrap::AppRuntime;

use super::Output;

#[derive(Serialize)]
struct SignedIn {
    access_token: String,
    user: User,
}

pub async fn login(
    runtime: &AppRuntime,
    output: &Output,
    username: String,
    password: String,
) -> anyhow::Result<()> {
    let user = runtime
        .login()
        .execute(LoginForm::new(username, password))
        .await?;
    print_signed_in(runtime, output, user).await
}

pub fn registration_form(
    username: String,
    password: String,
    email: String,
    fname: String,
    lname: String,
) -> RegistrationForm {
    RegistrationForm {
        username,
        password: SecretString::new(password),
        email,
        fname,
        lname,
    }
}

pub async fn register(
    runtime: &AppRuntime,
    output: &Output,
    form: RegistrationForm,
) -> anyhow::Result<()> {
    let user = runtime.register().execute(form).await?;
    print_signed_in(runtime, output, user).await
}

async fn print_signed_in(runtime: &AppRuntime, output: &Output, user: User) -> anyhow::Result<()> {
    let access_token = runtime
        .session()
        .token()
        .await
        .map(|token| token.expose().to_string())
        .unwrap_or_default();
    let signed_in = SignedIn { access_token, user };
    output.emit(&signed_in, || {
        vec![
            format!(
                "Signed in as {} ({})",
                signed_in.user.username, signed_in.user.email
            ),
            format!("export BRAININK_TOKEN={}", signed_in.access_token),
        ]
    })
}
