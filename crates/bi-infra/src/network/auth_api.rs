use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use bi_core::auth::{AuthResponse, BearerToken, LoginForm, RegistrationForm, Role};
use bi_core::ids::SchoolId;
use bi_core::ports::{ApiError, AuthApiPort};
use bi_core::school::{School, SchoolSelectionReceipt};

use super::client::HttpBackend;

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    fname: &'a str,
    lname: &'a str,
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SelectSchoolBody<'a> {
    school_id: SchoolId,
    email: &'a str,
}

fn select_path(role: Role) -> &'static str {
    match role {
        Role::Teacher => "/study-area/login-school/select-teacher",
        Role::Principal => "/study-area/login-school/select-principal",
    }
}

#[async_trait]
impl AuthApiPort for HttpBackend {
    async fn login(&self, form: &LoginForm) -> Result<AuthResponse, ApiError> {
        let body = LoginBody {
            username: &form.username,
            password: form.password.expose(),
        };
        self.send_json(self.post_anonymous("/login").json(&body))
            .await
    }

    async fn register(&self, form: &RegistrationForm) -> Result<AuthResponse, ApiError> {
        let body = RegisterBody {
            fname: form.fname.trim(),
            lname: form.lname.trim(),
            username: &form.username,
            email: form.email.trim(),
            password: form.password.expose(),
        };
        self.send_json(self.post_anonymous("/register").json(&body))
            .await
    }

    async fn available_schools(&self, token: &BearerToken) -> Result<Vec<School>, ApiError> {
        self.send_json(self.get(token, "/study-area/schools/available"))
            .await
    }

    async fn select_school(
        &self,
        token: &BearerToken,
        school: SchoolId,
        role: Role,
        email: &str,
    ) -> Result<SchoolSelectionReceipt, ApiError> {
        let body = SelectSchoolBody {
            school_id: school,
            email,
        };
        let mut receipt: SchoolSelectionReceipt = self
            .send_json(self.post(token, select_path(role)).json(&body))
            .await?;
        if receipt.role.is_none() {
            receipt.role = Some(role.as_str().to_string());
        }
        info!(school_id = %school, role = %role, "school selection accepted");
        Ok(receipt)
    }
}
