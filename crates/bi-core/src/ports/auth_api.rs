use async_trait::async_trait;

use crate::auth::{AuthResponse, BearerToken, LoginForm, RegistrationForm, Role};
use crate::ids::SchoolId;
use crate::school::{School, SchoolSelectionReceipt};

use super::errors::ApiError;

/// Account and school-membership endpoints.
#[async_trait]
pub trait AuthApiPort: Send + Sync {
    /// `POST /login`
    async fn login(&self, form: &LoginForm) -> Result<AuthResponse, ApiError>;

    /// `POST /register`
    async fn register(&self, form: &RegistrationForm) -> Result<AuthResponse, ApiError>;

    /// `GET /study-area/schools/available`
    async fn available_schools(&self, token: &BearerToken) -> Result<Vec<School>, ApiError>;

    /// `POST /study-area/login-school/select-{role}`
    async fn select_school(
        &self,
        token: &BearerToken,
        school: SchoolId,
        role: Role,
        email: &str,
    ) -> Result<SchoolSelectionReceipt, ApiError>;
}
