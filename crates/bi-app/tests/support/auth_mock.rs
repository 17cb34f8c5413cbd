use async_trait::async_trait;
use mockall::mock;

use bi_core::auth::{AuthResponse, BearerToken, LoginForm, RegistrationForm, Role};
use bi_core::ids::SchoolId;
use bi_core::ports::{ApiError, AuthApiPort};
use bi_core::school::{School, SchoolSelectionReceipt};

mock! {
    pub AuthApi {}

    #[async_trait]
    impl AuthApiPort for AuthApi {
        async fn login(&self, form: &LoginForm) -> Result<AuthResponse, ApiError>;
        async fn register(&self, form: &RegistrationForm) -> Result<AuthResponse, ApiError>;
        async fn available_schools(&self, token: &BearerToken) -> Result<Vec<School>, ApiError>;
        async fn select_school(
            &self,
            token: &BearerToken,
            school: SchoolId,
            role: Role,
            email: &str,
        ) -> Result<SchoolSelectionReceipt, ApiError>;
    }
}
