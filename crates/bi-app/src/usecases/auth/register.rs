use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use bi_core::auth::{BearerToken, IdentitySource, RegistrationForm, User};
use bi_core::ports::{Alert, AlertPort, AuthApiPort};

use crate::session::SessionStore;

use super::{failure, AuthError};

/// Use case for creating an account. A successful registration signs the user
/// in, exactly like [`super::Login`].
pub struct Register {
    api: Arc<dyn AuthApiPort>,
    session: SessionStore,
    alerts: Arc<dyn AlertPort>,
}

impl Register {
    pub fn new(api: Arc<dyn AuthApiPort>, session: SessionStore, alerts: Arc<dyn AlertPort>) -> Self {
        Self {
            api,
            session,
            alerts,
        }
    }

    pub async fn execute(&self, form: RegistrationForm) -> Result<User, AuthError> {
        let span = info_span!("usecase.register.execute", username = %form.username);

        async {
            if let Err(err) = form.validate() {
                self.alerts
                    .show(Alert::new("Validation Error", err.to_string()))
                    .await;
                return Err(err.into());
            }

            let response = match self.api.register(&form).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(error = %err, "registration failed");
                    let (alert, err) = failure(err, "Registration Failed", "Registration failed");
                    self.alerts.show(alert).await;
                    return Err(err);
                }
            };

            let Some(token) = BearerToken::new(response.access_token.clone()) else {
                self.alerts
                    .show(Alert::error("Invalid response from server. Please try again."))
                    .await;
                return Err(AuthError::InvalidResponse("empty access token".into()));
            };

            let (user, source) = response.resolve_user(&form.username);
            if source == IdentitySource::TopLevelFields {
                warn!("registration response carried no user object");
            }

            self.session.login(token, user.clone()).await;
            info!("registration succeeded");
            Ok(user)
        }
        .instrument(span)
        .await
    }
}
