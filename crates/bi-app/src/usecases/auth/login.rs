use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use bi_core::auth::{BearerToken, IdentitySource, LoginForm, User};
use bi_core::ports::{Alert, AlertPort, AuthApiPort};

use crate::session::SessionStore;

use super::{failure, AuthError};

/// Use case for signing in.
///
/// ## Behavior
/// - Validates the form locally; nothing is sent for an incomplete form
/// - Posts the credentials, stores token and identity in the session
/// - Every failure is shown as an alert and returned to the caller
pub struct Login {
    api: Arc<dyn AuthApiPort>,
    session: SessionStore,
    alerts: Arc<dyn AlertPort>,
}

impl Login {
    pub fn new(api: Arc<dyn AuthApiPort>, session: SessionStore, alerts: Arc<dyn AlertPort>) -> Self {
        Self {
            api,
            session,
            alerts,
        }
    }

    pub async fn execute(&self, form: LoginForm) -> Result<User, AuthError> {
        let span = info_span!("usecase.login.execute", username = %form.username);

        async {
            if let Err(err) = form.validate() {
                self.alerts
                    .show(Alert::new("Validation Error", err.to_string()))
                    .await;
                return Err(err.into());
            }

            let response = match self.api.login(&form).await {
                Ok(response) => response,
                Err(err) => {
                    warn!(error = %err, "login failed");
                    let (alert, err) = failure(err, "Login Failed", "Invalid credentials");
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
                // encrypted_data is not decoded; identity may be partial
                warn!(
                    has_encrypted_data = response.encrypted_data.is_some(),
                    "login response carried no user object"
                );
            }

            self.session.login(token, user.clone()).await;
            info!("login succeeded");
            Ok(user)
        }
        .instrument(span)
        .await
    }
}
