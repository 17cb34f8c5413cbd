use once_cell::sync::Lazy;
use regex::Regex;

use super::secret::SecretString;

const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Local form validation failures. Each maps to the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("All fields are required for registration")]
    MissingRegistrationFields,
    #[error("Password must be at least {min_len} characters")]
    PasswordTooShort { min_len: usize },
}

#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.username.trim().is_empty() || self.password.is_blank() {
            return Err(CredentialsError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RegistrationForm {
    pub username: String,
    pub password: SecretString,
    pub email: String,
    pub fname: String,
    pub lname: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), CredentialsError> {
        if self.username.trim().is_empty() || self.password.is_blank() {
            return Err(CredentialsError::MissingCredentials);
        }
        if self.email.trim().is_empty() || self.fname.trim().is_empty() || self.lname.trim().is_empty()
        {
            return Err(CredentialsError::MissingRegistrationFields);
        }
        if self.password.expose().chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::PasswordTooShort {
                min_len: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
