//! Authentication domain: credentials, tokens, identity and roles.

mod credentials;
mod identity;
mod secret;

pub use credentials::{is_valid_email, CredentialsError, LoginForm, RegistrationForm};
pub use identity::{AuthResponse, IdentitySource, Role, User};
pub use secret::{BearerToken, SecretString};
