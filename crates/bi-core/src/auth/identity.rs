use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Role the user acts under inside a school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Principal,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Principal => "principal",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "principal" => Ok(Role::Principal),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub fname: String,
    #[serde(default)]
    pub lname: String,
}

/// Body of a successful `/login` or `/register` response.
///
/// The server may send a full `user` object, or only loose top-level identity
/// fields next to an `encrypted_data` blob this client cannot decode.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub fname: Option<String>,
    #[serde(default)]
    pub lname: Option<String>,
    #[serde(default)]
    pub encrypted_data: Option<String>,
}

/// Where the identity of a freshly authenticated user came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// The response carried a `user` object.
    UserObject,
    /// Only loose top-level fields were present; anything missing stays empty.
    TopLevelFields,
}

impl AuthResponse {
    /// Resolve the user identity from server-provided fields only.
    ///
    /// `submitted_username` is used only when the server omitted a username;
    /// the id is never invented.
    pub fn resolve_user(&self, submitted_username: &str) -> (User, IdentitySource) {
        if let Some(user) = &self.user {
            let mut user = user.clone();
            if user.username.is_empty() {
                user.username = submitted_username.to_string();
            }
            return (user, IdentitySource::UserObject);
        }

        let user = User {
            id: self.id,
            username: submitted_username.to_string(),
            email: self.email.clone().unwrap_or_default(),
            fname: self.fname.clone().unwrap_or_default(),
            lname: self.lname.clone().unwrap_or_default(),
        };
        (user, IdentitySource::TopLevelFields)
    }
}
