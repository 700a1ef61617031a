use serde::{Deserialize, Serialize};

pub const GUEST_NAME: &str = "Guest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Signup {
        name: String,
        email: String,
        password: String,
    },
    Login {
        email: String,
        password: String,
    },
}

impl Credentials {
    /// Every field must be filled in before a request is made.
    pub fn is_complete(&self) -> bool {
        match self {
            Credentials::Signup {
                name,
                email,
                password,
            } => !name.is_empty() && !email.is_empty() && !password.is_empty(),
            Credentials::Login { email, password } => !email.is_empty() && !password.is_empty(),
        }
    }
}

/// Signed-in user plus the state of the signup/login form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub pending: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or(GUEST_NAME, |user| user.name.as_str())
    }
}
