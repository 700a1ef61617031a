use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studio_core::{AuthUser, Credentials};
use studio_logging::{studio_info, studio_warn};

use crate::chat::ApiSettings;
use crate::store::LocalStore;
use crate::ApiError;

pub const UNREACHABLE_MESSAGE: &str = "Unable to connect to server. Please try again.";

/// What a successful signup or login hands back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AuthSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

#[derive(Debug, Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthSession, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAuthClient {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestAuthClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = settings.build_client()?;
        Ok(Self { settings, client })
    }
}

#[async_trait]
impl AuthClient for ReqwestAuthClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthSession, ApiError> {
        let request = match credentials {
            Credentials::Signup {
                name,
                email,
                password,
            } => self
                .client
                .post(self.settings.endpoint("/api/auth/signup")?)
                .json(&SignupBody {
                    name,
                    email,
                    password,
                }),
            Credentials::Login { email, password } => self
                .client
                .post(self.settings.endpoint("/api/auth/login")?)
                .json(&LoginBody { email, password }),
        };

        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|err| ApiError::Malformed(err.to_string()))?;

        if !status.is_success() {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned);
            return Err(ApiError::Status {
                code: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(body).map_err(|err| ApiError::Malformed(err.to_string()))
    }
}

/// Message shown on the form for a failed request.
pub fn failure_message(credentials: &Credentials, err: &ApiError) -> String {
    match err {
        ApiError::Status {
            message: Some(message),
            ..
        } => message.clone(),
        ApiError::Status { message: None, .. } => match credentials {
            Credentials::Signup { .. } => "Signup failed. Please try again.".to_string(),
            Credentials::Login { .. } => "Login failed. Please try again.".to_string(),
        },
        ApiError::InvalidUrl(_) | ApiError::Transport(_) | ApiError::Malformed(_) => {
            UNREACHABLE_MESSAGE.to_string()
        }
    }
}

/// Authenticates, persists the session, and reduces the result for the form.
pub async fn authenticate_and_store(
    client: &dyn AuthClient,
    store: &LocalStore,
    credentials: &Credentials,
) -> Result<Option<AuthUser>, String> {
    match client.authenticate(credentials).await {
        Ok(session) => {
            if let Err(err) = store.save_session(session.token.as_deref(), session.user.as_ref()) {
                studio_warn!("Failed to persist auth session: {}", err);
            }
            studio_info!("Authenticated as {:?}", session.user.as_ref().map(|u| &u.name));
            Ok(session.user)
        }
        Err(err) => {
            studio_warn!("Auth request failed: {}", err);
            Err(failure_message(credentials, &err))
        }
    }
}
