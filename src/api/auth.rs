use super::client::ApiClient;
use super::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::{validation_error, AppResult};
use crate::session::Session;
use tracing::info;

impl ApiClient {
    /// Log in and return the resulting session.
    ///
    /// The client itself is not modified; attach the session with `with_session`.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(validation_error("Username and password are required"));
        }

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_json("/login", &request).await?;
        let session = Session::from_token(&response.token)?;

        info!(
            "Logged in as {} with role {:?}",
            request.username,
            session.role()
        );
        Ok(session)
    }

    /// Register a new account
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<()> {
        if password != confirm_password {
            return Err(validation_error("Passwords do not match"));
        }
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(validation_error("Username, email and password are required"));
        }

        let request = RegisterRequest {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let _: serde_json::Value = self.post_json("/register", &request).await?;

        info!("Registered account {}", request.username);
        Ok(())
    }
}
