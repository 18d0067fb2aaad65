use aerodesk_common::models::{
    LoginRequest, RegisterRequest, ResetPasswordRequest, VerificationCodeRequest,
    VerificationPurpose,
};

use crate::error::Result;
use crate::rest::RestClient;

impl RestClient {
    /// `POST /auth/login`. The returned token is persisted in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let body = LoginRequest { username: username.to_owned(), password: password.to_owned() };
        let token: String = self.post("/auth/login", &body).await?;
        self.session().set_token(&token)?;
        tracing::info!(username, "Logged in");
        Ok(token)
    }

    /// Forget the local token. The server keeps no session to invalidate.
    pub fn logout(&self) -> Result<()> {
        self.session().logout()?;
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.post("/auth/register", request).await
    }

    pub async fn send_verification_code(
        &self,
        email: &str,
        purpose: VerificationPurpose,
    ) -> Result<()> {
        let body = VerificationCodeRequest { email: email.to_owned(), purpose };
        self.post("/auth/sendVerificationCode", &body).await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<()> {
        self.post("/auth/resetPassword", request).await
    }
}
