/*
 * Responsibility
 * - Login request / token response DTOs
 * - validate() for shape checks before anything is looked up
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct UserLoginRequest {
    pub telegram_id: String,
}

impl UserLoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.telegram_id.trim().is_empty() {
            return Err("telegram_id is required");
        }
        if self.telegram_id.len() > 256 {
            return Err("telegram_id must be <= 256 chars");
        }

        Ok(())
    }
}

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

impl AdminLoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err("username and password are required");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

impl TokenResponse {
    pub fn bearer(token: String, expires_in: u64) -> Self {
        Self {
            token,
            token_type: "Bearer",
            expires_in,
        }
    }
}
