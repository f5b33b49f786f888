use std::fmt;

use subtle::ConstantTimeEq;

/// Configured admin username/password pair.
///
/// Used by the legacy `Basic` admin gate and by the admin login endpoint.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Both halves are always compared so a wrong username costs the same as a wrong password.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = constant_time_eq(username, &self.username);
        let pass_ok = constant_time_eq(password, &self.password);
        user_ok & pass_ok
    }
}

fn constant_time_eq(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
