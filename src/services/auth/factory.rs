//! Factory: build the codec and both gates from `Config`, once, at startup.
use std::sync::Arc;

use crate::config::{AdminAuthMode, Config, ConfigError, UserAuthMode};
use crate::middleware::auth::{AdminGate, UserGate};
use crate::services::accounts::AccountLookup;
use crate::services::auth::{AdminCredentials, Clock, TokenCodec};
use crate::state::{AppState, TokenTtl};

pub fn build_state(
    config: &Config,
    clock: Arc<dyn Clock>,
    accounts: Arc<dyn AccountLookup>,
) -> Result<AppState, ConfigError> {
    if config.jwt_secret.is_empty() {
        return Err(ConfigError::Missing("JWT_SECRET"));
    }
    if config.max_header_bytes == 0 {
        return Err(ConfigError::Invalid("AUTH_MAX_HEADER_BYTES"));
    }
    let codec = Arc::new(TokenCodec::new(config.jwt_secret.as_bytes(), clock));

    let admin_credentials = match (&config.admin_user, &config.admin_pass) {
        (Some(user), Some(pass)) => Some(AdminCredentials::new(user.as_str(), pass.as_str())),
        _ => None,
    };

    let admin_gate = match config.admin_auth_mode {
        AdminAuthMode::Bearer => AdminGate::bearer(codec.clone(), config.max_header_bytes),
        AdminAuthMode::Basic => {
            let credentials = admin_credentials
                .clone()
                .ok_or(ConfigError::Missing("ADMIN_USER"))?;
            AdminGate::basic(credentials, config.max_header_bytes)
        }
    };

    let user_gate = match config.user_auth_mode {
        UserAuthMode::Telegram => UserGate::telegram(accounts.clone(), config.max_header_bytes),
        UserAuthMode::Bearer => {
            UserGate::bearer(codec.clone(), accounts.clone(), config.max_header_bytes)
        }
    };

    tracing::info!(
        admin_mode = ?config.admin_auth_mode,
        user_mode = ?config.user_auth_mode,
        max_header_bytes = config.max_header_bytes,
        "authentication gates configured"
    );

    Ok(AppState {
        codec,
        admin_gate: Arc::new(admin_gate),
        user_gate: Arc::new(user_gate),
        accounts,
        admin_credentials,
        ttl: TokenTtl {
            admin_seconds: config.admin_token_ttl_seconds,
            user_seconds: config.user_token_ttl_seconds,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppEnv, DEFAULT_MAX_HEADER_BYTES};
    use crate::services::accounts::InMemoryAccounts;
    use crate::services::auth::ManualClock;
    use crate::services::auth::token_codec::{ADMIN_TOKEN_TTL_SECONDS, USER_TOKEN_TTL_SECONDS};

    fn config(admin: AdminAuthMode, user: UserAuthMode) -> Config {
        Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            database_url: "postgres://unused".to_string(),
            app_env: AppEnv::Development,
            cors_allowed_origins: Vec::new(),
            jwt_secret: "secret".to_string(),
            admin_auth_mode: admin,
            user_auth_mode: user,
            admin_user: Some("admin".to_string()),
            admin_pass: Some("pw".to_string()),
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            admin_token_ttl_seconds: ADMIN_TOKEN_TTL_SECONDS,
            user_token_ttl_seconds: USER_TOKEN_TTL_SECONDS,
        }
    }

    fn build(config: &Config) -> Result<AppState, ConfigError> {
        build_state(
            config,
            Arc::new(ManualClock::new(0)),
            Arc::new(InMemoryAccounts::new()),
        )
    }

    #[test]
    fn complete_config_builds() {
        let state = build(&config(AdminAuthMode::Basic, UserAuthMode::Telegram)).unwrap();
        assert!(state.admin_credentials.is_some());
        assert_eq!(state.ttl.admin_seconds, ADMIN_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn empty_secret_refuses_to_start() {
        let mut config = config(AdminAuthMode::Bearer, UserAuthMode::Bearer);
        config.jwt_secret = String::new();

        assert!(matches!(
            build(&config),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn basic_mode_without_credentials_refuses_to_start() {
        let mut config = config(AdminAuthMode::Basic, UserAuthMode::Bearer);
        config.admin_user = None;
        config.admin_pass = None;

        assert!(matches!(
            build(&config),
            Err(ConfigError::Missing("ADMIN_USER"))
        ));

        // Bearer mode runs fine without a pair; admin login is simply off.
        config.admin_auth_mode = AdminAuthMode::Bearer;
        let state = build(&config).unwrap();
        assert!(state.admin_credentials.is_none());
    }

    #[test]
    fn zero_header_cap_refuses_to_start() {
        let mut config = config(AdminAuthMode::Bearer, UserAuthMode::Telegram);
        config.max_header_bytes = 0;

        assert!(matches!(
            build(&config),
            Err(ConfigError::Invalid("AUTH_MAX_HEADER_BYTES"))
        ));
    }
}
