//! Backend session handling.
//!
//! Only the contract the core depends on is implemented here: obtain a
//! session token, keep it in the OS keyring, drop it on logout. The
//! authentication protocol itself belongs to the backend.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{BackendError, CoreError, Result};

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "quotevault";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

const TOKEN_KEY: &str = "session_token";
const USER_KEY: &str = "session_user";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user_id: String,
}

/// A logged-in session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

/// Current session from the keyring, if any.
pub fn current_session() -> Result<Option<Session>> {
    let token = keyring_store::get(TOKEN_KEY).map_err(|e| CoreError::Auth(e.to_string()))?;
    let user_id = keyring_store::get(USER_KEY).map_err(|e| CoreError::Auth(e.to_string()))?;
    match (token, user_id) {
        (Some(token), Some(user_id)) => Ok(Some(Session { token, user_id })),
        _ => Ok(None),
    }
}

/// Exchange credentials for a session token and store it.
pub fn login(base_url: &str, email: &str, password: &str) -> Result<Session> {
    if base_url.is_empty() {
        return Err(BackendError::NotConfigured.into());
    }
    let runtime =
        tokio::runtime::Runtime::new().map_err(|e| BackendError::Request(e.to_string()))?;
    let url = format!("{}/auth/token", base_url.trim_end_matches('/'));

    let resp: TokenResponse = runtime.block_on(async {
        let resp = Client::new()
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(BackendError::from)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            });
        }
        resp.json::<TokenResponse>().await.map_err(BackendError::from)
    })?;

    keyring_store::set(TOKEN_KEY, &resp.access_token)
        .map_err(|e| CoreError::Auth(e.to_string()))?;
    keyring_store::set(USER_KEY, &resp.user_id).map_err(|e| CoreError::Auth(e.to_string()))?;

    Ok(Session {
        token: resp.access_token,
        user_id: resp.user_id,
    })
}

/// Drop the stored session. Absent credentials are a no-op.
pub fn logout() -> Result<()> {
    keyring_store::delete(TOKEN_KEY).map_err(|e| CoreError::Auth(e.to_string()))?;
    keyring_store::delete(USER_KEY).map_err(|e| CoreError::Auth(e.to_string()))?;
    Ok(())
}
