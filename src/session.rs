//! Cookie-session authentication and password hashing.
//!
//! The session stores only the user id; the profile is loaded fresh from the
//! database on each request so role changes take effect immediately.

use actix_session::Session;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::db::get_db_pool;
use crate::user::Profile;

const SESSION_USER_KEY: &str = "uid";

/// Hash a password for storage.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Verify a password against a stored hash.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::warn!("Stored password hash failed to parse: {}", e);
            false
        }
    }
}

/// Record a login in the session.
pub fn login_session(session: &Session, user_id: i32) -> Result<(), actix_web::Error> {
    session
        .insert(SESSION_USER_KEY, user_id)
        .map_err(actix_web::error::ErrorInternalServerError)
}

/// Drop the login from the session.
pub fn logout_session(session: &Session) {
    session.remove(SESSION_USER_KEY);
}

/// Resolve the session to a user profile, if any.
pub async fn authenticate_client_by_session(session: &Session) -> Option<Profile> {
    let user_id = match session.get::<i32>(SESSION_USER_KEY) {
        Ok(Some(id)) => id,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Unreadable session cookie: {}", e);
            return None;
        }
    };

    match Profile::get_by_id(get_db_pool(), user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            log::error!("Failed to load user {} for session: {}", user_id, e);
            None
        }
    }
}
