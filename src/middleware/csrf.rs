//! CSRF (Cross-Site Request Forgery) protection
//!
//! A token is generated once per session and must be sent back in a
//! `csrf_token` form field on every state-changing request. Handlers call
//! [`validate_csrf_token`] before processing the form.

use actix_web::{error, Error};
use rand::{distributions::Alphanumeric, Rng};

pub const CSRF_TOKEN_LENGTH: usize = 32;
const CSRF_SESSION_KEY: &str = "csrf_token";

/// Generate a new CSRF token
pub fn generate_csrf_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CSRF_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Get or create the CSRF token for the current session.
///
/// Called automatically when ClientCtx is created from the session, so every
/// request has a token available.
pub fn get_or_create_csrf_token(session: &actix_session::Session) -> Result<String, Error> {
    match session.get::<String>(CSRF_SESSION_KEY) {
        Ok(Some(token)) => Ok(token),
        _ => {
            let token = generate_csrf_token();
            session
                .insert(CSRF_SESSION_KEY, token.clone())
                .map_err(|_| error::ErrorInternalServerError("Failed to store CSRF token"))?;
            Ok(token)
        }
    }
}

/// Validate the CSRF token sent with form data.
pub fn validate_csrf_token(
    session: &actix_session::Session,
    provided_token: &str,
) -> Result<(), Error> {
    let expected_token = session
        .get::<String>(CSRF_SESSION_KEY)
        .map_err(|_| error::ErrorInternalServerError("Failed to get CSRF token"))?
        .ok_or_else(|| error::ErrorForbidden("CSRF token not found in session"))?;

    if provided_token != expected_token {
        log::warn!("CSRF token validation failed");
        return Err(error::ErrorForbidden("Invalid CSRF token"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_and_charset() {
        let token = generate_csrf_token();
        assert_eq!(token.len(), CSRF_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_csrf_token(), generate_csrf_token());
    }
}
