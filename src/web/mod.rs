pub mod account;
pub mod blog;
pub mod comments;
pub mod login;
pub mod logout;
pub mod reactions;
pub mod reports;

use actix_web::error;

use crate::blog::BlogError;

/// Configures the web app by adding services from each web file.
///
/// @see https://docs.rs/actix-web/4.0.1/actix_web/struct.App.html#method.configure
pub fn configure(conf: &mut actix_web::web::ServiceConfig) {
    // Descending order. Order is important.
    // Route resolution will stop at the first match.
    account::configure(conf);
    login::configure(conf);
    logout::configure(conf);
    comments::configure(conf);
    reactions::configure(conf);
    reports::configure(conf);
    blog::configure(conf);
}

/// Map an operation error onto the matching HTTP status.
pub(crate) fn translate_error(err: BlogError) -> actix_web::Error {
    match err {
        BlogError::NotFoundOrInvisible => error::ErrorNotFound("Not found"),
        BlogError::Forbidden(msg) => error::ErrorForbidden(msg),
        BlogError::InvalidChoice(msg) => error::ErrorBadRequest(msg),
        BlogError::ValidationFailed(msg) => error::ErrorUnprocessableEntity(msg),
        BlogError::Database(e) => {
            log::error!("database error: {}", e);
            error::ErrorInternalServerError("Internal server error")
        }
    }
}
