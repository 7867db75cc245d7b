//! Session logout endpoint.

use actix_web::{post, web, Error, HttpResponse};
use serde::Deserialize;

use crate::session;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(post_logout);
}

#[derive(Deserialize)]
struct CsrfForm {
    csrf_token: String,
}

#[post("/logout")]
async fn post_logout(
    sess: actix_session::Session,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, Error> {
    crate::middleware::csrf::validate_csrf_token(&sess, &form.csrf_token)?;
    session::logout_session(&sess);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "logged_out": true })))
}
