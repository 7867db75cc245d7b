//! Registration and account removal endpoints.

use actix_web::{post, web, Error, HttpResponse};
use serde::Deserialize;
use validator::Validate;

use crate::blog::accounts::{self, NewAccount};
use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::notifications;
use crate::session;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(register).service(delete_account);
}

#[derive(Deserialize, Validate)]
struct RegisterForm {
    csrf_token: String,
    #[validate(length(min = 3, max = 32))]
    username: String,
    #[validate(email)]
    email: Option<String>,
    password: String,
}

#[post("/register")]
async fn register(
    sess: actix_session::Session,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, Error> {
    crate::middleware::csrf::validate_csrf_token(&sess, &form.csrf_token)?;
    form.validate()
        .map_err(actix_web::error::ErrorUnprocessableEntity)?;

    let db = get_db_pool();
    let (user, intents) = accounts::register_user(
        db,
        NewAccount {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
        },
    )
    .await
    .map_err(super::translate_error)?;

    notifications::dispatch(db, intents).await;

    // Log the new account straight in.
    session::login_session(&sess, user.id)?;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": user.id,
        "username": user.username,
    })))
}

#[derive(Deserialize)]
struct DeleteForm {
    csrf_token: String,
    user_id: i32,
}

#[post("/account/delete")]
async fn delete_account(
    client: ClientCtx,
    sess: actix_session::Session,
    form: web::Form<DeleteForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&sess, &form.csrf_token)?;

    let db = get_db_pool();
    let intents = accounts::delete_user(db, form.user_id, &actor)
        .await
        .map_err(super::translate_error)?;

    notifications::dispatch(db, intents).await;

    if actor.id == form.user_id {
        session::logout_session(&sess);
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}
