//! Session login endpoint.

use actix_web::{error, post, web, Error, HttpResponse};
use sea_orm::{entity::*, query::*, ColumnTrait, QueryFilter};
use serde::Deserialize;

use crate::db::get_db_pool;
use crate::orm::users;
use crate::session;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(post_login);
}

#[derive(Deserialize)]
struct LoginForm {
    csrf_token: String,
    username: String,
    password: String,
}

#[post("/login")]
async fn post_login(
    sess: actix_session::Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, Error> {
    crate::middleware::csrf::validate_csrf_token(&sess, &form.csrf_token)?;

    let db = get_db_pool();
    let user = users::Entity::find()
        .filter(users::Column::Username.eq(form.username.as_str()))
        .one(db)
        .await
        .map_err(error::ErrorInternalServerError)?;

    // Same response for unknown name and bad password.
    let user = match user {
        Some(user) if session::verify_password(&user.password, &form.password) => user,
        _ => return Err(error::ErrorUnauthorized("Invalid username or password")),
    };

    session::login_session(&sess, user.id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "id": user.id,
        "username": user.username,
    })))
}
