//! Comment submission and removal endpoints.

use actix_web::{post, web, Error, HttpResponse};
use serde::Deserialize;

use crate::blog::comments;
use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::notifications;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(create_comment).service(delete_comment);
}

#[derive(Deserialize)]
struct CommentForm {
    csrf_token: String,
    body: String,
}

#[post("/blog/posts/{post_id}/comments")]
async fn create_comment(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<i32>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;

    let db = get_db_pool();
    let (comment, intents) = comments::create_comment(db, path.into_inner(), &actor, &form.body)
        .await
        .map_err(super::translate_error)?;

    notifications::dispatch(db, intents).await;
    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": comment.id,
        "status": comment.status.label(),
        "body": comment.body,
    })))
}

#[derive(Deserialize)]
struct CsrfForm {
    csrf_token: String,
}

#[post("/blog/comments/{comment_id}/delete")]
async fn delete_comment(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<i32>,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;

    let db = get_db_pool();
    comments::delete_comment(db, path.into_inner(), &actor)
        .await
        .map_err(super::translate_error)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}
