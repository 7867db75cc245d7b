//! Reaction toggle endpoints for posts and comments.

use actix_web::{error, get, post, web, Error, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::blog::reactions::{self, ReactionOutcome};
use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::orm::ReactionKind;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(toggle_post_reaction)
        .service(toggle_comment_reaction)
        .service(get_post_reactions)
        .service(get_comment_reactions);
}

#[derive(Deserialize)]
struct CsrfForm {
    csrf_token: String,
}

#[derive(Serialize)]
struct ToggleResponse {
    applied: Option<&'static str>,
    reactions: Vec<reactions::ReactionCount>,
}

fn parse_kind(raw: &str) -> Result<ReactionKind, Error> {
    ReactionKind::from_str(raw).ok_or_else(|| error::ErrorBadRequest("Unknown reaction"))
}

#[post("/blog/posts/{post_id}/reactions/{kind}")]
async fn toggle_post_reaction(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<(i32, String)>,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;
    let (post_id, raw_kind) = path.into_inner();
    let kind = parse_kind(&raw_kind)?;

    let db = get_db_pool();
    let outcome = reactions::toggle_post_reaction(db, post_id, &actor, kind)
        .await
        .map_err(super::translate_error)?;
    let summary = reactions::post_reaction_summary(db, post_id, Some(actor.id))
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(ToggleResponse {
        applied: match outcome {
            ReactionOutcome::Applied(kind) => Some(kind.as_str()),
            ReactionOutcome::Removed => None,
        },
        reactions: summary,
    }))
}

#[post("/blog/comments/{comment_id}/reactions/{kind}")]
async fn toggle_comment_reaction(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<(i32, String)>,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;
    let (comment_id, raw_kind) = path.into_inner();
    let kind = parse_kind(&raw_kind)?;

    let db = get_db_pool();
    let outcome = reactions::toggle_comment_reaction(db, comment_id, &actor, kind)
        .await
        .map_err(super::translate_error)?;
    let summary = reactions::comment_reaction_summary(db, comment_id, Some(actor.id))
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(ToggleResponse {
        applied: match outcome {
            ReactionOutcome::Applied(kind) => Some(kind.as_str()),
            ReactionOutcome::Removed => None,
        },
        reactions: summary,
    }))
}

#[get("/blog/posts/{post_id}/reactions")]
async fn get_post_reactions(client: ClientCtx, path: web::Path<i32>) -> Result<HttpResponse, Error> {
    let db = get_db_pool();
    let summary = reactions::post_reaction_summary(db, path.into_inner(), client.get_id())
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(summary))
}

#[get("/blog/comments/{comment_id}/reactions")]
async fn get_comment_reactions(
    client: ClientCtx,
    path: web::Path<i32>,
) -> Result<HttpResponse, Error> {
    let db = get_db_pool();
    let summary = reactions::comment_reaction_summary(db, path.into_inner(), client.get_id())
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(summary))
}
