//! Comment report endpoint.

use actix_web::{error, post, web, Error, HttpResponse};
use serde::Deserialize;

use crate::blog::reports::{self, ReportOutcome};
use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::notifications;
use crate::orm::ReportReason;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(report_comment);
}

#[derive(Deserialize)]
struct ReportForm {
    csrf_token: String,
    reason: String,
    notes: Option<String>,
}

/// File a report against a comment. Filing twice is a no-op and still
/// returns success, so the reporter learns nothing about prior reports.
#[post("/blog/comments/{comment_id}/report")]
async fn report_comment(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<i32>,
    form: web::Form<ReportForm>,
) -> Result<HttpResponse, Error> {
    let reporter = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;

    let reason = ReportReason::from_str(&form.reason)
        .ok_or_else(|| error::ErrorBadRequest("Unknown report reason"))?;

    let db = get_db_pool();
    let (outcome, intents) = reports::file_report(
        db,
        path.into_inner(),
        &reporter,
        reason,
        form.notes.as_deref().unwrap_or(""),
    )
    .await
    .map_err(super::translate_error)?;

    notifications::dispatch(db, intents).await;

    let created = matches!(outcome, ReportOutcome::Created(_));
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "reported": true,
        "created": created,
    })))
}
