//! Blog post endpoints: listing, detail, authoring and moderation.

use actix_web::{error, get, post, web, Error, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::blog::{comments, posts, reactions};
use crate::db::get_db_pool;
use crate::middleware::ClientCtx;
use crate::moderation::visibility;
use crate::notifications;
use crate::orm::{blog_posts, ModerationStatus};

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(view_index)
        .service(create_post)
        .service(update_post)
        .service(set_post_status)
        .service(set_post_featured)
        .service(delete_post)
        .service(view_post);
}

#[derive(Serialize)]
struct PostSummary {
    id: i32,
    title: String,
    slug: String,
    url: String,
    excerpt: String,
    tags: String,
    status: &'static str,
    featured: bool,
    reading_time: i32,
    author_id: i32,
    published_at: Option<chrono::NaiveDateTime>,
}

impl From<blog_posts::Model> for PostSummary {
    fn from(post: blog_posts::Model) -> Self {
        let url = post.absolute_url();
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            url,
            excerpt: post.excerpt,
            tags: post.tags,
            status: post.status.label(),
            featured: post.featured,
            reading_time: post.reading_time,
            author_id: post.author_id,
            published_at: post.published_at,
        }
    }
}

#[derive(Deserialize)]
struct IndexQuery {
    status: Option<String>,
}

/// Front page listing. Readers see approved posts; staff may ask for any
/// single workflow status via `?status=`.
#[get("/blog")]
async fn view_index(client: ClientCtx, query: web::Query<IndexQuery>) -> Result<HttpResponse, Error> {
    let db = get_db_pool();

    let status = match &query.status {
        Some(raw) => {
            if !client.is_elevated() {
                return Err(error::ErrorForbidden("Only staff can browse the queue"));
            }
            Some(
                ModerationStatus::from_str(raw)
                    .ok_or_else(|| error::ErrorBadRequest("Unknown status"))?,
            )
        }
        None => Some(ModerationStatus::Approved),
    };

    let posts = posts::posts_with_status(db, status)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let summaries: Vec<PostSummary> = posts.into_iter().map(PostSummary::from).collect();
    Ok(HttpResponse::Ok().json(summaries))
}

#[derive(Serialize)]
struct CommentView {
    id: i32,
    author_id: i32,
    body: String,
    created_at: chrono::NaiveDateTime,
    reactions: Vec<reactions::ReactionCount>,
    can_react: bool,
    can_report: bool,
    can_delete: bool,
}

#[derive(Serialize)]
struct PostDetail {
    #[serde(flatten)]
    post: PostSummary,
    body: String,
    reactions: Vec<reactions::ReactionCount>,
    comments: Vec<CommentView>,
}

/// Canonical date-scoped post URL.
#[get("/blog/{year}/{month}/{day}/{slug}")]
async fn view_post(
    client: ClientCtx,
    path: web::Path<(i32, u32, u32, String)>,
) -> Result<HttpResponse, Error> {
    let (year, month, day, slug) = path.into_inner();
    let db = get_db_pool();

    let post = posts::find_by_date_and_slug(db, year, month, day, &slug)
        .await
        .map_err(super::translate_error)?
        .ok_or_else(|| error::ErrorNotFound("Not found"))?;

    if !visibility::post_is_visible(&post, client.get_user()) {
        return Err(error::ErrorNotFound("Not found"));
    }

    let viewer = client.get_user();
    let viewer_id = client.get_id();

    let post_reactions = reactions::post_reaction_summary(db, post.id, viewer_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let mut comment_views = Vec::new();
    for comment in comments::approved_comments(db, post.id)
        .await
        .map_err(error::ErrorInternalServerError)?
    {
        let comment_reactions = reactions::comment_reaction_summary(db, comment.id, viewer_id)
            .await
            .map_err(error::ErrorInternalServerError)?;
        let (can_react, can_report, can_delete) = match viewer {
            Some(user) => (
                visibility::can_react_to_comment(&comment, user),
                visibility::can_report_comment(&comment, user),
                user.id == comment.author_id || user.is_staff,
            ),
            None => (false, false, false),
        };
        comment_views.push(CommentView {
            id: comment.id,
            author_id: comment.author_id,
            body: comment.body,
            created_at: comment.created_at,
            reactions: comment_reactions,
            can_react,
            can_report,
            can_delete,
        });
    }

    let body = post.body.clone();
    Ok(HttpResponse::Ok().json(PostDetail {
        post: PostSummary::from(post),
        body,
        reactions: post_reactions,
        comments: comment_views,
    }))
}

#[derive(Deserialize)]
struct PostForm {
    csrf_token: String,
    title: String,
    excerpt: Option<String>,
    body: String,
    tags: Option<String>,
}

impl PostForm {
    fn content(&self) -> posts::PostContent {
        posts::PostContent {
            title: self.title.clone(),
            excerpt: self.excerpt.clone().unwrap_or_default(),
            body: self.body.clone(),
            tags: self.tags.clone().unwrap_or_default(),
        }
    }
}

#[post("/blog/posts")]
async fn create_post(
    client: ClientCtx,
    session: actix_session::Session,
    form: web::Form<PostForm>,
) -> Result<HttpResponse, Error> {
    let author = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;

    let db = get_db_pool();
    let status = visibility::default_status_for(&author);
    let (post, intents) = posts::create_post(db, &author, form.content(), status)
        .await
        .map_err(super::translate_error)?;

    notifications::dispatch(db, intents).await;
    Ok(HttpResponse::Created().json(PostSummary::from(post)))
}

#[post("/blog/posts/{post_id}/edit")]
async fn update_post(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<i32>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;

    let db = get_db_pool();
    let post = posts::update_post(db, path.into_inner(), &actor, form.content())
        .await
        .map_err(super::translate_error)?;

    Ok(HttpResponse::Ok().json(PostSummary::from(post)))
}

#[derive(Deserialize)]
struct StatusForm {
    csrf_token: String,
    status: String,
}

#[post("/blog/posts/{post_id}/status")]
async fn set_post_status(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<i32>,
    form: web::Form<StatusForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_elevated()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;

    let status = ModerationStatus::from_str(&form.status)
        .ok_or_else(|| error::ErrorBadRequest("Unknown status"))?;

    let db = get_db_pool();
    let (post, intents) = posts::set_post_status(db, path.into_inner(), &actor, status)
        .await
        .map_err(super::translate_error)?;

    notifications::dispatch(db, intents).await;
    Ok(HttpResponse::Ok().json(PostSummary::from(post)))
}

#[derive(Deserialize)]
struct FeatureForm {
    csrf_token: String,
    featured: bool,
}

#[post("/blog/posts/{post_id}/feature")]
async fn set_post_featured(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<i32>,
    form: web::Form<FeatureForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_elevated()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;

    let db = get_db_pool();
    let (post, intents) = posts::set_featured(db, path.into_inner(), &actor, form.featured)
        .await
        .map_err(super::translate_error)?;

    notifications::dispatch(db, intents).await;
    Ok(HttpResponse::Ok().json(PostSummary::from(post)))
}

#[derive(Deserialize)]
struct CsrfForm {
    csrf_token: String,
}

#[post("/blog/posts/{post_id}/delete")]
async fn delete_post(
    client: ClientCtx,
    session: actix_session::Session,
    path: web::Path<i32>,
    form: web::Form<CsrfForm>,
) -> Result<HttpResponse, Error> {
    let actor = client.require_login()?.clone();
    crate::middleware::csrf::validate_csrf_token(&session, &form.csrf_token)?;

    let db = get_db_pool();
    posts::delete_post(db, path.into_inner(), &actor)
        .await
        .map_err(super::translate_error)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": true })))
}
