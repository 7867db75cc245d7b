//! SeaORM Entity for blog_posts table

use sea_orm::entity::prelude::*;

use super::ModerationStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Unique within a published-date bucket; enforced by schema index.
    pub slug: String,
    pub author_id: i32,
    pub excerpt: String,
    pub body: String,
    /// Comma-separated tags.
    pub tags: String,
    pub status: ModerationStatus,
    pub featured: bool,
    pub created_at: chrono::NaiveDateTime,
    pub published_at: Option<chrono::NaiveDateTime>,
    pub updated_at: chrono::NaiveDateTime,
    /// Estimated reading time in minutes, always >= 1.
    pub reading_time: i32,
    /// Legacy counter, superseded by post_reactions.
    pub likes: i32,
    /// Rating out of 5, reserved.
    pub rating: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::post_reactions::Entity")]
    Reactions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::post_reactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Canonical URL like /blog/YYYY/MM/DD/slug.
    pub fn absolute_url(&self) -> String {
        let date = self
            .published_at
            .unwrap_or_else(|| chrono::Utc::now().naive_utc())
            .date();
        format!(
            "/blog/{}/{:02}/{:02}/{}",
            date.format("%Y"),
            chrono::Datelike::month(&date),
            chrono::Datelike::day(&date),
            self.slug
        )
    }
}
