//! The authenticated actor as the rest of the application sees it.

use sea_orm::{entity::*, query::*, ColumnTrait, DatabaseConnection, QueryFilter};

use crate::orm::users;

/// Identity snapshot for one request. The moderation core only ever consults
/// the role flags and the email address; it never authenticates.
#[derive(Clone, Debug, PartialEq)]
pub struct Profile {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Profile {
    /// Staff and superusers bypass the moderation queue.
    pub fn is_elevated(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    pub async fn get_by_id(
        db: &DatabaseConnection,
        id: i32,
    ) -> Result<Option<Self>, sea_orm::DbErr> {
        Ok(users::Entity::find_by_id(id).one(db).await?.map(Self::from))
    }

    pub async fn get_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<Self>, sea_orm::DbErr> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await?
            .map(Self::from))
    }
}

impl From<users::Model> for Profile {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
        }
    }
}
