use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A student's seat in a class. Unique per (class, student).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn exists_for<C: ConnectionTrait>(
        conn: &C,
        class_id: i64,
        user_email: &str,
    ) -> Result<bool, DbErr> {
        Ok(Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserEmail.eq(user_email.to_lowercase()))
            .one(conn)
            .await?
            .is_some())
    }
}
