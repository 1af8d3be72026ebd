use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use serde::{Deserialize, Serialize};

/// A course offered by a teacher.
///
/// `seats` and `enrolled` form the seat ledger: enrollment decrements one and
/// increments the other in the same unit of work, so their sum never grows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_email: String,
    pub name: String,
    pub image: Option<String>,
    pub price: f64,
    pub seats: i64,
    pub enrolled: i64,
    pub description: Option<String>,
    pub category: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    sea_orm::strum::Display,
    sea_orm::strum::EnumString,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef implemented")
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Atomically claims one seat: `seats - 1`, `enrolled + 1`, guarded by
    /// `seats > 0` in the same UPDATE. Returns `false` when no seat was left.
    ///
    /// This conditional update is the overbooking guard: two concurrent
    /// enrollments against a single remaining seat can never both succeed.
    pub async fn claim_seat<C: ConnectionTrait>(conn: &C, class_id: i64) -> Result<bool, DbErr> {
        let res = Entity::update_many()
            .col_expr(Column::Seats, Expr::col(Column::Seats).sub(1))
            .col_expr(Column::Enrolled, Expr::col(Column::Enrolled).add(1))
            .filter(Column::Id.eq(class_id))
            .filter(Column::Seats.gt(0))
            .exec(conn)
            .await?;

        Ok(res.rows_affected > 0)
    }
}
