//! The enrollment and seat ledger.
//!
//! Enrollment is the one multi-record write in the system where a read-then-
//! write race is unacceptable: the seat decrement, the enrolled increment,
//! the payment row and the enrollment row all commit together or not at all,
//! and the decrement itself is conditional on `seats > 0`.

use chrono::Utc;
use db::models::{
    class::{self, Entity as ClassEntity},
    enrollment::{self, Column as EnrollmentColumn, Entity as EnrollmentEntity},
    payment::{self, Column as PaymentColumn, Entity as PaymentEntity},
    wishlist_item::{self, Column as WishlistColumn, Entity as WishlistEntity},
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::error::{is_unique_violation, WorkflowError, WorkflowResult};

pub struct EnrollmentLedger {
    db: DatabaseConnection,
}

impl EnrollmentLedger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Enrolls a student into a class, recording the payment.
    ///
    /// Runs as a single transaction:
    /// 1. an existing payment for the pair conflicts ("already enrolled");
    /// 2. the class must exist;
    /// 3. `claim_seat` decrements/increments the ledger, guarded by
    ///    `seats > 0`; zero rows touched means "no available seats";
    /// 4. payment and enrollment rows are inserted, and any wishlist entry
    ///    for the pair is dropped (enrollment and wishlist are exclusive).
    pub async fn enroll(
        &self,
        class_id: i64,
        user_email: &str,
        price: f64,
    ) -> WorkflowResult<(payment::Model, enrollment::Model)> {
        if !price.is_finite() || price < 0.0 {
            return Err(WorkflowError::bad_request("price must be a non-negative number"));
        }
        let user_email = user_email.to_lowercase();

        let txn = self.db.begin().await?;

        if payment::Model::exists_for(&txn, class_id, &user_email).await? {
            return Err(WorkflowError::conflict("already enrolled"));
        }

        let target = ClassEntity::find_by_id(class_id)
            .one(&txn)
            .await?
            .ok_or_else(|| WorkflowError::not_found(format!("Class {class_id} not found")))?;

        if !class::Model::claim_seat(&txn, class_id).await? {
            return Err(WorkflowError::conflict("no available seats"));
        }

        let paid = payment::ActiveModel {
            id: NotSet,
            class_id: Set(class_id),
            user_email: Set(user_email.clone()),
            teacher_email: Set(target.teacher_email.clone()),
            price: Set(price),
            date: Set(Utc::now()),
        }
        .insert(&txn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                WorkflowError::conflict("already enrolled")
            } else {
                e.into()
            }
        })?;

        let seat = enrollment::ActiveModel {
            id: NotSet,
            class_id: Set(class_id),
            user_email: Set(user_email.clone()),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        WishlistEntity::delete_many()
            .filter(WishlistColumn::ClassId.eq(class_id))
            .filter(WishlistColumn::UserEmail.eq(user_email))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok((paid, seat))
    }

    pub async fn list_by_student(&self, email: &str) -> WorkflowResult<Vec<enrollment::Model>> {
        Ok(EnrollmentEntity::find()
            .filter(EnrollmentColumn::UserEmail.eq(email.to_lowercase()))
            .order_by_asc(EnrollmentColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn list_by_class(&self, class_id: i64) -> WorkflowResult<Vec<enrollment::Model>> {
        Ok(EnrollmentEntity::find()
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .order_by_asc(EnrollmentColumn::Id)
            .all(&self.db)
            .await?)
    }

    /// Payment listing. `scope` narrows to one student's records; `None` is
    /// the admin view over everything. Callers enforce that non-admins only
    /// ever pass their own email.
    pub async fn payments(&self, scope: Option<&str>) -> WorkflowResult<Vec<payment::Model>> {
        let mut query = PaymentEntity::find().order_by_asc(PaymentColumn::Id);
        if let Some(email) = scope {
            query = query.filter(PaymentColumn::UserEmail.eq(email.to_lowercase()));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Adds a class to a user's wishlist. The pair must not already be
    /// enrolled, paid, or wishlisted.
    pub async fn add_to_wishlist(
        &self,
        class_id: i64,
        user_email: &str,
    ) -> WorkflowResult<wishlist_item::Model> {
        let user_email = user_email.to_lowercase();

        ClassEntity::find_by_id(class_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| WorkflowError::not_found(format!("Class {class_id} not found")))?;

        if payment::Model::exists_for(&self.db, class_id, &user_email).await?
            || enrollment::Model::exists_for(&self.db, class_id, &user_email).await?
        {
            return Err(WorkflowError::conflict(
                "already enrolled in this class",
            ));
        }

        wishlist_item::ActiveModel {
            id: NotSet,
            class_id: Set(class_id),
            user_email: Set(user_email),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                WorkflowError::conflict("class is already in the wishlist")
            } else {
                e.into()
            }
        })
    }

    pub async fn wishlist_for(&self, email: &str) -> WorkflowResult<Vec<wishlist_item::Model>> {
        Ok(WishlistEntity::find()
            .filter(WishlistColumn::UserEmail.eq(email.to_lowercase()))
            .order_by_asc(WishlistColumn::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn remove_from_wishlist(
        &self,
        item_id: i64,
        caller_email: &str,
        is_admin: bool,
    ) -> WorkflowResult<()> {
        let found = WishlistEntity::find_by_id(item_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Wishlist item not found"))?;

        if !is_admin && !found.user_email.eq_ignore_ascii_case(caller_email) {
            return Err(WorkflowError::forbidden(
                "Only the owner may remove this wishlist item",
            ));
        }

        WishlistEntity::delete_by_id(item_id).exec(&self.db).await?;
        Ok(())
    }
}
