use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202602100001_create_users::Migration),
            Box::new(migrations::m202602100002_create_teacher_requests::Migration),
            Box::new(migrations::m202602100003_create_teachers::Migration),
            Box::new(migrations::m202602100004_create_classes::Migration),
            Box::new(migrations::m202602100005_create_enrollments::Migration),
            Box::new(migrations::m202602100006_create_payments::Migration),
            Box::new(migrations::m202602100007_create_wishlist_items::Migration),
            Box::new(migrations::m202602100008_create_assignments::Migration),
            Box::new(migrations::m202602100009_create_submissions::Migration),
            Box::new(migrations::m202602100010_create_feedbacks::Migration),
        ]
    }
}
