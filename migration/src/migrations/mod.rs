pub mod m202602100001_create_users;
pub mod m202602100002_create_teacher_requests;
pub mod m202602100003_create_teachers;
pub mod m202602100004_create_classes;
pub mod m202602100005_create_enrollments;
pub mod m202602100006_create_payments;
pub mod m202602100007_create_wishlist_items;
pub mod m202602100008_create_assignments;
pub mod m202602100009_create_submissions;
pub mod m202602100010_create_feedbacks;
