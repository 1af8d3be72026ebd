pub mod assignment;
pub mod class;
pub mod enrollment;
pub mod feedback;
pub mod payment;
pub mod submission;
pub mod teacher;
pub mod teacher_request;
pub mod user;
pub mod wishlist_item;
