mod assignments_test;
mod classes_test;
mod feedbacks_test;
mod payments_test;
mod submissions_test;
mod users_test;
