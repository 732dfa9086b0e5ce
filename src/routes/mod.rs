pub mod attendance;

pub mod auth;

pub mod courses;

pub mod grades;

pub mod students;

pub mod frontend;

#[cfg(test)]
pub(crate) mod test_support;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use frontend::configure_frontend_routes;
pub use grades::configure_grade_routes;
pub use students::configure_student_routes;
