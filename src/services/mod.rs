pub mod attendance;
pub mod auth;
pub mod courses;
pub mod grades;
pub mod students;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use grades::GradeService;
pub use students::StudentService;
