/// 业务错误码
///
/// 通用错误使用 1xxx，各业务模块按千位划分。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,

    // 学生
    StudentNotFound = 3000,
    StudentInvalid = 3001,
    StudentAlreadyExists = 3002,
    StudentCreationFailed = 3003,

    // 课程
    CourseNotFound = 4000,
    CourseInvalid = 4001,
    CourseCreationFailed = 4002,

    // 成绩
    GradeInvalid = 5000,
    GradeSaveFailed = 5001,
    GradeReportFailed = 5002,

    // 考勤
    AttendanceInvalid = 6000,
    AttendanceMarkFailed = 6001,
    AttendanceReportFailed = 6002,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_codes() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::NotFound as i32, 1004);
        assert_eq!(ErrorCode::AttendanceMarkFailed as i32, 6001);
    }
}
