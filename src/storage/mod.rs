use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    attendance::entities::{Attendance, AttendanceDetail},
    courses::{entities::Course, requests::NewCourse},
    grades::{
        entities::{Grade, GradeDetail},
        requests::{GradeReportFilter, UpsertGrade},
    },
    students::{entities::Student, requests::NewStudent},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 学生管理方法
    async fn create_student(&self, student: NewStudent) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    // 按名字升序列出学生，可选按姓名或邮箱搜索
    async fn list_students(&self, search: Option<String>) -> Result<Vec<Student>>;
    async fn count_students(&self) -> Result<u64>;

    /// 课程管理方法
    async fn create_course(&self, course: NewCourse) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    // 按课程名升序列出课程
    async fn list_courses(&self) -> Result<Vec<Course>>;
    async fn count_courses(&self) -> Result<u64>;

    /// 成绩方法
    // 录入或覆盖 (学生, 课程) 的成绩，返回成绩及是否为新建
    async fn upsert_grade(&self, grade: UpsertGrade) -> Result<(Grade, bool)>;
    // 按条件列出成绩（最新的在前）
    async fn list_grade_details(&self, filter: GradeReportFilter) -> Result<Vec<GradeDetail>>;
    // 某学生某课程的成绩（按时间升序）
    async fn list_grade_history(&self, student_id: i64, course_id: i64) -> Result<Vec<Grade>>;
    async fn count_grades_for_course(&self, course_id: i64) -> Result<u64>;

    /// 考勤方法
    // 录入或覆盖 (学生, 日期) 的考勤
    async fn upsert_attendance(
        &self,
        student_id: i64,
        date: NaiveDate,
        present: bool,
    ) -> Result<Attendance>;
    // 某一天的全部考勤记录
    async fn list_attendance_on(&self, date: NaiveDate) -> Result<Vec<Attendance>>;
    // 闭区间内的考勤记录（按日期升序）
    async fn list_attendance_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceDetail>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
