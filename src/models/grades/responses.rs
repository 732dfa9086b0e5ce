use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

use super::entities::{Grade, GradeDetail};
use crate::models::courses::entities::Course;
use crate::models::students::entities::Student;

// 课程平均分
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CourseAverage {
    pub course_id: i64,
    pub name: String,
    pub average_score: f64,
}

// 学生平均分
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct StudentAverage {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub average_score: f64,
}

// 等级分布（饼图）
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeDistribution {
    #[serde(rename = "A")]
    pub a: i64,
    #[serde(rename = "B")]
    pub b: i64,
    #[serde(rename = "C")]
    pub c: i64,
    #[serde(rename = "D")]
    pub d: i64,
    #[serde(rename = "F")]
    pub f: i64,
}

impl GradeDistribution {
    pub fn total(&self) -> i64 {
        self.a + self.b + self.c + self.d + self.f
    }
}

// 报表统计，空集合时 highest/lowest 为 null
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportStats {
    pub count: i64,
    pub average: f64,
    pub highest: Option<f64>,
    pub lowest: Option<f64>,
}

// 进度折线图上的一个点
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub score: f64,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeReport {
    /// 最新的在前
    pub grades: Vec<GradeDetail>,
    pub stats: ReportStats,
    /// 仅在同时指定学生和课程时存在
    pub progress_data: Option<Vec<ProgressPoint>>,
}

#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeOverviewResponse {
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub grades: Vec<GradeDetail>,
    pub course_averages: Vec<CourseAverage>,
    pub student_averages: Vec<StudentAverage>,
    pub grade_distribution: GradeDistribution,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeUpsertResponse {
    pub grade: Grade,
    /// false 表示覆盖了已有成绩
    pub created: bool,
}
