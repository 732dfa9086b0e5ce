use serde::Deserialize;

use crate::errors::{EduSystemError, Result};
use crate::utils::form::{non_empty, parse_number, parse_optional_id};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

// 成绩页面的表单动作，由隐藏字段 `action` 区分
#[derive(Debug, Deserialize)]
#[serde(
    tag = "action",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum GradeActionForm {
    AddGrade {
        student_id: Option<String>,
        course_id: Option<String>,
        score: Option<String>,
    },
    GenerateReport {
        report_student_id: Option<String>,
        report_course_id: Option<String>,
    },
}

// 校验后的成绩录入
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertGrade {
    pub student_id: i64,
    pub course_id: i64,
    pub score: f64,
}

// 报表筛选条件，两个都为空时包含全部成绩
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeReportFilter {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
}

impl GradeReportFilter {
    pub fn from_form(student_id: Option<String>, course_id: Option<String>) -> Result<Self> {
        Ok(Self {
            student_id: parse_optional_id(student_id, "reportStudentId")?,
            course_id: parse_optional_id(course_id, "reportCourseId")?,
        })
    }

    /// 同时指定学生和课程时返回该组合，用于生成进度序列
    pub fn single_pair(&self) -> Option<(i64, i64)> {
        self.student_id.zip(self.course_id)
    }
}

impl UpsertGrade {
    pub fn from_form(
        student_id: Option<String>,
        course_id: Option<String>,
        score: Option<String>,
    ) -> Result<Self> {
        let required = || EduSystemError::validation("All fields are required");

        let student_id = non_empty(student_id).ok_or_else(required)?;
        let course_id = non_empty(course_id).ok_or_else(required)?;
        let score = parse_number(score).ok_or_else(required)?;

        let student_id = student_id
            .parse::<i64>()
            .map_err(|_| EduSystemError::validation("Invalid student"))?;
        let course_id = course_id
            .parse::<i64>()
            .map_err(|_| EduSystemError::validation("Invalid course"))?;

        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(EduSystemError::validation(
                "Score must be between 0 and 100",
            ));
        }

        Ok(Self {
            student_id,
            course_id,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_upsert_grade_ok() {
        let grade = UpsertGrade::from_form(s("1"), s("2"), s("87.5")).unwrap();
        assert_eq!(
            grade,
            UpsertGrade {
                student_id: 1,
                course_id: 2,
                score: 87.5
            }
        );
    }

    #[test]
    fn test_upsert_grade_missing_or_non_numeric() {
        for (student, course, score) in [
            (None, s("2"), s("80")),
            (s("1"), s(""), s("80")),
            (s("1"), s("2"), None),
            (s("1"), s("2"), s("eighty")),
        ] {
            let err = UpsertGrade::from_form(student, course, score).unwrap_err();
            assert_eq!(err.message(), "All fields are required");
        }
    }

    #[test]
    fn test_upsert_grade_out_of_range() {
        assert!(UpsertGrade::from_form(s("1"), s("2"), s("100.5")).is_err());
        assert!(UpsertGrade::from_form(s("1"), s("2"), s("-1")).is_err());
        assert!(UpsertGrade::from_form(s("1"), s("2"), s("0")).is_ok());
        assert!(UpsertGrade::from_form(s("1"), s("2"), s("100")).is_ok());
    }

    #[test]
    fn test_report_filter() {
        let filter = GradeReportFilter::from_form(s(""), s("3")).unwrap();
        assert_eq!(filter.student_id, None);
        assert_eq!(filter.course_id, Some(3));
        assert_eq!(filter.single_pair(), None);
        let filter = GradeReportFilter::from_form(s("4"), s("3")).unwrap();
        assert_eq!(filter.single_pair(), Some((4, 3)));
        assert!(GradeReportFilter::from_form(s("x"), None).is_err());
    }

    async fn parse_form(body: &'static str) -> GradeActionForm {
        use actix_web::{FromRequest, http::header, test::TestRequest, web};

        let (req, mut payload) = TestRequest::post()
            .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
            .set_payload(body)
            .to_http_parts();
        web::Form::<GradeActionForm>::from_request(&req, &mut payload)
            .await
            .unwrap()
            .into_inner()
    }

    #[actix_web::test]
    async fn test_action_form_from_urlencoded() {
        let form = parse_form("action=add-grade&studentId=4&courseId=5&score=91").await;
        match form {
            GradeActionForm::AddGrade {
                student_id,
                course_id,
                score,
            } => {
                assert_eq!(student_id.as_deref(), Some("4"));
                assert_eq!(course_id.as_deref(), Some("5"));
                assert_eq!(score.as_deref(), Some("91"));
            }
            other => panic!("unexpected form: {other:?}"),
        }

        let form = parse_form("action=generate-report&reportCourseId=2").await;
        assert!(matches!(
            form,
            GradeActionForm::GenerateReport {
                report_student_id: None,
                ..
            }
        ));
    }
}
