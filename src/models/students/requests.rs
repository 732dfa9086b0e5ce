use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use crate::errors::{EduSystemError, Result};
use crate::utils::dates::parse_date;
use crate::utils::form::non_empty;
use crate::utils::validate::validate_email;

// 新建学生表单
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub grade: Option<String>,
    pub date_of_birth: Option<String>,
}

// 学生列表查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    /// 按姓名或邮箱模糊搜索
    pub search: Option<String>,
}

// 校验后的学生数据
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl CreateStudentForm {
    pub fn validate(self) -> Result<NewStudent> {
        let (Some(first_name), Some(last_name), Some(email)) = (
            non_empty(self.first_name),
            non_empty(self.last_name),
            non_empty(self.email),
        ) else {
            return Err(EduSystemError::validation(
                "First name, last name, and email are required",
            ));
        };

        validate_email(&email).map_err(EduSystemError::validation)?;

        let date_of_birth = non_empty(self.date_of_birth)
            .map(|v| parse_date(&v))
            .transpose()?;

        Ok(NewStudent {
            first_name,
            last_name,
            email: email.to_lowercase(),
            grade: non_empty(self.grade),
            date_of_birth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CreateStudentForm {
        CreateStudentForm {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("Ada@Example.com".into()),
            grade: Some("".into()),
            date_of_birth: Some("2010-12-10".into()),
        }
    }

    #[test]
    fn test_validate_ok() {
        let student = form().validate().unwrap();
        assert_eq!(student.email, "ada@example.com");
        assert_eq!(student.grade, None);
        assert_eq!(
            student.date_of_birth,
            NaiveDate::from_ymd_opt(2010, 12, 10)
        );
    }

    #[test]
    fn test_validate_missing_fields() {
        let mut f = form();
        f.last_name = Some("  ".into());
        let err = f.validate().unwrap_err();
        assert_eq!(err.message(), "First name, last name, and email are required");
    }

    #[test]
    fn test_validate_bad_email_and_date() {
        let mut f = form();
        f.email = Some("nope".into());
        assert!(f.validate().is_err());

        let mut f = form();
        f.date_of_birth = Some("10/12/2010".into());
        assert!(f.validate().is_err());
    }
}
