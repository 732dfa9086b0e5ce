use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩实体，每个 (学生, 课程) 只有一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub score: f64,
    /// 首次录入时间
    pub date: DateTime<Utc>,
}

// 等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub enum GradeLetter {
    A,
    B,
    C,
    D,
    F,
}

impl GradeLetter {
    /// 各等级下限均为闭区间：A ≥ 90，B ≥ 80，C ≥ 70，D ≥ 60，其余为 F
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            GradeLetter::A
        } else if score >= 80.0 {
            GradeLetter::B
        } else if score >= 70.0 {
            GradeLetter::C
        } else if score >= 60.0 {
            GradeLetter::D
        } else {
            GradeLetter::F
        }
    }
}

// 带学生与课程名称的成绩，用于表格和报表
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeDetail {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub course_id: i64,
    pub course_name: String,
    pub score: f64,
    pub letter: GradeLetter,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(GradeLetter::from_score(100.0), GradeLetter::A);
        assert_eq!(GradeLetter::from_score(90.0), GradeLetter::A);
        assert_eq!(GradeLetter::from_score(89.9), GradeLetter::B);
        assert_eq!(GradeLetter::from_score(80.0), GradeLetter::B);
        assert_eq!(GradeLetter::from_score(79.9), GradeLetter::C);
        assert_eq!(GradeLetter::from_score(70.0), GradeLetter::C);
        assert_eq!(GradeLetter::from_score(69.9), GradeLetter::D);
        assert_eq!(GradeLetter::from_score(60.0), GradeLetter::D);
        assert_eq!(GradeLetter::from_score(59.9), GradeLetter::F);
        assert_eq!(GradeLetter::from_score(0.0), GradeLetter::F);
    }
}
