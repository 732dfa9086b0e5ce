//! 成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::errors::{EduSystemError, Result};
use crate::models::grades::{
    entities::{Grade, GradeDetail, GradeLetter},
    requests::{GradeReportFilter, UpsertGrade},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 录入成绩；(学生, 课程) 已存在时只更新分数，保留原录入日期
    pub async fn upsert_grade_impl(&self, req: UpsertGrade) -> Result<(Grade, bool)> {
        let now = chrono::Utc::now().timestamp();

        let existing = Grades::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::CourseId.eq(req.course_id))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询成绩失败: {e}")))?;

        if let Some(existing) = existing {
            let model = ActiveModel {
                id: Set(existing.id),
                score: Set(req.score),
                updated_at: Set(now),
                ..Default::default()
            };
            let updated = model
                .update(&self.db)
                .await
                .map_err(|e| EduSystemError::database_operation(format!("更新成绩失败: {e}")))?;

            return Ok((updated.into_grade(), false));
        }

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            score: Set(req.score),
            date: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建成绩失败: {e}")))?;

        Ok((created.into_grade(), true))
    }

    /// 按条件列出成绩（最新的在前），附带学生与课程名称
    pub async fn list_grade_details_impl(
        &self,
        filter: GradeReportFilter,
    ) -> Result<Vec<GradeDetail>> {
        let mut select = Grades::find();
        if let Some(student_id) = filter.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = filter.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        let grades = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询成绩列表失败: {e}")))?;

        if grades.is_empty() {
            return Ok(Vec::new());
        }

        let mut student_ids: Vec<i64> = grades.iter().map(|g| g.student_id).collect();
        student_ids.sort_unstable();
        student_ids.dedup();
        let mut course_ids: Vec<i64> = grades.iter().map(|g| g.course_id).collect();
        course_ids.sort_unstable();
        course_ids.dedup();

        let student_names: HashMap<i64, String> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, format!("{} {}", s.first_name, s.last_name)))
            .collect();

        let course_names: HashMap<i64, String> = Courses::find()
            .filter(CourseColumn::Id.is_in(course_ids))
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(grades
            .into_iter()
            .map(|m| {
                let student_name = student_names.get(&m.student_id).cloned().unwrap_or_default();
                let course_name = course_names.get(&m.course_id).cloned().unwrap_or_default();
                let grade = m.into_grade();
                GradeDetail {
                    id: grade.id,
                    student_id: grade.student_id,
                    student_name,
                    course_id: grade.course_id,
                    course_name,
                    score: grade.score,
                    letter: GradeLetter::from_score(grade.score),
                    date: grade.date,
                }
            })
            .collect())
    }

    /// 某学生某课程的成绩历史（按时间升序）
    pub async fn list_grade_history_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<Grade>> {
        let grades = Grades::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询成绩历史失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }

    /// 统计某课程的成绩数量
    pub async fn count_grades_for_course_impl(&self, course_id: i64) -> Result<u64> {
        Grades::find()
            .filter(Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("统计成绩数量失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::courses::tests::new_course;
    use crate::storage::sea_orm_storage::students::tests::new_student;

    async fn setup() -> (SeaOrmStorage, i64, i64) {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let student = storage
            .create_student_impl(new_student("Ada", "Lovelace"))
            .await
            .unwrap();
        let course = storage
            .create_course_impl(new_course("Mathematics 101"))
            .await
            .unwrap();
        (storage, student.id, course.id)
    }

    #[tokio::test]
    async fn test_upsert_overwrites_in_place() {
        let (storage, student_id, course_id) = setup().await;

        let (first, created) = storage
            .upsert_grade_impl(UpsertGrade {
                student_id,
                course_id,
                score: 72.0,
            })
            .await
            .unwrap();
        assert!(created);

        let (second, created) = storage
            .upsert_grade_impl(UpsertGrade {
                student_id,
                course_id,
                score: 95.0,
            })
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(second.id, first.id);
        assert_eq!(second.score, 95.0);
        assert_eq!(second.date, first.date);

        assert_eq!(
            storage.count_grades_for_course_impl(course_id).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_grade_for_missing_student_fails() {
        let (storage, _, course_id) = setup().await;
        assert!(
            storage
                .upsert_grade_impl(UpsertGrade {
                    student_id: 404,
                    course_id,
                    score: 50.0,
                })
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_list_details_with_filter() {
        let (storage, student_id, course_id) = setup().await;
        let other = storage
            .create_course_impl(new_course("English Literature"))
            .await
            .unwrap();

        for (course, score) in [(course_id, 88.0), (other.id, 59.5)] {
            storage
                .upsert_grade_impl(UpsertGrade {
                    student_id,
                    course_id: course,
                    score,
                })
                .await
                .unwrap();
        }

        let all = storage
            .list_grade_details_impl(GradeReportFilter::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|g| g.student_name == "Ada Lovelace"));

        let only = storage
            .list_grade_details_impl(GradeReportFilter {
                student_id: None,
                course_id: Some(other.id),
            })
            .await
            .unwrap();
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].course_name, "English Literature");
        assert_eq!(only[0].letter, GradeLetter::F);

        let history = storage
            .list_grade_history_impl(student_id, course_id)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].score, 88.0);
    }
}
