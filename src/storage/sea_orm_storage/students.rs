use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{EduSystemError, Result};
use crate::models::students::{entities::Student, requests::NewStudent};
use crate::utils::dates::day_start_timestamp;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: NewStudent) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            email: Set(req.email),
            grade_label: Set(req.grade),
            date_of_birth: Set(req.date_of_birth.map(day_start_timestamp)),
            enrolled_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过邮箱获取学生
    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 列出学生（按名字升序），支持按姓名或邮箱搜索
    pub async fn list_students_impl(&self, search: Option<String>) -> Result<Vec<Student>> {
        let mut select = Students::find();

        if let Some(ref search) = search
            && !search.trim().is_empty()
        {
            // SQLite 的 LIKE 对 ASCII 不区分大小写
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.contains(search))
                    .add(Column::LastName.contains(search))
                    .add(Column::Email.contains(search.to_lowercase())),
            );
        }

        let students = select
            .order_by_asc(Column::FirstName)
            .order_by_asc(Column::LastName)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    /// 统计学生数量
    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("统计学生数量失败: {e}")))
    }
}
