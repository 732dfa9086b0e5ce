use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{EduSystemError, Result};
use crate::models::courses::{entities::Course, requests::NewCourse};
use crate::utils::dates::day_start_timestamp;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: NewCourse) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            start_date: Set(day_start_timestamp(req.start_date)),
            end_date: Set(req.end_date.map(day_start_timestamp)),
            price: Set(req.price),
            currency: Set(req.currency),
            billing_type: Set(req.billing_type.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 列出课程（按名称升序）
    pub async fn list_courses_impl(&self) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 统计课程数量
    pub async fn count_courses_impl(&self) -> Result<u64> {
        Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| EduSystemError::database_operation(format!("统计课程数量失败: {e}")))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::courses::entities::BillingType;
    use chrono::NaiveDate;

    pub(crate) fn new_course(name: &str) -> NewCourse {
        NewCourse {
            name: name.to_string(),
            description: Some(format!("{name} description")),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 15),
            price: Some(299.0),
            currency: "USD".to_string(),
            billing_type: BillingType::OneTime,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_courses() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        for name in ["Mathematics 101", "English Literature"] {
            storage.create_course_impl(new_course(name)).await.unwrap();
        }

        let courses = storage.list_courses_impl().await.unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].name, "English Literature");
        assert_eq!(courses[0].start_date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(courses[0].end_date, NaiveDate::from_ymd_opt(2025, 12, 15));
        assert_eq!(courses[0].billing_type, BillingType::OneTime);

        let found = storage
            .get_course_by_id_impl(courses[1].id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "Mathematics 101");
        assert_eq!(storage.count_courses_impl().await.unwrap(), 2);
    }
}
