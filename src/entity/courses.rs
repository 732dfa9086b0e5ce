//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub start_date: i64,
    pub end_date: Option<i64>,
    pub price: Option<f64>,
    pub currency: String,
    pub billing_type: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::grades::Entity")]
    Grades,
}

impl Related<super::grades::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grades.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        use crate::models::courses::entities::{BillingType, Course};
        use crate::utils::dates::date_from_timestamp;

        Course {
            id: self.id,
            name: self.name,
            description: self.description,
            start_date: date_from_timestamp(self.start_date),
            end_date: self.end_date.map(date_from_timestamp),
            price: self.price,
            currency: self.currency,
            billing_type: BillingType::from_form_value(&self.billing_type),
        }
    }
}
