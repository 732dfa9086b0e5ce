use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::BillingType;
use crate::errors::{EduSystemError, Result};
use crate::utils::dates::parse_date;
use crate::utils::form::non_empty;
use crate::utils::validate::validate_currency;

const DEFAULT_CURRENCY: &str = "USD";

// 新建课程表单
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub billing_type: Option<String>,
}

// 校验后的课程数据
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub currency: String,
    pub billing_type: BillingType,
}

impl CreateCourseForm {
    pub fn validate(self) -> Result<NewCourse> {
        let (Some(name), Some(start_date)) = (non_empty(self.name), non_empty(self.start_date))
        else {
            return Err(EduSystemError::validation(
                "Course name and start date are required",
            ));
        };

        let start_date = parse_date(&start_date)?;
        let end_date = non_empty(self.end_date)
            .map(|v| parse_date(&v))
            .transpose()?;
        if end_date.is_some_and(|end| end < start_date) {
            return Err(EduSystemError::validation(
                "End date must not be before the start date",
            ));
        }

        let price = match non_empty(self.price) {
            Some(raw) => match raw.parse::<f64>() {
                Ok(p) if p.is_finite() && p >= 0.0 => Some(p),
                _ => {
                    return Err(EduSystemError::validation(
                        "Price must be a non-negative number",
                    ));
                }
            },
            None => None,
        };

        let currency = non_empty(self.currency)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        validate_currency(&currency).map_err(EduSystemError::validation)?;

        Ok(NewCourse {
            name,
            description: non_empty(self.description),
            start_date,
            end_date,
            price,
            currency,
            billing_type: non_empty(self.billing_type)
                .map(|b| BillingType::from_form_value(&b))
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let course = CreateCourseForm {
            name: Some("Physics".into()),
            start_date: Some("2025-09-01".into()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(course.currency, "USD");
        assert_eq!(course.billing_type, BillingType::OneTime);
        assert_eq!(course.price, None);
        assert_eq!(course.end_date, None);
    }

    #[test]
    fn test_required_fields() {
        let err = CreateCourseForm {
            name: Some("Physics".into()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.message(), "Course name and start date are required");
    }

    #[test]
    fn test_price_and_dates() {
        let base = || CreateCourseForm {
            name: Some("Physics".into()),
            start_date: Some("2025-09-01".into()),
            ..Default::default()
        };

        let mut f = base();
        f.price = Some("-5".into());
        assert!(f.validate().is_err());

        let mut f = base();
        f.price = Some("199.99".into());
        f.currency = Some("eur".into());
        f.billing_type = Some("MONTHLY".into());
        let course = f.validate().unwrap();
        assert_eq!(course.price, Some(199.99));
        assert_eq!(course.currency, "EUR");
        assert_eq!(course.billing_type, BillingType::Monthly);

        let mut f = base();
        f.end_date = Some("2025-08-01".into());
        assert!(f.validate().is_err());
    }
}
