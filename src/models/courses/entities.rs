use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 计费方式
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub enum BillingType {
    #[default]
    OneTime,
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::OneTime => "ONE_TIME",
            BillingType::Monthly => "MONTHLY",
            BillingType::Quarterly => "QUARTERLY",
            BillingType::Yearly => "YEARLY",
        }
    }

    /// 解析表单或数据库中的取值，未知值回退为 ONE_TIME
    pub fn from_form_value(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "MONTHLY" => BillingType::Monthly,
            "QUARTERLY" => BillingType::Quarterly,
            "YEARLY" => BillingType::Yearly,
            _ => BillingType::OneTime,
        }
    }
}

impl std::fmt::Display for BillingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// 课程实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub currency: String,
    pub billing_type: BillingType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billing_type_from_form_value() {
        assert_eq!(BillingType::from_form_value("MONTHLY"), BillingType::Monthly);
        assert_eq!(BillingType::from_form_value("yearly"), BillingType::Yearly);
        assert_eq!(BillingType::from_form_value(""), BillingType::OneTime);
        assert_eq!(BillingType::from_form_value("WEEKLY"), BillingType::OneTime);
    }

    #[test]
    fn test_billing_type_serde() {
        assert_eq!(
            serde_json::to_string(&BillingType::OneTime).unwrap(),
            "\"ONE_TIME\""
        );
        assert_eq!(BillingType::Quarterly.to_string(), "QUARTERLY");
    }
}
