//! 表单字段辅助函数
//!
//! HTML 表单会把未填写的字段提交为空字符串，这里统一视为缺失。

use crate::errors::{EduSystemError, Result};

/// 去除首尾空白，空字符串视为 None
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 解析可选的 ID 字段；非数字时返回校验错误
pub fn parse_optional_id(value: Option<String>, field: &str) -> Result<Option<i64>> {
    match non_empty(value) {
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| EduSystemError::validation(format!("Invalid {field}: '{v}'"))),
        None => Ok(None),
    }
}

/// 解析可选的数值字段；无法解析或不是有限数时返回 None
pub fn parse_number(value: Option<String>) -> Option<f64> {
    non_empty(value)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// 复选框：浏览器提交 "on"，也接受 "true"/"1"
pub fn checkbox(value: Option<String>) -> bool {
    matches!(
        non_empty(value).as_deref(),
        Some("on") | Some("true") | Some("1")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  x ".into())), Some("x".into()));
        assert_eq!(non_empty(Some("   ".into())), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_parse_optional_id() {
        assert_eq!(parse_optional_id(Some("12".into()), "studentId").unwrap(), Some(12));
        assert_eq!(parse_optional_id(Some("".into()), "studentId").unwrap(), None);
        assert!(parse_optional_id(Some("abc".into()), "studentId").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("89.5".into())), Some(89.5));
        assert_eq!(parse_number(Some("abc".into())), None);
        assert_eq!(parse_number(Some("NaN".into())), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_checkbox() {
        assert!(checkbox(Some("on".into())));
        assert!(!checkbox(Some("".into())));
        assert!(!checkbox(None));
    }
}
