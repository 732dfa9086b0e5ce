//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 每个变体生成 code() / error_type() / message() 分支以及 snake_case 构造函数。
macro_rules! define_edusystem_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum EduSystemError {
            $($variant(String),)*
        }

        impl EduSystemError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduSystemError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduSystemError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduSystemError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl EduSystemError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduSystemError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edusystem_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Serialization("E007", "Serialization Error"),
    DateParse("E008", "Date Parse Error"),
    Authentication("E009", "Authentication Error"),
    Authorization("E010", "Authorization Error"),
    Crypto("E011", "Cryptography Error"),
}

impl EduSystemError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为用户输入导致的错误（校验失败或资源不存在）
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EduSystemError::Validation(_) | EduSystemError::NotFound(_) | EduSystemError::DateParse(_)
        )
    }
}

impl fmt::Display for EduSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduSystemError {}

impl From<sea_orm::DbErr> for EduSystemError {
    fn from(err: sea_orm::DbErr) -> Self {
        EduSystemError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for EduSystemError {
    fn from(err: std::io::Error) -> Self {
        EduSystemError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for EduSystemError {
    fn from(err: serde_json::Error) -> Self {
        EduSystemError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for EduSystemError {
    fn from(err: chrono::ParseError) -> Self {
        EduSystemError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduSystemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduSystemError::database_config("test").code(), "E001");
        assert_eq!(EduSystemError::validation("test").code(), "E005");
        assert_eq!(EduSystemError::authentication("test").code(), "E009");
        assert_eq!(EduSystemError::crypto("test").code(), "E011");
    }

    #[test]
    fn test_error_message_and_type() {
        let err = EduSystemError::validation("All fields are required");
        assert_eq!(err.message(), "All fields are required");
        assert_eq!(err.error_type(), "Validation Error");
        assert_eq!(
            err.format_simple(),
            "Validation Error: All fields are required"
        );
    }

    #[test]
    fn test_user_facing_errors() {
        assert!(EduSystemError::validation("bad").is_user_facing());
        assert!(EduSystemError::not_found("missing").is_user_facing());
        assert!(!EduSystemError::database_operation("down").is_user_facing());
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let parse_err = chrono::NaiveDate::parse_from_str("not-a-date", "%Y-%m-%d").unwrap_err();
        let err: EduSystemError = parse_err.into();
        assert_eq!(err.code(), "E008");
    }
}
