//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_tutor_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TutorError {
            $($variant(String),)*
        }

        impl TutorError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TutorError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TutorError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TutorError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TutorError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TutorError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_tutor_errors! {
    CachePluginNotFound("E001", "Cache Plugin Not Found"),
    DatabaseConfig("E002", "Database Configuration Error"),
    DatabaseConnection("E003", "Database Connection Error"),
    DatabaseOperation("E004", "Database Operation Error"),
    Validation("E005", "Validation Error"),
    DateParse("E006", "Date Parse Error"),
}

impl TutorError {
    /// 是否为唯一约束冲突（各数据库的报错文本不同）
    pub fn is_unique_violation(&self) -> bool {
        let msg = self.message();
        msg.contains("UNIQUE constraint failed")
            || msg.contains("duplicate key value")
            || msg.contains("Duplicate entry")
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TutorError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TutorError {
    fn from(err: sea_orm::DbErr) -> Self {
        TutorError::DatabaseOperation(err.to_string())
    }
}

impl From<chrono::ParseError> for TutorError {
    fn from(err: chrono::ParseError) -> Self {
        TutorError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TutorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TutorError::cache_plugin_not_found("test").code(), "E001");
        assert_eq!(TutorError::database_config("test").code(), "E002");
        assert_eq!(TutorError::validation("test").code(), "E005");
    }

    #[test]
    fn test_error_message() {
        let err = TutorError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
        assert_eq!(err.error_type(), "Validation Error");
    }

    #[test]
    fn test_format_simple() {
        let err = TutorError::validation("month must be YYYY-MM");
        assert_eq!(err.to_string(), "Validation Error: month must be YYYY-MM");
    }

    #[test]
    fn test_from_chrono_parse_error() {
        let parse_err = chrono::NaiveDate::parse_from_str("2026-13-40", "%Y-%m-%d").unwrap_err();
        let err: TutorError = parse_err.into();
        assert_eq!(err.code(), "E006");
    }

    #[test]
    fn test_unique_violation_detection() {
        let sqlite = TutorError::database_operation(
            "创建用户失败: UNIQUE constraint failed: app_users.email",
        );
        let postgres = TutorError::database_operation(
            "duplicate key value violates unique constraint \"app_users_email_key\"",
        );
        assert!(sqlite.is_unique_violation());
        assert!(postgres.is_unique_violation());
        assert!(!TutorError::database_operation("connection reset").is_unique_violation());
    }
}
