//! 数据模型定义
//!
//! 每个业务模块分为 `entities`（业务实体）、`requests`（请求体/查询参数）和 `responses`（响应体）。

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod payments;
pub mod statistics;
pub mod students;
pub mod users;

pub use common::{ApiResponse, PaginationInfo, PaginationQuery};

/// 业务错误码
///
/// 0 表示成功；1xxx 通用错误；2xxx 认证；3xxx 用户；4xxx 班级；5xxx 学生；6xxx 考勤；7xxx 学费。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,
    RateLimitExceeded = 1005,

    AuthFailed = 2000,
    AuthEmailNotFound = 2001,
    AuthWrongPassword = 2002,

    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserEmailInvalid = 3002,
    UserNameInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserCreationFailed = 3005,
    UserUpdateFailed = 3006,
    UserDeleteFailed = 3007,
    CanNotDeleteCurrentUser = 3008,

    ClassNotFound = 4000,
    ClassAlreadyExists = 4001,
    ClassInvalid = 4002,
    ClassCreationFailed = 4003,
    ClassUpdateFailed = 4004,
    ClassDeleteFailed = 4005,
    ClassPermissionDenied = 4006,

    StudentNotFound = 5000,
    StudentInvalid = 5001,
    StudentCreationFailed = 5002,
    StudentUpdateFailed = 5003,
    StudentDeleteFailed = 5004,

    AttendanceInvalid = 6000,
    AttendanceNotFound = 6001,
    AttendanceSaveFailed = 6002,

    PaymentInvalid = 7000,
    PaymentNotFound = 7001,
    PaymentSaveFailed = 7002,
}
