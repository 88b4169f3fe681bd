use crate::models::users::entities::{Permission, User};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
    pub permissions: Vec<Permission>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
    pub permissions: Vec<Permission>,
    /// 教师可访问的班级；其他角色为空
    pub class_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct TokenVerificationResponse {
    pub is_valid: bool,
}

// 导航项
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub permission: Permission,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    /// 侧边栏完整导航
    pub items: Vec<NavItem>,
    /// 移动端底部导航
    pub compact: Vec<NavItem>,
}
