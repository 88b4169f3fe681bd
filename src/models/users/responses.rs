use super::entities::User;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 用户详情（含教师的班级分配）
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
    pub class_ids: Vec<i64>,
}

// 用户列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub items: Vec<User>,
    pub pagination: PaginationInfo,
}
