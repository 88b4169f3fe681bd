use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 班级查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct ClassQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建班级请求
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    pub subject: Option<String>,
    #[serde(default)]
    pub tuition: i64,
    pub description: Option<String>,
}

// 更新班级请求
#[derive(Debug, Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub subject: Option<String>,
    pub tuition: Option<i64>,
    pub description: Option<String>,
}

// 班级列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct ClassListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    /// 为 Some 时只返回这些班级（教师的可见范围）
    pub class_ids: Option<Vec<i64>>,
}
