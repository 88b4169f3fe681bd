use crate::models::common::{PaginationQuery, pagination::deserialize_optional_i64};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StudentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    /// 按任意选课班级过滤
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub note: Option<String>,
    pub primary_class_id: Option<i64>,
    #[serde(default)]
    pub class_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub note: Option<String>,
    pub primary_class_id: Option<i64>,
    /// 与 primary_class_id 任一给出时整体替换选课
    pub class_ids: Option<Vec<i64>>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub search: Option<String>,
}

// 写入存储层的学生字段（已校验）
#[derive(Debug, Clone, Default)]
pub struct StudentFields {
    pub name: String,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub note: Option<String>,
}
