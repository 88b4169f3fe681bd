//! 班级可见范围
//!
//! 教师只能访问 `teacher_classes` 中分配给自己的班级，其余角色不受限。

use actix_web::HttpResponse;

use crate::errors::Result;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassScope {
    All,
    Only(Vec<i64>),
}

impl ClassScope {
    pub async fn for_user(storage: &dyn Storage, user: &User) -> Result<Self> {
        if user.role.is_class_scoped() {
            Ok(ClassScope::Only(storage.list_teacher_class_ids(user.id).await?))
        } else {
            Ok(ClassScope::All)
        }
    }

    pub fn allows(&self, class_id: i64) -> bool {
        match self {
            ClassScope::All => true,
            ClassScope::Only(ids) => ids.contains(&class_id),
        }
    }

    /// 列表查询用的过滤条件，None 表示不过滤
    pub fn class_ids(&self) -> Option<Vec<i64>> {
        match self {
            ClassScope::All => None,
            ClassScope::Only(ids) => Some(ids.clone()),
        }
    }
}

/// 校验当前用户能否访问指定班级，不能访问时返回 403 响应
pub(crate) async fn ensure_class_access(
    storage: &dyn Storage,
    user: &User,
    class_id: i64,
) -> std::result::Result<(), HttpResponse> {
    let scope = ClassScope::for_user(storage, user).await.map_err(|e| {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("Failed to load class assignments: {e}"),
        ))
    })?;

    if scope.allows(class_id) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ClassPermissionDenied,
            "You are not assigned to this class",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_allows() {
        assert!(ClassScope::All.allows(42));
        let scope = ClassScope::Only(vec![1, 3]);
        assert!(scope.allows(3));
        assert!(!scope.allows(2));
        assert!(ClassScope::Only(vec![]).class_ids().unwrap().is_empty());
        assert_eq!(ClassScope::All.class_ids(), None);
    }
}
