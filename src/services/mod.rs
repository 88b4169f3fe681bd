pub mod attendance;
pub mod auth;
pub mod classes;
pub mod payments;
pub mod scope;
pub mod statistics;
pub mod students;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use payments::PaymentService;
pub use statistics::StatisticsService;
pub use students::StudentService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::cache::{ObjectCache, user_cache_key};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, classes::entities::Class, users::entities::User};
use crate::storage::Storage;

/// 从 app data 中取存储实例，启动时必定注册
pub(crate) fn app_storage(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 取当前登录用户，缺失时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

/// 用户资料变化后清除认证缓存
pub(crate) async fn invalidate_cached_user(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        cache.remove(&user_cache_key(user_id)).await;
    }
}

/// 校验引用的班级全部存在，否则返回 400 响应
pub(crate) async fn ensure_classes_exist(
    storage: &dyn Storage,
    class_ids: &[i64],
) -> Result<(), HttpResponse> {
    let mut wanted = class_ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    match storage.get_classes_by_ids(&wanted).await {
        Ok(found) if found.len() == wanted.len() => Ok(()),
        Ok(found) => {
            let missing: Vec<String> = wanted
                .iter()
                .filter(|id| !found.iter().any(|c| c.id == **id))
                .map(|id| id.to_string())
                .collect();
            Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ClassNotFound,
                format!("Class not found: {}", missing.join(", ")),
            )))
        }
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load classes: {e}"),
            )),
        ),
    }
}

/// 按 ID 取班级，不存在时返回 404 响应
pub(crate) async fn find_class(storage: &dyn Storage, class_id: i64) -> Result<Class, HttpResponse> {
    match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => Ok(class),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get class information: {e}"),
            )),
        ),
    }
}
