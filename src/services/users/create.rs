use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::CreateUserRequest, responses::UserResponse},
};
use crate::services::ensure_classes_exist;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_email, validate_email, validate_password_simple, validate_required_name,
};

pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 验证姓名
    user_data.name = match validate_required_name(&user_data.name, "name") {
        Ok(name) => name,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
        }
    };

    // 验证邮箱
    user_data.email = normalize_email(&user_data.email);
    if let Err(msg) = validate_email(&user_data.email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 新用户必须设置密码
    if user_data.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            "Password is required",
        )));
    }
    if let Err(msg) = validate_password_simple(&user_data.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    // 班级分配只对教师有意义
    if user_data.role != UserRole::Teacher {
        user_data.class_ids.clear();
    } else if let Err(resp) = ensure_classes_exist(storage.as_ref(), &user_data.class_ids).await {
        return Ok(resp);
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    match storage.create_user(user_data).await {
        Ok(user) => {
            let class_ids = storage
                .list_teacher_class_ids(user.id)
                .await
                .unwrap_or_default();
            tracing::info!("User {} created with role {}", user.email, user.role);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse { user, class_ids },
                "User created successfully",
            )))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserAlreadyExists, "Email already exists"),
        )),
        Err(e) => {
            error!("User creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::UserCreationFailed,
                    format!("User creation failed: {e}"),
                )),
            )
        }
    }
}
