use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::{ensure_classes_exist, invalidate_cached_user};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    normalize_email, validate_email, validate_password_simple, validate_required_name,
};

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    mut update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get user information: {e}"),
                )),
            );
        }
    };

    if let Some(ref name) = update_data.name {
        match validate_required_name(name, "name") {
            Ok(name) => update_data.name = Some(name),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
            }
        }
    }

    if let Some(ref email) = update_data.email {
        let email = normalize_email(email);
        if let Err(msg) = validate_email(&email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }
        update_data.email = Some(email);
    }

    // 空密码表示不修改
    update_data.password = match update_data.password.take().filter(|p| !p.is_empty()) {
        Some(password) => {
            if let Err(msg) = validate_password_simple(&password) {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
            }
            match hash_password(&password) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Password hashing failed: {e}"),
                        )),
                    );
                }
            }
        }
        None => None,
    };

    // 最终角色是教师时按请求替换分配；不再是教师时清空分配
    let final_role = update_data.role.unwrap_or(existing.role);
    update_data.class_ids = if final_role == UserRole::Teacher {
        update_data.class_ids.take()
    } else if existing.role == UserRole::Teacher || update_data.class_ids.is_some() {
        Some(Vec::new())
    } else {
        None
    };

    if let Some(ref class_ids) = update_data.class_ids
        && let Err(resp) = ensure_classes_exist(storage.as_ref(), class_ids).await
    {
        return Ok(resp);
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            invalidate_cached_user(request, user.id).await;
            let class_ids = storage
                .list_teacher_class_ids(user.id)
                .await
                .unwrap_or_default();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse { user, class_ids },
                "User information updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UserAlreadyExists, "Email already exists"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                format!("Failed to update user information: {e}"),
            )),
        ),
    }
}
