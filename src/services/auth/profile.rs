use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::UpdateProfileRequest;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, invalidate_cached_user};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_password_simple, validate_required_name};

use super::AuthService;

/// 当前用户修改自己的姓名和密码；角色与班级分配只能由管理员修改
pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let name = match update_data.name {
        Some(ref name) => match validate_required_name(name, "name") {
            Ok(name) => Some(name),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
            }
        },
        None => None,
    };

    // 空密码表示不修改
    let hashed_password = match update_data.password.as_deref() {
        Some(password) if !password.is_empty() => {
            if let Err(msg) = validate_password_simple(password) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::UserPasswordInvalid,
                    msg,
                )));
            }

            match hash_password(password) {
                Ok(hash) => Some(hash),
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to hash password: {e}"),
                        )),
                    );
                }
            }
        }
        _ => None,
    };

    let storage_update = UpdateUserRequest {
        email: None,
        name,
        password: hashed_password,
        role: None,
        class_ids: None,
    };

    match storage.update_user(current_user.id, storage_update).await {
        Ok(Some(user)) => {
            invalidate_cached_user(request, user.id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Profile updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                format!("Failed to update profile: {e}"),
            )),
        ),
    }
}
