use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::responses::{
    RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_user;
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 验证 refresh token，取出用户 ID
    let user_id = match jwt::JwtUtils::verify_refresh_token(&refresh_token).and_then(|claims| {
        claims
            .user_id()
            .ok_or_else(|| jsonwebtoken::errors::ErrorKind::InvalidSubject.into())
    }) {
        Ok(user_id) => user_id,
        Err(e) => {
            tracing::info!("Refresh token failed: {}", e);
            return Ok(refresh_rejected());
        }
    };

    // 角色以数据库为准，用户已删除时令牌作废
    let user = match service.get_storage(request).get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("Refresh token for missing user {}", user_id);
            return Ok(refresh_rejected());
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load user: {e}"),
                )),
            );
        }
    };

    match jwt::JwtUtils::generate_access_token(user.id, user.role) {
        Ok(access_token) => {
            let response = RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Refresh failed, unable to generate token",
                )),
            )
        }
    }
}

// 清除无效的 refresh token cookie
fn refresh_rejected() -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(jwt::JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Login expired or invalid, please login again",
        ))
}

pub async fn handle_verify_token(
    _service: &AuthService,
    _request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid: true },
        "Token is valid",
    )))
}

pub async fn handle_get_user(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 教师附带可访问的班级
    let class_ids = if user.role.is_class_scoped() {
        match service
            .get_storage(request)
            .list_teacher_class_ids(user.id)
            .await
        {
            Ok(ids) => ids,
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Failed to load class assignments: {e}"),
                    )),
                );
            }
        }
    } else {
        Vec::new()
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        UserInfoResponse {
            permissions: user.role.permissions().to_vec(),
            user,
            class_ids,
        },
        "User information retrieved successfully",
    )))
}
