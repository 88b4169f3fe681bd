/*!
 * 基于权限的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，按角色权限表校验当前用户是否拥有指定权限。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use tutor_center::middlewares::{RequireJWT, RequirePermission};
 * use tutor_center::models::users::entities::Permission;
 *
 * App::new().service(
 *     web::scope("/api/v1/payments")
 *         .wrap(RequirePermission::new(Permission::ManagePayments)) // 再验证权限
 *         .wrap(RequireJWT)                                         // 先验证JWT
 *         .route("", web::get().to(list_payments)),
 * );
 * ```
 *
 * 或者任一权限即可：
 *
 * ```rust,ignore
 * .wrap(RequirePermission::new_any(&[Permission::ViewAttendance, Permission::TakeAttendance]))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{self, Permission},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequirePermission {
    required: Vec<Permission>,
    require_all: bool, // true表示需要所有权限，false表示任一权限即可
}

impl RequirePermission {
    /// 创建需要特定权限的中间件
    pub fn new(permission: Permission) -> Self {
        Self {
            required: vec![permission],
            require_all: true,
        }
    }

    /// 创建需要任一权限的中间件
    pub fn new_any(permissions: &[Permission]) -> Self {
        Self {
            required: permissions.to_vec(),
            require_all: false,
        }
    }
}

fn allows(required: &[Permission], require_all: bool, user: &entities::User) -> bool {
    if require_all {
        required.iter().all(|p| user.has_permission(*p))
    } else {
        required.iter().any(|p| user.has_permission(*p))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            required: self.required.clone(),
            require_all: self.require_all,
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    required: Vec<Permission>,
    require_all: bool,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required = self.required.clone();
        let require_all = self.require_all;

        Box::pin(async move {
            let user = req.extensions().get::<entities::User>().cloned();

            match user {
                Some(user) if allows(&required, require_all, &user) => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(user) => {
                    info!(
                        "Access denied for user {} (role: {}). Required permissions: {:?}",
                        user.id, user.role, required
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Permission check failed: No user found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{User, UserRole};

    fn user(role: UserRole) -> User {
        User {
            id: 1,
            email: "u@tutor.local".to_string(),
            name: "U".to_string(),
            password_hash: String::new(),
            role,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn check(guard: &RequirePermission, role: UserRole) -> bool {
        allows(&guard.required, guard.require_all, &user(role))
    }

    #[test]
    fn test_single_permission() {
        let guard = RequirePermission::new(Permission::ManagePayments);
        assert!(check(&guard, UserRole::Admin));
        assert!(check(&guard, UserRole::Treasurer));
        assert!(!check(&guard, UserRole::Teacher));
    }

    #[test]
    fn test_any_permission() {
        let guard =
            RequirePermission::new_any(&[Permission::TakeAttendance, Permission::ManagePayments]);
        assert!(check(&guard, UserRole::Teacher));
        assert!(check(&guard, UserRole::Treasurer));

        let guard = RequirePermission::new_any(&[Permission::ManageUsers]);
        assert!(!check(&guard, UserRole::Teacher));
    }
}
