use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceSheetQuery, TakeAttendanceRequest,
};
use crate::models::users::entities::Permission;
use crate::services::AttendanceService;
use crate::utils::SafeAttendanceIdI64;

// 懒加载的全局 AttendanceService 实例
static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn get_sheet(
    req: HttpRequest,
    query: web::Query<AttendanceSheetQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.get_sheet(&req, query.into_inner()).await
}

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendance(&req, query.into_inner())
        .await
}

pub async fn take_attendance(
    req: HttpRequest,
    take_request: web::Json<TakeAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .take_attendance(&req, take_request.into_inner())
        .await
}

pub async fn delete_attendance(
    req: HttpRequest,
    attendance_id: SafeAttendanceIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .delete_attendance(&req, attendance_id.0)
        .await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_attendance)
                            .wrap(middlewares::RequirePermission::new(Permission::ViewAttendance)),
                    )
                    .route(
                        web::post()
                            .to(take_attendance)
                            .wrap(middlewares::RequirePermission::new(Permission::TakeAttendance)),
                    ),
            )
            .service(
                web::resource("/sheet").route(
                    web::get()
                        .to(get_sheet)
                        .wrap(middlewares::RequirePermission::new(Permission::ViewAttendance)),
                ),
            )
            .service(
                web::resource("/{attendance_id}").route(
                    web::delete()
                        .to(delete_attendance)
                        .wrap(middlewares::RequirePermission::new(Permission::TakeAttendance)),
                ),
            ),
    );
}
