use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::statistics::requests::SessionStatsQuery;
use crate::models::users::entities::Permission;
use crate::services::StatisticsService;

// 懒加载的全局 StatisticsService 实例
static STATISTICS_SERVICE: Lazy<StatisticsService> = Lazy::new(StatisticsService::new_lazy);

pub async fn session_stats(
    req: HttpRequest,
    query: web::Query<SessionStatsQuery>,
) -> ActixResult<HttpResponse> {
    STATISTICS_SERVICE
        .session_stats(&req, query.into_inner())
        .await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    STATISTICS_SERVICE.dashboard(&req).await
}

// 配置路由
pub fn configure_statistics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/statistics")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/sessions").route(
                    web::get()
                        .to(session_stats)
                        .wrap(middlewares::RequirePermission::new(Permission::ViewStatistics)),
                ),
            )
            .service(
                web::resource("/dashboard").route(
                    web::get()
                        .to(dashboard)
                        .wrap(middlewares::RequirePermission::new(Permission::ViewDashboard)),
                ),
            ),
    );
}
