pub mod attendance;
pub mod auth;
pub mod classes;
pub mod payments;
pub mod statistics;
pub mod students;
pub mod users;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use payments::configure_payment_routes;
pub use statistics::configure_statistics_routes;
pub use students::configure_student_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_classes_routes)
        .configure(configure_student_routes)
        .configure(configure_attendance_routes)
        .configure(configure_payment_routes)
        .configure(configure_statistics_routes);
}
