use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::payments::requests::{
    PaymentListQuery, PaymentSheetQuery, UpsertPaymentRequest,
};
use crate::models::users::entities::Permission;
use crate::services::PaymentService;
use crate::utils::SafePaymentIdI64;

// 懒加载的全局 PaymentService 实例
static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

pub async fn get_sheet(
    req: HttpRequest,
    query: web::Query<PaymentSheetQuery>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.get_sheet(&req, query.into_inner()).await
}

pub async fn list_payments(
    req: HttpRequest,
    query: web::Query<PaymentListQuery>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.list_payments(&req, query.into_inner()).await
}

pub async fn upsert_payment(
    req: HttpRequest,
    payment: web::Json<UpsertPaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE
        .upsert_payment(&req, payment.into_inner())
        .await
}

pub async fn delete_payment(
    req: HttpRequest,
    payment_id: SafePaymentIdI64,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.delete_payment(&req, payment_id.0).await
}

// 配置路由
pub fn configure_payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payments")
            .wrap(middlewares::RequirePermission::new(Permission::ManagePayments))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_payments))
            .route("", web::put().to(upsert_payment))
            .route("/sheet", web::get().to(get_sheet))
            .route("/{payment_id}", web::delete().to(delete_payment)),
    );
}
