use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::{
    ApiResponse, ErrorCode,
    payments::{
        requests::{PaymentFilter, PaymentListQuery},
        responses::PaymentListResponse,
    },
};
use crate::utils::month::normalize_month;

pub async fn list_payments(
    service: &PaymentService,
    request: &HttpRequest,
    mut query: PaymentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Some(ref month) = query.month {
        match normalize_month(month) {
            Ok(month) => query.month = Some(month),
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::PaymentInvalid,
                    e.message().to_string(),
                )));
            }
        }
    }

    match storage.list_payments(PaymentFilter::from(query)).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PaymentListResponse { items },
            "Payments retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load payments: {e}"),
            )),
        ),
    }
}
