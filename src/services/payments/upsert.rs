use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PaymentService;
use crate::models::{
    ApiResponse, ErrorCode,
    payments::{
        entities::PaymentStatus,
        requests::{PaymentUpsert, UpsertPaymentRequest},
    },
};
use crate::services::find_class;
use crate::utils::month::{format_date, normalize_date, normalize_month, today};
use crate::utils::validate::{normalize_optional, validate_amount};

pub async fn upsert_payment(
    service: &PaymentService,
    request: &HttpRequest,
    payment: UpsertPaymentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let month = match normalize_month(&payment.month) {
        Ok(month) => month,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::PaymentInvalid,
                e.message().to_string(),
            )));
        }
    };

    if let Some(amount) = payment.amount
        && let Err(msg) = validate_amount(amount)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::PaymentInvalid, msg)));
    }

    // 已缴必须有缴费日期，缺省为今天；未缴不保留日期
    let paid_date = match (payment.status, normalize_optional(payment.paid_date)) {
        (PaymentStatus::Unpaid, _) => None,
        (PaymentStatus::Paid, None) => Some(format_date(today())),
        (PaymentStatus::Paid, Some(date)) => match normalize_date(&date) {
            Ok(date) => Some(date),
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::PaymentInvalid,
                    format!("Invalid paid date: {}", e.message()),
                )));
            }
        },
    };

    match storage.get_student_by_id(payment.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get student information: {e}"),
                )),
            );
        }
    }

    let class = match find_class(storage.as_ref(), payment.class_id).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    let upsert = PaymentUpsert {
        student_id: payment.student_id,
        class_id: class.id,
        month,
        amount: payment.amount.unwrap_or(class.tuition),
        status: payment.status,
        paid_date,
        note: normalize_optional(payment.note),
    };

    match storage.upsert_payment(upsert).await {
        Ok(saved) => {
            tracing::info!(
                "Payment of student {} for {} saved as {}",
                saved.student_id,
                saved.month,
                saved.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(saved, "Payment saved")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::PaymentSaveFailed,
                format!("Failed to save payment: {e}"),
            )),
        ),
    }
}
