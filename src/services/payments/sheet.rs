use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::PaymentService;
use crate::models::{
    ApiResponse, ErrorCode,
    payments::{
        entities::PaymentStatus,
        requests::{PaymentFilter, PaymentSheetQuery},
        responses::{PaymentSheetEntry, PaymentSheetResponse},
    },
};
use crate::services::find_class;
use crate::services::statistics::aggregate::effective_tuition;
use crate::utils::month::{current_month, normalize_month};

pub async fn get_sheet(
    service: &PaymentService,
    request: &HttpRequest,
    query: PaymentSheetQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let month = match query.month.as_deref().map(normalize_month) {
        Some(Ok(month)) => month,
        Some(Err(e)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::PaymentInvalid,
                e.message().to_string(),
            )));
        }
        None => current_month(),
    };

    let class = match find_class(storage.as_ref(), query.class_id).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    // 只有以该班级为主班级的学生在这里缴费
    let students = match storage.list_primary_students(class.id).await {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load class students: {e}"),
                )),
            );
        }
    };

    let filter = PaymentFilter {
        class_id: Some(class.id),
        month: Some(month.clone()),
        ..Default::default()
    };
    let mut payments: HashMap<i64, _> = match storage.list_payments(filter).await {
        Ok(payments) => payments.into_iter().map(|p| (p.student_id, p)).collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load payments: {e}"),
                )),
            );
        }
    };

    // 显示金额按实际应缴计算，已缴金额按记录原值累加
    let mut paid_amount = 0;
    let mut items = Vec::with_capacity(students.len());
    for student in students {
        let entry = match payments.remove(&student.id) {
            Some(payment) => {
                if payment.status == PaymentStatus::Paid {
                    paid_amount += payment.amount;
                }
                PaymentSheetEntry {
                    student_id: student.id,
                    student_name: student.name,
                    payment_id: Some(payment.id),
                    amount: effective_tuition(Some(payment.amount), Some(class.tuition)),
                    status: payment.status,
                    paid_date: payment.paid_date,
                    note: payment.note,
                }
            }
            None => PaymentSheetEntry {
                student_id: student.id,
                student_name: student.name,
                payment_id: None,
                amount: class.tuition,
                status: PaymentStatus::Unpaid,
                paid_date: None,
                note: None,
            },
        };
        items.push(entry);
    }

    let expected_amount = items.iter().map(|i| i.amount).sum();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PaymentSheetResponse {
            class_id: class.id,
            month,
            items,
            expected_amount,
            paid_amount,
        },
        "Payment sheet retrieved successfully",
    )))
}
