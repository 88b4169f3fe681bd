use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::{StatisticsService, aggregate};
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    payments::{
        entities::{Payment, PaymentStatus},
        requests::PaymentFilter,
    },
    statistics::responses::DashboardResponse,
};
use crate::storage::Storage;
use crate::utils::month::{current_month, format_date, today};

pub async fn dashboard(
    service: &StatisticsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let start_month = &service.get_config().billing.start_month;

    match collect(storage.as_ref(), start_month).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Dashboard retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to build dashboard: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to build dashboard: {e}"),
                )),
            )
        }
    }
}

async fn collect(storage: &dyn Storage, start_month: &str) -> Result<DashboardResponse> {
    let today = format_date(today());
    let month = current_month();

    let total_classes = storage.count_classes().await? as i64;
    let total_students = storage.count_students().await? as i64;

    let today_marks = storage.list_attendance_on(&today).await?;

    let month_paid = storage
        .list_payments(PaymentFilter {
            month: Some(month.clone()),
            status: Some(PaymentStatus::Paid),
            ..Default::default()
        })
        .await?;
    let expected = storage.sum_primary_tuition().await?;

    let paid_today = storage
        .list_payments(PaymentFilter {
            status: Some(PaymentStatus::Paid),
            paid_date: Some(today),
            ..Default::default()
        })
        .await?;

    // 起始月份到上个月之间未缴的记录
    let unpaid = storage
        .list_payments(PaymentFilter {
            status: Some(PaymentStatus::Unpaid),
            month_from: Some(start_month.to_string()),
            month_before: Some(month),
            ..Default::default()
        })
        .await?;

    let revenue = storage
        .list_payments(PaymentFilter {
            status: Some(PaymentStatus::Paid),
            month_from: Some(start_month.to_string()),
            ..Default::default()
        })
        .await?;

    let (student_names, class_names) =
        names_for(storage, &[paid_today.as_slice(), unpaid.as_slice()]).await?;

    let today_payments = aggregate::today_payments(&paid_today, &student_names, &class_names);
    let debts = aggregate::debts(&unpaid, &student_names, &class_names);

    Ok(DashboardResponse {
        total_classes,
        total_students,
        today_attendance: aggregate::today_attendance(&today_marks),
        current_month_payments: aggregate::month_payments(&month_paid, total_students, expected),
        today_payments_total: today_payments.iter().map(|p| p.amount).sum(),
        today_payments,
        debts_total: debts.iter().map(|d| d.amount).sum(),
        debts,
        yearly_revenue: aggregate::yearly_revenue(&revenue),
    })
}

/// 取缴费记录涉及的学生名和班级名
async fn names_for(
    storage: &dyn Storage,
    groups: &[&[Payment]],
) -> Result<(HashMap<i64, String>, HashMap<i64, String>)> {
    let mut student_ids: Vec<i64> = groups
        .iter()
        .flat_map(|g| g.iter().map(|p| p.student_id))
        .collect();
    let mut class_ids: Vec<i64> = groups
        .iter()
        .flat_map(|g| g.iter().map(|p| p.class_id))
        .collect();
    student_ids.sort_unstable();
    student_ids.dedup();
    class_ids.sort_unstable();
    class_ids.dedup();

    let students = storage.get_students_by_ids(&student_ids).await?;
    let classes = storage.get_classes_by_ids(&class_ids).await?;

    Ok((
        students.into_iter().map(|s| (s.id, s.name)).collect(),
        classes.into_iter().map(|c| (c.id, c.name)).collect(),
    ))
}
