use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StatisticsService, aggregate};
use crate::errors::Result;
use crate::models::{
    ApiResponse, ErrorCode,
    payments::requests::PaymentFilter,
    statistics::{
        entities::SessionStat, requests::SessionStatsQuery, responses::SessionStatsResponse,
    },
};
use crate::services::{current_user, find_class, scope::ensure_class_access};
use crate::storage::Storage;
use crate::utils::month::{current_month, format_date, month_bounds, normalize_month};

pub async fn session_stats(
    service: &StatisticsService,
    request: &HttpRequest,
    query: SessionStatsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = ensure_class_access(storage.as_ref(), &user, query.class_id).await {
        return Ok(resp);
    }

    let class = match find_class(storage.as_ref(), query.class_id).await {
        Ok(class) => class,
        Err(resp) => return Ok(resp),
    };

    let month = match query.month.as_deref().map(normalize_month) {
        Some(Ok(month)) => month,
        Some(Err(e)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                e.message().to_string(),
            )));
        }
        None => current_month(),
    };

    match collect(storage.as_ref(), class.id, class.tuition, &month).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SessionStatsResponse {
                class_id: query.class_id,
                month,
                items,
            },
            "Session statistics retrieved successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to compute session statistics: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to compute session statistics: {e}"),
                )),
            )
        }
    }
}

async fn collect(
    storage: &dyn Storage,
    class_id: i64,
    class_tuition: i64,
    month: &str,
) -> Result<Vec<SessionStat>> {
    let (first, last) = month_bounds(month)?;

    // 1. 以该班级为主班级的学生
    let students = storage.list_primary_students(class_id).await?;
    let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();

    // 2. 该班级当月的缴费
    let payments = storage
        .list_payments(PaymentFilter {
            class_id: Some(class_id),
            month: Some(month.to_string()),
            ..Default::default()
        })
        .await?;

    // 3. 学生的全部选课与当月出勤
    let enrollments = storage.list_enrollments(&student_ids).await?;
    let present = storage
        .list_present_between(&student_ids, &format_date(first), &format_date(last))
        .await?;

    Ok(aggregate::session_stats(
        &students,
        &enrollments,
        &present,
        &payments,
        Some(class_tuition),
    ))
}
