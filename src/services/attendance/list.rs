use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::AttendanceListQuery, responses::AttendanceListResponse},
};
use crate::services::{current_user, find_class, scope::ensure_class_access};
use crate::utils::month::{current_month, format_date, month_bounds, normalize_month};

pub async fn list_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(resp) = ensure_class_access(storage.as_ref(), &user, query.class_id).await {
        return Ok(resp);
    }

    if let Err(resp) = find_class(storage.as_ref(), query.class_id).await {
        return Ok(resp);
    }

    let month = match query.month.as_deref().map(normalize_month) {
        Some(Ok(month)) => month,
        Some(Err(e)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceInvalid,
                e.message().to_string(),
            )));
        }
        None => current_month(),
    };

    let (first, last) = match month_bounds(&month) {
        Ok(bounds) => bounds,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceInvalid,
                e.message().to_string(),
            )));
        }
    };

    match storage
        .list_class_attendance_between(query.class_id, &format_date(first), &format_date(last))
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceListResponse {
                class_id: query.class_id,
                month,
                items,
            },
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load attendance: {e}"),
            )),
        ),
    }
}
