use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, scope::ensure_class_access};

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let attendance = match storage.get_attendance_by_id(attendance_id).await {
        Ok(Some(attendance)) => attendance,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AttendanceNotFound,
                "Attendance record not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load attendance: {e}"),
                )),
            );
        }
    };

    if let Err(resp) = ensure_class_access(storage.as_ref(), &user, attendance.class_id).await {
        return Ok(resp);
    }

    match storage.delete_attendance(attendance_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Attendance record deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AttendanceSaveFailed,
                format!("Failed to delete attendance: {e}"),
            )),
        ),
    }
}
