use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::requests::{AttendanceMark, TakeAttendanceRequest},
};
use crate::services::{current_user, find_class, scope::ensure_class_access};
use crate::utils::month::normalize_date;
use crate::utils::validate::normalize_optional;

pub async fn take_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    take_request: TakeAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    let class_id = take_request.class_id;
    if let Err(resp) = ensure_class_access(storage.as_ref(), &user, class_id).await {
        return Ok(resp);
    }

    let date = match normalize_date(&take_request.date) {
        Ok(date) => date,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::AttendanceInvalid,
                format!("Invalid date: {}", e.message()),
            )));
        }
    };

    if take_request.marks.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceInvalid,
            "At least one mark is required",
        )));
    }

    if let Err(resp) = find_class(storage.as_ref(), class_id).await {
        return Ok(resp);
    }

    // 只能给该班级的在读学生点名
    let enrolled: HashSet<i64> = match storage.list_class_students(class_id).await {
        Ok(students) => students.into_iter().map(|s| s.id).collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load class students: {e}"),
                )),
            );
        }
    };

    let not_enrolled: Vec<String> = take_request
        .marks
        .iter()
        .filter(|m| !enrolled.contains(&m.student_id))
        .map(|m| m.student_id.to_string())
        .collect();
    if !not_enrolled.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceInvalid,
            format!("Students not enrolled in class: {}", not_enrolled.join(", ")),
        )));
    }

    let marks: Vec<AttendanceMark> = take_request
        .marks
        .into_iter()
        .map(|m| AttendanceMark {
            note: normalize_optional(m.note),
            ..m
        })
        .collect();

    match storage
        .upsert_attendance(class_id, &date, marks, user.id)
        .await
    {
        Ok(saved) => {
            tracing::info!(
                "User {} marked {} students of class {} on {}",
                user.id,
                saved.len(),
                class_id,
                date
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(saved, "Attendance saved")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AttendanceSaveFailed,
                format!("Failed to save attendance: {e}"),
            )),
        ),
    }
}
