use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::AttendanceService;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        requests::AttendanceSheetQuery,
        responses::{AttendanceSheetEntry, AttendanceSheetResponse},
    },
};
use crate::services::{current_user, find_class, scope::ensure_class_access};
use crate::utils::month::{format_date, normalize_date, today};

pub async fn get_sheet(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceSheetQuery,
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

    let date = match query.date.as_deref() {
        Some(date) => match normalize_date(date) {
            Ok(date) => date,
            Err(e) => {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::AttendanceInvalid,
                    format!("Invalid date: {}", e.message()),
                )));
            }
        },
        None => format_date(today()),
    };

    let students = match storage.list_class_students(query.class_id).await {
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

    let marks = match storage
        .list_class_attendance_on(query.class_id, &date)
        .await
    {
        Ok(marks) => marks,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to load attendance: {e}"),
                )),
            );
        }
    };

    let mut by_student: HashMap<i64, _> = marks.into_iter().map(|a| (a.student_id, a)).collect();

    // 学生已按姓名排序
    let items = students
        .into_iter()
        .map(|student| {
            let mark = by_student.remove(&student.id);
            AttendanceSheetEntry {
                student_id: student.id,
                student_name: student.name,
                attendance_id: mark.as_ref().map(|m| m.id),
                status: mark.as_ref().map(|m| m.status),
                note: mark.and_then(|m| m.note),
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AttendanceSheetResponse {
            class_id: query.class_id,
            date,
            items,
        },
        "Attendance sheet retrieved successfully",
    )))
}
