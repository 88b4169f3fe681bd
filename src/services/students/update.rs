use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        entities::enrollment_set, requests::UpdateStudentRequest,
        responses::StudentDetailResponse,
    },
};
use crate::services::ensure_classes_exist;
use crate::utils::validate::validate_required_name;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    mut update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => student,
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
    };

    if let Some(ref name) = update_data.name {
        match validate_required_name(name, "name") {
            Ok(name) => update_data.name = Some(name),
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg)));
            }
        }
    }

    // 任一给出时整体替换选课，未给出的部分沿用现有值
    let enrollments = if update_data.primary_class_id.is_some() || update_data.class_ids.is_some()
    {
        let primary = update_data.primary_class_id.or(existing.class_id);
        let class_ids = match update_data.class_ids.take() {
            Some(ids) => ids,
            None => match storage.list_enrollments(&[student_id]).await {
                Ok(current) => current
                    .into_iter()
                    .filter(|e| !e.is_primary)
                    .map(|e| e.class_id)
                    .collect(),
                Err(e) => {
                    return Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to load enrollments: {e}"),
                        )),
                    );
                }
            },
        };

        let set = enrollment_set(primary, &class_ids);
        let ids: Vec<i64> = set.iter().map(|(id, _)| *id).collect();
        if let Err(resp) = ensure_classes_exist(storage.as_ref(), &ids).await {
            return Ok(resp);
        }
        Some(set)
    } else {
        None
    };

    match storage
        .update_student(student_id, update_data, enrollments)
        .await
    {
        Ok(Some(student)) => {
            let enrollments = storage
                .list_enrollments(&[student.id])
                .await
                .unwrap_or_default();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentDetailResponse {
                    student,
                    enrollments,
                },
                "Student information updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::StudentUpdateFailed,
                format!("Failed to update student information: {e}"),
            )),
        ),
    }
}
