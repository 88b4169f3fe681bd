use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        entities::enrollment_set,
        requests::{CreateStudentRequest, StudentFields},
        responses::StudentDetailResponse,
    },
};
use crate::services::ensure_classes_exist;
use crate::utils::validate::{normalize_optional, validate_required_name};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let name = match validate_required_name(&student_data.name, "name") {
        Ok(name) => name,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg)));
        }
    };

    // 选课 = 主班级 ∪ class_ids，只有主班级标记为 primary
    let enrollments = enrollment_set(student_data.primary_class_id, &student_data.class_ids);
    let class_ids: Vec<i64> = enrollments.iter().map(|(id, _)| *id).collect();
    if let Err(resp) = ensure_classes_exist(storage.as_ref(), &class_ids).await {
        return Ok(resp);
    }

    let fields = StudentFields {
        name,
        phone: normalize_optional(student_data.phone),
        parent_name: normalize_optional(student_data.parent_name),
        parent_phone: normalize_optional(student_data.parent_phone),
        note: normalize_optional(student_data.note),
    };

    let student = match storage.create_student(fields, enrollments).await {
        Ok(student) => student,
        Err(e) => {
            tracing::error!("Student creation failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::StudentCreationFailed,
                    format!("Student creation failed: {e}"),
                )),
            );
        }
    };

    let enrollments = storage
        .list_enrollments(&[student.id])
        .await
        .unwrap_or_default();

    Ok(HttpResponse::Created().json(ApiResponse::success(
        StudentDetailResponse {
            student,
            enrollments,
        },
        "Student created successfully",
    )))
}
