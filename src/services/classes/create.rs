use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, ErrorCode, classes::requests::CreateClassRequest};
use crate::utils::validate::{validate_amount, validate_required_name};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    class_data.name = match validate_required_name(&class_data.name, "name") {
        Ok(name) => name,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ClassInvalid, msg)));
        }
    };

    if let Err(msg) = validate_amount(class_data.tuition) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ClassInvalid, msg)));
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            tracing::info!("Class {} created", class.name);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) if e.is_unique_violation() => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::ClassAlreadyExists, "Class name already exists"),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::ClassCreationFailed,
                format!("Class creation failed: {e}"),
            )),
        ),
    }
}
