//! 路径参数提取器
//!
//! 将 `/{id}` 一类的路径参数解析为正整数 ID，解析失败时直接返回统一格式的 400 响应。

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_positive_id(req: &HttpRequest, param: &'static str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(param).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter '{param}': {raw}"),
            ));
            Err(InternalError::from_response(format!("invalid {param}"), response).into())
        }
    }
}

macro_rules! define_safe_id_extractor {
    ($(($name:ident, $param:literal)),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_positive_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id_extractor! {
    (SafeIDI64, "id"),
    (SafeClassIdI64, "class_id"),
    (SafeStudentIdI64, "student_id"),
    (SafeAttendanceIdI64, "attendance_id"),
    (SafePaymentIdI64, "payment_id"),
}
