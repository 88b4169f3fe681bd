pub mod delete;
pub mod list;
pub mod sheet;
pub mod take;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceSheetQuery, TakeAttendanceRequest,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::app_storage(request),
        }
    }

    // 点名表：班级学生及当天考勤
    pub async fn get_sheet(
        &self,
        request: &HttpRequest,
        query: AttendanceSheetQuery,
    ) -> ActixResult<HttpResponse> {
        sheet::get_sheet(self, request, query).await
    }

    // 点名
    pub async fn take_attendance(
        &self,
        request: &HttpRequest,
        take_request: TakeAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        take::take_attendance(self, request, take_request).await
    }

    // 班级月度考勤
    pub async fn list_attendance(
        &self,
        request: &HttpRequest,
        query: AttendanceListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_attendance(self, request, query).await
    }

    pub async fn delete_attendance(
        &self,
        request: &HttpRequest,
        attendance_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_attendance(self, request, attendance_id).await
    }
}
