pub mod delete;
pub mod list;
pub mod sheet;
pub mod upsert;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::payments::requests::{
    PaymentListQuery, PaymentSheetQuery, UpsertPaymentRequest,
};
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::app_storage(request),
        }
    }

    // 班级某月缴费表
    pub async fn get_sheet(
        &self,
        request: &HttpRequest,
        query: PaymentSheetQuery,
    ) -> ActixResult<HttpResponse> {
        sheet::get_sheet(self, request, query).await
    }

    // 登记缴费
    pub async fn upsert_payment(
        &self,
        request: &HttpRequest,
        payment: UpsertPaymentRequest,
    ) -> ActixResult<HttpResponse> {
        upsert::upsert_payment(self, request, payment).await
    }

    pub async fn list_payments(
        &self,
        request: &HttpRequest,
        query: PaymentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_payments(self, request, query).await
    }

    pub async fn delete_payment(
        &self,
        request: &HttpRequest,
        payment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_payment(self, request, payment_id).await
    }
}
