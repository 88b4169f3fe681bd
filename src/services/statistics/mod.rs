pub mod aggregate;
pub mod dashboard;
pub mod sessions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::statistics::requests::SessionStatsQuery;
use crate::storage::Storage;

pub struct StatisticsService {
    storage: Option<Arc<dyn Storage>>,
}

impl StatisticsService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::app_storage(request),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 班级月度课时统计
    pub async fn session_stats(
        &self,
        request: &HttpRequest,
        query: SessionStatsQuery,
    ) -> ActixResult<HttpResponse> {
        sessions::session_stats(self, request, query).await
    }

    // 仪表盘汇总
    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request).await
    }
}
