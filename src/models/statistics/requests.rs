use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SessionStatsQuery {
    pub class_id: i64,
    /// 缺省为当前月份
    pub month: Option<String>,
}
