use super::entities::PaymentStatus;
use serde::Deserialize;

// 登记或修改某月学费
#[derive(Debug, Deserialize)]
pub struct UpsertPaymentRequest {
    pub student_id: i64,
    pub class_id: i64,
    pub month: String,
    /// 缺省为班级学费
    pub amount: Option<i64>,
    pub status: PaymentStatus,
    pub paid_date: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentSheetQuery {
    pub class_id: i64,
    pub month: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentListQuery {
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub month: Option<String>,
    pub status: Option<PaymentStatus>,
}

// 写入存储层的学费记录（已校验、已补全默认值）
#[derive(Debug, Clone)]
pub struct PaymentUpsert {
    pub student_id: i64,
    pub class_id: i64,
    pub month: String,
    pub amount: i64,
    pub status: PaymentStatus,
    pub paid_date: Option<String>,
    pub note: Option<String>,
}

// 学费记录筛选条件（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub month: Option<String>,
    /// month >= month_from
    pub month_from: Option<String>,
    /// month < month_before
    pub month_before: Option<String>,
    pub status: Option<PaymentStatus>,
    pub paid_date: Option<String>,
}

impl From<PaymentListQuery> for PaymentFilter {
    fn from(query: PaymentListQuery) -> Self {
        Self {
            student_id: query.student_id,
            class_id: query.class_id,
            month: query.month,
            status: query.status,
            ..Default::default()
        }
    }
}
