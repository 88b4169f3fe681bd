use crate::models::payments::entities::PaymentStatus;
use serde::Serialize;

// 班级月度课时统计（按学生）
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionStat {
    pub student_id: i64,
    pub student_name: String,
    /// 当月在所有选课班级中的出勤次数
    pub sessions: i64,
    pub tuition: i64,
    pub paid_date: Option<String>,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct TodayAttendance {
    pub present: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct MonthPayments {
    pub paid: i64,
    pub unpaid: i64,
    /// 所有学生主班级学费之和
    pub total_amount: i64,
    pub paid_amount: i64,
}

// 今日收款
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TodayPayment {
    pub student_name: String,
    pub class_name: String,
    pub amount: i64,
}

// 往月欠费
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DebtRecord {
    pub student_name: String,
    pub class_name: String,
    pub month: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlyAmount {
    pub month: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct YearlyRevenue {
    pub year: String,
    pub total_amount: i64,
    pub monthly_breakdown: Vec<MonthlyAmount>,
}
