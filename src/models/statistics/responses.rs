use super::entities::{
    DebtRecord, MonthPayments, SessionStat, TodayAttendance, TodayPayment, YearlyRevenue,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionStatsResponse {
    pub class_id: i64,
    pub month: String,
    pub items: Vec<SessionStat>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_classes: i64,
    pub total_students: i64,
    pub today_attendance: TodayAttendance,
    pub current_month_payments: MonthPayments,
    pub today_payments: Vec<TodayPayment>,
    pub today_payments_total: i64,
    pub debts: Vec<DebtRecord>,
    pub debts_total: i64,
    pub yearly_revenue: Vec<YearlyRevenue>,
}
