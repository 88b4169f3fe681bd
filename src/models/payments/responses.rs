use super::entities::{Payment, PaymentStatus};
use serde::Serialize;

// 缴费表中的一行；没有记录时合成一条未缴行
#[derive(Debug, Serialize)]
pub struct PaymentSheetEntry {
    pub student_id: i64,
    pub student_name: String,
    pub payment_id: Option<i64>,
    pub amount: i64,
    pub status: PaymentStatus,
    pub paid_date: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentSheetResponse {
    pub class_id: i64,
    pub month: String,
    pub items: Vec<PaymentSheetEntry>,
    pub expected_amount: i64,
    pub paid_amount: i64,
}

#[derive(Debug, Serialize)]
pub struct PaymentListResponse {
    pub items: Vec<Payment>,
}
