use super::entities::{Attendance, AttendanceStatus};
use serde::Serialize;

// 点名表中的一行
#[derive(Debug, Serialize)]
pub struct AttendanceSheetEntry {
    pub student_id: i64,
    pub student_name: String,
    pub attendance_id: Option<i64>,
    pub status: Option<AttendanceStatus>,
    pub note: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceSheetResponse {
    pub class_id: i64,
    pub date: String,
    pub items: Vec<AttendanceSheetEntry>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceListResponse {
    pub class_id: i64,
    pub month: String,
    pub items: Vec<Attendance>,
}
