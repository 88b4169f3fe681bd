use super::entities::AttendanceStatus;
use serde::Deserialize;

// 单个学生的点名结果
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

// 点名请求
#[derive(Debug, Deserialize)]
pub struct TakeAttendanceRequest {
    pub class_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    pub marks: Vec<AttendanceMark>,
}

// 点名表查询
#[derive(Debug, Deserialize)]
pub struct AttendanceSheetQuery {
    pub class_id: i64,
    /// 缺省为今天
    pub date: Option<String>,
}

// 月度考勤查询
#[derive(Debug, Deserialize)]
pub struct AttendanceListQuery {
    pub class_id: i64,
    /// 缺省为当前月份
    pub month: Option<String>,
}
