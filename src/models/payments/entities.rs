use serde::{Deserialize, Serialize};

// 缴费状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub const PAID: &'static str = "paid";
    pub const UNPAID: &'static str = "unpaid";
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "{}", Self::PAID),
            PaymentStatus::Unpaid => write!(f, "{}", Self::UNPAID),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PAID => Ok(PaymentStatus::Paid),
            Self::UNPAID => Ok(PaymentStatus::Unpaid),
            _ => Err(format!("Invalid payment status: {s}")),
        }
    }
}

// 学费记录（每个学生每个班级每月一条）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    /// YYYY-MM
    pub month: String,
    pub amount: i64,
    pub status: PaymentStatus,
    /// YYYY-MM-DD，仅已缴时存在
    pub paid_date: Option<String>,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
