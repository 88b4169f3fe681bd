//! 统计聚合
//!
//! 只做内存中的分组与求和，数据由调用方从存储层取出后传入。

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::attendance::entities::{Attendance, AttendanceStatus};
use crate::models::payments::entities::{Payment, PaymentStatus};
use crate::models::statistics::entities::{
    DebtRecord, MonthPayments, MonthlyAmount, SessionStat, TodayAttendance, TodayPayment,
    YearlyRevenue,
};
use crate::models::students::entities::{Student, StudentEnrollment};
use crate::utils::month::year_of;

const MISSING_NAME: &str = "N/A";

/// 应收学费：有正数缴费金额时取缴费金额，否则取班级学费（班级不存在时为 0）
pub fn effective_tuition(payment_amount: Option<i64>, class_tuition: Option<i64>) -> i64 {
    match payment_amount {
        Some(amount) if amount > 0 => amount,
        _ => class_tuition.unwrap_or(0),
    }
}

/// 班级月度课时统计
///
/// `present` 为这些学生当月的出勤记录；只统计学生当前选课班级中的出勤。
pub fn session_stats(
    students: &[Student],
    enrollments: &[StudentEnrollment],
    present: &[Attendance],
    payments: &[Payment],
    class_tuition: Option<i64>,
) -> Vec<SessionStat> {
    let mut classes_of: HashMap<i64, HashSet<i64>> = HashMap::new();
    for e in enrollments {
        classes_of.entry(e.student_id).or_default().insert(e.class_id);
    }

    let payment_of: HashMap<i64, &Payment> = payments.iter().map(|p| (p.student_id, p)).collect();

    students
        .iter()
        .map(|student| {
            let enrolled = classes_of.get(&student.id);
            let sessions = present
                .iter()
                .filter(|a| {
                    a.student_id == student.id
                        && a.status == AttendanceStatus::Present
                        && enrolled.is_some_and(|set| set.contains(&a.class_id))
                })
                .count() as i64;

            let payment = payment_of.get(&student.id);
            SessionStat {
                student_id: student.id,
                student_name: student.name.clone(),
                sessions,
                tuition: effective_tuition(payment.map(|p| p.amount), class_tuition),
                paid_date: payment.and_then(|p| p.paid_date.clone()),
                status: payment.map_or(PaymentStatus::Unpaid, |p| p.status),
            }
        })
        .collect()
}

pub fn today_attendance(marks: &[Attendance]) -> TodayAttendance {
    TodayAttendance {
        present: marks
            .iter()
            .filter(|a| a.status == AttendanceStatus::Present)
            .count() as i64,
        total: marks.len() as i64,
    }
}

/// 本月缴费概况；未缴人数 = 学生总数 - 已缴笔数，不小于 0
pub fn month_payments(payments: &[Payment], total_students: i64, total_amount: i64) -> MonthPayments {
    let paid: Vec<&Payment> = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .collect();
    let paid_count = paid.len() as i64;

    MonthPayments {
        paid: paid_count,
        unpaid: (total_students - paid_count).max(0),
        total_amount,
        paid_amount: paid.iter().map(|p| p.amount).sum(),
    }
}

fn name_or_missing(names: &HashMap<i64, String>, id: i64) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| MISSING_NAME.to_string())
}

pub fn today_payments(
    payments: &[Payment],
    student_names: &HashMap<i64, String>,
    class_names: &HashMap<i64, String>,
) -> Vec<TodayPayment> {
    payments
        .iter()
        .map(|p| TodayPayment {
            student_name: name_or_missing(student_names, p.student_id),
            class_name: name_or_missing(class_names, p.class_id),
            amount: p.amount,
        })
        .collect()
}

/// 往月欠费，月份倒序
pub fn debts(
    payments: &[Payment],
    student_names: &HashMap<i64, String>,
    class_names: &HashMap<i64, String>,
) -> Vec<DebtRecord> {
    let mut records: Vec<DebtRecord> = payments
        .iter()
        .map(|p| DebtRecord {
            student_name: name_or_missing(student_names, p.student_id),
            class_name: name_or_missing(class_names, p.class_id),
            month: p.month.clone(),
            amount: p.amount,
        })
        .collect();
    records.sort_by(|a, b| b.month.cmp(&a.month));
    records
}

/// 按年份分组的已缴收入：年份倒序，月份正序
pub fn yearly_revenue(payments: &[Payment]) -> Vec<YearlyRevenue> {
    let mut by_year: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
    for p in payments {
        *by_year
            .entry(year_of(&p.month).to_string())
            .or_default()
            .entry(p.month.clone())
            .or_default() += p.amount;
    }

    by_year
        .into_iter()
        .rev()
        .map(|(year, months)| YearlyRevenue {
            year,
            total_amount: months.values().sum(),
            monthly_breakdown: months
                .into_iter()
                .map(|(month, amount)| MonthlyAmount { month, amount })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student(id: i64, name: &str, class_id: Option<i64>) -> Student {
        Student {
            id,
            name: name.to_string(),
            class_id,
            phone: None,
            parent_name: None,
            parent_phone: None,
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn enrollment(student_id: i64, class_id: i64, is_primary: bool) -> StudentEnrollment {
        StudentEnrollment {
            id: 0,
            student_id,
            class_id,
            is_primary,
            created_at: Utc::now(),
        }
    }

    fn mark(student_id: i64, class_id: i64, date: &str, status: AttendanceStatus) -> Attendance {
        Attendance {
            id: 0,
            student_id,
            class_id,
            date: date.to_string(),
            status,
            note: None,
            marked_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn payment(student_id: i64, class_id: i64, month: &str, amount: i64, status: PaymentStatus) -> Payment {
        Payment {
            id: 0,
            student_id,
            class_id,
            month: month.to_string(),
            amount,
            status,
            paid_date: (status == PaymentStatus::Paid).then(|| format!("{month}-05")),
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_tuition() {
        assert_eq!(effective_tuition(Some(500_000), Some(800_000)), 500_000);
        assert_eq!(effective_tuition(Some(0), Some(800_000)), 800_000);
        assert_eq!(effective_tuition(None, Some(800_000)), 800_000);
        assert_eq!(effective_tuition(None, None), 0);
    }

    #[test]
    fn test_session_stats_counts_present_marks_across_enrolled_classes() {
        let students = vec![student(1, "An", Some(10)), student(2, "Binh", Some(10))];
        let enrollments = vec![
            enrollment(1, 10, true),
            enrollment(1, 20, false),
            enrollment(2, 10, true),
        ];
        let present = vec![
            mark(1, 10, "2026-03-02", AttendanceStatus::Present),
            mark(1, 20, "2026-03-03", AttendanceStatus::Present),
            // 已退出的班级不计入
            mark(1, 30, "2026-03-04", AttendanceStatus::Present),
            mark(2, 10, "2026-03-02", AttendanceStatus::Absent),
        ];
        let payments = vec![payment(1, 10, "2026-03", 600_000, PaymentStatus::Paid)];

        let stats = session_stats(&students, &enrollments, &present, &payments, Some(800_000));

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].sessions, 2);
        assert_eq!(stats[0].tuition, 600_000);
        assert_eq!(stats[0].status, PaymentStatus::Paid);
        assert_eq!(stats[0].paid_date.as_deref(), Some("2026-03-05"));

        assert_eq!(stats[1].sessions, 0);
        assert_eq!(stats[1].tuition, 800_000);
        assert_eq!(stats[1].status, PaymentStatus::Unpaid);
        assert_eq!(stats[1].paid_date, None);
    }

    #[test]
    fn test_month_payments_clamps_unpaid() {
        let payments = vec![
            payment(1, 10, "2026-03", 500, PaymentStatus::Paid),
            payment(2, 10, "2026-03", 300, PaymentStatus::Paid),
            payment(3, 10, "2026-03", 300, PaymentStatus::Unpaid),
        ];
        let summary = month_payments(&payments, 1, 1_200);
        assert_eq!(summary.paid, 2);
        assert_eq!(summary.unpaid, 0);
        assert_eq!(summary.paid_amount, 800);
        assert_eq!(summary.total_amount, 1_200);
    }

    #[test]
    fn test_today_attendance() {
        let marks = vec![
            mark(1, 10, "2026-03-02", AttendanceStatus::Present),
            mark(2, 10, "2026-03-02", AttendanceStatus::Absent),
            mark(3, 20, "2026-03-02", AttendanceStatus::Present),
        ];
        assert_eq!(
            today_attendance(&marks),
            TodayAttendance {
                present: 2,
                total: 3
            }
        );
    }

    #[test]
    fn test_named_records_fall_back_to_na() {
        let students = HashMap::from([(1, "An".to_string())]);
        let classes = HashMap::from([(10, "Toán 9".to_string())]);
        let payments = vec![
            payment(1, 10, "2026-01", 500, PaymentStatus::Unpaid),
            payment(2, 99, "2026-02", 700, PaymentStatus::Unpaid),
        ];

        let today = today_payments(&payments, &students, &classes);
        assert_eq!(today[0].student_name, "An");
        assert_eq!(today[1].student_name, "N/A");
        assert_eq!(today[1].class_name, "N/A");

        let records = debts(&payments, &students, &classes);
        assert_eq!(records[0].month, "2026-02");
        assert_eq!(records[1].class_name, "Toán 9");
    }

    #[test]
    fn test_yearly_revenue_grouping() {
        let payments = vec![
            payment(1, 10, "2025-12", 100, PaymentStatus::Paid),
            payment(2, 10, "2026-02", 200, PaymentStatus::Paid),
            payment(3, 10, "2026-01", 300, PaymentStatus::Paid),
            payment(4, 10, "2026-02", 50, PaymentStatus::Paid),
        ];

        let revenue = yearly_revenue(&payments);
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].year, "2026");
        assert_eq!(revenue[0].total_amount, 550);
        assert_eq!(
            revenue[0].monthly_breakdown,
            vec![
                MonthlyAmount {
                    month: "2026-01".into(),
                    amount: 300
                },
                MonthlyAmount {
                    month: "2026-02".into(),
                    amount: 250
                },
            ]
        );
        assert_eq!(revenue[1].year, "2025");
        assert_eq!(revenue[1].total_amount, 100);
    }
}
