//! 计费月份（YYYY-MM）工具
//!
//! 学费与统计都以自然月为单位，数据库中以 `YYYY-MM` 字符串存储，
//! 字典序与时间先后一致，可以直接用于区间比较。

use chrono::{Datelike, Local, NaiveDate};

use crate::errors::{Result, TutorError};

/// 解析 `YYYY-MM`，返回 (年, 月)
pub fn parse_month(month: &str) -> Result<(i32, u32)> {
    let t = month.trim();
    let Some((y, m)) = t.split_once('-') else {
        return Err(TutorError::validation("month must be YYYY-MM"));
    };
    if y.len() != 4 || m.len() != 2 {
        return Err(TutorError::validation("month must be YYYY-MM"));
    }
    let year = y
        .parse::<i32>()
        .map_err(|_| TutorError::validation("month year must be numeric"))?;
    let month_num = m
        .parse::<u32>()
        .map_err(|_| TutorError::validation("month must be numeric"))?;
    if !(1..=12).contains(&month_num) {
        return Err(TutorError::validation("month must be between 01 and 12"));
    }
    Ok((year, month_num))
}

/// 校验并规范化月份字符串
pub fn normalize_month(month: &str) -> Result<String> {
    let (year, month_num) = parse_month(month)?;
    Ok(format_month(year, month_num))
}

pub fn format_month(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

/// 某月的第一天和最后一天（闭区间）
pub fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate)> {
    let (year, month_num) = parse_month(month)?;
    let first = NaiveDate::from_ymd_opt(year, month_num, 1)
        .ok_or_else(|| TutorError::validation(format!("invalid month: {month}")))?;
    let (next_year, next_month) = if month_num == 12 {
        (year + 1, 1)
    } else {
        (year, month_num + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| TutorError::validation(format!("invalid month: {month}")))?;
    Ok((first, last))
}

/// 校验并规范化 `YYYY-MM-DD` 日期字符串
pub fn normalize_date(date: &str) -> Result<String> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?;
    Ok(format_date(parsed))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// 日期所属的月份
pub fn month_of(date: NaiveDate) -> String {
    format_month(date.year(), date.month())
}

/// 取月份字符串中的年份部分
pub fn year_of(month: &str) -> &str {
    month.split('-').next().unwrap_or(month)
}

/// 服务器本地时区的今天
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 服务器本地时区的当前月份
pub fn current_month() -> String {
    month_of(today())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2026-03").unwrap(), (2026, 3));
        assert_eq!(parse_month(" 2025-12 ").unwrap(), (2025, 12));
        assert!(parse_month("2026-13").is_err());
        assert!(parse_month("2026-3").is_err());
        assert!(parse_month("202603").is_err());
        assert!(parse_month("abcd-01").is_err());
    }

    #[test]
    fn test_month_bounds_handles_leap_years_and_december() {
        let (first, last) = month_bounds("2024-02").unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (_, last) = month_bounds("2026-02").unwrap();
        assert_eq!(last, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());

        let (first, last) = month_bounds("2026-12").unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date(" 2026-03-05 ").unwrap(), "2026-03-05");
        assert!(normalize_date("2026-02-30").is_err());
        assert!(normalize_date("05/03/2026").is_err());
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2026, 1, 9).unwrap()),
            "2026-01-09"
        );
    }

    #[test]
    fn test_month_strings_order_chronologically() {
        let mut months = vec!["2026-10", "2025-12", "2026-02"];
        months.sort();
        assert_eq!(months, vec!["2025-12", "2026-02", "2026-10"]);
        assert_eq!(year_of("2026-10"), "2026");
        assert_eq!(
            month_of(NaiveDate::from_ymd_opt(2026, 7, 15).unwrap()),
            "2026-07"
        );
    }
}
