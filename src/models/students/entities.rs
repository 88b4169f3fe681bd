use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    /// 主班级（决定学费归属）
    pub class_id: Option<i64>,
    pub phone: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone: Option<String>,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生选课记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentEnrollment {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub is_primary: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 合并主班级与其他班级，得到去重后的选课集合（主班级在前）
pub fn enrollment_set(primary_class_id: Option<i64>, class_ids: &[i64]) -> Vec<(i64, bool)> {
    let mut result: Vec<(i64, bool)> = Vec::with_capacity(class_ids.len() + 1);
    if let Some(primary) = primary_class_id {
        result.push((primary, true));
    }
    for &class_id in class_ids {
        if !result.iter().any(|(id, _)| *id == class_id) {
            result.push((class_id, false));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_set_flags_only_primary() {
        let set = enrollment_set(Some(3), &[1, 3, 2, 1]);
        assert_eq!(set, vec![(3, true), (1, false), (2, false)]);
    }

    #[test]
    fn test_enrollment_set_without_primary() {
        assert_eq!(enrollment_set(None, &[5, 5]), vec![(5, false)]);
        assert!(enrollment_set(None, &[]).is_empty());
    }
}
