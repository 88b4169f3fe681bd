use serde::{Deserialize, Serialize};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,     // 管理员：全部权限
    Teacher,   // 教师：点名、查看分配班级的统计
    Treasurer, // 出纳：查看考勤与统计、管理学费
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const TEACHER: &'static str = "teacher";
    pub const TREASURER: &'static str = "treasurer";

    /// 角色对应的权限表（静态）
    pub fn permissions(&self) -> &'static [Permission] {
        use Permission::*;
        match self {
            UserRole::Admin => &[
                ViewDashboard,
                ManageClasses,
                ManageStudents,
                TakeAttendance,
                ViewAttendance,
                ViewStatistics,
                ManagePayments,
                ManageUsers,
            ],
            UserRole::Teacher => &[ViewDashboard, TakeAttendance, ViewAttendance, ViewStatistics],
            UserRole::Treasurer => &[ViewDashboard, ViewAttendance, ViewStatistics, ManagePayments],
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    /// 教师只能访问被分配的班级
    pub fn is_class_scoped(&self) -> bool {
        matches!(self, UserRole::Teacher)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid user role: '{s}'. Supported roles: admin, teacher, treasurer"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Treasurer => write!(f, "{}", UserRole::TREASURER),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::TREASURER => Ok(UserRole::Treasurer),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 权限
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ManageClasses,
    ManageStudents,
    TakeAttendance,
    ViewAttendance,
    ViewStatistics,
    ManagePayments,
    ManageUsers,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ManageClasses => "manage_classes",
            Permission::ManageStudents => "manage_students",
            Permission::TakeAttendance => "take_attendance",
            Permission::ViewAttendance => "view_attendance",
            Permission::ViewStatistics => "view_statistics",
            Permission::ManagePayments => "manage_payments",
            Permission::ManageUsers => "manage_users",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub role: UserRole,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.has_permission(permission)
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, self.role, refresh_token_expiry)
            .map_err(|e| format!("Failed to generate token pair: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_every_permission() {
        for permission in [
            Permission::ViewDashboard,
            Permission::ManageClasses,
            Permission::ManageStudents,
            Permission::TakeAttendance,
            Permission::ViewAttendance,
            Permission::ViewStatistics,
            Permission::ManagePayments,
            Permission::ManageUsers,
        ] {
            assert!(UserRole::Admin.has_permission(permission), "{permission}");
        }
    }

    #[test]
    fn test_teacher_permissions() {
        let teacher = UserRole::Teacher;
        assert!(teacher.has_permission(Permission::TakeAttendance));
        assert!(teacher.has_permission(Permission::ViewStatistics));
        assert!(!teacher.has_permission(Permission::ManagePayments));
        assert!(!teacher.has_permission(Permission::ManageClasses));
        assert!(!teacher.has_permission(Permission::ManageUsers));
        assert!(teacher.is_class_scoped());
    }

    #[test]
    fn test_treasurer_permissions() {
        let treasurer = UserRole::Treasurer;
        assert!(treasurer.has_permission(Permission::ManagePayments));
        assert!(treasurer.has_permission(Permission::ViewAttendance));
        assert!(!treasurer.has_permission(Permission::TakeAttendance));
        assert!(!treasurer.has_permission(Permission::ManageStudents));
        assert!(!treasurer.is_class_scoped());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("treasurer".parse::<UserRole>().unwrap(), UserRole::Treasurer);
        assert!("user".parse::<UserRole>().is_err());
        let role: UserRole = serde_json::from_str("\"teacher\"").unwrap();
        assert_eq!(role, UserRole::Teacher);
        assert!(serde_json::from_str::<UserRole>("\"owner\"").is_err());
        assert_eq!(
            serde_json::to_string(&Permission::ManagePayments).unwrap(),
            "\"manage_payments\""
        );
    }
}
