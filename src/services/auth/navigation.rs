use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::models::auth::responses::{NavItem, NavigationResponse};
use crate::models::users::entities::{Permission, UserRole};
use crate::services::current_user;

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: "/",
        label: "Overview",
        permission: Permission::ViewDashboard,
    },
    NavItem {
        href: "/classes",
        label: "Classes",
        permission: Permission::ManageClasses,
    },
    NavItem {
        href: "/students",
        label: "Students",
        permission: Permission::ManageStudents,
    },
    NavItem {
        href: "/attendance",
        label: "Attendance",
        permission: Permission::ViewAttendance,
    },
    NavItem {
        href: "/payments",
        label: "Tuition",
        permission: Permission::ManagePayments,
    },
    NavItem {
        href: "/statistics",
        label: "Statistics",
        permission: Permission::ViewStatistics,
    },
    NavItem {
        href: "/users",
        label: "Users",
        permission: Permission::ManageUsers,
    },
];

// 移动端底部导航只保留这几项
const COMPACT_HREFS: &[&str] = &["/", "/attendance", "/payments", "/statistics"];

pub fn navigation_for(role: UserRole) -> NavigationResponse {
    let items: Vec<NavItem> = NAV_ITEMS
        .iter()
        .filter(|item| role.has_permission(item.permission))
        .cloned()
        .collect();
    let compact = items
        .iter()
        .filter(|item| COMPACT_HREFS.contains(&item.href))
        .cloned()
        .collect();

    NavigationResponse { items, compact }
}

pub async fn handle_navigation(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        navigation_for(user.role),
        "Navigation retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(items: &[NavItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.href).collect()
    }

    #[test]
    fn test_admin_sees_everything() {
        let nav = navigation_for(UserRole::Admin);
        assert_eq!(nav.items.len(), NAV_ITEMS.len());
        assert_eq!(
            hrefs(&nav.compact),
            vec!["/", "/attendance", "/payments", "/statistics"]
        );
    }

    #[test]
    fn test_teacher_navigation() {
        let nav = navigation_for(UserRole::Teacher);
        assert_eq!(hrefs(&nav.items), vec!["/", "/attendance", "/statistics"]);
        assert_eq!(hrefs(&nav.compact), vec!["/", "/attendance", "/statistics"]);
    }

    #[test]
    fn test_treasurer_navigation() {
        let nav = navigation_for(UserRole::Treasurer);
        assert_eq!(
            hrefs(&nav.items),
            vec!["/", "/attendance", "/payments", "/statistics"]
        );
        assert_eq!(nav.items[2].label, "Tuition");
        assert_eq!(nav.compact, nav.items);
    }
}
