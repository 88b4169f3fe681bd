//! 端到端接口测试：临时 SQLite 数据库 + 完整路由

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{App, http::StatusCode, test, web};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};

use tutor_center::cache::ObjectCache;
use tutor_center::cache::object_cache::MokaCacheWrapper;
use tutor_center::models::classes::requests::CreateClassRequest;
use tutor_center::models::payments::{entities::PaymentStatus, requests::PaymentUpsert};
use tutor_center::models::students::requests::StudentFields;
use tutor_center::models::users::entities::UserRole;
use tutor_center::models::users::requests::CreateUserRequest;
use tutor_center::routes;
use tutor_center::storage::Storage;
use tutor_center::storage::sea_orm_storage::SeaOrmStorage;
use tutor_center::utils::jwt::{JwtUtils, REFRESH_TOKEN_COOKIE};
use tutor_center::utils::month::{current_month, format_date, today};
use tutor_center::utils::password::hash_password;

const ADMIN_EMAIL: &str = "admin@center.test";
const ADMIN_PASSWORD: &str = "Str0ngAdminPass";

struct TestEnv {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    admin_id: i64,
}

async fn setup(name: &str) -> TestEnv {
    let path = std::env::temp_dir().join(format!(
        "tutor_center_{}_{}_{}.db",
        name,
        std::process::id(),
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options.max_connections(4).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::from_connection(db).await.unwrap());

    let admin = storage
        .create_user(CreateUserRequest {
            email: ADMIN_EMAIL.to_string(),
            name: "Administrator".to_string(),
            password: hash_password(ADMIN_PASSWORD).unwrap(),
            role: UserRole::Admin,
            class_ids: vec![],
        })
        .await
        .unwrap();

    let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1000, 60));

    TestEnv {
        storage,
        cache,
        admin_id: admin.id,
    }
}

async fn create_staff(env: &TestEnv, email: &str, role: UserRole, class_ids: Vec<i64>) -> i64 {
    env.storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            name: format!("{role} user"),
            password: hash_password("Staff1Password").unwrap(),
            role,
            class_ids,
        })
        .await
        .unwrap()
        .id
}

async fn create_class(env: &TestEnv, name: &str, tuition: i64) -> i64 {
    env.storage
        .create_class(CreateClassRequest {
            name: name.to_string(),
            subject: None,
            tuition,
            description: None,
        })
        .await
        .unwrap()
        .id
}

fn bearer(user_id: i64, role: UserRole) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user_id, role).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! init_app {
    ($env:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($env.storage.clone()))
                .app_data(web::Data::new($env.cache.clone()))
                .configure(routes::configure_api_routes),
        )
        .await
    };
}

macro_rules! call {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn login_errors_and_success() {
    let env = setup("login").await;
    let app = init_app!(env);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "nobody@center.test", "password": ADMIN_PASSWORD}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2001);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": ADMIN_EMAIL, "password": "Wr0ngPassword"}))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2002);

    // 邮箱大小写与空白不影响登录
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({"email": "  Admin@Center.TEST ", "password": ADMIN_PASSWORD}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["id"], env.admin_id);
    assert_eq!(body["data"]["permissions"].as_array().unwrap().len(), 8);

    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["email"], ADMIN_EMAIL);

    let (status, _) = call!(app, test::TestRequest::get().uri("/api/v1/auth/me"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn permissions_follow_roles() {
    let env = setup("roles").await;
    let app = init_app!(env);

    let teacher_id = create_staff(&env, "teacher@center.test", UserRole::Teacher, vec![]).await;
    let treasurer_id =
        create_staff(&env, "treasurer@center.test", UserRole::Treasurer, vec![]).await;

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/payments")
            .insert_header(bearer(teacher_id, UserRole::Teacher))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1002);

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header(bearer(treasurer_id, UserRole::Treasurer))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/payments")
            .insert_header(bearer(treasurer_id, UserRole::Treasurer))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/auth/navigation")
            .insert_header(bearer(teacher_id, UserRole::Teacher))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn class_attendance_and_tuition_flow() {
    let env = setup("flow").await;
    let app = init_app!(env);
    let admin = bearer(env.admin_id, UserRole::Admin);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/classes")
            .insert_header(admin.clone())
            .set_json(json!({"name": "Math A", "subject": "Math", "tuition": 500000}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let math_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/classes")
            .insert_header(admin.clone())
            .set_json(json!({"name": "Math A", "tuition": 100}))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4001);

    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/classes")
            .insert_header(admin.clone())
            .set_json(json!({"name": "English B", "tuition": 300000}))
    );
    let english_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/students")
            .insert_header(admin.clone())
            .set_json(json!({"name": "An", "primary_class_id": math_id}))
    );
    assert_eq!(status, StatusCode::CREATED);
    let an_id = body["data"]["student"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["enrollments"].as_array().unwrap().len(), 1);

    let (_, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/students")
            .insert_header(admin.clone())
            .set_json(json!({"name": "Binh", "primary_class_id": english_id}))
    );
    let binh_id = body["data"]["student"]["id"].as_i64().unwrap();

    // 教师只能访问被分配的班级
    let teacher_id =
        create_staff(&env, "teacher@center.test", UserRole::Teacher, vec![math_id]).await;
    let teacher = bearer(teacher_id, UserRole::Teacher);
    let date = format_date(today());

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/attendance")
            .insert_header(teacher.clone())
            .set_json(json!({
                "class_id": english_id,
                "date": date,
                "marks": [{"student_id": binh_id, "status": "present"}]
            }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 4006);

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/attendance")
            .insert_header(teacher.clone())
            .set_json(json!({
                "class_id": math_id,
                "date": date,
                "marks": [{"student_id": binh_id, "status": "present"}]
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6000);

    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/attendance")
            .insert_header(teacher.clone())
            .set_json(json!({
                "class_id": math_id,
                "date": date,
                "marks": [{"student_id": an_id, "status": "present"}]
            }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/attendance/sheet?class_id={math_id}"))
            .insert_header(teacher.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["status"], "present");

    // 未缴费时学费按班级学费显示
    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/statistics/sessions?class_id={math_id}"))
            .insert_header(teacher.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["sessions"], 1);
    assert_eq!(body["data"]["items"][0]["tuition"], 500000);
    assert_eq!(body["data"]["items"][0]["status"], "unpaid");

    let month = current_month();
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/payments")
            .insert_header(admin.clone())
            .set_json(json!({
                "student_id": an_id,
                "class_id": math_id,
                "month": month,
                "status": "paid"
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amount"], 500000);
    assert_eq!(body["data"]["paid_date"], date.as_str());

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/payments/sheet?class_id={math_id}&month={month}"))
            .insert_header(admin.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["expected_amount"], 500000);
    assert_eq!(body["data"]["paid_amount"], 500000);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/statistics/dashboard")
            .insert_header(admin.clone())
    );
    assert_eq!(status, StatusCode::OK);
    let dashboard = &body["data"];
    assert_eq!(dashboard["total_classes"], 2);
    assert_eq!(dashboard["total_students"], 2);
    assert_eq!(dashboard["today_attendance"]["present"], 1);
    assert_eq!(dashboard["current_month_payments"]["paid"], 1);
    assert_eq!(dashboard["current_month_payments"]["unpaid"], 1);
    assert_eq!(dashboard["current_month_payments"]["total_amount"], 800000);
    assert_eq!(dashboard["today_payments_total"], 500000);
    assert_eq!(dashboard["today_payments"][0]["student_name"], "An");
}

#[actix_web::test]
async fn user_management_rules() {
    let env = setup("users").await;
    let app = init_app!(env);
    let admin = bearer(env.admin_id, UserRole::Admin);
    let math_id = create_class(&env, "Math A", 500000).await;
    let english_id = create_class(&env, "English B", 300000).await;

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(admin.clone())
            .set_json(json!({
                "email": " Teacher@Center.test ",
                "name": "Lan",
                "password": "Teach3rPass",
                "role": "teacher",
                "class_ids": [math_id]
            }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["email"], "teacher@center.test");
    assert_eq!(body["data"]["class_ids"], json!([math_id]));
    let teacher_id = body["data"]["user"]["id"].as_i64().unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/users")
            .insert_header(admin.clone())
            .set_json(json!({
                "email": "teacher@center.test",
                "name": "Another",
                "password": "Teach3rPass",
                "role": "treasurer"
            }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3001);

    // 给出 class_ids 时整体替换分配
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/users/{teacher_id}"))
            .insert_header(admin.clone())
            .set_json(json!({"class_ids": [english_id]}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["class_ids"], json!([english_id]));

    // 不再是教师时清空分配
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/users/{teacher_id}"))
            .insert_header(admin.clone())
            .set_json(json!({"role": "treasurer"}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["role"], "treasurer");
    assert_eq!(body["data"]["class_ids"], json!([]));
    assert!(env.storage.list_teacher_class_ids(teacher_id).await.unwrap().is_empty());

    let (status, body) = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{}", env.admin_id))
            .insert_header(admin.clone())
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3008);

    let (status, _) = call!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/users/{teacher_id}"))
            .insert_header(admin.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert!(env.storage.get_user_by_id(teacher_id).await.unwrap().is_none());
}

fn enrolled(body: &Value) -> Vec<(i64, bool)> {
    let mut pairs: Vec<(i64, bool)> = body["data"]["enrollments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["class_id"].as_i64().unwrap(),
                e["is_primary"].as_bool().unwrap(),
            )
        })
        .collect();
    pairs.sort();
    pairs
}

#[actix_web::test]
async fn student_enrollment_updates() {
    let env = setup("students").await;
    let app = init_app!(env);
    let admin = bearer(env.admin_id, UserRole::Admin);
    let a = create_class(&env, "Class A", 100).await;
    let b = create_class(&env, "Class B", 200).await;
    let c = create_class(&env, "Class C", 300).await;

    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/students")
            .insert_header(admin.clone())
            .set_json(json!({"name": "Chi", "primary_class_id": a, "class_ids": [b, a]}))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(enrolled(&body), vec![(a, true), (b, false)]);
    let student_id = body["data"]["student"]["id"].as_i64().unwrap();

    // 只改主班级时保留其他选课
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/students/{student_id}"))
            .insert_header(admin.clone())
            .set_json(json!({"primary_class_id": c}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["student"]["class_id"], c);
    assert_eq!(enrolled(&body), vec![(b, false), (c, true)]);

    // 只给 class_ids 时保留主班级并替换其余选课
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/students/{student_id}"))
            .insert_header(admin.clone())
            .set_json(json!({"class_ids": [a]}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(enrolled(&body), vec![(a, false), (c, true)]);

    // 按任意选课过滤
    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/students?class_id={a}"))
            .insert_header(admin.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["id"], student_id);

    let (_, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/students?class_id={b}"))
            .insert_header(admin.clone())
    );
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/v1/students/{student_id}"))
            .insert_header(admin.clone())
            .set_json(json!({"class_ids": [9999]}))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4000);
}

#[actix_web::test]
async fn payment_status_and_sheet_totals() {
    let env = setup("payments").await;
    let app = init_app!(env);
    let admin = bearer(env.admin_id, UserRole::Admin);
    let class_id = create_class(&env, "Physics", 400000).await;
    let student = env
        .storage
        .create_student(
            StudentFields {
                name: "Dung".to_string(),
                ..Default::default()
            },
            vec![(class_id, true)],
        )
        .await
        .unwrap();

    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/payments")
            .insert_header(admin.clone())
            .set_json(json!({
                "student_id": student.id,
                "class_id": class_id,
                "month": "2026-03",
                "status": "paid",
                "paid_date": "2026-03-05"
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["paid_date"], "2026-03-05");

    // 改为未缴时清空缴费日期
    let (status, body) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/payments")
            .insert_header(admin.clone())
            .set_json(json!({
                "student_id": student.id,
                "class_id": class_id,
                "month": "2026-03",
                "status": "unpaid",
                "paid_date": "2026-03-05"
            }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "unpaid");
    assert!(body["data"]["paid_date"].is_null());

    // 金额为 0 的已缴记录：显示班级学费，已缴合计按原值
    let (status, _) = call!(
        app,
        test::TestRequest::put()
            .uri("/api/v1/payments")
            .insert_header(admin.clone())
            .set_json(json!({
                "student_id": student.id,
                "class_id": class_id,
                "month": "2026-04",
                "amount": 0,
                "status": "paid",
                "paid_date": "2026-04-02"
            }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/payments/sheet?class_id={class_id}&month=2026-04"))
            .insert_header(admin.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["amount"], 400000);
    assert_eq!(body["data"]["expected_amount"], 400000);
    assert_eq!(body["data"]["paid_amount"], 0);

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/payments?student_id={}&status=unpaid", student.id))
            .insert_header(admin.clone())
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["items"][0]["month"], "2026-03");
}

#[actix_web::test]
async fn dashboard_debts_and_revenue_follow_billing_window() {
    let env = setup("billing").await;
    let app = init_app!(env);
    let admin = bearer(env.admin_id, UserRole::Admin);
    let class_id = create_class(&env, "Chemistry", 250000).await;
    let student = env
        .storage
        .create_student(
            StudentFields {
                name: "Giang".to_string(),
                ..Default::default()
            },
            vec![(class_id, true)],
        )
        .await
        .unwrap();

    let current = current_month();
    let records = [
        ("2025-11", PaymentStatus::Paid, Some("2025-11-03")),
        ("2025-12", PaymentStatus::Unpaid, None),
        ("2026-01", PaymentStatus::Unpaid, None),
        ("2026-02", PaymentStatus::Paid, Some("2026-02-10")),
        (current.as_str(), PaymentStatus::Unpaid, None),
    ];
    for (month, status, paid_date) in records {
        env.storage
            .upsert_payment(PaymentUpsert {
                student_id: student.id,
                class_id,
                month: month.to_string(),
                amount: 250000,
                status,
                paid_date: paid_date.map(str::to_string),
                note: None,
            })
            .await
            .unwrap();
    }

    let (status, body) = call!(
        app,
        test::TestRequest::get()
            .uri("/api/v1/statistics/dashboard")
            .insert_header(admin.clone())
    );
    assert_eq!(status, StatusCode::OK);
    let dashboard = &body["data"];

    // 欠费：起始月份（含）到当前月份（不含）
    let debt_months: Vec<&str> = dashboard["debts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["month"].as_str().unwrap())
        .collect();
    if current.as_str() > "2026-01" {
        assert_eq!(debt_months, vec!["2026-01"]);
        assert_eq!(dashboard["debts_total"], 250000);
        assert_eq!(dashboard["debts"][0]["student_name"], "Giang");
        assert_eq!(dashboard["debts"][0]["class_name"], "Chemistry");
    } else {
        assert!(debt_months.is_empty());
    }

    // 收入只统计起始月份之后的已缴记录
    let revenue = dashboard["yearly_revenue"].as_array().unwrap();
    assert_eq!(revenue.len(), 1);
    assert_eq!(revenue[0]["year"], "2026");
    assert_eq!(revenue[0]["total_amount"], 250000);
    assert_eq!(
        revenue[0]["monthly_breakdown"],
        json!([{"month": "2026-02", "amount": 250000}])
    );
}

#[actix_web::test]
async fn refresh_and_logout_cookies() {
    let env = setup("refresh").await;
    let app = init_app!(env);

    // 角色以数据库为准，不取旧令牌中的角色
    let teacher_id = create_staff(&env, "teacher@center.test", UserRole::Teacher, vec![]).await;
    let refresh = JwtUtils::generate_refresh_token(teacher_id, UserRole::Admin, None).unwrap();
    let (status, body) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, refresh))
    );
    assert_eq!(status, StatusCode::OK);
    let access = body["data"]["access_token"].as_str().unwrap();
    let claims = JwtUtils::verify_access_token(access).unwrap();
    assert_eq!(claims.user_id(), Some(teacher_id));
    assert_eq!(claims.role, UserRole::Teacher);

    // 用户已删除时拒绝刷新并清除 cookie
    env.storage.delete_user(teacher_id).await.unwrap();
    let refresh = JwtUtils::generate_refresh_token(teacher_id, UserRole::Teacher, None).unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, refresh))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
        .unwrap();
    assert_eq!(cleared.value(), "");

    // access token 不能当 refresh token 用
    let access = JwtUtils::generate_access_token(env.admin_id, UserRole::Admin).unwrap();
    let (status, _) = call!(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .cookie(Cookie::new(REFRESH_TOKEN_COOKIE, access))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call!(app, test::TestRequest::post().uri("/api/v1/auth/refresh"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/v1/auth/logout").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
        .unwrap();
    assert_eq!(cleared.value(), "");
}

#[actix_web::test]
async fn missing_class_is_not_found() {
    let env = setup("missing").await;
    let app = init_app!(env);
    let admin = bearer(env.admin_id, UserRole::Admin);

    for uri in [
        "/api/v1/attendance/sheet?class_id=9999",
        "/api/v1/attendance?class_id=9999",
        "/api/v1/statistics/sessions?class_id=9999",
        "/api/v1/payments/sheet?class_id=9999",
    ] {
        let (status, body) = call!(
            app,
            test::TestRequest::get().uri(uri).insert_header(admin.clone())
        );
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["code"], 4000, "{uri}");
    }
}
