//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod classes;
mod payments;
mod students;
mod users;

use crate::config::AppConfig;
use crate::errors::{TutorError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 使用已建立的连接创建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| TutorError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TutorError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TutorError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TutorError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TutorError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    attendance::{entities::Attendance, requests::AttendanceMark},
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    payments::{
        entities::Payment,
        requests::{PaymentFilter, PaymentUpsert},
    },
    students::{
        entities::{Student, StudentEnrollment},
        requests::{StudentFields, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::{EnrollmentSet, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_teacher_class_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.list_teacher_class_ids_impl(user_id).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_classes_by_ids(&self, class_ids: &[i64]) -> Result<Vec<Class>> {
        self.get_classes_by_ids_impl(class_ids).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    async fn count_classes(&self) -> Result<u64> {
        self.count_classes_impl().await
    }

    // 学生模块
    async fn create_student(
        &self,
        fields: StudentFields,
        enrollments: EnrollmentSet,
    ) -> Result<Student> {
        self.create_student_impl(fields, enrollments).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_students_by_ids(&self, student_ids: &[i64]) -> Result<Vec<Student>> {
        self.get_students_by_ids_impl(student_ids).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
        enrollments: Option<EnrollmentSet>,
    ) -> Result<Option<Student>> {
        self.update_student_impl(student_id, update, enrollments)
            .await
    }

    async fn delete_student(&self, student_id: i64) -> Result<bool> {
        self.delete_student_impl(student_id).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    async fn list_enrollments(&self, student_ids: &[i64]) -> Result<Vec<StudentEnrollment>> {
        self.list_enrollments_impl(student_ids).await
    }

    async fn list_class_students(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_class_students_impl(class_id).await
    }

    async fn list_primary_students(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_primary_students_impl(class_id).await
    }

    async fn sum_primary_tuition(&self) -> Result<i64> {
        self.sum_primary_tuition_impl().await
    }

    // 考勤模块
    async fn get_attendance_by_id(&self, attendance_id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(attendance_id).await
    }

    async fn list_class_attendance_on(&self, class_id: i64, date: &str) -> Result<Vec<Attendance>> {
        self.list_class_attendance_on_impl(class_id, date).await
    }

    async fn list_class_attendance_between(
        &self,
        class_id: i64,
        from: &str,
        to: &str,
    ) -> Result<Vec<Attendance>> {
        self.list_class_attendance_between_impl(class_id, from, to)
            .await
    }

    async fn list_attendance_on(&self, date: &str) -> Result<Vec<Attendance>> {
        self.list_attendance_on_impl(date).await
    }

    async fn list_present_between(
        &self,
        student_ids: &[i64],
        from: &str,
        to: &str,
    ) -> Result<Vec<Attendance>> {
        self.list_present_between_impl(student_ids, from, to).await
    }

    async fn upsert_attendance(
        &self,
        class_id: i64,
        date: &str,
        marks: Vec<AttendanceMark>,
        marked_by: i64,
    ) -> Result<Vec<Attendance>> {
        self.upsert_attendance_impl(class_id, date, marks, marked_by)
            .await
    }

    async fn delete_attendance(&self, attendance_id: i64) -> Result<bool> {
        self.delete_attendance_impl(attendance_id).await
    }

    // 学费模块
    async fn get_payment_by_id(&self, payment_id: i64) -> Result<Option<Payment>> {
        self.get_payment_by_id_impl(payment_id).await
    }

    async fn list_payments(&self, filter: PaymentFilter) -> Result<Vec<Payment>> {
        self.list_payments_impl(filter).await
    }

    async fn upsert_payment(&self, payment: PaymentUpsert) -> Result<Payment> {
        self.upsert_payment_impl(payment).await
    }

    async fn delete_payment(&self, payment_id: i64) -> Result<bool> {
        self.delete_payment_impl(payment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::SeaOrmStorage;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("tutor_center.db").unwrap(),
            "sqlite://tutor_center.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/tutor").unwrap(),
            "postgres://u:p@localhost/tutor"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
