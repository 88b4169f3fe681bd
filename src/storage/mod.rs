use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 选课集合：(班级ID, 是否主班级)
pub type EnrollmentSet = Vec<(i64, bool)>;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已是哈希值），教师同时写入班级分配
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息；class_ids 为 Some 时整体替换班级分配
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 教师被分配的班级
    async fn list_teacher_class_ids(&self, user_id: i64) -> Result<Vec<i64>>;

    /// 班级管理方法
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    async fn get_classes_by_ids(&self, class_ids: &[i64]) -> Result<Vec<Class>>;
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级（级联删除选课、考勤、学费和分配）
    async fn delete_class(&self, class_id: i64) -> Result<bool>;
    async fn count_classes(&self) -> Result<u64>;

    /// 学生管理方法
    async fn create_student(
        &self,
        fields: StudentFields,
        enrollments: EnrollmentSet,
    ) -> Result<Student>;
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    async fn get_students_by_ids(&self, student_ids: &[i64]) -> Result<Vec<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // enrollments 为 Some 时整体替换选课
    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
        enrollments: Option<EnrollmentSet>,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, student_id: i64) -> Result<bool>;
    async fn count_students(&self) -> Result<u64>;
    // 选课记录
    async fn list_enrollments(&self, student_ids: &[i64]) -> Result<Vec<StudentEnrollment>>;
    // 班级全部在读学生（任意选课），按姓名排序
    async fn list_class_students(&self, class_id: i64) -> Result<Vec<Student>>;
    // 以该班级为主班级的学生，按姓名排序
    async fn list_primary_students(&self, class_id: i64) -> Result<Vec<Student>>;
    // 所有学生主班级学费之和
    async fn sum_primary_tuition(&self) -> Result<i64>;

    /// 考勤管理方法
    async fn get_attendance_by_id(&self, attendance_id: i64) -> Result<Option<Attendance>>;
    // 某班级某天的考勤
    async fn list_class_attendance_on(&self, class_id: i64, date: &str) -> Result<Vec<Attendance>>;
    // 某班级日期区间内的考勤（闭区间）
    async fn list_class_attendance_between(
        &self,
        class_id: i64,
        from: &str,
        to: &str,
    ) -> Result<Vec<Attendance>>;
    // 某天全部考勤
    async fn list_attendance_on(&self, date: &str) -> Result<Vec<Attendance>>;
    // 一组学生在日期区间内的出勤记录（闭区间，仅 present）
    async fn list_present_between(
        &self,
        student_ids: &[i64],
        from: &str,
        to: &str,
    ) -> Result<Vec<Attendance>>;
    // 点名：同一学生同一班级同一天重复点名时覆盖
    async fn upsert_attendance(
        &self,
        class_id: i64,
        date: &str,
        marks: Vec<AttendanceMark>,
        marked_by: i64,
    ) -> Result<Vec<Attendance>>;
    async fn delete_attendance(&self, attendance_id: i64) -> Result<bool>;

    /// 学费管理方法
    async fn get_payment_by_id(&self, payment_id: i64) -> Result<Option<Payment>>;
    // 按条件列出学费记录（月份倒序）
    async fn list_payments(&self, filter: PaymentFilter) -> Result<Vec<Payment>>;
    // 同一学生同一班级同一月份只保留一条
    async fn upsert_payment(&self, payment: PaymentUpsert) -> Result<Payment>;
    async fn delete_payment(&self, payment_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
