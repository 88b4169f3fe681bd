//! 学生与选课存储操作

use super::SeaOrmStorage;
use crate::entity::classes;
use crate::entity::student_classes;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, TutorError};
use crate::models::{
    PaginationInfo,
    students::{
        entities::{Student, StudentEnrollment},
        requests::{StudentFields, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::storage::EnrollmentSet;
use crate::utils::escape_like_pattern;
use crate::utils::validate::normalize_optional;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生并写入选课
    pub async fn create_student_impl(
        &self,
        fields: StudentFields,
        enrollments: EnrollmentSet,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let model = ActiveModel {
            name: Set(fields.name),
            class_id: Set(primary_of(&enrollments)),
            phone: Set(fields.phone),
            parent_name: Set(fields.parent_name),
            parent_phone: Set(fields.parent_phone),
            note: Set(fields.note),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("创建学生失败: {e}")))?;

        Self::replace_enrollments(&txn, result.id, &enrollments).await?;
        txn.commit().await?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 批量获取学生
    pub async fn get_students_by_ids_impl(&self, student_ids: &[i64]) -> Result<Vec<Student>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = Students::find()
            .filter(Column::Id.is_in(student_ids.iter().copied()))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    /// 分页列出学生，按姓名排序
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Students::find();

        // 任意选课班级
        if let Some(class_id) = query.class_id {
            select = select
                .join(
                    JoinType::InnerJoin,
                    crate::entity::students::Relation::StudentClasses.def(),
                )
                .filter(student_classes::Column::ClassId.eq(class_id));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_asc(Column::Name).order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
        enrollments: Option<EnrollmentSet>,
    ) -> Result<Option<Student>> {
        let existing = self.get_student_by_id_impl(student_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let mut model = ActiveModel {
            id: Set(student_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        // 联系方式：空字符串表示清空
        if let Some(phone) = update.phone {
            model.phone = Set(normalize_optional(Some(phone)));
        }

        if let Some(parent_name) = update.parent_name {
            model.parent_name = Set(normalize_optional(Some(parent_name)));
        }

        if let Some(parent_phone) = update.parent_phone {
            model.parent_phone = Set(normalize_optional(Some(parent_phone)));
        }

        if let Some(note) = update.note {
            model.note = Set(normalize_optional(Some(note)));
        }

        if let Some(ref set) = enrollments {
            model.class_id = Set(primary_of(set));
        }

        model
            .update(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("更新学生失败: {e}")))?;

        if let Some(ref set) = enrollments {
            Self::replace_enrollments(&txn, student_id, set).await?;
        }

        txn.commit().await?;

        self.get_student_by_id_impl(student_id).await
    }

    /// 删除学生（级联删除选课、考勤、学费）
    pub async fn delete_student_impl(&self, student_id: i64) -> Result<bool> {
        let result = Students::delete_by_id(student_id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计学生数量
    pub async fn count_students_impl(&self) -> Result<u64> {
        let count = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("统计学生数量失败: {e}")))?;

        Ok(count)
    }

    /// 一组学生的全部选课记录
    pub async fn list_enrollments_impl(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<StudentEnrollment>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = student_classes::Entity::find()
            .filter(student_classes::Column::StudentId.is_in(student_ids.iter().copied()))
            .order_by_asc(student_classes::Column::StudentId)
            .order_by_desc(student_classes::Column::IsPrimary)
            .order_by_asc(student_classes::Column::ClassId)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 班级全部在读学生
    pub async fn list_class_students_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_enrolled_students(class_id, false).await
    }

    /// 以该班级为主班级的学生
    pub async fn list_primary_students_impl(&self, class_id: i64) -> Result<Vec<Student>> {
        self.list_enrolled_students(class_id, true).await
    }

    async fn list_enrolled_students(
        &self,
        class_id: i64,
        primary_only: bool,
    ) -> Result<Vec<Student>> {
        let mut select = Students::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::students::Relation::StudentClasses.def(),
            )
            .filter(student_classes::Column::ClassId.eq(class_id));

        if primary_only {
            select = select.filter(student_classes::Column::IsPrimary.eq(true));
        }

        let result = select
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询班级学生失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_student()).collect())
    }

    /// 所有学生主班级学费之和；没有主班级的学生计 0
    pub async fn sum_primary_tuition_impl(&self) -> Result<i64> {
        let rows = Students::find()
            .find_also_related(classes::Entity)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("统计应收学费失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(_, class)| class.map(|c| c.tuition).unwrap_or(0))
            .sum())
    }

    /// 先删后插，整体替换学生的选课
    async fn replace_enrollments<C: ConnectionTrait>(
        conn: &C,
        student_id: i64,
        enrollments: &[(i64, bool)],
    ) -> Result<()> {
        student_classes::Entity::delete_many()
            .filter(student_classes::Column::StudentId.eq(student_id))
            .exec(conn)
            .await
            .map_err(|e| TutorError::database_operation(format!("清除选课失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        for &(class_id, is_primary) in enrollments {
            student_classes::ActiveModel {
                student_id: Set(student_id),
                class_id: Set(class_id),
                is_primary: Set(is_primary),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(|e| TutorError::database_operation(format!("写入选课失败: {e}")))?;
        }

        Ok(())
    }
}

fn primary_of(enrollments: &[(i64, bool)]) -> Option<i64> {
    enrollments
        .iter()
        .find(|(_, is_primary)| *is_primary)
        .map(|(class_id, _)| *class_id)
}
