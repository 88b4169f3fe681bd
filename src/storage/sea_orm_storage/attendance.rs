//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceEntity};
use crate::errors::{Result, TutorError};
use crate::models::attendance::{
    entities::{Attendance, AttendanceStatus},
    requests::AttendanceMark,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn get_attendance_by_id_impl(&self, attendance_id: i64) -> Result<Option<Attendance>> {
        let result = AttendanceEntity::find_by_id(attendance_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询考勤失败: {e}")))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn list_class_attendance_on_impl(
        &self,
        class_id: i64,
        date: &str,
    ) -> Result<Vec<Attendance>> {
        self.list_class_attendance_between_impl(class_id, date, date)
            .await
    }

    /// 日期以 YYYY-MM-DD 存储，字符串比较即日期比较
    pub async fn list_class_attendance_between_impl(
        &self,
        class_id: i64,
        from: &str,
        to: &str,
    ) -> Result<Vec<Attendance>> {
        let result = AttendanceEntity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Date.gte(from))
            .filter(Column::Date.lte(to))
            .order_by_asc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询班级考勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendance()).collect())
    }

    pub async fn list_attendance_on_impl(&self, date: &str) -> Result<Vec<Attendance>> {
        let result = AttendanceEntity::find()
            .filter(Column::Date.eq(date))
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询当日考勤失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendance()).collect())
    }

    pub async fn list_present_between_impl(
        &self,
        student_ids: &[i64],
        from: &str,
        to: &str,
    ) -> Result<Vec<Attendance>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = AttendanceEntity::find()
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .filter(Column::Status.eq(AttendanceStatus::PRESENT))
            .filter(Column::Date.gte(from))
            .filter(Column::Date.lte(to))
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询出勤记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_attendance()).collect())
    }

    /// 点名，已有记录则覆盖状态和备注
    pub async fn upsert_attendance_impl(
        &self,
        class_id: i64,
        date: &str,
        marks: Vec<AttendanceMark>,
        marked_by: i64,
    ) -> Result<Vec<Attendance>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;
        let mut saved = Vec::with_capacity(marks.len());

        for mark in marks {
            let existing = AttendanceEntity::find()
                .filter(Column::StudentId.eq(mark.student_id))
                .filter(Column::ClassId.eq(class_id))
                .filter(Column::Date.eq(date))
                .one(&txn)
                .await
                .map_err(|e| TutorError::database_operation(format!("查询考勤失败: {e}")))?;

            let model = match existing {
                Some(row) => {
                    let mut active: ActiveModel = row.into();
                    active.status = Set(mark.status.to_string());
                    active.note = Set(mark.note);
                    active.marked_by = Set(Some(marked_by));
                    active.updated_at = Set(now);
                    active.update(&txn).await.map_err(|e| {
                        TutorError::database_operation(format!("更新考勤失败: {e}"))
                    })?
                }
                None => ActiveModel {
                    student_id: Set(mark.student_id),
                    class_id: Set(class_id),
                    date: Set(date.to_string()),
                    status: Set(mark.status.to_string()),
                    note: Set(mark.note),
                    marked_by: Set(Some(marked_by)),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|e| TutorError::database_operation(format!("写入考勤失败: {e}")))?,
            };

            saved.push(model.into_attendance());
        }

        txn.commit().await?;
        Ok(saved)
    }

    pub async fn delete_attendance_impl(&self, attendance_id: i64) -> Result<bool> {
        let result = AttendanceEntity::delete_by_id(attendance_id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("删除考勤失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
