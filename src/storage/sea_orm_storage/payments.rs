//! 学费存储操作

use super::SeaOrmStorage;
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::errors::{Result, TutorError};
use crate::models::payments::{
    entities::Payment,
    requests::{PaymentFilter, PaymentUpsert},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn get_payment_by_id_impl(&self, payment_id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(payment_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学费记录失败: {e}")))?;

        Ok(result.map(|m| m.into_payment()))
    }

    /// 按条件列出学费记录，月份倒序
    pub async fn list_payments_impl(&self, filter: PaymentFilter) -> Result<Vec<Payment>> {
        let mut select = Payments::find();

        if let Some(student_id) = filter.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(class_id) = filter.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(month) = filter.month {
            select = select.filter(Column::Month.eq(month));
        }

        // YYYY-MM 的字典序即时间顺序
        if let Some(month_from) = filter.month_from {
            select = select.filter(Column::Month.gte(month_from));
        }

        if let Some(month_before) = filter.month_before {
            select = select.filter(Column::Month.lt(month_before));
        }

        if let Some(status) = filter.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(paid_date) = filter.paid_date {
            select = select.filter(Column::PaidDate.eq(paid_date));
        }

        let result = select
            .order_by_desc(Column::Month)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学费记录失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_payment()).collect())
    }

    /// 登记学费，已有记录则覆盖
    pub async fn upsert_payment_impl(&self, payment: PaymentUpsert) -> Result<Payment> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let existing = Payments::find()
            .filter(Column::StudentId.eq(payment.student_id))
            .filter(Column::ClassId.eq(payment.class_id))
            .filter(Column::Month.eq(payment.month.as_str()))
            .one(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询学费记录失败: {e}")))?;

        let model = match existing {
            Some(row) => {
                let mut active: ActiveModel = row.into();
                active.amount = Set(payment.amount);
                active.status = Set(payment.status.to_string());
                active.paid_date = Set(payment.paid_date);
                active.note = Set(payment.note);
                active.updated_at = Set(now);
                active
                    .update(&txn)
                    .await
                    .map_err(|e| TutorError::database_operation(format!("更新学费记录失败: {e}")))?
            }
            None => ActiveModel {
                student_id: Set(payment.student_id),
                class_id: Set(payment.class_id),
                month: Set(payment.month),
                amount: Set(payment.amount),
                status: Set(payment.status.to_string()),
                paid_date: Set(payment.paid_date),
                note: Set(payment.note),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("写入学费记录失败: {e}")))?,
        };

        txn.commit().await?;
        Ok(model.into_payment())
    }

    pub async fn delete_payment_impl(&self, payment_id: i64) -> Result<bool> {
        let result = Payments::delete_by_id(payment_id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("删除学费记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
