use super::SeaOrmStorage;
use crate::entity::app_users::{ActiveModel, Column, Entity as AppUsers};
use crate::entity::teacher_classes;
use crate::errors::{Result, TutorError};
use crate::models::{
    PaginationInfo,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let model = ActiveModel {
            email: Set(req.email),
            name: Set(req.name),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("创建用户失败: {e}")))?;

        Self::replace_teacher_classes(&txn, result.id, &req.class_ids).await?;
        txn.commit().await?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = AppUsers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取用户（邮箱已规范化为小写）
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = AppUsers::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户，最新创建的在前
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = AppUsers::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Email.contains(&escaped))
                    .add(Column::Name.contains(&escaped)),
            );
        }

        if let Some(ref role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = AppUsers::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let txn = self.db.begin().await?;

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        model
            .update(&txn)
            .await
            .map_err(|e| TutorError::database_operation(format!("更新用户失败: {e}")))?;

        if let Some(ref class_ids) = update.class_ids {
            Self::replace_teacher_classes(&txn, id, class_ids).await?;
        }

        txn.commit().await?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = AppUsers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = AppUsers::find()
            .count(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }

    /// 教师被分配的班级 ID
    pub async fn list_teacher_class_ids_impl(&self, user_id: i64) -> Result<Vec<i64>> {
        let ids: Vec<i64> = teacher_classes::Entity::find()
            .select_only()
            .column(teacher_classes::Column::ClassId)
            .filter(teacher_classes::Column::UserId.eq(user_id))
            .order_by_asc(teacher_classes::Column::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| TutorError::database_operation(format!("查询教师班级失败: {e}")))?;

        Ok(ids)
    }

    /// 先删后插，整体替换教师的班级分配
    async fn replace_teacher_classes<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        class_ids: &[i64],
    ) -> Result<()> {
        teacher_classes::Entity::delete_many()
            .filter(teacher_classes::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| TutorError::database_operation(format!("清除教师班级失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();
        let mut seen = Vec::with_capacity(class_ids.len());
        for &class_id in class_ids {
            if seen.contains(&class_id) {
                continue;
            }
            seen.push(class_id);

            teacher_classes::ActiveModel {
                user_id: Set(user_id),
                class_id: Set(class_id),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(conn)
            .await
            .map_err(|e| TutorError::database_operation(format!("分配教师班级失败: {e}")))?;
        }

        Ok(())
    }
}
