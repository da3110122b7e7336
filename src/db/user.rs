use crate::db::portal_db::PortalDb;
use crate::types::{error::AppError, user::DBUserCreate};
use crate::utils::token;
use chrono::Utc;
use entity::group::{Column as GroupColumn, Entity as Group};
use entity::role::Role;
use entity::user::{ActiveModel as UserActive, Column, Entity as User, Model as UserModel};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

/// Writes (or clears) the display name of a group's leader.
async fn set_leader_name<C: ConnectionTrait>(conn: &C, group_id: Uuid, name: Option<String>) -> Result<(), DbErr> {
    Group::update_many()
        .col_expr(GroupColumn::LeaderName, Expr::value(name))
        .filter(GroupColumn::Id.eq(group_id))
        .exec(conn)
        .await?;
    Ok(())
}

impl PortalDb {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User not found".into()))?)
    }

    /// Emails are stored lower-case, so callers pass a normalized address.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::Email.eq(email))
            .one(&self.database_connection)
            .await?)
    }

    pub async fn create_user(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::AlreadyExists);
        }
        let user = UserActive {
            id: Set(token::new_id()),
            email: Set(payload.email),
            name: Set(payload.name),
            role: Set(payload.role),
            password_hash: Set(payload.password_hash),
            group_id: Set(payload.group_id),
            is_approved: Set(payload.is_approved),
            created_at: Set(Utc::now()),
        };
        Ok(user.insert(&self.database_connection).await?)
    }

    pub async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn list_users_in_group(&self, group_id: Uuid) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::GroupId.eq(group_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }

    /// Unapproved members of a group, minus whoever is asking.
    pub async fn list_pending_in_group(&self, group_id: Uuid, exclude: Uuid) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::GroupId.eq(group_id))
            .filter(Column::IsApproved.eq(false))
            .filter(Column::Role.eq(Role::Member))
            .filter(Column::Id.ne(exclude))
            .order_by_asc(Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn find_leader_of_group(&self, group_id: Uuid) -> Result<Option<UserModel>, AppError> {
        Ok(User::find()
            .filter(Column::GroupId.eq(group_id))
            .filter(Column::Role.eq(Role::Leader))
            .one(&self.database_connection)
            .await?)
    }

    pub async fn count_members_in_group(&self, group_id: Uuid) -> Result<u64, AppError> {
        Ok(User::find()
            .filter(Column::GroupId.eq(group_id))
            .count(&self.database_connection)
            .await?)
    }

    pub async fn count_approved_in_group(&self, group_id: Uuid) -> Result<u64, AppError> {
        Ok(User::find()
            .filter(Column::GroupId.eq(group_id))
            .filter(Column::IsApproved.eq(true))
            .count(&self.database_connection)
            .await?)
    }

    /// Name/email edit. `email` must already be normalized.
    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<UserModel, AppError> {
        let current = self.get_user_by_id(&user_id).await?;
        if name.is_none() && email.is_none() {
            return Ok(current);
        }
        if let Some(email) = &email {
            if *email != current.email && self.user_exists_by_email(email).await? {
                return Err(AppError::AlreadyExists);
            }
        }

        let txn = self.database_connection.begin().await?;
        let was_leader = current.role == Role::Leader;
        let group_id = current.group_id;
        let mut am: UserActive = current.into();
        if let Some(name) = name.clone() {
            am.name = Set(name);
        }
        if let Some(email) = email {
            am.email = Set(email);
        }
        let updated = am.update(&txn).await?;

        // keep the group's leader label in step with a renamed leader
        if let (true, Some(group_id), Some(name)) = (was_leader, group_id, name) {
            set_leader_name(&txn, group_id, Some(name)).await?;
        }
        txn.commit().await?;
        Ok(updated)
    }

    pub async fn approve_user(&self, user_id: Uuid) -> Result<UserModel, AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.is_approved = Set(true);
        Ok(am.update(&self.database_connection).await?)
    }

    /// Removes the account. A removed leader leaves their group without a leader label.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<UserModel, AppError> {
        let txn = self.database_connection.begin().await?;
        let user = User::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User not found".into()))?;

        if let (Role::Leader, Some(group_id)) = (user.role, user.group_id) {
            set_leader_name(&txn, group_id, None).await?;
        }
        User::delete_by_id(user_id).exec(&txn).await?;
        txn.commit().await?;
        Ok(user)
    }

    /// Applies a role change that already passed the policy checks, keeping
    /// `groups.leader_name` in sync with who actually leads each group.
    pub async fn apply_role_change(
        &self,
        target: UserModel,
        role: Role,
        group_id: Option<Uuid>,
    ) -> Result<UserModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let leaves_leadership = target.role == Role::Leader && (role != Role::Leader || group_id != target.group_id);
        if let (true, Some(old_group)) = (leaves_leadership, target.group_id) {
            set_leader_name(&txn, old_group, None).await?;
        }

        let name = target.name.clone();
        let mut am: UserActive = target.into();
        am.role = Set(role);
        am.group_id = Set(group_id);
        let updated = am.update(&txn).await?;

        if let (Role::Leader, Some(group_id)) = (role, group_id) {
            set_leader_name(&txn, group_id, Some(name)).await?;
        }

        txn.commit().await?;
        Ok(updated)
    }

    /// Team switch: approval starts over and leadership does not travel along.
    pub async fn move_user_to_group(&self, target: UserModel, group_id: Option<Uuid>) -> Result<UserModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let mut am: UserActive = target.clone().into();
        if target.role == Role::Leader {
            if let Some(old_group) = target.group_id {
                set_leader_name(&txn, old_group, None).await?;
            }
            am.role = Set(Role::Member);
        }
        am.group_id = Set(group_id);
        am.is_approved = Set(false);
        let updated = am.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }
}
